//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request attempt fails:
//!     → retries.rs (retryable? attempts left? jittered backoff delay)
//!     → next attempt asks the pool for a connection, which lands on the
//!       next address in the rotation
//! ```
//!
//! # Design Decisions
//! - Only connection-establishment failures are retried; the request was
//!   never written, so a replay is safe for any method
//! - No per-address failover inside a single attempt; rotating to the
//!   next address is what the retry itself achieves
//! - Jittered backoff prevents synchronized retry bursts

pub mod retries;

pub use retries::RetryPolicy;
