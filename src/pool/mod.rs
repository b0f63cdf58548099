//! Load-balanced connection pooling.
//!
//! # Data Flow
//! ```text
//! Request needs a connection
//!     → hyper-util legacy pool (reuse idle connection if available)
//!     → pool miss: connector.rs (pick next cycle address, dial pinned,
//!       wrap TLS)
//!     → client.rs built the pool with the configured size and idle
//!       timeout
//! ```
//!
//! # Design Decisions
//! - Exactly one extension point is overridden: creating a new physical
//!   connection. Reuse, idle eviction and pool sizing stay with the
//!   underlying pool
//! - A failed dial propagates as an ordinary connection error; selecting
//!   a different address is left to the outer retry policy
//! - The unattached strategy resolves per connection, which is the stock
//!   behavior soft-fail preserves

pub mod client;
pub mod connector;

pub use client::{build_pool, PoolingClient};
pub use connector::EndpointConnector;
