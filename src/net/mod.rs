//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Configured endpoint URL
//!     → endpoint.rs (parse host/port/scheme once)
//!     → dial.rs (TCP connect to one literal address, connect timeout)
//!     → tls.rs (optional handshake, SNI = configured hostname)
//!     → stream.rs (plain or TLS stream handed to the pool)
//! ```
//!
//! # Design Decisions
//! - Dialing takes a literal address; nothing in this layer resolves names
//! - TLS identity checks always target the configured hostname, never the
//!   dialed address
//! - Connect failures carry the attempted address for diagnostics

pub mod dial;
pub mod endpoint;
pub mod stream;
pub mod tls;

pub use dial::ConnectError;
pub use endpoint::{Endpoint, EndpointError, Scheme};
pub use stream::EndpointStream;
