//! Endpoint address resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint hostname
//!     → resolver.rs (one-shot lookup, all address families)
//!     → address_set.rs (de-duplicate, keep first-seen order)
//!     → AddressSet handed to the attachment path
//! ```
//!
//! # Design Decisions
//! - Resolution happens exactly once, at attachment time; the set never
//!   refreshes afterwards
//! - Failure is reported as an empty set, never as an error; the caller
//!   decides whether an empty set is fatal
//! - Address-literal hostnames skip DNS entirely

pub mod address_set;
pub mod resolver;

pub use address_set::AddressSet;
pub use resolver::resolve_addresses;
