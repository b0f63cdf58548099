//! Round-robin address selection.
//!
//! # Data Flow
//! ```text
//! AddressSet (non-empty, fixed at attachment)
//!     → cycle.rs (atomic cursor over an immutable slice)
//!     → next() called once per new physical connection
//! ```
//!
//! # Design Decisions
//! - The cursor is the only shared mutable state in the crate; a single
//!   atomic fetch_add makes advance-and-read one operation
//! - No health filtering, weighting or randomization; the global sequence
//!   is the plain cyclic order
//! - One cycle belongs to exactly one connector and is rebuilt, never
//!   reset

pub mod cycle;

pub use cycle::AddressCycle;
