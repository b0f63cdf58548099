//! Infinite cyclic iteration over a fixed address set.

use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::resolve::AddressSet;

/// Unbounded round-robin producer over a non-empty address set.
///
/// `next()` hands out element 0, 1, …, n-1 and wraps, indefinitely. The
/// cursor advance and the read happen in one atomic step, so concurrent
/// callers collectively observe the cyclic sequence with no address
/// skipped or handed out twice out of turn.
#[derive(Debug)]
pub struct AddressCycle {
    addresses: Box<[IpAddr]>,
    cursor: AtomicUsize,
}

impl AddressCycle {
    /// Build a cycle over `addresses`.
    ///
    /// Panics if the set is empty. Callers check emptiness before
    /// constructing; an empty cycle here is a bug, not a runtime
    /// condition.
    pub fn new(addresses: AddressSet) -> Self {
        assert!(
            !addresses.is_empty(),
            "an address cycle requires at least one address"
        );
        Self {
            addresses: addresses.into_boxed_slice(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of distinct addresses in the rotation.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// The next address in cyclic order.
    pub fn next(&self) -> IpAddr {
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.addresses[slot % self.addresses.len()]
    }
}
