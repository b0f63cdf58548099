//! One-shot hostname resolution.

use std::net::IpAddr;

use tokio::net;

use crate::resolve::AddressSet;

/// Resolve `host` into the set of addresses it currently points at.
///
/// Every distinct address across all families is collected in first-seen
/// order. Resolution failure is not an error from the caller's point of
/// view: it yields an empty set, logged at warn level. Hostnames that are
/// already address literals short-circuit without touching DNS.
pub async fn resolve_addresses(host: &str, port: u16) -> AddressSet {
    if let Ok(literal) = host.parse::<IpAddr>() {
        tracing::debug!(%host, "endpoint host is an address literal, skipping dns");
        return std::iter::once(literal).collect();
    }

    match net::lookup_host((host, port)).await {
        Ok(addresses) => {
            let set: AddressSet = addresses.map(|addr| addr.ip()).collect();
            if set.is_empty() {
                tracing::warn!(%host, "hostname resolved to no addresses");
            } else {
                tracing::info!(%host, addresses = ?set.as_slice(), "resolved endpoint addresses");
            }
            set
        }
        Err(error) => {
            tracing::warn!(%host, %error, "could not resolve hostname");
            AddressSet::default()
        }
    }
}
