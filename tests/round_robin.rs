//! Round-robin distribution across real backends.

mod common;

use std::net::{IpAddr, SocketAddr};

use client_balancer::client::{attach_with, EndpointClient};
use client_balancer::resolve::AddressSet;

fn address_set(addresses: &[&str]) -> AddressSet {
    addresses
        .iter()
        .map(|s| s.parse::<IpAddr>().unwrap())
        .collect()
}

#[tokio::test]
async fn test_requests_rotate_across_backends() {
    // Two loopback addresses sharing one port stand in for a hostname
    // with two A records.
    let first = common::start_mock_backend("127.0.0.1:0".parse().unwrap(), "one").await;
    let port = first.addr.port();
    let second = common::start_mock_backend(
        SocketAddr::new("127.0.0.2".parse().unwrap(), port),
        "two",
    )
    .await;

    let config = common::config_for(&format!("http://127.0.0.1:{port}"));
    let mut client = EndpointClient::new(config).unwrap();
    attach_with(&mut client, address_set(&["127.0.0.1", "127.0.0.2"]));
    assert!(client.is_load_balanced());

    for _ in 0..6 {
        let response = client.get("/").await.unwrap();
        assert_eq!(response.status(), 200);
    }

    // Every response closed its connection, so each request dialed anew
    // and the rotation split the load exactly in half.
    assert_eq!(first.hits(), 3);
    assert_eq!(second.hits(), 3);
}

#[tokio::test]
async fn test_retry_lands_on_next_address() {
    let backend = common::start_mock_backend("127.0.0.1:0".parse().unwrap(), "alive").await;
    let port = backend.addr.port();

    // 127.0.0.3 has no listener on this port, so the first attempt is
    // refused and the retry rotates to the live address.
    let mut config = common::config_for(&format!("http://127.0.0.1:{port}"));
    config.retries.enabled = true;
    config.retries.max_attempts = 2;
    config.retries.base_delay_ms = 10;

    let mut client = EndpointClient::new(config).unwrap();
    attach_with(&mut client, address_set(&["127.0.0.3", "127.0.0.1"]));

    let response = client.get("/").await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn test_exhausted_retries_surface_the_connect_failure() {
    // Find a port nobody is listening on.
    let probe = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = probe.local_addr().unwrap();
    drop(probe);

    let mut config = common::config_for(&format!("http://127.0.0.1:{}", dead.port()));
    config.retries.enabled = true;
    config.retries.max_attempts = 2;
    config.retries.base_delay_ms = 10;

    let mut client = EndpointClient::new(config).unwrap();
    attach_with(&mut client, address_set(&["127.0.0.1"]));

    assert!(client.get("/").await.is_err());
}
