//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use client_balancer::config::ClientConfig;

/// Handle to a running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Number of connections the backend has accepted. With
    /// `Connection: close` responses this equals the number of requests
    /// it served.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a mock backend that answers every request with a fixed body and
/// closes the connection, so each request forces a fresh dial.
pub async fn start_mock_backend(addr: SocketAddr, body: &'static str) -> MockBackend {
    let listener = TcpListener::bind(addr).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(async move {
                        // Read the request head before answering.
                        let mut buf = [0u8; 4096];
                        let mut seen: Vec<u8> = Vec::new();
                        loop {
                            match socket.read(&mut buf).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    seen.extend_from_slice(&buf[..n]);
                                    if seen.windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                                Err(_) => break,
                            }
                        }

                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, hits }
}

/// Client configuration pointed at `url`, hardened for test stability.
#[allow(dead_code)]
pub fn config_for(url: &str) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.endpoint.url = url.to_string();
    config.retries.enabled = false;
    config.timeouts.connect_secs = 2;
    config.timeouts.request_secs = 5;
    config
}
