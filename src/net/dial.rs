//! Address-pinned TCP dialing.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time;

/// Failure to establish one physical connection.
///
/// Dial-phase variants name the attempted address so a refused or
/// timed-out backend is distinguishable from a hostname that never
/// resolved.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("connect to {addr} timed out after {timeout:?}")]
    Timeout { addr: SocketAddr, timeout: Duration },

    #[error("connect to {addr} failed: {source}")]
    Dial {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("tls handshake with {addr} for {server_name} failed: {source}")]
    Tls {
        addr: SocketAddr,
        server_name: String,
        #[source]
        source: io::Error,
    },

    #[error("{host} is not a valid tls server name")]
    InvalidServerName { host: String },

    #[error("{host} did not resolve to any address")]
    Unresolvable { host: String },
}

/// Open a TCP connection to the literal `addr` within `connect_timeout`.
///
/// No name resolution happens here; the caller has already decided the
/// exact address. One invocation is one attempt to one address.
pub async fn connect_pinned(
    addr: SocketAddr,
    connect_timeout: Duration,
) -> Result<TcpStream, ConnectError> {
    match time::timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            if let Err(error) = stream.set_nodelay(true) {
                tracing::debug!(%addr, %error, "failed to set TCP_NODELAY");
            }
            Ok(stream)
        }
        Ok(Err(source)) => Err(ConnectError::Dial { addr, source }),
        Err(_) => Err(ConnectError::Timeout {
            addr,
            timeout: connect_timeout,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connects_to_listening_address() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let stream = connect_pinned(addr, Duration::from_secs(1)).await.unwrap();
        assert_eq!(stream.peer_addr().unwrap(), addr);
    }

    #[tokio::test]
    async fn test_failure_names_attempted_address() {
        // Bind and drop to find a port nobody is listening on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let error = connect_pinned(addr, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(error.to_string().contains(&addr.to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_address_is_bounded_by_timeout() {
        // 203.0.113.0/24 is reserved for documentation; the dial either
        // times out or is rejected outright, and both name the address.
        let addr: SocketAddr = "203.0.113.1:81".parse().unwrap();

        let error = connect_pinned(addr, Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            ConnectError::Timeout { .. } | ConnectError::Dial { .. }
        ));
        assert!(error.to_string().contains("203.0.113.1:81"));
    }
}
