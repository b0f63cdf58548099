//! Connection establishment for one logical endpoint.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use hyper::Uri;
use tokio::net::TcpStream;
use tower::Service;

use crate::balance::AddressCycle;
use crate::config::ClientConfig;
use crate::net::dial::{self, ConnectError};
use crate::net::endpoint::{Endpoint, Scheme};
use crate::net::stream::EndpointStream;
use crate::net::tls::TlsClient;
use crate::resolve;

/// How the next connection picks its target address.
enum DialStrategy {
    /// Resolve the hostname for every new connection and try the answers
    /// in order. This is the client's stock machinery.
    Resolving,
    /// Pin each new connection to the next address of a fixed cycle.
    Pinned(AddressCycle),
}

struct Shared {
    endpoint: Endpoint,
    connect_timeout: Duration,
    tls: Option<TlsClient>,
    strategy: DialStrategy,
}

/// Connector the pooling client calls once per missing physical
/// connection. The destination is always the configured endpoint, so the
/// request URI passed by the pool is ignored.
#[derive(Clone)]
pub struct EndpointConnector {
    shared: Arc<Shared>,
}

impl EndpointConnector {
    /// Stock connector: hostname resolution on every dial.
    pub fn resolving(endpoint: Endpoint, config: &ClientConfig) -> Result<Self, ConnectError> {
        Self::new(endpoint, config, DialStrategy::Resolving)
    }

    /// Balanced connector: each dial takes the next cycle address. The
    /// cycle is owned exclusively by this connector.
    pub fn pinned(
        endpoint: Endpoint,
        config: &ClientConfig,
        cycle: AddressCycle,
    ) -> Result<Self, ConnectError> {
        Self::new(endpoint, config, DialStrategy::Pinned(cycle))
    }

    fn new(
        endpoint: Endpoint,
        config: &ClientConfig,
        strategy: DialStrategy,
    ) -> Result<Self, ConnectError> {
        let tls = match endpoint.scheme {
            Scheme::Https => Some(TlsClient::new(&endpoint.host, config.tls.verify)?),
            Scheme::Http => None,
        };

        Ok(Self {
            shared: Arc::new(Shared {
                endpoint,
                connect_timeout: Duration::from_secs(config.timeouts.connect_secs),
                tls,
                strategy,
            }),
        })
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self.shared.strategy, DialStrategy::Pinned(_))
    }
}

impl Shared {
    async fn dial(&self) -> Result<(TcpStream, SocketAddr), ConnectError> {
        match &self.strategy {
            DialStrategy::Pinned(cycle) => {
                let addr = SocketAddr::new(cycle.next(), self.endpoint.port);
                tracing::debug!(%addr, endpoint = %self.endpoint, "opening pinned connection");
                let stream = dial::connect_pinned(addr, self.connect_timeout).await?;
                Ok((stream, addr))
            }
            DialStrategy::Resolving => {
                let addresses =
                    resolve::resolve_addresses(&self.endpoint.host, self.endpoint.port).await;
                let mut last_error = ConnectError::Unresolvable {
                    host: self.endpoint.host.clone(),
                };
                for ip in addresses.iter() {
                    let addr = SocketAddr::new(ip, self.endpoint.port);
                    match dial::connect_pinned(addr, self.connect_timeout).await {
                        Ok(stream) => return Ok((stream, addr)),
                        Err(error) => last_error = error,
                    }
                }
                Err(last_error)
            }
        }
    }

    async fn establish(&self) -> Result<EndpointStream, ConnectError> {
        let (tcp, addr) = self.dial().await?;
        match &self.tls {
            Some(tls) => Ok(EndpointStream::tls(tls.handshake(tcp, addr).await?)),
            None => Ok(EndpointStream::plain(tcp)),
        }
    }
}

impl Service<Uri> for EndpointConnector {
    type Response = EndpointStream;
    type Error = ConnectError;
    type Future = Pin<Box<dyn Future<Output = Result<EndpointStream, ConnectError>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _dst: Uri) -> Self::Future {
        let shared = Arc::clone(&self.shared);
        Box::pin(async move { shared.establish().await })
    }
}
