//! Client surface and load-balancer attachment.
//!
//! # Data Flow
//! ```text
//! EndpointClient::new (endpoint parsed, resolving transport installed)
//!     → attach() resolves the hostname once
//!         → empty set: client untouched (soft fail)
//!         → otherwise: cycle + pinned connector replace the transport
//!     → request(): per-attempt timeout, connect-failure retries
//! ```
//!
//! # Design Decisions
//! - Attachment mutates the client in place; the request surface does not
//!   change
//! - Pool, timeout and retry settings of the balanced transport are
//!   copied from the client's current configuration
//! - Attaching twice installs a second independent cycle; wasteful but
//!   not an error

use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Method, Request, Response, Uri};
use thiserror::Error;
use tokio::time;

use crate::balance::AddressCycle;
use crate::config::ClientConfig;
use crate::net::dial::ConnectError;
use crate::net::endpoint::{Endpoint, EndpointError};
use crate::pool::{self, EndpointConnector, PoolingClient};
use crate::resilience::RetryPolicy;
use crate::resolve::{self, AddressSet};

/// Errors surfaced by the client request path.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("request to {uri} failed: {source}")]
    Transport {
        uri: Uri,
        #[source]
        source: hyper_util::client::legacy::Error,
    },

    #[error("request to {uri} timed out after {timeout:?}")]
    Timeout { uri: Uri, timeout: Duration },
}

/// HTTP client for one logical endpoint.
///
/// Freshly constructed clients resolve the hostname per connection, like
/// any stock client. [`attach`] swaps in the load-balanced transport.
pub struct EndpointClient {
    endpoint: Endpoint,
    config: ClientConfig,
    transport: PoolingClient,
    balanced: bool,
}

impl EndpointClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let endpoint = Endpoint::parse(&config.endpoint.url)?;
        let connector = EndpointConnector::resolving(endpoint.clone(), &config)?;
        let transport = pool::build_pool(connector, &config);
        tracing::debug!(%endpoint, "client created with resolving transport");

        Ok(Self {
            endpoint,
            config,
            transport,
            balanced: false,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether the round-robin transport is installed.
    pub fn is_load_balanced(&self) -> bool {
        self.balanced
    }

    pub async fn get(&self, path: &str) -> Result<Response<Incoming>, ClientError> {
        self.request(Method::GET, path, Bytes::new()).await
    }

    /// Issue a request, replaying connect-phase failures per the retry
    /// policy. Each attempt is bounded by the configured request timeout.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Bytes,
    ) -> Result<Response<Incoming>, ClientError> {
        let uri = self.endpoint.uri_for(path)?;
        let policy = RetryPolicy::new(&self.config.retries);
        let request_timeout = Duration::from_secs(self.config.timeouts.request_secs);

        let mut attempt = 0u32;
        loop {
            let mut request = Request::new(Full::new(body.clone()));
            *request.method_mut() = method.clone();
            *request.uri_mut() = uri.clone();

            match time::timeout(request_timeout, self.transport.request(request)).await {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err(error)) => {
                    if policy.should_retry(attempt, &error) {
                        attempt += 1;
                        let delay = policy.delay(attempt);
                        tracing::debug!(
                            %uri,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            %error,
                            "retrying after connect failure"
                        );
                        time::sleep(delay).await;
                    } else {
                        return Err(ClientError::Transport { uri, source: error });
                    }
                }
                Err(_) => {
                    return Err(ClientError::Timeout {
                        uri,
                        timeout: request_timeout,
                    })
                }
            }
        }
    }
}

/// Resolve the client's endpoint once and install round-robin balancing
/// over the result.
///
/// If the hostname resolves to nothing, the client keeps its original
/// connection machinery and no error is raised. The address set is fixed
/// for the client's lifetime; processes that must pick up DNS changes
/// re-create the client.
pub async fn attach(client: &mut EndpointClient) -> &mut EndpointClient {
    let addresses =
        resolve::resolve_addresses(&client.endpoint.host, client.endpoint.port).await;
    attach_with(client, addresses)
}

/// Install round-robin balancing over an explicit address set, skipping
/// resolution. An empty set leaves the client untouched.
pub fn attach_with(client: &mut EndpointClient, addresses: AddressSet) -> &mut EndpointClient {
    if addresses.is_empty() {
        tracing::warn!(
            endpoint = %client.endpoint,
            "no addresses resolved, round robin not applied"
        );
        return client;
    }

    tracing::info!(
        endpoint = %client.endpoint,
        addresses = ?addresses.as_slice(),
        "attaching round-robin load balancing"
    );

    let cycle = AddressCycle::new(addresses);
    match EndpointConnector::pinned(client.endpoint.clone(), &client.config, cycle) {
        Ok(connector) => {
            client.transport = pool::build_pool(connector, &client.config);
            client.balanced = true;
            tracing::info!(endpoint = %client.endpoint, "round-robin load balancing applied");
        }
        Err(error) => {
            // Unreachable in practice: client construction already built
            // a connector for the same endpoint. Keep the stock transport
            // rather than failing the caller.
            tracing::warn!(endpoint = %client.endpoint, %error, "could not build balanced transport");
        }
    }
    client
}
