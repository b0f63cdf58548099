//! Pooling client construction.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::config::ClientConfig;
use crate::pool::connector::EndpointConnector;

/// The pooling HTTP client everything rides on. Connection reuse, idle
/// eviction and per-host sizing are inherited from hyper-util unchanged;
/// only connection creation goes through [`EndpointConnector`].
pub type PoolingClient = Client<EndpointConnector, Full<Bytes>>;

/// Build a pooling client around `connector` with the configured pool
/// size and idle timeout.
pub fn build_pool(connector: EndpointConnector, config: &ClientConfig) -> PoolingClient {
    Client::builder(TokioExecutor::new())
        .pool_max_idle_per_host(config.pool.max_idle_per_host)
        .pool_idle_timeout(Duration::from_secs(config.timeouts.idle_secs))
        .build(connector)
}
