//! Demo driver for the load-balanced endpoint client.
//!
//! Builds a client for the configured endpoint, attaches round-robin
//! balancing, then issues a handful of requests so the rotation is
//! visible in the logs.

use clap::Parser;
use http_body_util::BodyExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use client_balancer::client::{attach, EndpointClient};
use client_balancer::config::{self, ClientConfig};

#[derive(Parser)]
#[command(name = "client-balancer")]
#[command(about = "Round-robin load-balanced HTTP client demo", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Endpoint URL (overrides config file and ENDPOINT_URL).
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Request path to fetch.
    #[arg(short, long, default_value = "/")]
    path: String,

    /// Number of requests to issue.
    #[arg(short = 'n', long, default_value_t = 5)]
    requests: u32,

    /// Skip TLS certificate verification.
    #[arg(long)]
    insecure: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "client_balancer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ClientConfig::default(),
    };
    config::apply_env_overrides(&mut config);
    if let Some(endpoint) = cli.endpoint {
        config.endpoint.url = endpoint;
    }
    if cli.insecure {
        config.tls.verify = false;
    }

    if let Err(errors) = config::validate_config(&config) {
        for error in &errors {
            tracing::error!(%error, "invalid configuration");
        }
        return Err("configuration invalid".into());
    }

    tracing::info!(
        endpoint = %config.endpoint.url,
        requests = cli.requests,
        "client-balancer v0.1.0 starting"
    );

    let mut client = EndpointClient::new(config)?;
    attach(&mut client).await;

    for i in 0..cli.requests {
        match client.get(&cli.path).await {
            Ok(response) => {
                let status = response.status();
                let body = response.into_body().collect().await?.to_bytes();
                tracing::info!(request = i + 1, %status, bytes = body.len(), "request complete");
            }
            Err(error) => {
                tracing::error!(request = i + 1, %error, "request failed");
            }
        }
    }

    Ok(())
}
