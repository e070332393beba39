//! Binary entry point: argument parsing, tracing setup, and composition.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use collector_core::DataCollectorApi;
use collector_server::network::{NetworkConfig, NetworkModule};
use collector_server::{EnvSettings, HttpTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Azure Monitor Data Collector proxy server.
#[derive(Debug, Parser)]
#[command(name = "collector-server", version, about)]
struct ServerArgs {
    /// Bind address.
    #[arg(long, env = "COLLECTOR_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Listen port.
    #[arg(long, env = "COLLECTOR_PORT", default_value_t = 8080)]
    port: u16,

    /// Inbound request timeout in seconds (bounds the whole proxy cycle).
    #[arg(long, env = "COLLECTOR_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Outbound call timeout in seconds.
    #[arg(long, env = "COLLECTOR_UPSTREAM_TIMEOUT_SECS", default_value_t = 25)]
    upstream_timeout_secs: u64,

    /// Environment variable holding the workspace identifier.
    #[arg(
        long,
        env = "COLLECTOR_WORKSPACE_ID_VAR",
        default_value = "LOG__ANALYTICS__WORKSPACE__ID"
    )]
    workspace_id_var: String,

    /// Environment variable holding the workspace shared key.
    #[arg(
        long,
        env = "COLLECTOR_WORKSPACE_KEY_VAR",
        default_value = "LOG__ANALYTICS__WORKSPACE__KEY"
    )]
    workspace_key_var: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ServerArgs::parse();

    let settings = Arc::new(EnvSettings::new(
        args.workspace_id_var,
        args.workspace_key_var,
    ));
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.upstream_timeout_secs))
        .build()?;
    let transport = Arc::new(HttpTransport::new(client));
    let api = Arc::new(DataCollectorApi::new(settings, transport));

    let config = NetworkConfig {
        host: args.host,
        port: args.port,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
        ..NetworkConfig::default()
    };

    let mut module = NetworkModule::new(config, api);
    let port = module.start().await?;
    info!("data collector proxy listening on port {port}");

    module
        .serve(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
}
