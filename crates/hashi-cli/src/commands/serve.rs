//! `hashi serve` command.
//!
//! Starts the XML-RPC HTTP server and runs it until Ctrl-C.

use clap::Args;

use hashi_config::HashiConfig;
use hashi_transport_http::HttpServer;

use crate::shared;

/// Start the XML-RPC HTTP server.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind address (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,
    /// TCP port (overrides `server.port`).
    #[arg(long)]
    pub port: Option<u16>,
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: &HashiConfig) -> anyhow::Result<()> {
    let host = args.host.as_deref().unwrap_or(&config.server.host);
    let port = args.port.unwrap_or(config.server.port);

    let dispatcher = shared::build_dispatcher(config)?;
    let server =
        HttpServer::from_host_port(dispatcher, host, port, config.server.rpc_path.clone())?;

    tokio::select! {
        result = server.run() => {
            result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
