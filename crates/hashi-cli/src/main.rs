//! hashi CLI - XML-RPC method server.

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

mod catalog;
mod commands;
mod input;
mod output;
pub(crate) mod shared;

/// hashi - XML-RPC server with a typed method registry.
#[derive(Debug, Parser)]
#[command(name = "hashi", version, about)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, global = true, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the XML-RPC HTTP server.
    Serve(commands::serve::ServeArgs),
    /// List every method with its signature and help.
    Methods(commands::methods::MethodsArgs),
    /// Call a method in process and print the response XML.
    Call(commands::call::CallArgs),
    /// Check that every configured method resolves.
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shared::load(cli.config.as_deref())?;

    // Initialize tracing.
    let level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::new(level);
    match cli.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    };

    tracing::debug!("hashi starting with config: {:?}", cli.config);

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Methods(args) => commands::methods::execute(args, &config),
        Commands::Call(args) => commands::call::execute(args, &config),
        Commands::Check(args) => commands::check::execute(args, &config),
    }
}
