//! `hashi call` command.
//!
//! Dispatches one call in process, exactly as the server would, and
//! prints the response document.

use clap::Args;

use hashi_config::HashiConfig;
use hashi_protocol::CallEnvelope;

use crate::{input, output, shared};

/// Call a method in process and print the response XML.
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Method name, e.g. demo.echo.
    #[arg(required_unless_present = "file")]
    pub method: Option<String>,
    /// Positional arguments (int, double, true/false, or string).
    pub args: Vec<String>,
    /// Send a complete methodCall document instead (use "-" for stdin).
    #[arg(short, long, conflicts_with_all = ["method", "args"])]
    pub file: Option<String>,
}

/// Executes the call command.
pub fn execute(args: &CallArgs, config: &HashiConfig) -> anyhow::Result<()> {
    let dispatcher = shared::build_dispatcher(config)?;

    let body = match (&args.file, &args.method) {
        (Some(path), _) => input::read_body(path)?,
        (None, Some(method)) => {
            let params = args.args.iter().map(|a| input::parse_arg(a)).collect();
            dispatcher
                .codec()
                .encode_call(&CallEnvelope::new(method.as_str(), params))
                .map_err(|e| anyhow::anyhow!("cannot encode call: {e}"))?
        }
        (None, None) => anyhow::bail!("either a method name or --file is required"),
    };

    tracing::debug!(bytes = body.len(), "dispatching request");
    let response = dispatcher.handle(&body);
    print!("{response}");

    if let Ok(decoded) = dispatcher.codec().decode_response(&response) {
        if let Some(fault) = decoded.fault() {
            output::print_error(&fault.to_string());
        }
    }
    Ok(())
}
