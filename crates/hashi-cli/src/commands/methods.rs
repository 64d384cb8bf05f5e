//! `hashi methods` command.

use clap::Args;

use hashi_config::HashiConfig;

use crate::shared;

/// List every method with its signature and help.
#[derive(Debug, Args)]
pub struct MethodsArgs {
    /// Hide the built-in `system.*` methods.
    #[arg(long)]
    pub no_builtins: bool,
}

/// Executes the methods command.
pub fn execute(args: &MethodsArgs, config: &HashiConfig) -> anyhow::Result<()> {
    let dispatcher = shared::build_dispatcher(config)?;

    for name in dispatcher.list_methods() {
        if args.no_builtins && hashi_types::methods::is_reserved(&name) {
            continue;
        }
        let signature = match dispatcher.method_signature(&name).flatten() {
            Some(sig) => sig.to_string(),
            None => "undef".to_string(),
        };
        println!("{name}  {signature}");
        let help = dispatcher.method_help(&name);
        if !help.is_empty() {
            println!("    {help}");
        }
    }
    Ok(())
}
