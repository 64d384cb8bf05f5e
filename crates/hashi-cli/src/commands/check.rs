//! `hashi check` command.
//!
//! Runs registration against the configured source, reports every
//! entry that fails to resolve with its cause and fix, and exits with
//! an error if there was any.

use clap::Args;

use hashi_config::HashiConfig;
use hashi_registry::RegistrationPolicy;

use crate::{output, shared};

/// Check that every configured method resolves.
#[derive(Debug, Args)]
pub struct CheckArgs {}

/// Executes the check command.
pub fn execute(_args: &CheckArgs, config: &HashiConfig) -> anyhow::Result<()> {
    // Lenient here so every failing entry is reported, not just the first.
    let policy = RegistrationPolicy {
        strict: false,
        allow_override: config.registration.allow_override,
    };
    let (_, report) = shared::build_registry(config, policy)?;

    for name in &report.registered {
        println!("  {name}");
    }
    for (name, error) in &report.skipped {
        output::print_error(&format!("{name}: {error}"));
        output::print_diagnostic(error);
    }

    if !report.skipped.is_empty() {
        anyhow::bail!(
            "{} of {} method(s) failed to register",
            report.skipped.len(),
            report.skipped.len() + report.registered.len()
        );
    }
    output::print_success(&format!("{} method(s) registered", report.registered.len()));
    Ok(())
}
