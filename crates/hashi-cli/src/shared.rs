//! Shared helpers used across CLI commands.
//!
//! Centralises loading the configuration and building the registry and
//! dispatcher, ensuring consistent defaults everywhere.

use std::sync::Arc;

use hashi_config::HashiConfig;
use hashi_dispatch::Dispatcher;
use hashi_registry::{
    register_methods, MethodRegistry, MethodSource, RegistrationPolicy, RegistrationReport,
};

use crate::{catalog, output};

/// Loads the layered configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a key is invalid.
pub fn load(path: Option<&str>) -> anyhow::Result<HashiConfig> {
    hashi_config::load_config(path).map_err(|e| anyhow::anyhow!("{e}"))
}

/// The method source selected by `config`.
///
/// When neither a method list nor installed components are configured,
/// the demo component is discovered so the server has something to serve.
pub fn method_source(config: &HashiConfig) -> MethodSource {
    let registration = &config.registration;
    if registration.methods.is_none() && registration.installed_components.is_empty() {
        return MethodSource::Discovered(vec![catalog::DEMO_COMPONENT.to_string()]);
    }
    registration.source()
}

/// Fills a registry from `config` under `policy`.
///
/// # Errors
///
/// Returns an error in strict mode when a method cannot be registered.
pub fn build_registry(
    config: &HashiConfig,
    policy: RegistrationPolicy,
) -> anyhow::Result<(MethodRegistry, RegistrationReport)> {
    let mut registry = MethodRegistry::with_catalog(catalog::demo_catalog());
    let report =
        register_methods(&mut registry, method_source(config), policy).map_err(|e| {
            output::print_diagnostic(&e);
            anyhow::anyhow!("{e}")
        })?;
    Ok((registry, report))
}

/// Builds the dispatcher the server and `call` use.
///
/// # Errors
///
/// Returns an error in strict mode when a method cannot be registered.
pub fn build_dispatcher(config: &HashiConfig) -> anyhow::Result<Arc<Dispatcher>> {
    let (registry, report) = build_registry(config, config.registration.policy())?;
    for (name, error) in &report.skipped {
        output::print_error(&format!("skipped '{name}': {error}"));
        output::print_diagnostic(error);
    }
    tracing::info!(
        registered = report.registered.len(),
        skipped = report.skipped.len(),
        "registry ready"
    );
    Ok(Arc::new(Dispatcher::new(
        Arc::new(registry),
        config.codec.codec(),
    )))
}
