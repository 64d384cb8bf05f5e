//! Registration driver: fills a registry from configuration.
//!
//! Methods come from exactly one source. Either the configuration lists
//! them explicitly, or every installed component is searched for a
//! `<component>.rpc` container whose exports are registered.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use hashi_types::ConfigurationError;

use crate::reference::MethodReference;
use crate::registry::MethodRegistry;

/// Name of the sub-container a component uses to export its methods.
pub const DISCOVERY_CONTAINER: &str = "rpc";

/// One explicitly configured method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDeclaration {
    /// Exposed method name.
    pub name: String,
    /// Dotted catalog path of the implementation.
    pub path: String,
    /// Overrides the help text the method declares.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Where the methods to register come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSource {
    /// An explicit list of declarations.
    Configured(Vec<MethodDeclaration>),
    /// Component names whose `rpc` containers are searched.
    Discovered(Vec<String>),
}

impl MethodSource {
    /// Picks the configured list when present, auto-discovery otherwise.
    pub fn select(configured: Option<Vec<MethodDeclaration>>, components: Vec<String>) -> Self {
        match configured {
            Some(declarations) => Self::Configured(declarations),
            None => Self::Discovered(components),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Configured(_) => "configured",
            Self::Discovered(_) => "discovered",
        }
    }
}

/// How registration failures are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationPolicy {
    /// Abort on the first error instead of skipping the entry.
    pub strict: bool,
    /// Let a later declaration replace an earlier one with the same name.
    pub allow_override: bool,
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            strict: true,
            allow_override: false,
        }
    }
}

/// Outcome of a registration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Names registered, in processing order.
    pub registered: Vec<String>,
    /// Entries skipped in lenient mode, with the error that caused it.
    pub skipped: Vec<(String, ConfigurationError)>,
}

/// Registers every method named by `source`.
///
/// In strict mode the first error is returned and registration stops.
/// Otherwise failing entries are logged, recorded in the report and
/// skipped.
#[tracing::instrument(skip_all, fields(source = source.label()))]
pub fn register_methods(
    registry: &mut MethodRegistry,
    source: MethodSource,
    policy: RegistrationPolicy,
) -> Result<RegistrationReport, ConfigurationError> {
    info!(source = source.label(), "registering methods");

    let candidates = match source {
        MethodSource::Configured(declarations) => declarations
            .into_iter()
            .map(|d| (d.name, MethodReference::Pending(d.path), d.help))
            .collect::<Vec<_>>(),
        MethodSource::Discovered(components) => discover(registry, &components),
    };

    let mut report = RegistrationReport::default();
    for (name, reference, help) in candidates {
        let result = if !policy.allow_override && registry.contains(&name) {
            Err(ConfigurationError::Duplicate { name: name.clone() })
        } else {
            registry.register(&name, reference, help.as_deref())
        };

        match result {
            Ok(()) => {
                info!(method = %name, "registered method");
                report.registered.push(name);
            }
            Err(e) if policy.strict => return Err(e),
            Err(e) => {
                warn!(method = %name, error = %e, "skipping method");
                report.skipped.push((name, e));
            }
        }
    }
    Ok(report)
}

type Candidate = (String, MethodReference, Option<String>);

fn discover(registry: &MethodRegistry, components: &[String]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for component in components {
        let path = format!("{component}.{DISCOVERY_CONTAINER}");
        let Some(container) = registry.catalog().container(&path) else {
            debug!(%component, "component exports no methods");
            continue;
        };
        candidates.extend(
            container
                .exports()
                .iter()
                .map(|(reference, name)| (name.clone(), reference.clone(), None)),
        );
    }
    candidates
}
