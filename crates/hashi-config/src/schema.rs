//! Configuration schema types.

use serde::{Deserialize, Serialize};

use hashi_protocol::Codec;
use hashi_registry::{MethodDeclaration, MethodSource, RegistrationPolicy};

/// Top-level hashi configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashiConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Wire codec settings.
    #[serde(default)]
    pub codec: CodecConfig,
    /// Method registration settings.
    #[serde(default)]
    pub registration: RegistrationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path the XML-RPC endpoint is mounted on.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            rpc_path: default_rpc_path(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_rpc_path() -> String {
    "/RPC2".to_string()
}

/// Codec configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Accept and emit `<nil/>`.
    #[serde(default)]
    pub allow_none: bool,
}

impl CodecConfig {
    pub fn codec(&self) -> Codec {
        Codec::new().with_allow_none(self.allow_none)
    }
}

/// Method registration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationConfig {
    /// Abort startup on the first registration error.
    #[serde(default = "default_strict")]
    pub strict: bool,
    /// Let a later declaration replace an earlier one.
    #[serde(default)]
    pub allow_override: bool,
    /// Components searched for exported methods when `methods` is absent.
    #[serde(default)]
    pub installed_components: Vec<String>,
    /// Explicit method list. When present, discovery is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<MethodDeclaration>>,
}

impl RegistrationConfig {
    /// The method source this section selects.
    pub fn source(&self) -> MethodSource {
        MethodSource::select(self.methods.clone(), self.installed_components.clone())
    }

    pub fn policy(&self) -> RegistrationPolicy {
        RegistrationPolicy {
            strict: self.strict,
            allow_override: self.allow_override,
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            strict: default_strict(),
            allow_override: false,
            installed_components: Vec::new(),
            methods: None,
        }
    }
}

fn default_strict() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "hashi_dispatch=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
