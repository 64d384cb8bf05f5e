//! Error taxonomy shared across the dispatcher.

use thiserror::Error;

use crate::fault::Fault;
use crate::methods::RESERVED_PREFIX;

/// Startup-time registration errors.
///
/// These are raised while the registry is being built, never while
/// serving a call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The exposed method name is empty.
    #[error("error registering method: name cannot be empty")]
    EmptyName,
    /// The exposed method name collides with the built-in namespace.
    #[error("error registering method '{name}': the 'system.' namespace is reserved")]
    ReservedName { name: String },
    /// The container part of a dotted path does not exist.
    #[error("error registering method '{path}': container '{container}' can't be imported")]
    ImportFailed { path: String, container: String },
    /// The container exists but has no such member.
    #[error("error registering method: container '{container}' doesn't define a method '{member}'")]
    MemberMissing { container: String, member: String },
    /// The member exists but cannot be invoked.
    #[error("error registering method: '{member}' is not callable in container '{container}'")]
    NotCallable { container: String, member: String },
    /// The same name was declared twice while overriding is disabled.
    #[error("error registering method '{name}': already registered")]
    Duplicate { name: String },
}

/// Transforms technical errors into user-actionable diagnostics.
///
/// Implementors provide optional `hint` (cause explanation) and `fix`
/// (concrete remediation step) for each error variant.
pub trait DiagnosticError {
    /// A human-readable explanation of the likely cause.
    fn hint(&self) -> Option<String> {
        None
    }
    /// A concrete fix the user can apply (e.g. a config change).
    fn fix(&self) -> Option<String> {
        None
    }
}

impl DiagnosticError for ConfigurationError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::EmptyName => None,
            Self::ReservedName { .. } => Some(format!(
                "Names starting with '{RESERVED_PREFIX}' are answered by the dispatcher itself."
            )),
            Self::ImportFailed { container, .. } => Some(format!(
                "No container named '{container}' is present in the method catalog; this is often a typo."
            )),
            Self::MemberMissing { member, .. } => {
                Some(format!("The container has no member named '{member}'."))
            }
            Self::NotCallable { member, .. } => Some(format!(
                "'{member}' is a plain value, not a method implementation."
            )),
            Self::Duplicate { .. } => {
                Some("Two declarations expose the same method name.".into())
            }
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::EmptyName => Some("Give every [[registration.methods]] entry a name.".into()),
            Self::ReservedName { name } => Some(format!(
                "Rename '{name}' to something outside the '{RESERVED_PREFIX}' namespace."
            )),
            Self::ImportFailed { path, .. } | Self::MemberMissing { container: path, .. } => {
                Some(format!("Check the spelling of '{path}' in your configuration."))
            }
            Self::NotCallable { .. } => {
                Some("Point the method path at a function member instead.".into())
            }
            Self::Duplicate { .. } => Some(
                "Remove one declaration, or set registration.allow_override = true.".into(),
            ),
        }
    }
}

/// Errors returned by a method implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodError {
    /// An explicit fault; its code is returned to the caller unchanged.
    #[error(transparent)]
    Fault(#[from] Fault),
    /// The caller passed the wrong number or type of arguments.
    #[error("invalid params: {0}")]
    InvalidParams(String),
    /// Any other failure inside the implementation.
    #[error("{0}")]
    Application(String),
}

impl MethodError {
    /// Creates an invalid-params error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    /// Creates an application error.
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application(message.into())
    }
}

impl From<MethodError> for Fault {
    fn from(e: MethodError) -> Self {
        match e {
            MethodError::Fault(fault) => fault,
            MethodError::InvalidParams(msg) => Fault::invalid_params(msg),
            MethodError::Application(msg) => Fault::application(msg),
        }
    }
}
