//! # hashi-types
//!
//! Domain types for the hashi XML-RPC dispatcher.
//! This crate holds the value model, faults, method descriptions and
//! the error taxonomy shared by every other crate. It performs no I/O.

pub mod error;
pub mod fault;
pub mod method;
pub mod params;
pub mod value;

// Re-exports for convenience.
pub use error::{ConfigurationError, DiagnosticError, MethodError};
pub use fault::{fault_codes, Fault};
pub use method::{Method, MethodResult, MethodSignature, RpcMethod};
pub use value::Value;

/// Built-in method names answered by the dispatcher itself.
///
/// The whole `system.` namespace is reserved: user methods may not be
/// registered under it.
pub mod methods {
    pub const LIST_METHODS: &str = "system.listMethods";
    pub const METHOD_SIGNATURE: &str = "system.methodSignature";
    pub const METHOD_HELP: &str = "system.methodHelp";
    pub const MULTICALL: &str = "system.multicall";

    /// Prefix shared by all built-in names.
    pub const RESERVED_PREFIX: &str = "system.";

    /// All built-in names, in lexical order.
    pub const BUILTINS: [&str; 4] = [LIST_METHODS, METHOD_HELP, METHOD_SIGNATURE, MULTICALL];

    /// Returns true if `name` falls inside the reserved namespace.
    pub fn is_reserved(name: &str) -> bool {
        name.starts_with(RESERVED_PREFIX)
    }
}
