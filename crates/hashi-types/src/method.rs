//! Callable method implementations and their declared metadata.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::MethodError;
use crate::value::Value;

/// Result of invoking a method implementation.
pub type MethodResult = Result<Value, MethodError>;

/// A method implementation.
///
/// Implementations are invoked concurrently from the dispatcher and own
/// their own thread-safety. Plain closures and functions with the matching
/// signature implement this trait automatically.
pub trait RpcMethod: Send + Sync {
    /// Invokes the method with positional parameters.
    fn call(&self, params: &[Value]) -> MethodResult;
}

impl<F> RpcMethod for F
where
    F: Fn(&[Value]) -> MethodResult + Send + Sync,
{
    fn call(&self, params: &[Value]) -> MethodResult {
        self(params)
    }
}

/// Declared signature of a method: return type followed by argument types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    /// Return type name (e.g. "string").
    pub returns: String,
    /// Argument type names, in order.
    #[serde(default)]
    pub args: Vec<String>,
}

impl MethodSignature {
    /// Creates a new signature.
    pub fn new<I, S>(returns: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            returns: returns.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `[returns, args...]` as introspection reports it.
    pub fn to_value(&self) -> Value {
        let mut items = Vec::with_capacity(self.args.len() + 1);
        items.push(Value::from(self.returns.as_str()));
        items.extend(self.args.iter().map(|a| Value::from(a.as_str())));
        Value::Array(items)
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.returns, self.args.join(", "))
    }
}

/// A callable together with the metadata it declares about itself.
///
/// Cloning is cheap: the implementation is shared.
#[derive(Clone)]
pub struct Method {
    handler: Arc<dyn RpcMethod>,
    signature: Option<MethodSignature>,
    help: Option<String>,
}

impl Method {
    /// Wraps a closure or function as a method.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> MethodResult + Send + Sync + 'static,
    {
        Self::from_handler(Arc::new(f))
    }

    /// Wraps an existing shared implementation.
    pub fn from_handler(handler: Arc<dyn RpcMethod>) -> Self {
        Self {
            handler,
            signature: None,
            help: None,
        }
    }

    /// Declares the method's signature.
    pub fn signature<I, S>(mut self, returns: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signature = Some(MethodSignature::new(returns, args));
        self
    }

    /// Attaches help text.
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    /// Invokes the implementation.
    pub fn call(&self, params: &[Value]) -> MethodResult {
        self.handler.call(params)
    }

    pub fn declared_signature(&self) -> Option<&MethodSignature> {
        self.signature.as_ref()
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Returns true if both methods share the same implementation.
    pub fn same_handler(&self, other: &Method) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.handler) as *const (),
            Arc::as_ptr(&other.handler) as *const (),
        )
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("signature", &self.signature)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}
