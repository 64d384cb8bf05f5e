//! References to method implementations, resolved at registration time.

use std::fmt;

use hashi_types::Method;

/// Either a callable supplied directly or a dotted path into the catalog.
#[derive(Debug, Clone)]
pub enum MethodReference {
    /// An implementation handed over by the caller.
    Direct(Method),
    /// A `container.member` path, resolved once through the [`Catalog`](crate::Catalog).
    Pending(String),
}

impl MethodReference {
    /// Creates a pending reference from a dotted path.
    pub fn pending(path: impl Into<String>) -> Self {
        Self::Pending(path.into())
    }
}

impl From<Method> for MethodReference {
    fn from(method: Method) -> Self {
        Self::Direct(method)
    }
}

impl fmt::Display for MethodReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("<direct>"),
            Self::Pending(path) => f.write_str(path),
        }
    }
}
