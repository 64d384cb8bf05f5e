//! The method registry: exposed name to implementation.
//!
//! Registration happens once at startup through `&mut self`. After that
//! the registry is wrapped in an `Arc` and only read, so no lock is
//! involved while serving calls.

use std::collections::BTreeMap;

use tracing::debug;

use hashi_types::{methods, ConfigurationError, Method, MethodSignature};

use crate::catalog::Catalog;
use crate::reference::MethodReference;

/// A registered method with its resolved implementation.
#[derive(Debug, Clone)]
pub struct MethodEntry {
    name: String,
    method: Method,
    help: Option<String>,
}

impl MethodEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn signature(&self) -> Option<&MethodSignature> {
        self.method.declared_signature()
    }

    /// Help text; empty when none was given.
    pub fn help(&self) -> &str {
        self.help.as_deref().unwrap_or_default()
    }
}

/// Name-keyed registry of callable methods.
///
/// Names are kept in a `BTreeMap`, so listings come out in lexical order.
#[derive(Debug, Default)]
pub struct MethodRegistry {
    catalog: Catalog,
    entries: BTreeMap<String, MethodEntry>,
}

impl MethodRegistry {
    /// Creates an empty registry with an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry that resolves pending paths in `catalog`.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            entries: BTreeMap::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Registers `reference` under `name`.
    ///
    /// `help` overrides the help text the method declares itself. An
    /// existing entry with the same name is replaced.
    #[tracing::instrument(skip(self, reference, help), fields(method = %name))]
    pub fn register(
        &mut self,
        name: &str,
        reference: MethodReference,
        help: Option<&str>,
    ) -> Result<(), ConfigurationError> {
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        if methods::is_reserved(name) {
            return Err(ConfigurationError::ReservedName {
                name: name.to_string(),
            });
        }

        let method = self.catalog.resolve(&reference)?;
        let help = help
            .map(str::to_string)
            .or_else(|| method.help_text().map(str::to_string));

        let entry = MethodEntry {
            name: name.to_string(),
            method,
            help,
        };
        if self.entries.insert(name.to_string(), entry).is_some() {
            debug!(%reference, "replaced existing registration");
        } else {
            debug!(%reference, "registered");
        }
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&MethodEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in lexical order. Built-ins are not included.
    pub fn list_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Iterates over the entries in lexical order.
    pub fn entries(&self) -> impl Iterator<Item = &MethodEntry> {
        self.entries.values()
    }

    /// The declared signature of `name`.
    ///
    /// The outer `None` means the name is not registered; the inner one
    /// means the method declared no signature.
    pub fn signature_of(&self, name: &str) -> Option<Option<&MethodSignature>> {
        self.lookup(name).map(MethodEntry::signature)
    }

    /// Help text for `name`, or `None` if the name is not registered.
    pub fn help_of(&self, name: &str) -> Option<&str> {
        self.lookup(name).map(MethodEntry::help)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashi_types::Value;

    fn constant(text: &'static str) -> Method {
        Method::new(move |_params: &[Value]| Ok(Value::from(text)))
    }

    #[test]
    fn register_then_lookup_returns_same_implementation() {
        let mut registry = MethodRegistry::new();
        let m = constant("a");
        registry
            .register("demo.a", m.clone().into(), None)
            .expect("register");

        let entry = registry.lookup("demo.a").expect("lookup");
        assert!(entry.method().same_handler(&m));
        assert_eq!(entry.name(), "demo.a");
    }

    #[test]
    fn reregistering_replaces_the_old_implementation() {
        let mut registry = MethodRegistry::new();
        let first = constant("first");
        let second = constant("second");
        registry
            .register("demo.m", first.clone().into(), None)
            .expect("first");
        registry
            .register("demo.m", second.clone().into(), None)
            .expect("second");

        let entry = registry.lookup("demo.m").expect("lookup");
        assert!(entry.method().same_handler(&second));
        assert!(!entry.method().same_handler(&first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_name_rejected() {
        let mut registry = MethodRegistry::new();
        let err = registry
            .register("", constant("x").into(), None)
            .expect_err("empty");
        assert_eq!(err, ConfigurationError::EmptyName);
        assert!(registry.is_empty());
    }

    #[test]
    fn system_namespace_is_reserved() {
        let mut registry = MethodRegistry::new();
        let err = registry
            .register("system.listMethods", constant("x").into(), None)
            .expect_err("reserved");
        assert!(matches!(err, ConfigurationError::ReservedName { .. }));
        assert!(registry
            .register("system.custom", constant("x").into(), None)
            .is_err());
    }

    #[test]
    fn names_are_listed_lexically() {
        let mut registry = MethodRegistry::new();
        for name in ["zeta", "alpha", "mid.dle"] {
            registry
                .register(name, constant("x").into(), None)
                .expect("register");
        }
        assert_eq!(registry.list_names(), ["alpha", "mid.dle", "zeta"]);
    }

    #[test]
    fn help_override_and_fallback() {
        let mut registry = MethodRegistry::new();
        let documented = constant("x").help("Own help.");
        registry
            .register("a", documented.clone().into(), None)
            .expect("a");
        registry
            .register("b", documented.into(), Some("Overridden."))
            .expect("b");
        registry
            .register("c", constant("x").into(), None)
            .expect("c");

        assert_eq!(registry.help_of("a"), Some("Own help."));
        assert_eq!(registry.help_of("b"), Some("Overridden."));
        assert_eq!(registry.help_of("c"), Some(""));
        assert_eq!(registry.help_of("missing"), None);
    }

    #[test]
    fn signature_of_distinguishes_unknown_from_undeclared() {
        let mut registry = MethodRegistry::new();
        registry
            .register(
                "typed",
                constant("x").signature("string", ["string"]).into(),
                None,
            )
            .expect("typed");
        registry
            .register("untyped", constant("x").into(), None)
            .expect("untyped");

        let sig = registry.signature_of("typed").expect("known").expect("declared");
        assert_eq!(sig.returns, "string");
        assert_eq!(registry.signature_of("untyped"), Some(None));
        assert!(registry.signature_of("nope").is_none());
    }
}
