//! The typed catalog that dotted method paths resolve against.
//!
//! A [`Catalog`] maps container paths such as `demo.views` to a
//! [`Container`] of named members. The host fills it explicitly at
//! startup; nothing is looked up by reflection.

use std::collections::BTreeMap;

use tracing::debug;

use hashi_types::{ConfigurationError, Method, Value};

use crate::reference::MethodReference;

/// A named member of a container.
#[derive(Debug, Clone)]
pub enum Member {
    /// A callable implementation.
    Method(Method),
    /// A plain value such as a version constant. Not callable.
    Value(Value),
}

/// A group of members addressed by a common path prefix.
///
/// A container may also export methods under public names. The
/// registration driver reads these exports when it auto-discovers the
/// methods of an installed component.
#[derive(Debug, Clone, Default)]
pub struct Container {
    members: BTreeMap<String, Member>,
    exports: Vec<(MethodReference, String)>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a callable member.
    pub fn method(mut self, name: impl Into<String>, method: Method) -> Self {
        self.members.insert(name.into(), Member::Method(method));
        self
    }

    /// Adds a non-callable member.
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.insert(name.into(), Member::Value(value.into()));
        self
    }

    /// Exports `reference` under the public name `exposed_name`.
    pub fn export(mut self, reference: MethodReference, exposed_name: impl Into<String>) -> Self {
        self.exports.push((reference, exposed_name.into()));
        self
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    pub fn exports(&self) -> &[(MethodReference, String)] {
        &self.exports
    }
}

/// String-keyed collection of containers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    containers: BTreeMap<String, Container>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a container, builder style.
    pub fn with_container(mut self, path: impl Into<String>, container: Container) -> Self {
        self.insert(path, container);
        self
    }

    /// Adds or replaces a container.
    pub fn insert(&mut self, path: impl Into<String>, container: Container) {
        self.containers.insert(path.into(), container);
    }

    pub fn container(&self, path: &str) -> Option<&Container> {
        self.containers.get(path)
    }

    /// Resolves a reference to a callable method.
    ///
    /// A pending path is split on its last `.`: everything before it
    /// names the container, the rest names the member.
    pub fn resolve(&self, reference: &MethodReference) -> Result<Method, ConfigurationError> {
        let path = match reference {
            MethodReference::Direct(method) => return Ok(method.clone()),
            MethodReference::Pending(path) => path,
        };

        let (container_path, member_name) =
            path.rsplit_once('.')
                .ok_or_else(|| ConfigurationError::ImportFailed {
                    path: path.clone(),
                    container: path.clone(),
                })?;

        let container =
            self.container(container_path)
                .ok_or_else(|| ConfigurationError::ImportFailed {
                    path: path.clone(),
                    container: container_path.to_string(),
                })?;

        match container.member(member_name) {
            Some(Member::Method(method)) => {
                debug!(%path, "resolved method reference");
                Ok(method.clone())
            }
            Some(Member::Value(_)) => Err(ConfigurationError::NotCallable {
                container: container_path.to_string(),
                member: member_name.to_string(),
            }),
            None => Err(ConfigurationError::MemberMissing {
                container: container_path.to_string(),
                member: member_name.to_string(),
            }),
        }
    }
}
