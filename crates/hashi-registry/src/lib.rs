//! # hashi-registry
//!
//! The method registry and everything that fills it: the typed
//! [`Catalog`] that dotted method paths resolve against, and the
//! registration driver that walks a configured list or discovers
//! methods exported by installed components.

pub mod catalog;
pub mod driver;
pub mod reference;
pub mod registry;

pub use catalog::{Catalog, Container, Member};
pub use driver::{
    register_methods, MethodDeclaration, MethodSource, RegistrationPolicy, RegistrationReport,
    DISCOVERY_CONTAINER,
};
pub use reference::MethodReference;
pub use registry::{MethodEntry, MethodRegistry};
