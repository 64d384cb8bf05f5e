//! Dispatch functions.
//!
//! Each sub-module handles one family of methods as free functions,
//! keeping `Dispatcher` itself thin (struct + routing only).

pub(crate) mod introspection;
pub(crate) mod invoke;
pub(crate) mod multicall;
