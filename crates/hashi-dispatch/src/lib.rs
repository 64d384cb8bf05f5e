//! # hashi-dispatch
//!
//! Routes decoded XML-RPC calls to registered methods (APPLICATION layer).
//!
//! Provides `Dispatcher`, which answers the built-in `system.*` methods
//! itself and invokes everything else through the `MethodRegistry`.

mod dispatch;
pub mod handler;

pub use handler::{BatchEntry, Dispatcher};
