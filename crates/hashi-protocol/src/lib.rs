//! # hashi-protocol
//!
//! XML-RPC wire format for hashi.
//! This crate turns request bodies into `CallEnvelope`s and dispatch
//! outcomes back into `methodResponse` documents. It is pure and holds no
//! state beyond the `allow_none` switch.

pub mod codec;
mod decode;
mod encode;
pub mod envelope;
pub mod error;

pub use codec::{Codec, MAX_DEPTH};
pub use envelope::{CallEnvelope, MethodResponse};
pub use error::{DecodeError, EncodeError};
