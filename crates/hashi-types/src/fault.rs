//! Faults: the structured error answer of an XML-RPC call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::Value;

/// Fault codes, following the XML-RPC fault code interoperability
/// convention.
pub mod fault_codes {
    /// The request body is not well-formed XML.
    pub const PARSE_ERROR: i32 = -32700;
    /// Well-formed XML that is not a valid `methodCall`.
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method does not exist.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameter(s).
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal server error.
    pub const INTERNAL_ERROR: i32 = -32603;
    /// The method implementation failed.
    pub const APPLICATION_ERROR: i32 = -32500;
}

/// A fault returned in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("<Fault {code}: {message}>")]
pub struct Fault {
    /// Fault code.
    pub code: i32,
    /// Human-readable message.
    pub message: String,
}

impl Fault {
    /// Creates a new fault.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Fault for a body that could not be parsed.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(fault_codes::PARSE_ERROR, message)
    }

    /// Fault for a request that parsed but is not a valid call.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(fault_codes::INVALID_REQUEST, message)
    }

    /// Fault for an unknown method name.
    pub fn method_not_found(name: &str) -> Self {
        Self::new(
            fault_codes::METHOD_NOT_FOUND,
            format!("method \"{name}\" is not supported"),
        )
    }

    /// Fault for bad arguments.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(fault_codes::INVALID_PARAMS, message)
    }

    /// Fault for a failed implementation.
    pub fn application(message: impl Into<String>) -> Self {
        Self::new(fault_codes::APPLICATION_ERROR, message)
    }

    /// Fault for an unexpected server-side failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(fault_codes::INTERNAL_ERROR, message)
    }

    /// Returns the `{faultCode, faultString}` struct carried on the wire
    /// and inside multicall results.
    pub fn to_value(&self) -> Value {
        Value::structure([
            ("faultCode", Value::from(self.code)),
            ("faultString", Value::from(self.message.as_str())),
        ])
    }

    /// Reads a fault back from its struct form.
    ///
    /// Returns `None` if `faultCode` or `faultString` is missing or has the
    /// wrong type.
    pub fn from_value(value: &Value) -> Option<Self> {
        let members = value.as_struct()?;
        let code = members.get("faultCode")?.as_i64()?;
        let message = members.get("faultString")?.as_str()?;
        Some(Self::new(i32::try_from(code).ok()?, message))
    }
}
