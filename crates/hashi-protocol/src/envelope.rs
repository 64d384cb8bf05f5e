//! Decoded call envelopes and dispatch outcomes.

use hashi_types::{Fault, Value};

/// One decoded `methodCall`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallEnvelope {
    /// Method name as sent by the caller.
    pub method_name: String,
    /// Positional parameters.
    pub params: Vec<Value>,
}

impl CallEnvelope {
    /// Creates a new call envelope.
    pub fn new(method_name: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method_name: method_name.into(),
            params,
        }
    }
}

/// Outcome of dispatching one call: a value or a fault.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    /// Successful return value.
    Success(Value),
    /// Fault raised while dispatching.
    Fault(Fault),
}

impl MethodResponse {
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// Returns the fault, if any.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(f) => Some(f),
            Self::Success(_) => None,
        }
    }

    /// Returns the success value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(v) => Some(v),
            Self::Fault(_) => None,
        }
    }

    /// Converts into a plain `Result`.
    pub fn into_result(self) -> Result<Value, Fault> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Fault(f) => Err(f),
        }
    }
}

impl From<Result<Value, Fault>> for MethodResponse {
    fn from(result: Result<Value, Fault>) -> Self {
        match result {
            Ok(v) => Self::Success(v),
            Err(f) => Self::Fault(f),
        }
    }
}
