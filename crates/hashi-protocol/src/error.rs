//! Codec error types.

use hashi_types::fault_codes;
use thiserror::Error;

/// Errors raised while decoding a request or response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The body is not well-formed XML.
    #[error("parse error: {0}")]
    Xml(String),
    /// Well-formed XML that does not follow the XML-RPC structure.
    #[error("invalid XML-RPC structure: {0}")]
    Structure(String),
    /// A typed value whose text cannot be parsed.
    #[error("invalid {kind} value: {detail}")]
    InvalidValue { kind: &'static str, detail: String },
    /// `<nil/>` was received while nil support is disabled.
    #[error("nil values are not allowed")]
    NilNotAllowed,
}

impl DecodeError {
    /// Returns the fault code surfaced to the caller for this error.
    pub fn fault_code(&self) -> i32 {
        match self {
            Self::Xml(_) => fault_codes::PARSE_ERROR,
            _ => fault_codes::INVALID_REQUEST,
        }
    }
}

/// Errors raised while encoding a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A `Nil` value was found while nil support is disabled.
    #[error("cannot marshal nil unless allow_none is enabled")]
    NilNotAllowed,
    /// XML-RPC has no representation for NaN or infinity.
    #[error("cannot marshal non-finite double {0}")]
    NonFiniteDouble(String),
    /// Only whole seconds in years 0 to 9999 have a wire form.
    #[error("cannot marshal dateTime {0}: only whole seconds in years 0000-9999")]
    UnrepresentableDateTime(String),
    /// The text holds a character XML 1.0 does not allow.
    #[error("cannot marshal character U+{0:04X}: not allowed in XML")]
    InvalidXmlChar(u32),
    #[error("cannot marshal values nested deeper than {0} levels")]
    TooDeep(usize),
}
