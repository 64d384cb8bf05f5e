//! The `Codec`: entry points for encoding and decoding XML-RPC documents.

use hashi_types::{Fault, Value};

use crate::decode::Parser;
use crate::encode;
use crate::envelope::{CallEnvelope, MethodResponse};
use crate::error::{DecodeError, EncodeError};

/// Deepest `<value>` nesting accepted on input or produced on output.
pub const MAX_DEPTH: usize = 128;

/// XML-RPC codec.
///
/// The only setting is `allow_none`, which controls whether `<nil/>` is
/// accepted on input and produced on output. It is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    allow_none: bool,
}

impl Codec {
    /// Creates a codec with nil support disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables `<nil/>` support.
    pub fn with_allow_none(mut self, allow: bool) -> Self {
        self.allow_none = allow;
        self
    }

    pub fn allows_none(&self) -> bool {
        self.allow_none
    }

    /// Decodes a `<methodCall>` request body.
    pub fn decode_call(&self, body: &str) -> Result<CallEnvelope, DecodeError> {
        Parser::new(body, self.allow_none)?.method_call()
    }

    /// Encodes a `<methodCall>` request body.
    pub fn encode_call(&self, call: &CallEnvelope) -> Result<String, EncodeError> {
        encode::method_call(&call.method_name, &call.params, self.allow_none)
    }

    /// Decodes a `<methodResponse>` body into a value or a fault.
    pub fn decode_response(&self, body: &str) -> Result<MethodResponse, DecodeError> {
        Parser::new(body, self.allow_none)?.method_response()
    }

    /// Encodes a successful `<methodResponse>`.
    pub fn encode_response(&self, value: &Value) -> Result<String, EncodeError> {
        encode::method_response(value, self.allow_none)
    }

    /// Encodes a fault `<methodResponse>`.
    pub fn encode_fault(&self, fault: &Fault) -> String {
        encode::fault_response(fault)
    }

    /// Encodes either outcome of a dispatch.
    pub fn encode_output(&self, response: &MethodResponse) -> Result<String, EncodeError> {
        match response {
            MethodResponse::Success(value) => self.encode_response(value),
            MethodResponse::Fault(fault) => Ok(self.encode_fault(fault)),
        }
    }

    /// Encodes a standalone `<value>` fragment.
    pub fn encode_value(&self, value: &Value) -> Result<String, EncodeError> {
        let mut out = String::new();
        encode::write_value(&mut out, value, self.allow_none, 0)?;
        Ok(out)
    }

    /// Decodes a standalone `<value>` fragment.
    pub fn decode_value(&self, fragment: &str) -> Result<Value, DecodeError> {
        Parser::new(fragment, self.allow_none)?.standalone_value()
    }

    /// Checks that `value` is encodable under this codec's settings.
    pub fn check(&self, value: &Value) -> Result<(), EncodeError> {
        encode::check(value, self.allow_none, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_disallows_none() {
        assert!(!Codec::new().allows_none());
        assert!(Codec::new().with_allow_none(true).allows_none());
    }

    #[test]
    fn call_roundtrip() {
        let codec = Codec::new();
        let call = CallEnvelope::new("demo.echo", vec![Value::from("World")]);
        let xml = codec.encode_call(&call).expect("encode");
        assert_eq!(codec.decode_call(&xml).expect("decode"), call);
    }

    #[test]
    fn fault_output_roundtrip() {
        let codec = Codec::new();
        let out = MethodResponse::Fault(Fault::method_not_found("x"));
        let xml = codec.encode_output(&out).expect("encode");
        assert_eq!(codec.decode_response(&xml).expect("decode"), out);
    }

    #[test]
    fn nil_value_roundtrip_when_allowed() {
        let codec = Codec::new().with_allow_none(true);
        let xml = codec.encode_value(&Value::Nil).expect("encode");
        assert_eq!(xml, "<value><nil/></value>");
        assert_eq!(codec.decode_value(&xml).expect("decode"), Value::Nil);
    }
}
