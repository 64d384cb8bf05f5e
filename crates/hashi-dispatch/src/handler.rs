//! The dispatcher: decode, route, invoke, encode.

use std::sync::Arc;

use tracing::{debug, warn};

use hashi_protocol::{CallEnvelope, Codec, MethodResponse};
use hashi_registry::MethodRegistry;
use hashi_types::{methods, Fault, MethodSignature};

use crate::dispatch::{introspection, invoke, multicall};

/// One slot of a batch: a decoded call, or the fault that replaced it.
pub type BatchEntry = Result<CallEnvelope, Fault>;

/// Dispatches XML-RPC calls against a shared, read-only registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<MethodRegistry>,
    codec: Codec,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry` using `codec` for the wire.
    pub fn new(registry: Arc<MethodRegistry>, codec: Codec) -> Self {
        Self { registry, codec }
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Handles a raw `methodCall` body and returns a `methodResponse`.
    ///
    /// Always produces a well-formed response: decode and encode
    /// failures are reported as faults.
    pub fn handle(&self, body: &str) -> String {
        let call = match self.codec.decode_call(body) {
            Ok(call) => call,
            Err(e) => {
                warn!(error = %e, "rejecting malformed request");
                return self
                    .codec
                    .encode_fault(&Fault::new(e.fault_code(), e.to_string()));
            }
        };

        let response = self.dispatch(&call);
        match self.codec.encode_output(&response) {
            Ok(xml) => xml,
            Err(e) => {
                warn!(method = %call.method_name, error = %e, "cannot encode response");
                self.codec
                    .encode_fault(&Fault::application(format!("cannot marshal result: {e}")))
            }
        }
    }

    /// Dispatches one decoded call.
    #[tracing::instrument(skip(self, call), fields(method = %call.method_name))]
    pub fn dispatch(&self, call: &CallEnvelope) -> MethodResponse {
        self.route(call, true)
    }

    /// Dispatches each entry in order. A failing slot never affects
    /// the others. Nested `system.multicall` entries are rejected.
    pub fn dispatch_batch(&self, entries: &[BatchEntry]) -> Vec<MethodResponse> {
        entries
            .iter()
            .map(|entry| match entry {
                Ok(call) => self.route(call, false),
                Err(fault) => MethodResponse::Fault(fault.clone()),
            })
            .collect()
    }

    fn route(&self, call: &CallEnvelope, allow_multicall: bool) -> MethodResponse {
        let name = call.method_name.as_str();
        debug!(method = %name, params = call.params.len(), "routing call");

        let result = match name {
            methods::LIST_METHODS => introspection::list_methods(self, &call.params),
            methods::METHOD_SIGNATURE => introspection::method_signature(self, &call.params),
            methods::METHOD_HELP => introspection::method_help(self, &call.params),
            methods::MULTICALL if allow_multicall => multicall::handle_multicall(self, &call.params),
            methods::MULTICALL => Err(Fault::invalid_request(
                "system.multicall cannot be nested inside system.multicall",
            )),
            _ => match self.registry.lookup(name) {
                Some(entry) => invoke::invoke(entry, &call.params, self.codec),
                None => {
                    debug!(method = %name, "method not found");
                    Err(Fault::method_not_found(name))
                }
            },
        };
        result.into()
    }

    /// All callable names, built-ins included, in lexical order.
    pub fn list_methods(&self) -> Vec<String> {
        let mut names = self.registry.list_names();
        names.extend(methods::BUILTINS.iter().map(|n| n.to_string()));
        names.sort();
        names
    }

    /// Signature of `name`.
    ///
    /// The outer `None` means the name is unknown; the inner one means
    /// no signature was declared.
    pub fn method_signature(&self, name: &str) -> Option<Option<MethodSignature>> {
        if let Some(sig) = introspection::builtin_signature(name) {
            return Some(Some(sig));
        }
        self.registry.signature_of(name).map(|s| s.cloned())
    }

    /// Help text of `name`; empty for unknown names and undocumented methods.
    pub fn method_help(&self, name: &str) -> String {
        introspection::builtin_help(name)
            .or_else(|| self.registry.help_of(name))
            .unwrap_or_default()
            .to_string()
    }
}
