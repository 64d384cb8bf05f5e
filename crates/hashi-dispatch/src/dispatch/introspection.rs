//! Handles `system.listMethods`, `system.methodSignature` and `system.methodHelp`.

use hashi_types::{methods, params, Fault, MethodSignature, Value};

use crate::handler::Dispatcher;

/// Returned by `system.methodSignature` when a method declares no signature.
const UNDEF: &str = "undef";

/// Handles the `system.listMethods` request.
pub(crate) fn list_methods(dispatcher: &Dispatcher, params: &[Value]) -> Result<Value, Fault> {
    params::expect_arity(params, 0)?;
    Ok(Value::Array(
        dispatcher
            .list_methods()
            .into_iter()
            .map(Value::String)
            .collect(),
    ))
}

/// Handles the `system.methodSignature` request.
pub(crate) fn method_signature(dispatcher: &Dispatcher, params: &[Value]) -> Result<Value, Fault> {
    let name = method_name(params)?;
    match dispatcher.method_signature(name) {
        None => Err(Fault::method_not_found(name)),
        Some(None) => Ok(Value::from(UNDEF)),
        Some(Some(sig)) => Ok(Value::Array(vec![sig.to_value()])),
    }
}

/// Handles the `system.methodHelp` request.
pub(crate) fn method_help(dispatcher: &Dispatcher, params: &[Value]) -> Result<Value, Fault> {
    let name = method_name(params)?;
    Ok(Value::String(dispatcher.method_help(name)))
}

fn method_name(params: &[Value]) -> Result<&str, Fault> {
    params::expect_arity(params, 1)?;
    Ok(params::arg_str(params, 0)?)
}

pub(crate) fn builtin_signature(name: &str) -> Option<MethodSignature> {
    let sig = match name {
        methods::LIST_METHODS => MethodSignature::new("array", Vec::<String>::new()),
        methods::METHOD_SIGNATURE => MethodSignature::new("array", ["string"]),
        methods::METHOD_HELP => MethodSignature::new("string", ["string"]),
        methods::MULTICALL => MethodSignature::new("array", ["array"]),
        _ => return None,
    };
    Some(sig)
}

pub(crate) fn builtin_help(name: &str) -> Option<&'static str> {
    match name {
        methods::LIST_METHODS => {
            Some("Returns the names of every method the server supports, in lexical order.")
        }
        methods::METHOD_SIGNATURE => Some(
            "Returns the signatures of the named method as [[returns, args...]], \
             or \"undef\" when none was declared.",
        ),
        methods::METHOD_HELP => Some("Returns the documentation string of the named method."),
        methods::MULTICALL => Some(
            "Runs several calls in one request. Takes an array of \
             {methodName, params} structs and returns one [result] or fault struct per call.",
        ),
        _ => None,
    }
}
