//! Handles `system.multicall`.

use hashi_protocol::{CallEnvelope, MethodResponse};
use hashi_types::{params, Fault, Value};

use crate::handler::{BatchEntry, Dispatcher};

/// Handles the `system.multicall` request.
///
/// Each successful slot is wrapped in a one-element array and each
/// failed slot becomes a `{faultCode, faultString}` struct.
pub(crate) fn handle_multicall(dispatcher: &Dispatcher, params: &[Value]) -> Result<Value, Fault> {
    params::expect_arity(params, 1)?;
    let calls = params[0]
        .as_array()
        .ok_or_else(|| Fault::invalid_params("system.multicall expects an array of calls"))?;

    let entries: Vec<BatchEntry> = calls.iter().map(to_entry).collect();
    let results = dispatcher
        .dispatch_batch(&entries)
        .into_iter()
        .map(|response| match response {
            MethodResponse::Success(value) => Value::Array(vec![value]),
            MethodResponse::Fault(fault) => fault.to_value(),
        })
        .collect();
    Ok(Value::Array(results))
}

/// Converts one `{methodName, params}` struct into a batch entry.
fn to_entry(call: &Value) -> BatchEntry {
    let members = call
        .as_struct()
        .ok_or_else(|| Fault::invalid_request("multicall entry must be a struct"))?;

    let method_name = members
        .get("methodName")
        .and_then(Value::as_str)
        .ok_or_else(|| Fault::invalid_request("multicall entry needs a string methodName"))?;

    let params = match members.get("params") {
        None => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => {
            return Err(Fault::invalid_params(format!(
                "multicall params must be an array, got {}",
                other.type_name()
            )))
        }
    };

    Ok(CallEnvelope::new(method_name, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashi_types::fault_codes;

    #[test]
    fn entry_from_struct() {
        let call = Value::structure([
            ("methodName", Value::from("demo.echo")),
            ("params", Value::Array(vec![Value::from("x")])),
        ]);
        let entry = to_entry(&call).expect("entry");
        assert_eq!(entry.method_name, "demo.echo");
        assert_eq!(entry.params, vec![Value::from("x")]);
    }

    #[test]
    fn missing_params_means_empty() {
        let call = Value::structure([("methodName", Value::from("m"))]);
        assert!(to_entry(&call).expect("entry").params.is_empty());
    }

    #[test]
    fn malformed_entries_are_faults() {
        let err = to_entry(&Value::Int(1)).expect_err("not a struct");
        assert_eq!(err.code, fault_codes::INVALID_REQUEST);

        let no_name = Value::structure([("params", Value::Array(vec![]))]);
        assert_eq!(
            to_entry(&no_name).expect_err("no name").code,
            fault_codes::INVALID_REQUEST
        );

        let bad_params = Value::structure([
            ("methodName", Value::from("m")),
            ("params", Value::Int(3)),
        ]);
        assert_eq!(
            to_entry(&bad_params).expect_err("bad params").code,
            fault_codes::INVALID_PARAMS
        );
    }
}
