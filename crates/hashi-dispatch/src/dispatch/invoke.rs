//! Invokes a registered method and turns every failure into a fault.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use hashi_protocol::Codec;
use hashi_registry::MethodEntry;
use hashi_types::{Fault, Value};

/// Calls `entry` with `params`.
///
/// Errors and panics inside the implementation become faults, and the
/// result is checked against `codec` so an unencodable value fails only
/// this call.
pub(crate) fn invoke(entry: &MethodEntry, params: &[Value], codec: Codec) -> Result<Value, Fault> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| entry.method().call(params)));

    let value = match outcome {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            let fault = Fault::from(e);
            warn!(method = %entry.name(), code = fault.code, error = %fault.message, "method failed");
            return Err(fault);
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(method = %entry.name(), panic = %message, "method panicked");
            return Err(Fault::application(format!("method panicked: {message}")));
        }
    };

    if let Err(e) = codec.check(&value) {
        warn!(method = %entry.name(), error = %e, "result cannot be encoded");
        return Err(Fault::application(format!("cannot marshal result: {e}")));
    }
    Ok(value)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
