//! Helpers for method implementations that unpack positional parameters.

use crate::error::MethodError;
use crate::value::Value;

/// Checks that exactly `expected` parameters were passed.
pub fn expect_arity(params: &[Value], expected: usize) -> Result<(), MethodError> {
    if params.len() == expected {
        return Ok(());
    }
    let noun = if expected == 1 { "argument" } else { "arguments" };
    Err(MethodError::invalid_params(format!(
        "expected {expected} {noun}, got {}",
        params.len()
    )))
}

/// Returns the parameter at `index`.
pub fn arg(params: &[Value], index: usize) -> Result<&Value, MethodError> {
    params
        .get(index)
        .ok_or_else(|| MethodError::invalid_params(format!("missing argument {index}")))
}

/// Returns the parameter at `index` as a string slice.
pub fn arg_str(params: &[Value], index: usize) -> Result<&str, MethodError> {
    let value = arg(params, index)?;
    value.as_str().ok_or_else(|| type_mismatch(index, "string", value))
}

/// Returns the parameter at `index` as an integer.
pub fn arg_i64(params: &[Value], index: usize) -> Result<i64, MethodError> {
    let value = arg(params, index)?;
    value.as_i64().ok_or_else(|| type_mismatch(index, "int", value))
}

/// Returns the parameter at `index` as a float; integers are widened.
pub fn arg_f64(params: &[Value], index: usize) -> Result<f64, MethodError> {
    let value = arg(params, index)?;
    value.as_f64().ok_or_else(|| type_mismatch(index, "double", value))
}

/// Returns the parameter at `index` as a boolean.
pub fn arg_bool(params: &[Value], index: usize) -> Result<bool, MethodError> {
    let value = arg(params, index)?;
    value.as_bool().ok_or_else(|| type_mismatch(index, "boolean", value))
}

fn type_mismatch(index: usize, expected: &str, got: &Value) -> MethodError {
    MethodError::invalid_params(format!(
        "argument {index} must be {expected}, got {}",
        got.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_mismatch_is_invalid_params() {
        let err = expect_arity(&[], 1).expect_err("should fail");
        assert_eq!(err, MethodError::invalid_params("expected 1 argument, got 0"));
    }

    #[test]
    fn arg_str_reports_type() {
        let params = [Value::Int(1)];
        let err = arg_str(&params, 0).expect_err("should fail");
        assert!(err.to_string().contains("must be string, got int"));
    }

    #[test]
    fn arg_f64_accepts_int() {
        let params = [Value::Int(2)];
        assert_eq!(arg_f64(&params, 0).expect("f64"), 2.0);
    }

    #[test]
    fn missing_argument() {
        assert!(arg_i64(&[], 0).is_err());
        assert!(arg_bool(&[Value::Bool(true)], 0).expect("bool"));
    }
}
