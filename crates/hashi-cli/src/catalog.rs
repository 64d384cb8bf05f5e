//! The built-in demo catalog.
//!
//! `demo.views` holds the implementations; `demo.rpc` exports them so
//! the `demo` component is picked up by auto-discovery.

use hashi_registry::{Catalog, Container, MethodReference};
use hashi_types::{params, Method, MethodError, MethodResult, Value};

/// Component name of the demo methods.
pub const DEMO_COMPONENT: &str = "demo";

fn echo(p: &[Value]) -> MethodResult {
    params::expect_arity(p, 1)?;
    Ok(Value::from(format!("Hello, {}", params::arg_str(p, 0)?)))
}

fn test(p: &[Value]) -> MethodResult {
    params::expect_arity(p, 1)?;
    let arg = params::arg(p, 0)?;
    let text = match arg.as_str() {
        Some(s) => s.to_string(),
        None => arg.to_string(),
    };
    Ok(Value::from(format!("Here's a response! {text}")))
}

fn add(p: &[Value]) -> MethodResult {
    params::expect_arity(p, 2)?;
    let (a, b) = (params::arg_i64(p, 0)?, params::arg_i64(p, 1)?);
    a.checked_add(b)
        .map(Value::Int)
        .ok_or_else(|| MethodError::application("integer overflow"))
}

fn fail(_: &[Value]) -> MethodResult {
    Err(MethodError::application("this method always fails"))
}

/// Builds the demo catalog.
pub fn demo_catalog() -> Catalog {
    let views = Container::new()
        .method(
            "echo",
            Method::new(echo)
                .signature("string", ["string"])
                .help("Returns a greeting for the given name."),
        )
        .method(
            "test",
            Method::new(test)
                .signature("string", ["string"])
                .help("Simply returns the argument passed to it as a string."),
        )
        .method(
            "add",
            Method::new(add)
                .signature("int", ["int", "int"])
                .help("Adds two integers."),
        )
        .method("fail", Method::new(fail).help("Always returns a fault."))
        .constant("VERSION", env!("CARGO_PKG_VERSION"));

    let rpc = ["echo", "test", "add", "fail"]
        .into_iter()
        .fold(Container::new(), |rpc, name| {
            rpc.export(
                MethodReference::pending(format!("demo.views.{name}")),
                format!("demo.{name}"),
            )
        });

    Catalog::new()
        .with_container("demo.views", views)
        .with_container("demo.rpc", rpc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_greets() {
        assert_eq!(echo(&[Value::from("World")]), Ok(Value::from("Hello, World")));
    }

    #[test]
    fn test_formats_any_value() {
        assert_eq!(
            test(&[Value::Int(3)]),
            Ok(Value::from("Here's a response! 3"))
        );
    }

    #[test]
    fn test_keeps_strings_unquoted() {
        assert_eq!(
            test(&[Value::from("hi")]),
            Ok(Value::from("Here's a response! hi"))
        );
    }

    #[test]
    fn add_rejects_overflow() {
        assert!(add(&[Value::Int(i64::MAX), Value::Int(1)]).is_err());
        assert_eq!(add(&[Value::Int(2), Value::Int(3)]), Ok(Value::Int(5)));
    }

    #[test]
    fn every_export_resolves() {
        let catalog = demo_catalog();
        let rpc = catalog.container("demo.rpc").expect("rpc container");
        assert_eq!(rpc.exports().len(), 4);
        for (reference, _) in rpc.exports() {
            assert!(catalog.resolve(reference).is_ok(), "{reference}");
        }
    }

    #[test]
    fn version_is_not_callable() {
        let err = demo_catalog()
            .resolve(&MethodReference::pending("demo.views.VERSION"))
            .expect_err("constant");
        assert!(err.to_string().contains("not callable"));
    }
}
