//! XML-RPC document encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Datelike, NaiveDateTime, Timelike};
use quick_xml::escape::escape;

use hashi_types::{Fault, Value};

use crate::codec::MAX_DEPTH;
use crate::decode::DATETIME_FORMATS;
use crate::error::EncodeError;

const XML_DECL: &str = "<?xml version=\"1.0\"?>\n";

/// Chars allowed by the XML 1.0 `Char` production. Rust strings never
/// hold surrogates, so only C0 controls and the two noncharacters remain.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn check_text(text: &str) -> Result<(), EncodeError> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(EncodeError::InvalidXmlChar(u32::from(c))),
        None => Ok(()),
    }
}

fn check_datetime(dt: &NaiveDateTime) -> Result<(), EncodeError> {
    if dt.nanosecond() != 0 || !(0..=9999).contains(&dt.year()) {
        return Err(EncodeError::UnrepresentableDateTime(dt.to_string()));
    }
    Ok(())
}

/// Escapes character data. `\r` becomes a character reference so that
/// parsers doing end-of-line normalization keep it.
fn escape_text(out: &mut String, text: &str) {
    out.push_str(&escape(text).replace('\r', "&#13;"));
}

/// Validates that `value` can be encoded without producing any output.
pub(crate) fn check(value: &Value, allow_none: bool, depth: usize) -> Result<(), EncodeError> {
    if depth >= MAX_DEPTH {
        return Err(EncodeError::TooDeep(MAX_DEPTH));
    }
    match value {
        Value::Nil if !allow_none => Err(EncodeError::NilNotAllowed),
        Value::Double(d) if !d.is_finite() => Err(EncodeError::NonFiniteDouble(d.to_string())),
        Value::String(s) => check_text(s),
        Value::DateTime(dt) => check_datetime(dt),
        Value::Array(items) => items.iter().try_for_each(|v| check(v, allow_none, depth + 1)),
        Value::Struct(members) => members.iter().try_for_each(|(name, v)| {
            check_text(name)?;
            check(v, allow_none, depth + 1)
        }),
        _ => Ok(()),
    }
}

/// Appends `<value>...</value>` for `value` to `out`.
pub(crate) fn write_value(
    out: &mut String,
    value: &Value,
    allow_none: bool,
    depth: usize,
) -> Result<(), EncodeError> {
    if depth >= MAX_DEPTH {
        return Err(EncodeError::TooDeep(MAX_DEPTH));
    }
    out.push_str("<value>");
    match value {
        Value::Int(i) => {
            if i32::try_from(*i).is_ok() {
                out.push_str(&format!("<int>{i}</int>"));
            } else {
                out.push_str(&format!("<i8>{i}</i8>"));
            }
        }
        Value::Double(d) => {
            if !d.is_finite() {
                return Err(EncodeError::NonFiniteDouble(d.to_string()));
            }
            out.push_str(&format!("<double>{d}</double>"));
        }
        Value::Bool(b) => {
            out.push_str(if *b {
                "<boolean>1</boolean>"
            } else {
                "<boolean>0</boolean>"
            });
        }
        Value::String(s) => {
            check_text(s)?;
            out.push_str("<string>");
            escape_text(out, s);
            out.push_str("</string>");
        }
        Value::Bytes(bytes) => {
            out.push_str("<base64>");
            out.push_str(&STANDARD.encode(bytes));
            out.push_str("</base64>");
        }
        Value::DateTime(dt) => {
            check_datetime(dt)?;
            out.push_str("<dateTime.iso8601>");
            out.push_str(&dt.format(DATETIME_FORMATS[0]).to_string());
            out.push_str("</dateTime.iso8601>");
        }
        Value::Nil => {
            if !allow_none {
                return Err(EncodeError::NilNotAllowed);
            }
            out.push_str("<nil/>");
        }
        Value::Array(items) => {
            out.push_str("<array><data>\n");
            for item in items {
                write_value(out, item, allow_none, depth + 1)?;
                out.push('\n');
            }
            out.push_str("</data></array>");
        }
        Value::Struct(members) => {
            out.push_str("<struct>\n");
            for (name, member) in members {
                check_text(name)?;
                out.push_str("<member>\n<name>");
                escape_text(out, name);
                out.push_str("</name>\n");
                write_value(out, member, allow_none, depth + 1)?;
                out.push_str("\n</member>\n");
            }
            out.push_str("</struct>");
        }
    }
    out.push_str("</value>");
    Ok(())
}

fn write_params(out: &mut String, params: &[Value], allow_none: bool) -> Result<(), EncodeError> {
    out.push_str("<params>\n");
    for param in params {
        out.push_str("<param>\n");
        write_value(out, param, allow_none, 0)?;
        out.push_str("\n</param>\n");
    }
    out.push_str("</params>\n");
    Ok(())
}

/// Encodes a `<methodCall>` document.
pub(crate) fn method_call(
    method_name: &str,
    params: &[Value],
    allow_none: bool,
) -> Result<String, EncodeError> {
    check_text(method_name)?;
    let mut out = String::from(XML_DECL);
    out.push_str("<methodCall>\n<methodName>");
    escape_text(&mut out, method_name);
    out.push_str("</methodName>\n");
    write_params(&mut out, params, allow_none)?;
    out.push_str("</methodCall>\n");
    Ok(out)
}

/// Encodes a successful `<methodResponse>` document.
pub(crate) fn method_response(value: &Value, allow_none: bool) -> Result<String, EncodeError> {
    let mut out = String::from(XML_DECL);
    out.push_str("<methodResponse>\n");
    write_params(&mut out, std::slice::from_ref(value), allow_none)?;
    out.push_str("</methodResponse>\n");
    Ok(out)
}

/// Encodes a fault `<methodResponse>` document.
///
/// A fault struct only carries an int and a string, so this cannot fail.
/// Characters XML does not allow are replaced in the message.
pub(crate) fn fault_response(fault: &Fault) -> String {
    let message: String = fault
        .message
        .chars()
        .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
        .collect();
    let mut out = String::from(XML_DECL);
    out.push_str("<methodResponse>\n<fault>\n");
    out.push_str("<value><struct>\n<member>\n<name>faultCode</name>\n<value><int>");
    out.push_str(&fault.code.to_string());
    out.push_str("</int></value>\n</member>\n<member>\n<name>faultString</name>\n<value><string>");
    escape_text(&mut out, &message);
    out.push_str("</string></value>\n</member>\n</struct></value>\n</fault>\n</methodResponse>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &Value) -> String {
        let mut out = String::new();
        write_value(&mut out, value, true, 0).expect("encode");
        out
    }

    #[test]
    fn small_ints_use_int_tag() {
        assert_eq!(encode(&Value::Int(42)), "<value><int>42</int></value>");
    }

    #[test]
    fn wide_ints_use_i8_tag() {
        let big = i64::from(i32::MAX) + 1;
        assert_eq!(encode(&Value::Int(big)), format!("<value><i8>{big}</i8></value>"));
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(
            encode(&Value::from("a<b & c")),
            "<value><string>a&lt;b &amp; c</string></value>"
        );
    }

    #[test]
    fn booleans_are_digits() {
        assert_eq!(encode(&Value::Bool(true)), "<value><boolean>1</boolean></value>");
    }

    #[test]
    fn nil_rejected_when_disabled() {
        let mut out = String::new();
        let err = write_value(&mut out, &Value::Nil, false, 0).expect_err("nil");
        assert_eq!(err, EncodeError::NilNotAllowed);
    }

    #[test]
    fn check_walks_nested_values() {
        let nested = Value::Array(vec![Value::structure([("x", Value::Double(f64::NAN))])]);
        assert!(matches!(
            check(&nested, true, 0),
            Err(EncodeError::NonFiniteDouble(_))
        ));
        assert!(check(&Value::Array(vec![Value::Nil]), true, 0).is_ok());
    }

    #[test]
    fn subsecond_datetime_rejected() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_milli_opt(3, 4, 5, 678))
            .expect("datetime");
        let mut out = String::new();
        let err = write_value(&mut out, &Value::DateTime(dt), false, 0).expect_err("sub-second");
        assert!(matches!(err, EncodeError::UnrepresentableDateTime(_)));
        assert!(check(&Value::DateTime(dt), false, 0).is_err());
    }

    #[test]
    fn five_digit_year_rejected() {
        let dt = chrono::NaiveDate::from_ymd_opt(10_000, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("datetime");
        assert!(matches!(
            check(&Value::DateTime(dt), false, 0),
            Err(EncodeError::UnrepresentableDateTime(_))
        ));
    }

    #[test]
    fn control_characters_rejected() {
        assert_eq!(
            check(&Value::from("a\u{1}b"), false, 0),
            Err(EncodeError::InvalidXmlChar(1))
        );
        assert_eq!(
            check(&Value::structure([("k\u{FFFE}", Value::Int(1))]), false, 0),
            Err(EncodeError::InvalidXmlChar(0xFFFE))
        );
        assert!(method_call("bad\u{0}name", &[], false).is_err());
    }

    #[test]
    fn carriage_return_is_a_char_reference() {
        assert_eq!(
            encode(&Value::from("a\r\nb")),
            "<value><string>a&#13;\nb</string></value>"
        );
    }

    #[test]
    fn depth_is_bounded() {
        let mut deep = Value::Int(1);
        for _ in 0..MAX_DEPTH {
            deep = Value::Array(vec![deep]);
        }
        assert_eq!(check(&deep, false, 0), Err(EncodeError::TooDeep(MAX_DEPTH)));
        let mut out = String::new();
        assert_eq!(
            write_value(&mut out, &deep, false, 0),
            Err(EncodeError::TooDeep(MAX_DEPTH))
        );
    }

    #[test]
    fn fault_message_control_chars_replaced() {
        let xml = fault_response(&Fault::new(1, "bad\u{7}byte"));
        assert!(xml.contains("bad\u{FFFD}byte"));
    }

    #[test]
    fn fault_document_shape() {
        let xml = fault_response(&Fault::new(-32601, "method \"x\" is not supported"));
        assert!(xml.contains("<fault>"));
        assert!(xml.contains("<int>-32601</int>"));
        assert!(xml.contains("&quot;x&quot;"));
    }
}
