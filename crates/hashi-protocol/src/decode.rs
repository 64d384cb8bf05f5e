//! XML-RPC document decoding.
//!
//! The body is first flattened into open/close/text tokens with
//! `quick-xml`, then walked by a small recursive-descent parser. Text
//! inside `<string>` and untyped `<value>` elements is kept verbatim;
//! whitespace-only text between structural elements is ignored.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use hashi_types::{Fault, Value};

use crate::codec::MAX_DEPTH;
use crate::envelope::{CallEnvelope, MethodResponse};
use crate::error::DecodeError;

/// Accepted `dateTime.iso8601` layouts; the first one is what we emit.
pub(crate) const DATETIME_FORMATS: [&str; 2] = ["%Y%m%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open(String),
    Close(String),
    Text(String),
}

fn tokenize(input: &str) -> Result<Vec<Token>, DecodeError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().expand_empty_elements = true;

    let mut tokens = Vec::new();
    loop {
        let event = reader
            .read_event()
            .map_err(|e| DecodeError::Xml(e.to_string()))?;
        match event {
            Event::Start(e) => tokens.push(Token::Open(element_name(e.local_name().as_ref())?)),
            Event::End(e) => tokens.push(Token::Close(element_name(e.local_name().as_ref())?)),
            Event::Empty(e) => {
                let name = element_name(e.local_name().as_ref())?;
                tokens.push(Token::Open(name.clone()));
                tokens.push(Token::Close(name));
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| DecodeError::Xml(e.to_string()))?;
                push_text(&mut tokens, &text);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                let text = std::str::from_utf8(&raw)
                    .map_err(|e| DecodeError::Xml(format!("invalid UTF-8 in CDATA: {e}")))?;
                push_text(&mut tokens, text);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes.
            _ => {}
        }
    }

    if !tokens.iter().any(|t| matches!(t, Token::Open(_))) {
        return Err(DecodeError::Xml("no element found".into()));
    }
    Ok(tokens)
}

fn element_name(raw: &[u8]) -> Result<String, DecodeError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| DecodeError::Xml(format!("invalid UTF-8 in element name: {e}")))
}

fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Text(prev)) = tokens.last_mut() {
        prev.push_str(text);
    } else {
        tokens.push(Token::Text(text.to_string()));
    }
}

fn structure(message: impl Into<String>) -> DecodeError {
    DecodeError::Structure(message.into())
}

/// Recursive-descent walker over the token stream.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    allow_none: bool,
}

impl Parser {
    pub(crate) fn new(input: &str, allow_none: bool) -> Result<Self, DecodeError> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
            depth: 0,
            allow_none,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn skip_whitespace(&mut self) -> Result<(), DecodeError> {
        while let Some(Token::Text(t)) = self.peek() {
            if !t.trim().is_empty() {
                return Err(structure(format!("unexpected text '{}'", t.trim())));
            }
            self.pos += 1;
        }
        Ok(())
    }

    /// Returns the name of the next opening tag, skipping whitespace.
    fn peek_open(&mut self) -> Result<Option<String>, DecodeError> {
        self.skip_whitespace()?;
        Ok(match self.peek() {
            Some(Token::Open(name)) => Some(name.clone()),
            _ => None,
        })
    }

    fn expect_open(&mut self, name: &str) -> Result<(), DecodeError> {
        self.skip_whitespace()?;
        match self.peek() {
            Some(Token::Open(n)) if n == name => {
                self.pos += 1;
                Ok(())
            }
            Some(Token::Open(n)) => Err(structure(format!("expected <{name}>, found <{n}>"))),
            Some(Token::Close(n)) => Err(structure(format!("expected <{name}>, found </{n}>"))),
            Some(Token::Text(_)) | None => Err(structure(format!("expected <{name}>"))),
        }
    }

    fn expect_close(&mut self, name: &str) -> Result<(), DecodeError> {
        self.skip_whitespace()?;
        match self.peek() {
            Some(Token::Close(n)) if n == name => {
                self.pos += 1;
                Ok(())
            }
            Some(Token::Open(n)) => Err(structure(format!("unexpected <{n}> inside <{name}>"))),
            _ => Err(structure(format!("expected </{name}>"))),
        }
    }

    /// Consumes the text content of the current element, verbatim.
    fn take_text(&mut self) -> String {
        if let Some(Token::Text(t)) = self.peek() {
            let text = t.clone();
            self.pos += 1;
            text
        } else {
            String::new()
        }
    }

    /// Reads `<name>text</name>` and returns the text.
    fn text_element(&mut self, name: &str) -> Result<String, DecodeError> {
        self.expect_open(name)?;
        let text = self.take_text();
        self.expect_close(name)?;
        Ok(text)
    }

    fn expect_end(&mut self) -> Result<(), DecodeError> {
        self.skip_whitespace()?;
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(structure("trailing content after document element")),
        }
    }

    /// Parses a complete `<methodCall>` document.
    pub(crate) fn method_call(&mut self) -> Result<CallEnvelope, DecodeError> {
        self.expect_open("methodCall")?;
        let method_name = self.text_element("methodName")?.trim().to_string();
        if method_name.is_empty() {
            return Err(structure("methodName is empty"));
        }
        let params = match self.peek_open()?.as_deref() {
            Some("params") => self.params()?,
            _ => Vec::new(),
        };
        self.expect_close("methodCall")?;
        self.expect_end()?;
        Ok(CallEnvelope {
            method_name,
            params,
        })
    }

    /// Parses a complete `<methodResponse>` document.
    pub(crate) fn method_response(&mut self) -> Result<MethodResponse, DecodeError> {
        self.expect_open("methodResponse")?;
        let response = match self.peek_open()?.as_deref() {
            Some("fault") => {
                self.expect_open("fault")?;
                let value = self.value()?;
                self.expect_close("fault")?;
                let fault = Fault::from_value(&value)
                    .ok_or_else(|| structure("fault must carry faultCode and faultString"))?;
                MethodResponse::Fault(fault)
            }
            Some("params") => {
                let mut params = self.params()?;
                if params.len() != 1 {
                    return Err(structure(format!(
                        "response must carry exactly one param, found {}",
                        params.len()
                    )));
                }
                MethodResponse::Success(params.remove(0))
            }
            _ => return Err(structure("expected <params> or <fault>")),
        };
        self.expect_close("methodResponse")?;
        self.expect_end()?;
        Ok(response)
    }

    /// Parses a single standalone `<value>` fragment.
    pub(crate) fn standalone_value(&mut self) -> Result<Value, DecodeError> {
        let value = self.value()?;
        self.expect_end()?;
        Ok(value)
    }

    fn params(&mut self) -> Result<Vec<Value>, DecodeError> {
        self.expect_open("params")?;
        let mut params = Vec::new();
        while self.peek_open()?.as_deref() == Some("param") {
            self.expect_open("param")?;
            params.push(self.value()?);
            self.expect_close("param")?;
        }
        self.expect_close("params")?;
        Ok(params)
    }

    fn value(&mut self) -> Result<Value, DecodeError> {
        if self.depth >= MAX_DEPTH {
            return Err(structure(format!(
                "values nested deeper than {MAX_DEPTH} levels"
            )));
        }
        self.depth += 1;
        let value = self.value_inner();
        self.depth -= 1;
        value
    }

    fn value_inner(&mut self) -> Result<Value, DecodeError> {
        self.expect_open("value")?;

        // Untyped content is a string, kept exactly as sent.
        match (self.peek(), self.tokens.get(self.pos + 1)) {
            (Some(Token::Close(n)), _) if n == "value" => {
                self.pos += 1;
                return Ok(Value::String(String::new()));
            }
            (Some(Token::Text(t)), Some(Token::Close(n))) if n == "value" => {
                let text = t.clone();
                self.pos += 2;
                return Ok(Value::String(text));
            }
            _ => {}
        }

        let tag = self
            .peek_open()?
            .ok_or_else(|| structure("expected a typed value inside <value>"))?;
        let value = self.typed(&tag)?;
        self.expect_close("value")?;
        Ok(value)
    }

    fn typed(&mut self, tag: &str) -> Result<Value, DecodeError> {
        match tag {
            "array" => return self.array(),
            "struct" => return self.struct_value(),
            _ => {}
        }

        let text = self.text_element(tag)?;
        match tag {
            "int" | "i4" | "i8" => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| invalid("int", &text, e)),
            "boolean" => match text.trim() {
                "1" => Ok(Value::Bool(true)),
                "0" => Ok(Value::Bool(false)),
                other => Err(DecodeError::InvalidValue {
                    kind: "boolean",
                    detail: format!("expected 0 or 1, got '{other}'"),
                }),
            },
            "double" => text
                .trim()
                .parse::<f64>()
                .map(Value::Double)
                .map_err(|e| invalid("double", &text, e)),
            "string" => Ok(Value::String(text)),
            "base64" => {
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                STANDARD
                    .decode(compact)
                    .map(Value::Bytes)
                    .map_err(|e| invalid("base64", &text, e))
            }
            "dateTime.iso8601" => parse_datetime(text.trim()).map(Value::DateTime),
            "nil" => {
                if !text.trim().is_empty() {
                    return Err(structure("<nil/> must be empty"));
                }
                if self.allow_none {
                    Ok(Value::Nil)
                } else {
                    Err(DecodeError::NilNotAllowed)
                }
            }
            other => Err(structure(format!("unknown value type <{other}>"))),
        }
    }

    fn array(&mut self) -> Result<Value, DecodeError> {
        self.expect_open("array")?;
        self.expect_open("data")?;
        let mut items = Vec::new();
        while self.peek_open()?.as_deref() == Some("value") {
            items.push(self.value()?);
        }
        self.expect_close("data")?;
        self.expect_close("array")?;
        Ok(Value::Array(items))
    }

    fn struct_value(&mut self) -> Result<Value, DecodeError> {
        self.expect_open("struct")?;
        let mut members = BTreeMap::new();
        while self.peek_open()?.as_deref() == Some("member") {
            self.expect_open("member")?;
            let name = self.text_element("name")?;
            let value = self.value()?;
            self.expect_close("member")?;
            members.insert(name, value);
        }
        self.expect_close("struct")?;
        Ok(Value::Struct(members))
    }
}

fn invalid(kind: &'static str, text: &str, err: impl std::fmt::Display) -> DecodeError {
    DecodeError::InvalidValue {
        kind,
        detail: format!("'{}': {err}", text.trim()),
    }
}

fn parse_datetime(text: &str) -> Result<NaiveDateTime, DecodeError> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .ok_or_else(|| DecodeError::InvalidValue {
            kind: "dateTime.iso8601",
            detail: format!("'{text}' is not YYYYMMDDTHH:MM:SS"),
        })
}
