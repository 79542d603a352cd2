//! Minimal XML-RPC codec
//!
//! Covers the subset of XML-RPC the Gandi domain API uses: scalar values,
//! structs, arrays and faults. Requests are written with escaped strings,
//! responses are read with `quick-xml` into a flat token list and then parsed
//! by recursive descent.

use std::fmt::Write as _;

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;

/// An XML-RPC value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Int(i64),
    Bool(bool),
    String(String),
    Double(f64),
    DateTime(String),
    Base64(String),
    Struct(Vec<(String, Value)>),
    Array(Vec<Value>),
    Nil,
}

impl Value {
    /// Build a struct value from `(name, value)` pairs.
    pub fn structure<I, K>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::Struct(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            // Some endpoints answer booleans as 0/1 integers
            Self::Int(i) => Some(*i != 0),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::DateTime(s) | Self::Base64(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a struct member by name.
    pub fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Struct(members) => members.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

/// A fault returned instead of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fault {
    pub code: i64,
    pub message: String,
}

/// Response body could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodeError(pub String);

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid XML-RPC response: {}", self.0)
    }
}

// ============ Encoding ============

/// Serialize a `methodCall` document.
pub(crate) fn encode_call(method: &str, params: &[Value]) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?><methodCall><methodName>");
    out.push_str(&escape(method));
    out.push_str("</methodName><params>");
    for param in params {
        out.push_str("<param>");
        write_value(&mut out, param);
        out.push_str("</param>");
    }
    out.push_str("</params></methodCall>");
    out
}

fn write_value(out: &mut String, value: &Value) {
    out.push_str("<value>");
    match value {
        Value::Int(i) => {
            let _ = write!(out, "<int>{i}</int>");
        }
        Value::Bool(b) => {
            let _ = write!(out, "<boolean>{}</boolean>", u8::from(*b));
        }
        Value::String(s) => {
            let _ = write!(out, "<string>{}</string>", escape(s.as_str()));
        }
        Value::Double(d) => {
            let _ = write!(out, "<double>{d}</double>");
        }
        Value::DateTime(s) => {
            let _ = write!(out, "<dateTime.iso8601>{}</dateTime.iso8601>", escape(s.as_str()));
        }
        Value::Base64(s) => {
            let _ = write!(out, "<base64>{}</base64>", escape(s.as_str()));
        }
        Value::Struct(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                let _ = write!(out, "<member><name>{}</name>", escape(name.as_str()));
                write_value(out, member);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                write_value(out, item);
            }
            out.push_str("</data></array>");
        }
        Value::Nil => out.push_str("<nil/>"),
    }
    out.push_str("</value>");
}

// ============ Decoding ============

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open(String),
    Close(String),
    Text(String),
}

fn tokenize(xml: &str) -> Result<Vec<Token>, DecodeError> {
    // Text is kept verbatim; string payloads may carry significant whitespace
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let tag_name = |raw: &[u8]| {
        std::str::from_utf8(raw)
            .map(str::to_string)
            .map_err(|e| DecodeError(e.to_string()))
    };

    let mut tokens = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => tokens.push(Token::Open(tag_name(e.name().as_ref())?)),
            Ok(Event::End(e)) => tokens.push(Token::Close(tag_name(e.name().as_ref())?)),
            Ok(Event::Empty(e)) => {
                let name = tag_name(e.name().as_ref())?;
                tokens.push(Token::Open(name.clone()));
                tokens.push(Token::Close(name));
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| DecodeError(e.to_string()))?;
                tokens.push(Token::Text(text.into_owned()));
            }
            Ok(Event::CData(c)) => {
                tokens.push(Token::Text(String::from_utf8_lossy(&c.into_inner()).into_owned()));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(DecodeError(e.to_string())),
        }
    }
    Ok(tokens)
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, DecodeError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| DecodeError("unexpected end of document".to_string()))?;
        self.pos += 1;
        Ok(token)
    }

    /// Skip indentation between structural tags.
    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(Token::Text(t)) if is_blank(t)) {
            self.pos += 1;
        }
    }

    fn take_text(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::Text(t)) => {
                let t = t.clone();
                self.pos += 1;
                Some(t)
            }
            _ => None,
        }
    }

    fn peek_is_open(&mut self, name: &str) -> bool {
        self.skip_ws();
        matches!(self.peek(), Some(Token::Open(n)) if n == name)
    }

    fn expect_open(&mut self, name: &str) -> Result<(), DecodeError> {
        self.skip_ws();
        match self.next()? {
            Token::Open(n) if n == name => Ok(()),
            other => Err(DecodeError(format!("expected <{name}>, found {other:?}"))),
        }
    }

    fn expect_close(&mut self, name: &str) -> Result<(), DecodeError> {
        self.skip_ws();
        match self.next()? {
            Token::Close(n) if n == name => Ok(()),
            other => Err(DecodeError(format!("expected </{name}>, found {other:?}"))),
        }
    }

    /// Optional text content, kept exactly, followed by the closing tag.
    fn text_until_close(&mut self, name: &str) -> Result<String, DecodeError> {
        let text = self.take_text().unwrap_or_default();
        self.expect_close(name)?;
        Ok(text)
    }

    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        self.expect_open("value")?;
        let leading = self.take_text();
        let kind = match self.peek() {
            Some(Token::Open(kind)) if leading.as_deref().is_none_or(is_blank) => Some(kind.clone()),
            _ => None,
        };
        let value = match kind {
            Some(kind) => {
                self.pos += 1;
                self.parse_typed(&kind)?
            }
            // Untyped values are strings
            None => Value::String(leading.unwrap_or_default()),
        };
        self.expect_close("value")?;
        Ok(value)
    }

    fn parse_typed(&mut self, kind: &str) -> Result<Value, DecodeError> {
        match kind {
            "int" | "i4" | "i8" => {
                let text = self.text_until_close(kind)?;
                text.trim()
                    .parse()
                    .map(Value::Int)
                    .map_err(|e| DecodeError(format!("bad <{kind}> '{text}': {e}")))
            }
            "boolean" => match self.text_until_close(kind)?.trim() {
                "1" => Ok(Value::Bool(true)),
                "0" => Ok(Value::Bool(false)),
                other => Err(DecodeError(format!("bad <boolean> '{other}'"))),
            },
            "double" => {
                let text = self.text_until_close(kind)?;
                text.trim()
                    .parse()
                    .map(Value::Double)
                    .map_err(|e| DecodeError(format!("bad <double> '{text}': {e}")))
            }
            "string" => Ok(Value::String(self.text_until_close(kind)?)),
            "dateTime.iso8601" => Ok(Value::DateTime(self.text_until_close(kind)?)),
            "base64" => Ok(Value::Base64(self.text_until_close(kind)?)),
            "nil" => {
                self.expect_close(kind)?;
                Ok(Value::Nil)
            }
            "struct" => {
                let mut members = Vec::new();
                while self.peek_is_open("member") {
                    self.expect_open("member")?;
                    self.expect_open("name")?;
                    let name = self.text_until_close("name")?;
                    let value = self.parse_value()?;
                    self.expect_close("member")?;
                    members.push((name, value));
                }
                self.expect_close(kind)?;
                Ok(Value::Struct(members))
            }
            "array" => {
                self.expect_open("data")?;
                let mut items = Vec::new();
                while self.peek_is_open("value") {
                    items.push(self.parse_value()?);
                }
                self.expect_close("data")?;
                self.expect_close(kind)?;
                Ok(Value::Array(items))
            }
            other => Err(DecodeError(format!("unsupported value type <{other}>"))),
        }
    }
}

/// Parse a `methodResponse` document into either its single result or its fault.
pub(crate) fn decode_response(xml: &str) -> Result<Result<Value, Fault>, DecodeError> {
    let mut parser = Parser {
        tokens: tokenize(xml)?,
        pos: 0,
    };

    parser.expect_open("methodResponse")?;
    let outcome = if parser.peek_is_open("fault") {
        parser.expect_open("fault")?;
        let value = parser.parse_value()?;
        parser.expect_close("fault")?;
        Err(Fault {
            code: value
                .member("faultCode")
                .and_then(Value::as_i64)
                .unwrap_or_default(),
            message: value
                .member("faultString")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    } else {
        parser.expect_open("params")?;
        parser.expect_open("param")?;
        let value = parser.parse_value()?;
        parser.expect_close("param")?;
        parser.expect_close("params")?;
        Ok(value)
    };
    parser.expect_close("methodResponse")?;

    Ok(outcome)
}
