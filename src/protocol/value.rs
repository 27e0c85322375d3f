//! Value definitions
//!
//! The five RESP value kinds and their wire rendering.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{RespError, Result};
use super::length::encode_len;
use super::wire::{
    ARRAY_SIGIL, ASK, BULK_SIGIL, CRLF, ERROR_SIGIL, INTEGER_SIGIL, MOVED, NULL_BULK, OK, PONG,
    SIMPLE_SIGIL, SPACE,
};

/// Value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Simple,
    Error,
    Integer,
    Bulk,
    Array,
}

impl Kind {
    /// Leading byte of a frame of this kind
    pub fn sigil(self) -> u8 {
        match self {
            Kind::Simple => SIMPLE_SIGIL,
            Kind::Error => ERROR_SIGIL,
            Kind::Integer => INTEGER_SIGIL,
            Kind::Bulk => BULK_SIGIL,
            Kind::Array => ARRAY_SIGIL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Simple => "simple",
            Kind::Error => "error",
            Kind::Integer => "int",
            Kind::Bulk => "bulk",
            Kind::Array => "array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A bulk string: binary-safe, length-prefixed, possibly null
///
/// Null (`$-1\r\n`) and empty (`$0\r\n\r\n`) are distinct states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bulk {
    Null,
    Data(Bytes),
}

impl Bulk {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Bulk::Data(data.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Bulk::Null)
    }

    /// Payload bytes, `None` for null
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Bulk::Null => None,
            Bulk::Data(data) => Some(&data[..]),
        }
    }

    fn encode_into(&self, buf: &mut BytesMut) {
        match self {
            Bulk::Null => buf.put_slice(NULL_BULK),
            Bulk::Data(data) => {
                buf.reserve(data.len() + 16);
                buf.put_u8(BULK_SIGIL);
                buf.put_slice(&encode_len(data.len()));
                buf.put_slice(CRLF);
                buf.put_slice(data);
                buf.put_slice(CRLF);
            }
        }
    }
}

impl fmt::Display for Bulk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bulk::Null => Ok(()),
            Bulk::Data(data) => write!(f, "{}", String::from_utf8_lossy(data)),
        }
    }
}

/// A decoded or constructed RESP value
///
/// Arrays only hold bulk strings: that is the subset used for commands and
/// the only shape the decoder accepts inside an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `+<payload>\r\n`
    Simple(Bytes),

    /// `-<payload>\r\n`
    Error(Bytes),

    /// `:<payload>\r\n`, payload kept as the raw decimal text
    Integer(Bytes),

    /// `$<len>\r\n<payload>\r\n` or `$-1\r\n`
    Bulk(Bulk),

    /// `*<count>\r\n` followed by each element
    Array(Vec<Bulk>),
}

impl Value {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a simple string, rejecting payloads containing CR or LF
    pub fn simple(payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        check_line(Kind::Simple, &payload)?;
        Ok(Value::Simple(payload))
    }

    /// Create an error reply, rejecting payloads containing CR or LF
    pub fn error(payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        check_line(Kind::Error, &payload)?;
        Ok(Value::Error(payload))
    }

    pub fn integer(n: i64) -> Self {
        Value::Integer(Bytes::from(n.to_string()))
    }

    pub fn bulk(data: impl Into<Bytes>) -> Self {
        Value::Bulk(Bulk::new(data))
    }

    pub fn null_bulk() -> Self {
        Value::Bulk(Bulk::Null)
    }

    pub fn array(elements: Vec<Bulk>) -> Self {
        Value::Array(elements)
    }

    /// Create a command: an array of non-null bulk strings
    pub fn command<I, B>(args: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Value::Array(args.into_iter().map(Bulk::new).collect())
    }

    /// `+OK`
    pub fn ok() -> Self {
        Value::Simple(Bytes::from_static(OK))
    }

    /// `+PONG`
    pub fn pong() -> Self {
        Value::Simple(Bytes::from_static(PONG))
    }

    /// `-MOVED <slot> <addr>`
    pub fn moved(slot: u16, addr: &str) -> Result<Self> {
        redirect(MOVED, slot, addr)
    }

    /// `-ASK <slot> <addr>`
    pub fn ask(slot: u16, addr: &str) -> Result<Self> {
        redirect(ASK, slot, addr)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn kind(&self) -> Kind {
        match self {
            Value::Simple(_) => Kind::Simple,
            Value::Error(_) => Kind::Error,
            Value::Integer(_) => Kind::Integer,
            Value::Bulk(_) => Kind::Bulk,
            Value::Array(_) => Kind::Array,
        }
    }

    /// Number of array elements; zero for every other kind
    pub fn len(&self) -> usize {
        match self {
            Value::Array(elements) => elements.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of arguments following the command name
    ///
    /// One less than `len()` for arrays, never below zero. Zero for every
    /// other kind.
    pub fn arg_count(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// The value's elements as byte slices
    ///
    /// Line values and non-null bulks yield their payload; arrays yield the
    /// payload of each non-null element in order.
    pub fn args(&self) -> Vec<&[u8]> {
        match self {
            Value::Simple(payload) | Value::Error(payload) | Value::Integer(payload) => {
                vec![&payload[..]]
            }
            Value::Bulk(bulk) => bulk.as_bytes().into_iter().collect(),
            Value::Array(elements) => elements.iter().filter_map(Bulk::as_bytes).collect(),
        }
    }

    /// First element of a command array
    pub fn command_name(&self) -> Option<&[u8]> {
        match self {
            Value::Array(elements) => elements.first().and_then(Bulk::as_bytes),
            _ => None,
        }
    }

    /// Parse an integer reply
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(payload) => std::str::from_utf8(payload).ok()?.parse().ok(),
            _ => None,
        }
    }

    // =========================================================================
    // Wire Rendering
    // =========================================================================

    /// Render the value to its wire bytes
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::new();
        self.encode_into(&mut buf);
        buf
    }

    /// Render the value into an existing buffer
    pub fn encode_into(&self, buf: &mut BytesMut) {
        match self {
            Value::Simple(payload) | Value::Error(payload) | Value::Integer(payload) => {
                debug_assert!(
                    !has_line_break(payload),
                    "{} payload contains CR or LF",
                    self.kind()
                );
                buf.reserve(payload.len() + 3);
                buf.put_u8(self.kind().sigil());
                buf.put_slice(payload);
                buf.put_slice(CRLF);
            }
            Value::Bulk(bulk) => bulk.encode_into(buf),
            Value::Array(elements) => {
                buf.put_u8(ARRAY_SIGIL);
                buf.put_slice(&encode_len(elements.len()));
                buf.put_slice(CRLF);
                for element in elements {
                    element.encode_into(buf);
                }
            }
        }
    }
}

/// Space-joined elements, lossily decoded as UTF-8
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Simple(payload) | Value::Error(payload) | Value::Integer(payload) => {
                write!(f, "{}", String::from_utf8_lossy(payload))
            }
            Value::Bulk(bulk) => fmt::Display::fmt(bulk, f),
            Value::Array(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", SPACE as char)?;
                    }
                    fmt::Display::fmt(element, f)?;
                }
                Ok(())
            }
        }
    }
}

fn has_line_break(payload: &[u8]) -> bool {
    payload.iter().any(|&b| b == b'\r' || b == b'\n')
}

fn check_line(kind: Kind, payload: &[u8]) -> Result<()> {
    if has_line_break(payload) {
        return Err(RespError::InvalidPayload { kind });
    }
    Ok(())
}

fn redirect(word: &[u8], slot: u16, addr: &str) -> Result<Value> {
    let mut payload = BytesMut::with_capacity(word.len() + addr.len() + 8);
    payload.put_slice(word);
    payload.put_u8(SPACE);
    payload.put_slice(slot.to_string().as_bytes());
    payload.put_u8(SPACE);
    payload.put_slice(addr.as_bytes());
    Value::error(payload.freeze())
}
