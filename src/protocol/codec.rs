//! Protocol codec
//!
//! Stream decoding and encoding of RESP values.
//!
//! ## Wire Format
//!
//! ```text
//! +<text>\r\n                     simple string
//! -<text>\r\n                     error
//! :<digits>\r\n                   integer
//! $<len>\r\n<len bytes>\r\n       bulk string ($-1\r\n is null)
//! *<count>\r\n<count bulks>       array
//! PING\r\n | QUIT\r\n             inline command, read as *1\r\n$4\r\nPING\r\n
//! ```
//!
//! Bulk payloads are read by length, never by scanning for a terminator,
//! so they may contain `\r\n`.

use std::io::{BufRead, Read, Write};

use bytes::Bytes;

use crate::config::Config;
use crate::error::{RespError, Result};
use super::length::parse_len;
use super::value::{Bulk, Kind, Value};
use super::wire::{
    ARRAY_SIGIL, BULK_SIGIL, CRLF, ERROR_SIGIL, INLINE_LINE_LEN, INTEGER_SIGIL, PING, QUIT,
    SIMPLE_SIGIL,
};

/// Upper bound on bytes reserved from a peer-declared length before the
/// bytes have actually arrived
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Upper bound on array slots reserved from a peer-declared count
const ELEMENT_PREALLOC_LIMIT: usize = 1024;

// =============================================================================
// Decoding
// =============================================================================

/// Read one value from a buffered stream using the default limits
///
/// Consumes exactly the bytes of one frame, so repeated calls decode
/// back-to-back frames.
pub fn read_value<R: BufRead>(reader: &mut R) -> Result<Value> {
    read_value_with_config(reader, &Config::default())
}

/// Read one value from a buffered stream
///
/// Blocks until a complete frame is received or an error occurs. After an
/// error the stream position is undefined and the connection should be
/// dropped.
pub fn read_value_with_config<R: BufRead>(reader: &mut R, config: &Config) -> Result<Value> {
    let result = read_line(reader, config).and_then(|line| decode_frame(reader, line, config));

    match &result {
        Ok(value) => tracing::trace!(kind = %value.kind(), len = value.len(), "decoded frame"),
        Err(e) if !e.is_disconnect() => tracing::debug!("Rejected frame: {}", e),
        Err(_) => {}
    }

    result
}

/// Decode the first frame of an in-memory buffer
pub fn decode_value(bytes: &[u8]) -> Result<Value> {
    let mut reader = bytes;
    read_value(&mut reader)
}

/// Read a header line, terminator included
fn read_line<R: BufRead>(reader: &mut R, config: &Config) -> Result<Bytes> {
    let mut line = Vec::new();
    let limit = config.max_line_len as u64;
    reader.by_ref().take(limit).read_until(b'\n', &mut line)?;

    if line.is_empty() {
        return Err(RespError::Closed);
    }

    if !line.ends_with(b"\n") {
        if line.len() >= config.max_line_len {
            return Err(RespError::TooLarge {
                what: "header line",
                size: line.len(),
                max: config.max_line_len,
            });
        }
        return Err(RespError::unexpected_eof("connection closed mid-line"));
    }

    if !line.ends_with(CRLF) {
        return Err(RespError::MalformedHeader(format!(
            "line not terminated by CRLF: \"{}\"",
            line.escape_ascii()
        )));
    }

    Ok(Bytes::from(line))
}

/// Header body: the bytes between the sigil and the terminator
fn header_body(line: &Bytes) -> Bytes {
    line.slice(1..line.len() - CRLF.len())
}

/// Payload of a simple, error or integer line
fn line_payload(line: &Bytes) -> Result<Bytes> {
    let body = header_body(line);
    if body.contains(&b'\r') {
        return Err(RespError::MalformedHeader(format!(
            "stray CR in line: \"{}\"",
            line.escape_ascii()
        )));
    }
    Ok(body)
}

fn decode_frame<R: BufRead>(reader: &mut R, line: Bytes, config: &Config) -> Result<Value> {
    match line[0] {
        SIMPLE_SIGIL => Ok(Value::Simple(line_payload(&line)?)),
        ERROR_SIGIL => Ok(Value::Error(line_payload(&line)?)),
        INTEGER_SIGIL => Ok(Value::Integer(line_payload(&line)?)),
        BULK_SIGIL => Ok(Value::Bulk(read_bulk(reader, &header_body(&line), config)?)),
        ARRAY_SIGIL => read_array(reader, &header_body(&line), config),
        b'Q' | b'q' => inline_command(&line, QUIT),
        b'P' | b'p' => inline_command(&line, PING),
        _ => Err(RespError::UnknownSigil { raw: line.to_vec() }),
    }
}

/// Read a bulk payload whose header has already been consumed
fn read_bulk<R: BufRead>(reader: &mut R, header: &[u8], config: &Config) -> Result<Bulk> {
    let len = match parse_len(header)? {
        Some(len) => len,
        None => return Ok(Bulk::Null),
    };

    if len > config.max_bulk_len {
        return Err(RespError::TooLarge {
            what: "bulk string",
            size: len,
            max: config.max_bulk_len,
        });
    }

    // Payload plus its terminator; the buffer grows as bytes arrive
    let total = len.checked_add(CRLF.len()).ok_or(RespError::TooLarge {
        what: "bulk string",
        size: len,
        max: config.max_bulk_len,
    })?;
    let mut payload = Vec::with_capacity(total.min(PREALLOC_LIMIT));
    reader.by_ref().take(total as u64).read_to_end(&mut payload)?;

    if payload.len() < total {
        return Err(RespError::unexpected_eof("short read in bulk payload"));
    }

    if !payload.ends_with(CRLF) {
        return Err(RespError::MalformedHeader(
            "bulk payload not terminated by CRLF".to_string(),
        ));
    }

    payload.truncate(len);
    Ok(Bulk::Data(Bytes::from(payload)))
}

/// Read the elements of an array whose header has already been consumed
///
/// A declared count of `-1` yields an empty array.
fn read_array<R: BufRead>(reader: &mut R, header: &[u8], config: &Config) -> Result<Value> {
    let count = parse_len(header)?.unwrap_or(0);

    if count > config.max_array_len {
        return Err(RespError::TooLarge {
            what: "array",
            size: count,
            max: config.max_array_len,
        });
    }

    let mut elements = Vec::with_capacity(count.min(ELEMENT_PREALLOC_LIMIT));
    for _ in 0..count {
        elements.push(read_element(reader, config)?);
    }

    Ok(Value::Array(elements))
}

/// Read one array element, which must be a bulk string
///
/// Non-bulk elements are rejected from their header line alone, so a peer
/// cannot drive unbounded recursion with nested array headers.
fn read_element<R: BufRead>(reader: &mut R, config: &Config) -> Result<Bulk> {
    let line = read_line(reader, config)?;

    let found = match line[0] {
        BULK_SIGIL => return read_bulk(reader, &header_body(&line), config),
        SIMPLE_SIGIL => Kind::Simple,
        ERROR_SIGIL => Kind::Error,
        INTEGER_SIGIL => Kind::Integer,
        ARRAY_SIGIL => Kind::Array,
        b'Q' | b'q' => inline_command(&line, QUIT)?.kind(),
        b'P' | b'p' => inline_command(&line, PING)?.kind(),
        _ => return Err(RespError::UnknownSigil { raw: line.to_vec() }),
    };

    Err(RespError::FramingMismatch {
        expected: Kind::Bulk,
        found,
    })
}

/// Normalize a bare `PING`/`QUIT` line into a single-element command array
///
/// The word itself is checked too, so a 6-byte line such as `PXYZ\r\n` is
/// rejected rather than read as `PING`.
fn inline_command(line: &[u8], name: &'static [u8]) -> Result<Value> {
    if line.len() != INLINE_LINE_LEN || !line[..name.len()].eq_ignore_ascii_case(name) {
        return Err(RespError::MalformedInline { raw: line.to_vec() });
    }

    Ok(Value::Array(vec![Bulk::Data(Bytes::from_static(name))]))
}

// =============================================================================
// Encoding
// =============================================================================

/// Render a value to its wire bytes
pub fn encode_value(value: &Value) -> Vec<u8> {
    value.encode().to_vec()
}

/// Write a value to a stream and flush it
pub fn write_value<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    let bytes = value.encode();
    tracing::trace!(kind = %value.kind(), bytes = bytes.len(), "encoding frame");
    write_raw(writer, &bytes)
}

/// Write pre-rendered frame bytes to a stream and flush them
pub fn write_raw<W: Write>(writer: &mut W, data: &[u8]) -> Result<()> {
    writer.write_all(data)?;
    writer.flush()?;
    Ok(())
}
