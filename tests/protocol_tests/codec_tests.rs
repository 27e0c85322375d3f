//! Codec Tests
//!
//! Tests for decoding and encoding RESP frames over streams.

use std::io::{self, BufReader, Cursor};

use resp_codec::protocol::{
    decode_value, encode_value, read_value, read_value_with_config, write_raw, write_value,
};
use resp_codec::{Bulk, Config, Kind, RespError, Value};

/// Decode one frame from the bytes and re-encode it
fn reencode(bytes: &[u8]) -> Vec<u8> {
    let mut cursor = Cursor::new(bytes.to_vec());
    let value = read_value(&mut cursor).unwrap();
    assert_eq!(cursor.position() as usize, bytes.len(), "frame not fully consumed");

    let mut out = Vec::new();
    write_value(&mut out, &value).unwrap();
    out
}

// =============================================================================
// Line Value Tests
// =============================================================================

#[test]
fn test_decode_simple() {
    let value = decode_value(b"+OK\r\n").unwrap();
    assert_eq!(value, Value::Simple("OK".into()));
    assert_eq!(value.kind(), Kind::Simple);
}

#[test]
fn test_decode_error() {
    let value = decode_value(b"-MOVED 3999 127.0.0.1:6381\r\n").unwrap();
    assert_eq!(value.kind(), Kind::Error);
    assert_eq!(value.to_string(), "MOVED 3999 127.0.0.1:6381");
}

#[test]
fn test_decode_integer() {
    let value = decode_value(b":1000\r\n").unwrap();
    assert_eq!(value.kind(), Kind::Integer);
    assert_eq!(value.as_integer(), Some(1000));

    let value = decode_value(b":-42\r\n").unwrap();
    assert_eq!(value.as_integer(), Some(-42));
}

#[test]
fn test_decode_empty_simple() {
    let value = decode_value(b"+\r\n").unwrap();
    assert_eq!(value, Value::Simple("".into()));
}

// =============================================================================
// Bulk String Tests
// =============================================================================

#[test]
fn test_decode_null_bulk() {
    let value = decode_value(b"$-1\r\n").unwrap();
    assert_eq!(value, Value::null_bulk());
    assert_eq!(encode_value(&value), b"$-1\r\n");
}

#[test]
fn test_null_bulk_consumes_only_header() {
    let mut reader: &[u8] = b"$-1\r\n+OK\r\n";
    assert_eq!(read_value(&mut reader).unwrap(), Value::null_bulk());
    assert_eq!(read_value(&mut reader).unwrap(), Value::ok());
    assert!(reader.is_empty());
}

#[test]
fn test_decode_empty_bulk() {
    let value = decode_value(b"$0\r\n\r\n").unwrap();
    assert_eq!(value, Value::bulk(""));
    assert_ne!(value, Value::null_bulk());
    assert_eq!(encode_value(&value), b"$0\r\n\r\n");
}

#[test]
fn test_decode_bulk_with_embedded_terminator() {
    let value = decode_value(b"$8\r\na\r\nb\r\n\nc\r\n").unwrap();
    assert_eq!(value, Value::bulk(&b"a\r\nb\r\n\nc"[..]));
}

#[test]
fn test_decode_binary_bulk() {
    let payload: Vec<u8> = (0..=255).collect();
    let mut frame = b"$256\r\n".to_vec();
    frame.extend_from_slice(&payload);
    frame.extend_from_slice(b"\r\n");

    let value = decode_value(&frame).unwrap();
    assert_eq!(value, Value::bulk(payload));
}

#[test]
fn test_short_bulk_read_is_io_error() {
    // Declares 10 bytes, supplies fewer than 12
    let result = decode_value(b"$10\r\nabcdef");
    match result {
        Err(ref err @ RespError::Io(ref e)) => {
            assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);
            assert!(!err.is_disconnect());
        }
        other => panic!("Expected short read, got {:?}", other),
    }
}

#[test]
fn test_bulk_missing_trailing_terminator() {
    let result = decode_value(b"$3\r\nfooXY");
    assert!(matches!(result, Err(RespError::MalformedHeader(_))));
}

#[test]
fn test_bulk_invalid_length() {
    assert!(matches!(
        decode_value(b"$abc\r\n"),
        Err(RespError::InvalidLength(_))
    ));
    assert!(matches!(
        decode_value(b"$-2\r\n"),
        Err(RespError::InvalidLength(_))
    ));
    assert!(matches!(
        decode_value(b"$\r\n"),
        Err(RespError::InvalidLength(_))
    ));
}

// =============================================================================
// Array Tests
// =============================================================================

#[test]
fn test_decode_array_of_bulks() {
    let frame = b"*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n";
    let value = decode_value(frame).unwrap();

    assert_eq!(value, Value::command(["foo", "bar"]));
    assert_eq!(value.len(), 2);
    assert_eq!(reencode(frame), frame);
}

#[test]
fn test_decode_empty_array() {
    let value = decode_value(b"*0\r\n").unwrap();
    assert_eq!(value, Value::Array(vec![]));
    assert_eq!(encode_value(&value), b"*0\r\n");
}

#[test]
fn test_decode_array_with_null_element() {
    let value = decode_value(b"*3\r\n$3\r\nGET\r\n$-1\r\n$0\r\n\r\n").unwrap();
    assert_eq!(
        value,
        Value::Array(vec![Bulk::new("GET"), Bulk::Null, Bulk::new("")])
    );
}

#[test]
fn test_null_array_count_decodes_empty() {
    let value = decode_value(b"*-1\r\n").unwrap();
    assert_eq!(value, Value::Array(vec![]));
}

#[test]
fn test_array_with_nested_array_is_framing_mismatch() {
    let result = decode_value(b"*2\r\n$3\r\nfoo\r\n*1\r\n$3\r\nbar\r\n");
    match result {
        Err(RespError::FramingMismatch { expected, found }) => {
            assert_eq!(expected, Kind::Bulk);
            assert_eq!(found, Kind::Array);
        }
        other => panic!("Expected framing mismatch, got {:?}", other),
    }
}

#[test]
fn test_array_with_line_element_is_framing_mismatch() {
    for (frame, kind) in [
        (&b"*1\r\n+OK\r\n"[..], Kind::Simple),
        (&b"*1\r\n-ERR\r\n"[..], Kind::Error),
        (&b"*1\r\n:1\r\n"[..], Kind::Integer),
        (&b"*1\r\nPING\r\n"[..], Kind::Array),
    ] {
        match decode_value(frame) {
            Err(RespError::FramingMismatch { found, .. }) => assert_eq!(found, kind),
            other => panic!("Expected framing mismatch, got {:?}", other),
        }
    }
}

#[test]
fn test_array_truncated_mid_element() {
    let result = decode_value(b"*2\r\n$3\r\nfoo\r\n$3\r\nba");
    assert!(matches!(result, Err(RespError::Io(_))));
}

// =============================================================================
// Inline Command Tests
// =============================================================================

#[test]
fn test_inline_ping() {
    for frame in [&b"PING\r\n"[..], b"ping\r\n", b"Ping\r\n"] {
        let value = decode_value(frame).unwrap();
        assert_eq!(value, Value::command(["PING"]));
        assert_eq!(value.command_name(), Some(&b"PING"[..]));
    }
}

#[test]
fn test_inline_quit() {
    for frame in [&b"QUIT\r\n"[..], b"quit\r\n"] {
        let value = decode_value(frame).unwrap();
        assert_eq!(value, Value::command(["QUIT"]));
    }
}

#[test]
fn test_inline_matches_framed_form() {
    let framed = decode_value(b"*1\r\n$4\r\nPING\r\n").unwrap();
    let inline = decode_value(b"ping\r\n").unwrap();
    assert_eq!(framed, inline);
    assert_eq!(encode_value(&inline), b"*1\r\n$4\r\nPING\r\n");
}

#[test]
fn test_inline_wrong_length_rejected() {
    for frame in [
        &b"PINGG\r\n"[..],
        b"PIN\r\n",
        b"p\r\n",
        b"QUITTING\r\n",
        b"q\r\n",
        b"PING foo\r\n",
    ] {
        let result = decode_value(frame);
        assert!(
            matches!(result, Err(RespError::MalformedInline { .. })),
            "{:?} should be rejected, got {:?}",
            frame.escape_ascii().to_string(),
            result
        );
    }
}

#[test]
fn test_inline_wrong_word_rejected() {
    assert!(matches!(
        decode_value(b"PONG\r\n"),
        Err(RespError::MalformedInline { .. })
    ));
    assert!(matches!(
        decode_value(b"QUIZ\r\n"),
        Err(RespError::MalformedInline { .. })
    ));
    assert!(matches!(
        decode_value(b"PXYZ\r\n"),
        Err(RespError::MalformedInline { .. })
    ));
}

// =============================================================================
// Malformed Input Tests
// =============================================================================

#[test]
fn test_unknown_sigil_reports_raw_bytes() {
    match decode_value(b"GET key\r\n") {
        Err(RespError::UnknownSigil { raw }) => assert_eq!(raw, b"GET key\r\n"),
        other => panic!("Expected unknown sigil, got {:?}", other),
    }
}

#[test]
fn test_missing_carriage_return() {
    let result = decode_value(b"+OK\n");
    assert!(matches!(result, Err(RespError::MalformedHeader(_))));
}

#[test]
fn test_empty_stream_is_clean_close() {
    let err = decode_value(b"").unwrap_err();
    assert!(matches!(err, RespError::Closed));
    assert!(err.is_disconnect());
}

#[test]
fn test_eof_mid_header() {
    let err = decode_value(b"$12").unwrap_err();
    match &err {
        RespError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("Expected short read, got {:?}", other),
    }
    assert!(!err.is_disconnect());
}

#[test]
fn test_truncated_bulk_in_array_is_not_disconnect() {
    let err = decode_value(b"*3\r\n$3\r\nSET\r\n$10\r\nabc").unwrap_err();
    match &err {
        RespError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("Expected short read, got {:?}", other),
    }
    assert!(!err.is_disconnect());
}

// =============================================================================
// Limit Tests
// =============================================================================

#[test]
fn test_bulk_len_overflow_with_uncapped_config() {
    let config = Config::builder().max_bulk_len(usize::MAX).build();
    let frame = format!("${}\r\n", usize::MAX);
    let result = read_value_with_config(&mut frame.as_bytes(), &config);
    assert!(matches!(result, Err(RespError::TooLarge { .. })));
}

#[test]
fn test_bulk_over_limit() {
    let config = Config::builder().max_bulk_len(4).build();
    let mut reader: &[u8] = b"$5\r\nhello\r\n";
    let result = read_value_with_config(&mut reader, &config);
    assert!(matches!(
        result,
        Err(RespError::TooLarge { size: 5, max: 4, .. })
    ));
}

#[test]
fn test_huge_declared_bulk_does_not_allocate() {
    let mut reader: &[u8] = b"$536870912\r\nabc";
    let result = read_value(&mut reader);
    assert!(matches!(result, Err(RespError::Io(_))));
}

#[test]
fn test_array_over_limit() {
    let config = Config::builder().max_array_len(2).build();
    let mut reader: &[u8] = b"*3\r\n$1\r\na\r\n$1\r\nb\r\n$1\r\nc\r\n";
    let result = read_value_with_config(&mut reader, &config);
    assert!(matches!(
        result,
        Err(RespError::TooLarge { size: 3, max: 2, .. })
    ));
}

#[test]
fn test_limits_at_boundary_accepted() {
    let config = Config::builder().max_bulk_len(5).max_array_len(1).build();
    let mut reader: &[u8] = b"*1\r\n$5\r\nhello\r\n";
    let value = read_value_with_config(&mut reader, &config).unwrap();
    assert_eq!(value, Value::command(["hello"]));
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_wire_round_trip() {
    let frames: [&[u8]; 9] = [
        b"+OK\r\n",
        b"-ERR unknown command\r\n",
        b":0\r\n",
        b"$-1\r\n",
        b"$0\r\n\r\n",
        b"$4\r\n\r\n\r\n\r\n",
        b"*0\r\n",
        b"*1\r\n$-1\r\n",
        b"*3\r\n$3\r\nSET\r\n$3\r\nk\r\n\r\n$5\r\nv\nv\rv\r\n",
    ];

    for frame in frames {
        assert_eq!(reencode(frame), frame, "{}", frame.escape_ascii());
    }
}

#[test]
fn test_value_round_trip() {
    let values = vec![
        Value::ok(),
        Value::pong(),
        Value::error("ERR wrong number of arguments").unwrap(),
        Value::moved(3999, "127.0.0.1:6381").unwrap(),
        Value::integer(-7),
        Value::bulk("hello"),
        Value::bulk(""),
        Value::null_bulk(),
        Value::command(["SET", "key", "line\r\nbreak"]),
        Value::array(vec![Bulk::Null, Bulk::new("x")]),
        Value::array(vec![]),
    ];

    for value in values {
        let encoded = encode_value(&value);
        assert_eq!(decode_value(&encoded).unwrap(), value);
    }
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_multiple_values() {
    let values = vec![
        Value::command(["SELECT", "0"]),
        Value::ok(),
        Value::command(["GET", "k1"]),
        Value::null_bulk(),
        Value::integer(3),
    ];

    let mut buffer = Vec::new();
    for value in &values {
        write_value(&mut buffer, value).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    for expected in &values {
        assert_eq!(&read_value(&mut cursor).unwrap(), expected);
    }
    assert!(matches!(read_value(&mut cursor), Err(RespError::Closed)));
}

#[test]
fn test_stream_mixed_inline_and_framed() {
    let input = b"PING\r\n*2\r\n$3\r\nGET\r\n$1\r\nk\r\nquit\r\n".to_vec();
    let mut reader = BufReader::with_capacity(4, Cursor::new(input));

    assert_eq!(read_value(&mut reader).unwrap(), Value::command(["PING"]));
    assert_eq!(read_value(&mut reader).unwrap(), Value::command(["GET", "k"]));
    assert_eq!(read_value(&mut reader).unwrap(), Value::command(["QUIT"]));
}

#[test]
fn test_write_raw() {
    let mut buffer = Vec::new();
    write_raw(&mut buffer, b"+PONG\r\n").unwrap();
    assert_eq!(decode_value(&buffer).unwrap(), Value::pong());
}

/// Sink that fails every write
struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_error_propagates() {
    let err = write_value(&mut BrokenPipe, &Value::ok()).unwrap_err();
    assert!(err.is_disconnect());
}

// =============================================================================
// Wire Format Verification Tests
// =============================================================================

#[test]
fn test_wire_format_command() {
    let encoded = encode_value(&Value::command(["GET", "test"]));
    assert_eq!(encoded, b"*2\r\n$3\r\nGET\r\n$4\r\ntest\r\n");
}

#[test]
fn test_wire_format_line_values() {
    assert_eq!(encode_value(&Value::ok()), b"+OK\r\n");
    assert_eq!(encode_value(&Value::integer(1000)), b":1000\r\n");
    assert_eq!(
        encode_value(&Value::ask(12182, "10.0.0.2:7000").unwrap()),
        b"-ASK 12182 10.0.0.2:7000\r\n"
    );
}
