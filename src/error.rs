//! Error types for the RESP codec
//!
//! Provides a unified error type for decoding, encoding and value construction.

use std::io;

use thiserror::Error;

use crate::protocol::Kind;

/// Result type alias using RespError
pub type Result<T> = std::result::Result<T, RespError>;

/// Unified error type for codec operations
///
/// Every variant except `InvalidPayload` leaves the underlying stream at an
/// unknown position; the connection should be closed.
#[derive(Debug, Error)]
pub enum RespError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Underlying read/write failure, including EOF inside a frame.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Stream ended cleanly before the first byte of a frame.
    #[error("Connection closed")]
    Closed,

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Invalid length field: {0}")]
    InvalidLength(String),

    #[error("Framing mismatch: expected {expected} element, got {found}")]
    FramingMismatch { expected: Kind, found: Kind },

    #[error("Unrecognized frame: \"{}\"", .raw.escape_ascii())]
    UnknownSigil { raw: Vec<u8> },

    #[error("Malformed inline command: \"{}\" (raw command must be PING or QUIT)", .raw.escape_ascii())]
    MalformedInline { raw: Vec<u8> },

    #[error("{what} too large: {size} (max {max})")]
    TooLarge {
        what: &'static str,
        size: usize,
        max: usize,
    },

    // -------------------------------------------------------------------------
    // Construction Errors
    // -------------------------------------------------------------------------
    #[error("Invalid {kind} payload: line-oriented values must not contain CR or LF")]
    InvalidPayload { kind: Kind },
}

impl RespError {
    /// Build the error returned when the stream ends inside a frame
    pub(crate) fn unexpected_eof(context: &str) -> Self {
        RespError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, context.to_string()))
    }

    /// Returns true if the peer went away between frames.
    ///
    /// A stream that ends inside a frame is a short read, not a disconnect.
    pub fn is_disconnect(&self) -> bool {
        match self {
            RespError::Closed => true,
            RespError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}
