//! # resp-codec
//!
//! A binary-safe RESP (REdis Serialization Protocol) codec with:
//! - Blocking decode from any buffered reader, one frame per call
//! - Atomic encode-and-flush to any writer
//! - Inline `PING` / `QUIT` normalized to framed command arrays
//! - Configurable caps on peer-declared lengths and counts
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Transport (TcpStream)                      │
//! └──────────────┬──────────────────────────────▲───────────────┘
//!                │ BufReader                     │ BufWriter
//! ┌──────────────▼──────────────┐ ┌──────────────┴──────────────┐
//! │         read_value          │ │         write_value          │
//! │   (line + length framing)   │ │     (render + flush)         │
//! └──────────────┬──────────────┘ └──────────────▲──────────────┘
//!                │                               │
//!                ▼                               │
//!         ┌─────────────┐                 ┌─────────────┐
//!         │    Value    │ ──► dispatch ──►│    Value    │
//!         └─────────────┘                 └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use resp_codec::protocol::{read_value, write_value, Value};
//!
//! let mut input: &[u8] = b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n";
//! let value = read_value(&mut input).unwrap();
//! assert_eq!(value.to_string(), "GET key");
//!
//! let mut output = Vec::new();
//! write_value(&mut output, &value).unwrap();
//! assert_eq!(output, b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RespError, Result};
pub use config::Config;
pub use protocol::{read_value, write_value, Bulk, Kind, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of resp-codec
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
