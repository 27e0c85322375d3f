//! Protocol Module
//!
//! RESP (REdis Serialization Protocol) values and their wire codec.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬─────────────────────┬──────────┬──────────────────────────┐
//! │Sigil (1) │    Header body      │ CRLF (2) │  Payload (bulk / array)  │
//! └──────────┴─────────────────────┴──────────┴──────────────────────────┘
//! ```
//!
//! ### Sigils
//! - `+`: Simple string - body: text
//! - `-`: Error        - body: text
//! - `:`: Integer      - body: decimal
//! - `$`: Bulk string  - body: length or -1; payload: length bytes + CRLF
//! - `*`: Array        - body: count; payload: count bulk strings
//!
//! ### Handled Subset
//! Arrays carry bulk strings only, which is the shape of every client
//! command. Bare `PING` and `QUIT` lines are accepted and decoded as
//! single-element command arrays.

mod codec;
mod length;
mod value;
pub mod wire;

pub use codec::{
    decode_value, encode_value, read_value, read_value_with_config, write_raw, write_value,
};
pub use length::{encode_len, parse_len};
pub use value::{Bulk, Kind, Value};
