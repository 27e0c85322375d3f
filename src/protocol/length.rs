//! Length codec
//!
//! ASCII decimal conversion for bulk lengths and array counts.

use crate::error::{RespError, Result};

/// Longest decimal rendering of a usize on 64-bit targets
const MAX_DIGITS: usize = 20;

/// Render a non-negative integer as ASCII decimal
pub fn encode_len(n: usize) -> Vec<u8> {
    let mut digits = [0u8; MAX_DIGITS];
    let mut pos = MAX_DIGITS;
    let mut rest = n;

    loop {
        pos -= 1;
        digits[pos] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    digits[pos..].to_vec()
}

/// Parse an ASCII decimal length field
///
/// Returns `None` for the literal `-1` (null marker). Any other sign,
/// non-digit byte, empty field or overflow is an error.
pub fn parse_len(field: &[u8]) -> Result<Option<usize>> {
    if field == b"-1" {
        return Ok(None);
    }

    if field.is_empty() {
        return Err(RespError::InvalidLength("empty length field".to_string()));
    }

    let mut n: usize = 0;
    for &b in field {
        if !b.is_ascii_digit() {
            return Err(RespError::InvalidLength(format!(
                "\"{}\" is not a decimal length",
                field.escape_ascii()
            )));
        }
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add((b - b'0') as usize))
            .ok_or_else(|| {
                RespError::InvalidLength(format!("\"{}\" overflows", field.escape_ascii()))
            })?;
    }

    Ok(Some(n))
}
