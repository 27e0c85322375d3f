//! Wire constants
//!
//! Sigils, terminators and the fixed command words a proxy needs to
//! recognize or emit.

/// Simple string sigil: `+OK\r\n`
pub const SIMPLE_SIGIL: u8 = b'+';

/// Error sigil: `-ERR message\r\n`
pub const ERROR_SIGIL: u8 = b'-';

/// Integer sigil: `:1000\r\n`
pub const INTEGER_SIGIL: u8 = b':';

/// Bulk string sigil: `$5\r\nhello\r\n`
pub const BULK_SIGIL: u8 = b'$';

/// Array sigil: `*2\r\n...`
pub const ARRAY_SIGIL: u8 = b'*';

/// Terminator ending every header line and bulk payload
pub const CRLF: &[u8] = b"\r\n";

/// Rendering of the null bulk string
pub const NULL_BULK: &[u8] = b"$-1\r\n";

/// Separator used when rendering values for display
pub const SPACE: u8 = b' ';

// =============================================================================
// Command and Reply Words
// =============================================================================

pub const PING: &[u8] = b"PING";
pub const PONG: &[u8] = b"PONG";
pub const SELECT: &[u8] = b"SELECT";
pub const OK: &[u8] = b"OK";
pub const QUIT: &[u8] = b"QUIT";

/// Cluster redirect: the slot has permanently moved
pub const MOVED: &[u8] = b"MOVED";

/// Cluster redirect: retry this one request on another node
pub const ASK: &[u8] = b"ASK";

/// Must precede a request redirected by ASK
pub const ASKING: &[u8] = b"ASKING";

/// Length of an accepted inline command line (`PING\r\n`)
pub const INLINE_LINE_LEN: usize = 6;
