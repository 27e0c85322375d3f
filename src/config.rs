//! Configuration for the RESP codec
//!
//! Centralized decoder limits with sensible defaults.

/// Decoder limits applied before trusting peer-declared sizes
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Bulk Strings
    // -------------------------------------------------------------------------
    /// Largest bulk payload (in bytes) the decoder will accept
    pub max_bulk_len: usize,

    // -------------------------------------------------------------------------
    // Arrays
    // -------------------------------------------------------------------------
    /// Largest element count an array header may declare
    pub max_array_len: usize,

    // -------------------------------------------------------------------------
    // Header Lines
    // -------------------------------------------------------------------------
    /// Longest header or inline line (in bytes, terminator included)
    pub max_line_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bulk_len: 512 * 1024 * 1024, // 512 MB
            max_array_len: 1024 * 1024,
            max_line_len: 64 * 1024, // 64 KB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the maximum bulk string length (in bytes)
    pub fn max_bulk_len(mut self, len: usize) -> Self {
        self.config.max_bulk_len = len;
        self
    }

    /// Set the maximum array element count
    pub fn max_array_len(mut self, count: usize) -> Self {
        self.config.max_array_len = count;
        self
    }

    /// Set the maximum header line length (in bytes)
    pub fn max_line_len(mut self, len: usize) -> Self {
        self.config.max_line_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
