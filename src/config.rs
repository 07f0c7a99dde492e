//! Configuration for the decoder
//!
//! Centralized decoder configuration with sensible defaults.

/// How bulk payloads are materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkMode {
    /// Decode payloads as UTF-8 text (lossy)
    #[default]
    Text,

    /// Hand out payloads as raw byte views into the accumulation buffer
    Raw,
}

/// Default maximum array nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum bulk length (512 MB)
pub const DEFAULT_MAX_BULK_LEN: i64 = 512 * 1024 * 1024;

/// Default maximum number of elements in a single array
pub const DEFAULT_MAX_ARRAY_LEN: i64 = 1_048_576;

/// Decoder configuration, fixed for the lifetime of a decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    // -------------------------------------------------------------------------
    // Materialization
    // -------------------------------------------------------------------------
    /// Text or raw bulk payloads
    pub mode: BulkMode,

    // -------------------------------------------------------------------------
    // Limits
    // -------------------------------------------------------------------------
    /// Maximum array nesting depth. A top-level array is depth 1.
    pub max_depth: usize,

    /// Maximum declared bulk length in bytes
    pub max_bulk_len: i64,

    /// Maximum declared array element count
    pub max_array_len: i64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            mode: BulkMode::Text,
            max_depth: DEFAULT_MAX_DEPTH,
            max_bulk_len: DEFAULT_MAX_BULK_LEN,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
        }
    }
}

impl DecoderConfig {
    /// Create a new config builder
    pub fn builder() -> DecoderConfigBuilder {
        DecoderConfigBuilder::default()
    }

    /// Default limits with raw bulk payloads
    pub fn raw() -> Self {
        Self {
            mode: BulkMode::Raw,
            ..Self::default()
        }
    }
}

/// Builder for DecoderConfig
#[derive(Default)]
pub struct DecoderConfigBuilder {
    config: DecoderConfig,
}

impl DecoderConfigBuilder {
    /// Set the bulk materialization mode
    pub fn mode(mut self, mode: BulkMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the maximum array nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the maximum bulk length (in bytes)
    pub fn max_bulk_len(mut self, len: i64) -> Self {
        self.config.max_bulk_len = len;
        self
    }

    /// Set the maximum number of elements per array
    pub fn max_array_len(mut self, len: i64) -> Self {
        self.config.max_array_len = len;
        self
    }

    pub fn build(self) -> DecoderConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DecoderConfig::default();
        assert_eq!(config.mode, BulkMode::Text);
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.max_bulk_len, 512 * 1024 * 1024);
    }

    #[test]
    fn builder_overrides() {
        let config = DecoderConfig::builder()
            .mode(BulkMode::Raw)
            .max_depth(4)
            .max_bulk_len(16)
            .max_array_len(8)
            .build();
        assert_eq!(config.mode, BulkMode::Raw);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_bulk_len, 16);
        assert_eq!(config.max_array_len, 8);
    }
}
