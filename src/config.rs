//! Configuration for p9wire
//!
//! Centralized decode configuration with sensible defaults.

use crate::protocol::{DEFAULT_VERSION, MSIZE};

/// Decode configuration shared by the frame reader and message decoders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Framing Configuration
    // -------------------------------------------------------------------------
    /// Largest frame (header included) the reader will accept.
    /// Checked before the body buffer is allocated.
    pub max_message_size: u32,

    // -------------------------------------------------------------------------
    // Session Configuration
    // -------------------------------------------------------------------------
    /// Protocol version string expected in Tversion/Rversion
    pub version: String,

    // -------------------------------------------------------------------------
    // Stat Configuration
    // -------------------------------------------------------------------------
    /// Check stat length prefixes against the bytes the record consumed.
    /// Off by default: the prefixes are advisory on the wire.
    pub strict_stat_length: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_message_size: MSIZE,
            version: DEFAULT_VERSION.to_string(),
            strict_stat_length: false,
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
    /// Set the maximum accepted frame size (in bytes, header included)
    pub fn max_message_size(mut self, size: u32) -> Self {
        self.config.max_message_size = size;
        self
    }

    /// Set the expected protocol version string
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Enable or disable stat length prefix validation
    pub fn strict_stat_length(mut self, strict: bool) -> Self {
        self.config.strict_stat_length = strict;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
