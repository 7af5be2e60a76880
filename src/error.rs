//! Error types for p9wire
//!
//! Provides a unified error type for all codec operations.

use thiserror::Error;

/// Result type alias using P9Error
pub type Result<T> = std::result::Result<T, P9Error>;

/// Unified error type for p9wire operations
///
/// Every decode failure is fatal for the frame being decoded: no partially
/// populated message is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum P9Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Short header: expected 7 bytes, got {got}")]
    ShortHeader { got: usize },

    #[error("Malformed size: frame declares {size} bytes, minimum is 7")]
    MalformedSize { size: u32 },

    #[error("Short body: expected {expected} bytes, got {got}")]
    ShortBody { expected: usize, got: usize },

    #[error("Message too large: frame declares {size} bytes (max {max})")]
    MessageTooLarge { size: u32, max: u32 },

    // -------------------------------------------------------------------------
    // Field Errors
    // -------------------------------------------------------------------------
    #[error("Truncated {field} at offset {offset}: need {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Unknown message type: {0}")]
    UnknownMessageType(u8),

    #[error("Stat length mismatch: prefix declares {declared} bytes, record used {actual}")]
    StatLengthMismatch { declared: usize, actual: usize },

    // -------------------------------------------------------------------------
    // Encode Errors
    // -------------------------------------------------------------------------
    #[error("String too long: {len} bytes (max 65535)")]
    StringTooLong { len: usize },

    #[error("Overflow: {field} length {len} does not fit its wire prefix")]
    Overflow { field: &'static str, len: usize },
}

impl P9Error {
    /// True for errors caused by bytes the peer sent, as opposed to the
    /// transport failing or the caller building an unencodable message.
    pub fn is_wire_error(&self) -> bool {
        !matches!(
            self,
            P9Error::Io(_) | P9Error::StringTooLong { .. } | P9Error::Overflow { .. }
        )
    }
}
