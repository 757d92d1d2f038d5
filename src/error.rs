//! Error types for crtp-link.

use thiserror::Error;

/// Main error type for all crtp-link operations.
#[derive(Debug, Error)]
pub enum CrtpError {
    /// I/O error from the underlying transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Port value outside the defined enumeration.
    #[error("invalid port: {0} is not a known CRTP port")]
    InvalidPort(u8),

    /// Channel value outside the 2-bit header field.
    #[error("invalid channel: {0} (must be 0-3)")]
    InvalidChannel(u8),

    /// A payload field cannot be represented in its wire type.
    #[error("field out of range: {field} {reason}")]
    FieldOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value is not representable.
        reason: String,
    },

    /// Serializer wrote a different number of bytes than it declared.
    /// Internal defect; checked so a corrupt frame is never emitted.
    #[error("frame length mismatch: declared {declared} payload bytes, wrote {written}")]
    FrameLengthMismatch {
        /// Payload length the variant declared.
        declared: usize,
        /// Bytes the variant actually wrote.
        written: usize,
    },

    /// Writer task is gone; the link cannot accept frames.
    #[error("link closed")]
    LinkClosed,

    /// Backpressure timeout - outbound queue stayed full.
    #[error("backpressure timeout")]
    BackpressureTimeout,
}

/// Result type alias using CrtpError.
pub type Result<T> = std::result::Result<T, CrtpError>;
