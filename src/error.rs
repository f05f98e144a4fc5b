//! Error types for KLV decoding
//!
//! Checksum mismatches, unknown tags and clock rewinds are not errors: they are
//! reported through flags, the sentinel tag and clock resets respectively.

use thiserror::Error;

/// Result type alias for KLV operations
pub type Result<T> = std::result::Result<T, KlvError>;

/// Main error type for KLV operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KlvError {
    /// Bad codec construction arguments
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Decoding error
    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error while reading a packet stream
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for KlvError {
    fn from(err: std::io::Error) -> Self {
        KlvError::Io(err.to_string())
    }
}

/// Errors while parsing a KLV buffer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Truncated or inconsistent record
    #[error("Malformed record at offset {offset}: {reason}")]
    MalformedRecord { offset: usize, reason: String },

    /// Buffer too short
    #[error("Buffer too short: need at least {needed} bytes, got {available}")]
    BufferTooShort { needed: usize, available: usize },

    /// Value length does not fit the tag's encoding
    #[error("Tag {tag_id} ({name}): {len} byte value does not fit encoding {encoding}")]
    EncodingMismatch {
        tag_id: u32,
        name: String,
        encoding: String,
        len: usize,
    },

    /// Packet key is not an accepted local set designator
    #[error("Unknown designator: {0}")]
    UnknownDesignator(String),
}

/// Errors loading configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// Configuration file could not be parsed
    #[error("Cannot parse configuration: {0}")]
    Parse(String),

    /// A designator string is not 16 hex bytes
    #[error("Invalid designator {0:?}: expected 16 hex bytes")]
    InvalidDesignator(String),

    /// A value is out of its allowed range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl DecodeError {
    /// Shorthand for a malformed record error
    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        DecodeError::MalformedRecord {
            offset,
            reason: reason.into(),
        }
    }
}
