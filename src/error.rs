//! Error types for the compressor.
//!
//! Compression itself is total. Errors come from building a tree out of an
//! empty table, from decoding damaged data, and from the artifact I/O layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A Huffman tree needs at least one leaf
    #[error("cannot build a Huffman tree from an empty frequency table")]
    EmptyInput,

    /// The packed bits do not resolve into the expected symbols
    #[error("corrupt data: {0}")]
    CorruptData(#[from] CorruptDataError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The `.properties` sidecar is missing a key or disagrees with the artifact
    #[error("properties error: {0}")]
    Properties(String),
}

/// Ways a compressed payload can fail to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptDataError {
    /// The bit path at `position` matches no codebook entry
    #[error("invalid code at bit position {position}")]
    InvalidCode { position: usize },

    #[error("bit stream ended after {decoded} of {expected} symbols")]
    Truncated { decoded: usize, expected: usize },

    #[error("{count} bits remain after the last symbol")]
    TrailingBits { count: usize },

    #[error("invalid padding bit count {0}")]
    InvalidPadding(u8),

    #[error("padding bits are not zero")]
    NonZeroPadding,

    #[error("compressed size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("invalid codebook: {0}")]
    InvalidCodebook(String),
}

pub type Result<T> = std::result::Result<T, Error>;
