//! Error types for bytestream operations.

use std::fmt;

/// Result type for bytestream operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur during byte-level encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// Attempted to read past the end of the buffer.
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Attempted to write past the end of the bounded buffer.
    BufferOverflow {
        /// Offset one past the last byte that would have been written.
        attempted: usize,
        /// Capacity of the buffer in bytes.
        capacity: usize,
    },
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes but only {available} bytes available"
                )
            }
            Self::BufferOverflow {
                attempted,
                capacity,
            } => {
                write!(
                    f,
                    "attempted to write up to byte {attempted} but buffer capacity is {capacity} bytes"
                )
            }
        }
    }
}

impl std::error::Error for ByteError {}
