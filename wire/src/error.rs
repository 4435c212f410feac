//! Error types for wire format operations.

use std::fmt;

use bytestream::ByteError;

/// Result type for wire decoding.
pub type WireResult<T> = Result<T, DecodeError>;

/// Result type for wire encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while decoding packet bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The header bits promise more bytes than the packet holds.
    Truncated { needed: usize, available: usize },

    /// The input is larger than a packet buffer can hold.
    PacketTooLarge { actual: usize, max: usize },

    /// The image reference starts with a tag that is neither the raw marker
    /// nor a well-known image index.
    UnknownImageTag { tag: u8 },
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// The output buffer cannot hold the encoded packet.
    BufferOverflow { needed: usize, capacity: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { needed, available } => {
                write!(
                    f,
                    "truncated packet: need {needed} more bytes, have {available}"
                )
            }
            Self::PacketTooLarge { actual, max } => {
                write!(f, "packet too large: {actual} bytes, maximum is {max}")
            }
            Self::UnknownImageTag { tag } => {
                write!(f, "unknown image tag: 0x{tag:02X}")
            }
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferOverflow { needed, capacity } => {
                write!(
                    f,
                    "buffer overflow: need {needed} bytes, capacity is {capacity}"
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}

impl From<ByteError> for DecodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::UnexpectedEof {
                requested,
                available,
            } => Self::Truncated {
                needed: requested,
                available,
            },
            // Readers never write; an overflow still means the input ran out.
            ByteError::BufferOverflow {
                attempted,
                capacity,
            } => Self::Truncated {
                needed: attempted,
                available: capacity,
            },
        }
    }
}

impl From<ByteError> for EncodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::BufferOverflow {
                attempted,
                capacity,
            } => Self::BufferOverflow {
                needed: attempted,
                capacity,
            },
            // Writers never read; kept total so `?` works on mixed cursors.
            ByteError::UnexpectedEof {
                requested,
                available,
            } => Self::BufferOverflow {
                needed: requested,
                capacity: available,
            },
        }
    }
}
