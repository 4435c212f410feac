//! Byte reader with bounded operations.

use crate::error::{ByteError, ByteResult};

/// A byte reader for decoding packed binary data.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> ByteResult<u8> {
        self.ensure_bytes(1)?;
        Ok(self.data[self.pos])
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> ByteResult<u8> {
        let value = self.peek_u8()?;
        self.pos += 1;
        Ok(value)
    }

    /// Reads a signed byte from its two's complement bit pattern.
    pub fn read_i8(&mut self) -> ByteResult<i8> {
        Ok(i8::from_le_bytes([self.read_u8()?]))
    }

    /// Reads exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        self.ensure_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    fn ensure_bytes(&self, bytes: usize) -> ByteResult<()> {
        let available = self.remaining();
        if bytes > available {
            return Err(ByteError::UnexpectedEof {
                requested: bytes,
                available,
            });
        }
        Ok(())
    }
}
