//! Bounded byte writer over a caller-provided buffer.

use crate::error::{ByteError, ByteResult};

/// A byte writer that never grows past the slice it was given.
///
/// Every write is bounds-checked; a write that does not fit leaves the
/// buffer and position untouched and returns [`ByteError::BufferOverflow`].
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    /// Creates a writer positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the current write offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes that can still be written.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> ByteResult<()> {
        self.ensure_remaining(1)?;
        self.buf[self.pos] = value;
        self.pos += 1;
        Ok(())
    }

    /// Writes a signed byte using its two's complement bit pattern.
    pub fn write_i8(&mut self, value: i8) -> ByteResult<()> {
        self.write_u8(value.to_le_bytes()[0])
    }

    /// Writes a run of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> ByteResult<()> {
        self.ensure_remaining(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    /// Finishes writing and returns the number of bytes used, counted from
    /// the start of the buffer.
    #[must_use]
    pub const fn finish(self) -> usize {
        self.pos
    }

    /// Fails with [`ByteError::BufferOverflow`] unless `bytes` more bytes fit.
    pub fn ensure_remaining(&self, bytes: usize) -> ByteResult<()> {
        if bytes > self.remaining() {
            return Err(ByteError::BufferOverflow {
                attempted: self.pos + bytes,
                capacity: self.buf.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let mut buf = [0u8; 4];
        let writer = ByteWriter::new(&mut buf);
        assert_eq!(writer.position(), 0);
        assert_eq!(writer.remaining(), 4);
        assert_eq!(writer.finish(), 0);
    }

    #[test]
    fn write_single_byte() {
        let mut buf = [0u8; 4];
        let mut writer = ByteWriter::new(&mut buf);
        writer.write_u8(0xAB).unwrap();
        assert_eq!(writer.position(), 1);
        assert_eq!(writer.finish(), 1);
        assert_eq!(buf[0], 0xAB);
    }

    #[test]
    fn write_negative_i8() {
        let mut buf = [0u8; 2];
        let mut writer = ByteWriter::new(&mut buf);
        writer.write_i8(-1).unwrap();
        writer.write_i8(-127).unwrap();
        assert_eq!(writer.finish(), 2);
        assert_eq!(buf, [0xFF, 0x81]);
    }

    #[test]
    fn write_bytes_copies_run() {
        let mut buf = [0u8; 6];
        let mut writer = ByteWriter::new(&mut buf);
        writer.write_u8(0x00).unwrap();
        writer.write_bytes(&[1, 2, 3, 4]).unwrap();
        assert_eq!(writer.finish(), 5);
        assert_eq!(buf, [0, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn write_past_end_fails() {
        let mut buf = [0u8; 1];
        let mut writer = ByteWriter::new(&mut buf);
        writer.write_u8(1).unwrap();
        let err = writer.write_u8(2).unwrap_err();
        assert_eq!(
            err,
            ByteError::BufferOverflow {
                attempted: 2,
                capacity: 1
            }
        );
        assert_eq!(writer.position(), 1);
    }

    #[test]
    fn partial_run_is_not_written() {
        let mut buf = [0u8; 3];
        let mut writer = ByteWriter::new(&mut buf);
        writer.write_u8(9).unwrap();
        let err = writer.write_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ByteError::BufferOverflow { attempted: 4, .. }));
        assert_eq!(writer.finish(), 1);
        assert_eq!(buf, [9, 0, 0]);
    }

    #[test]
    fn ensure_remaining_checks_without_writing() {
        let mut buf = [0u8; 2];
        let writer = ByteWriter::new(&mut buf);
        assert!(writer.ensure_remaining(2).is_ok());
        assert!(writer.ensure_remaining(3).is_err());
        assert_eq!(writer.position(), 0);
    }
}
