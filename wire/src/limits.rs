//! Fixed size limits of the packet format.

use crate::error::{DecodeError, WireResult};

/// Capacity of a particle-system packet buffer in bytes.
///
/// Both peers size their buffers with this value; it is part of the protocol.
pub const MAX_PACKET_SIZE: usize = 256;

/// Number of independently gated flag bytes.
pub const FLAG_SLOTS: usize = 8;

/// Bytes taken by the always-present particle counts (max, initial).
pub const PARTICLE_COUNT_BYTES: usize = 2;

/// Checks that `len` bytes fit in a packet buffer.
pub const fn check_packet_len(len: usize) -> WireResult<()> {
    if len > MAX_PACKET_SIZE {
        return Err(DecodeError::PacketTooLarge {
            actual: len,
            max: MAX_PACKET_SIZE,
        });
    }
    Ok(())
}
