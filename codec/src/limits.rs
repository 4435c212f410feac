//! Size bounds for encoded particle-system packets.

use wire::{FLAG_SLOTS, HEADER_SIZE, MAX_PACKET_SIZE, PARTICLE_COUNT_BYTES};

use crate::group::GROUP_TABLE;

/// Largest packet the encoder can produce: every group present, a raw image
/// id and all eight flag bytes.
pub const MAX_ENCODED_LEN: usize = max_encoded_len();

/// Smallest packet: empty header plus the two particle counts.
pub const MIN_ENCODED_LEN: usize = HEADER_SIZE + PARTICLE_COUNT_BYTES;

const fn max_encoded_len() -> usize {
    let mut total = HEADER_SIZE + PARTICLE_COUNT_BYTES + FLAG_SLOTS;
    let mut i = 0;
    while i < GROUP_TABLE.len() {
        total += GROUP_TABLE[i].max_encoded_len();
        i += 1;
    }
    total
}

const _: () = assert!(MAX_ENCODED_LEN <= MAX_PACKET_SIZE);
