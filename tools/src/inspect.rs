//! Packet layout inspection.

use anyhow::{Context, Result};
use codec::{
    decode_config, default_config, presence_header, FieldGroup, ParticleSystemConfig, GROUP_TABLE,
};
use wire::{PresenceHeader, FLAG_SLOTS, HEADER_SIZE, PARTICLE_COUNT_BYTES};

/// Where one present group sits in the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpan {
    pub group: FieldGroup,
    pub offset: usize,
    pub len: usize,
}

/// One flag byte carried by the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagByte {
    pub slot: usize,
    pub offset: usize,
    pub value: u8,
}

/// Layout of a decoded packet.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectReport {
    pub header: PresenceHeader,
    /// The decoded config, on top of the standard defaults.
    pub config: ParticleSystemConfig,
    pub groups: Vec<GroupSpan>,
    pub max_particles: u8,
    pub initial_particles: u8,
    pub flags: Vec<FlagByte>,
    /// Bytes the decoder consumed.
    pub used_len: usize,
    /// Bytes supplied; anything past `used_len` is trailing garbage.
    pub total_len: usize,
    /// Whether re-encoding the decoded config yields the same header.
    pub canonical_header: bool,
}

impl InspectReport {
    /// Bytes after the last field the decoder read.
    pub const fn trailing_len(&self) -> usize {
        self.total_len - self.used_len
    }
}

/// Decodes `bytes` against the standard defaults and reports their layout.
pub fn inspect_packet(bytes: &[u8]) -> Result<InspectReport> {
    let defaults = default_config();
    let decoded = decode_config(bytes, &defaults).context("decode particle system packet")?;
    let config = decoded.config;

    let mut header_bytes = [0u8; HEADER_SIZE];
    header_bytes.copy_from_slice(&bytes[..HEADER_SIZE]);
    let header = PresenceHeader::from_bytes(header_bytes);

    let mut offset = HEADER_SIZE;
    let mut groups = Vec::new();
    for group in GROUP_TABLE {
        if header.is_set(group.presence_bit()) {
            let len = group.encoded_len(&config);
            groups.push(GroupSpan { group, offset, len });
            offset += len;
        }
    }

    offset += PARTICLE_COUNT_BYTES;

    let mut flags = Vec::new();
    for slot in 0..FLAG_SLOTS {
        if header.has_flag_slot(slot) {
            flags.push(FlagByte {
                slot,
                offset,
                value: config.flags[slot],
            });
            offset += 1;
        }
    }

    Ok(InspectReport {
        header,
        config,
        groups,
        max_particles: config.max_particles,
        initial_particles: config.initial_particles,
        flags,
        used_len: decoded.bytes_read,
        total_len: bytes.len(),
        canonical_header: presence_header(&config, &defaults) == header,
    })
}
