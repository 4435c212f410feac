//! Packet-level encode and decode.

use std::fmt;

use bytestream::{ByteReader, ByteWriter};
use wire::{
    check_packet_len, EncodeError, PresenceBit, PresenceHeader, FLAG_SLOTS, HEADER_SIZE,
    MAX_PACKET_SIZE, PARTICLE_COUNT_BYTES,
};

use crate::config::ParticleSystemConfig;
use crate::error::CodecResult;
use crate::group::GROUP_TABLE;

/// A config recovered from packet bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedConfig {
    pub config: ParticleSystemConfig,
    /// Bytes consumed; anything after this in the input was ignored.
    pub bytes_read: usize,
}

/// Computes the presence header for `config` against `defaults`.
///
/// A field group is present when any of its fields differs from the
/// defaults. A flag byte is present when it is non-zero, whatever the
/// default flag byte holds. The two rules differ on purpose and peers
/// depend on both; do not unify them.
#[must_use]
pub fn presence_header(
    config: &ParticleSystemConfig,
    defaults: &ParticleSystemConfig,
) -> PresenceHeader {
    let mut header = PresenceHeader::new();
    for group in GROUP_TABLE {
        if group.differs(config, defaults) {
            header.set(group.presence_bit());
        }
    }
    for (slot, value) in config.flags.iter().enumerate() {
        if *value != 0 {
            header.set(PresenceBit::flag_slot(slot));
        }
    }
    header
}

/// Number of bytes [`encode_config`] writes for `config`.
#[must_use]
pub fn encoded_len(config: &ParticleSystemConfig, defaults: &ParticleSystemConfig) -> usize {
    let header = presence_header(config, defaults);
    let groups: usize = GROUP_TABLE
        .iter()
        .filter(|group| header.is_set(group.presence_bit()))
        .map(|group| group.encoded_len(config))
        .sum();
    HEADER_SIZE + groups + PARTICLE_COUNT_BYTES + header.flag_slot_count()
}

/// Encodes `config` relative to `defaults` into `out`.
///
/// Returns the number of bytes written. Nothing is written if `out` is too
/// small for the whole packet.
pub fn encode_config(
    config: &ParticleSystemConfig,
    defaults: &ParticleSystemConfig,
    out: &mut [u8],
) -> CodecResult<usize> {
    let needed = encoded_len(config, defaults);
    if out.len() < needed {
        log::debug!(
            "particle system packet needs {needed} bytes, buffer holds {}",
            out.len()
        );
        return Err(EncodeError::BufferOverflow {
            needed,
            capacity: out.len(),
        }
        .into());
    }

    let header = presence_header(config, defaults);
    let mut writer = ByteWriter::new(out);
    header.write(&mut writer)?;
    for group in GROUP_TABLE {
        if header.is_set(group.presence_bit()) {
            group.write(&mut writer, config)?;
        }
    }
    writer.write_u8(config.max_particles).map_err(EncodeError::from)?;
    writer.write_u8(config.initial_particles).map_err(EncodeError::from)?;
    for (slot, value) in config.flags.iter().enumerate() {
        if header.has_flag_slot(slot) {
            writer.write_u8(*value).map_err(EncodeError::from)?;
        }
    }

    let written = writer.finish();
    log::trace!(
        "encoded particle system: header {:02X?}, {written} bytes",
        header.to_bytes()
    );
    Ok(written)
}

/// Decodes a packet onto a copy of `defaults`.
///
/// Absent groups and absent flag bytes keep their default values. Header
/// bits outside the group table are ignored.
pub fn decode_config(bytes: &[u8], defaults: &ParticleSystemConfig) -> CodecResult<DecodedConfig> {
    check_packet_len(bytes.len())?;
    decode_body(bytes, defaults).map_err(|err| {
        log::debug!("rejected {}-byte particle system packet: {err}", bytes.len());
        err.into()
    })
}

fn decode_body(bytes: &[u8], defaults: &ParticleSystemConfig) -> wire::WireResult<DecodedConfig> {
    let mut reader = ByteReader::new(bytes);
    let header = PresenceHeader::read(&mut reader)?;

    let mut config = *defaults;
    for group in GROUP_TABLE {
        if header.is_set(group.presence_bit()) {
            group.read(&mut reader, &mut config)?;
        }
    }
    config.max_particles = reader.read_u8()?;
    config.initial_particles = reader.read_u8()?;
    for slot in 0..FLAG_SLOTS {
        if header.has_flag_slot(slot) {
            config.flags[slot] = reader.read_u8()?;
        }
    }

    let bytes_read = reader.position();
    log::trace!(
        "decoded particle system: header {:02X?}, {bytes_read} of {} bytes",
        header.to_bytes(),
        bytes.len()
    );
    Ok(DecodedConfig { config, bytes_read })
}

/// A particle-system packet held in a fixed-size buffer.
///
/// Equality and `Debug` only look at the first [`len`](Self::len) bytes.
/// Bytes past that are left over from earlier contents.
#[derive(Clone)]
pub struct CompressedPacket {
    data: [u8; MAX_PACKET_SIZE],
    len: usize,
}

impl Default for CompressedPacket {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressedPacket {
    /// Creates an empty packet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: [0; MAX_PACKET_SIZE],
            len: 0,
        }
    }

    /// Creates a packet holding `config` encoded against `defaults`.
    pub fn from_config(
        config: &ParticleSystemConfig,
        defaults: &ParticleSystemConfig,
    ) -> CodecResult<Self> {
        let mut packet = Self::new();
        packet.encode(config, defaults)?;
        Ok(packet)
    }

    /// Creates a packet holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        let mut packet = Self::new();
        packet.load(bytes)?;
        Ok(packet)
    }

    /// Replaces the contents with `config` encoded against `defaults`.
    ///
    /// Returns the encoded length. On error the packet is left unchanged.
    pub fn encode(
        &mut self,
        config: &ParticleSystemConfig,
        defaults: &ParticleSystemConfig,
    ) -> CodecResult<usize> {
        let len = encode_config(config, defaults, &mut self.data)?;
        self.len = len;
        Ok(len)
    }

    /// Decodes the contents onto a copy of `defaults`.
    pub fn decode(&self, defaults: &ParticleSystemConfig) -> CodecResult<ParticleSystemConfig> {
        Ok(decode_config(self.as_bytes(), defaults)?.config)
    }

    /// Replaces the contents with raw bytes received from a peer.
    ///
    /// Inputs longer than [`MAX_PACKET_SIZE`] are rejected and leave the
    /// packet unchanged.
    pub fn load(&mut self, bytes: &[u8]) -> CodecResult<()> {
        if let Err(err) = check_packet_len(bytes.len()) {
            log::error!("particle system packet of {} bytes rejected: {err}", bytes.len());
            return Err(err.into());
        }
        self.data[..bytes.len()].copy_from_slice(bytes);
        self.len = bytes.len();
        Ok(())
    }

    /// Returns the packet bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Returns the packet length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been encoded or loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for CompressedPacket {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for CompressedPacket {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for CompressedPacket {}

impl fmt::Debug for CompressedPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressedPacket")
            .field("bytes", &self.as_bytes())
            .field("len", &self.len)
            .finish()
    }
}
