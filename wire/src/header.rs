//! Presence header: the four leading bytes of every packet.
//!
//! Each bit gates one field group (or one flag byte) in the payload. The
//! payload carries no other framing, so the bit assignments below are the
//! whole schema and must never move.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{EncodeResult, WireResult};
use crate::limits::FLAG_SLOTS;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 4;

/// Index of the header byte whose bits gate the flag bytes.
pub const FLAG_PRESENCE_BYTE: usize = 1;

/// Location of one presence bit: header byte index plus mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresenceBit {
    byte: usize,
    mask: u8,
}

impl PresenceBit {
    // Byte 0, mask 0x01 belonged to the retired per-coefficient `k` block.
    // It is never set and ignored on decode.

    /// Kill plane normal, offset and distance-death radius.
    pub const KILL_PLANE: Self = Self::new(0, 0x02);

    /// Bounce plane normal and offset.
    pub const BOUNCE_PLANE: Self = Self::new(0, 0x04);

    /// Bounce attenuation coefficient.
    pub const BOUNCE_COEFFICIENT: Self = Self::new(0, 0x08);

    /// Velocity offset.
    ///
    /// Formerly the position-ranges bit; the meaning changed, the value did not.
    pub const VELOCITY_OFFSET: Self = Self::new(0, 0x10);

    /// Alpha and scale differential-equation coefficients.
    ///
    /// Formerly the velocity-ranges bit.
    pub const ALPHA_SCALE_DIFF_EQ: Self = Self::new(0, 0x20);

    /// Scale range.
    pub const SCALE_RANGE: Self = Self::new(0, 0x40);

    /// Sprite image id.
    pub const IMAGE: Self = Self::new(0, 0x80);

    /// Alpha range. Lives alone in header byte 2.
    pub const ALPHA_RANGE: Self = Self::new(2, 0x01);

    /// Spawn parameters.
    pub const SPAWN: Self = Self::new(3, 0x01);

    /// Wind and gravity weights.
    pub const ENVIRONMENT: Self = Self::new(3, 0x02);

    /// Lifetimes.
    pub const LIFESPAN: Self = Self::new(3, 0x04);

    /// Speed limit, decay rates and motion damping.
    pub const DECAY_DAMP: Self = Self::new(3, 0x08);

    /// Wind diffusion factors.
    pub const WIND_DIFFUSION: Self = Self::new(3, 0x10);

    /// Creates a presence bit. `byte` must be below [`HEADER_SIZE`].
    #[must_use]
    pub const fn new(byte: usize, mask: u8) -> Self {
        assert!(byte < HEADER_SIZE, "presence byte out of range");
        Self { byte, mask }
    }

    /// Bit gating flag byte `slot`.
    #[must_use]
    pub const fn flag_slot(slot: usize) -> Self {
        assert!(slot < FLAG_SLOTS, "flag slot out of range");
        Self::new(FLAG_PRESENCE_BYTE, 1 << slot)
    }

    /// Returns the header byte index.
    #[must_use]
    pub const fn byte(self) -> usize {
        self.byte
    }

    /// Returns the bit mask within the header byte.
    #[must_use]
    pub const fn mask(self) -> u8 {
        self.mask
    }
}

/// The four presence bytes at the start of a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PresenceHeader([u8; HEADER_SIZE]);

impl PresenceHeader {
    /// Creates a header with no bits set.
    #[must_use]
    pub const fn new() -> Self {
        Self([0; HEADER_SIZE])
    }

    /// Creates a header from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw header bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; HEADER_SIZE] {
        self.0
    }

    /// Sets a presence bit.
    pub fn set(&mut self, bit: PresenceBit) {
        self.0[bit.byte] |= bit.mask;
    }

    /// Returns `true` if the bit is set.
    #[must_use]
    pub const fn is_set(self, bit: PresenceBit) -> bool {
        self.0[bit.byte] & bit.mask != 0
    }

    /// Returns `true` if flag byte `slot` is present.
    #[must_use]
    pub const fn has_flag_slot(self, slot: usize) -> bool {
        self.is_set(PresenceBit::flag_slot(slot))
    }

    /// Number of flag bytes that follow the particle counts.
    #[must_use]
    pub const fn flag_slot_count(self) -> usize {
        self.0[FLAG_PRESENCE_BYTE].count_ones() as usize
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        u32::from_le_bytes(self.0) == 0
    }

    /// Writes the header bytes.
    pub fn write(self, writer: &mut ByteWriter<'_>) -> EncodeResult<()> {
        writer.write_bytes(&self.0)?;
        Ok(())
    }

    /// Reads the header bytes.
    pub fn read(reader: &mut ByteReader<'_>) -> WireResult<Self> {
        Ok(Self(reader.read_array::<HEADER_SIZE>()?))
    }
}
