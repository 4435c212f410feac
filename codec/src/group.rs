//! Field groups and the ordered table that drives encoding and decoding.
//!
//! The payload carries no field tags. A decoder recovers the layout purely
//! from the presence header by visiting [`GROUP_TABLE`] in order, so encoder
//! and decoder both iterate this one table and nothing else.

use bytestream::{ByteReader, ByteWriter};
use wire::{
    encoded_image_len, read_f32, read_image_id, write_f32, write_image_id, EncodeResult,
    PresenceBit, QuantizedFloat, WireResult, RAW_IMAGE_LEN,
};

use crate::config::ParticleSystemConfig;

/// Largest number of floats in one group (spawn).
pub const MAX_GROUP_FLOATS: usize = 9;

/// A set of config fields sent or omitted together under one presence bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    KillPlane,
    BouncePlane,
    BounceCoefficient,
    AlphaScaleDiffEq,
    ScaleRange,
    VelocityOffset,
    Image,
    Spawn,
    Environment,
    Lifespan,
    DecayDamp,
    WindDiffusion,
    AlphaRange,
}

/// Every group in payload order.
///
/// Header byte 0 groups come first, then header byte 3, then the alpha range
/// from header byte 2. Changing this order changes the protocol.
pub const GROUP_TABLE: [FieldGroup; 13] = [
    FieldGroup::KillPlane,
    FieldGroup::BouncePlane,
    FieldGroup::BounceCoefficient,
    FieldGroup::AlphaScaleDiffEq,
    FieldGroup::ScaleRange,
    FieldGroup::VelocityOffset,
    FieldGroup::Image,
    FieldGroup::Spawn,
    FieldGroup::Environment,
    FieldGroup::Lifespan,
    FieldGroup::DecayDamp,
    FieldGroup::WindDiffusion,
    FieldGroup::AlphaRange,
];

/// The float fields of one group in wire order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupFloats {
    values: [f32; MAX_GROUP_FLOATS],
    len: usize,
}

impl GroupFloats {
    fn from_parts(parts: &[&[f32]]) -> Self {
        let mut values = [0.0; MAX_GROUP_FLOATS];
        let mut len = 0;
        for value in parts.iter().flat_map(|part| part.iter()) {
            values[len] = *value;
            len += 1;
        }
        Self { values, len }
    }

    /// Returns the floats as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values[..self.len]
    }
}

impl FieldGroup {
    /// Header bit gating this group.
    #[must_use]
    pub const fn presence_bit(self) -> PresenceBit {
        match self {
            Self::KillPlane => PresenceBit::KILL_PLANE,
            Self::BouncePlane => PresenceBit::BOUNCE_PLANE,
            Self::BounceCoefficient => PresenceBit::BOUNCE_COEFFICIENT,
            Self::AlphaScaleDiffEq => PresenceBit::ALPHA_SCALE_DIFF_EQ,
            Self::ScaleRange => PresenceBit::SCALE_RANGE,
            Self::VelocityOffset => PresenceBit::VELOCITY_OFFSET,
            Self::Image => PresenceBit::IMAGE,
            Self::Spawn => PresenceBit::SPAWN,
            Self::Environment => PresenceBit::ENVIRONMENT,
            Self::Lifespan => PresenceBit::LIFESPAN,
            Self::DecayDamp => PresenceBit::DECAY_DAMP,
            Self::WindDiffusion => PresenceBit::WIND_DIFFUSION,
            Self::AlphaRange => PresenceBit::ALPHA_RANGE,
        }
    }

    /// Short name used in logs and inspection output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::KillPlane => "kill_plane",
            Self::BouncePlane => "bounce_plane",
            Self::BounceCoefficient => "bounce_coefficient",
            Self::AlphaScaleDiffEq => "alpha_scale_diff_eq",
            Self::ScaleRange => "scale_range",
            Self::VelocityOffset => "velocity_offset",
            Self::Image => "image",
            Self::Spawn => "spawn",
            Self::Environment => "environment",
            Self::Lifespan => "lifespan",
            Self::DecayDamp => "decay_damp",
            Self::WindDiffusion => "wind_diffusion",
            Self::AlphaRange => "alpha_range",
        }
    }

    /// Number of quantized floats in the group. Zero for the image.
    #[must_use]
    pub const fn float_count(self) -> usize {
        match self {
            Self::KillPlane | Self::Environment => 5,
            Self::BouncePlane | Self::ScaleRange | Self::DecayDamp | Self::AlphaRange => 4,
            Self::BounceCoefficient => 1,
            Self::AlphaScaleDiffEq => 6,
            Self::VelocityOffset | Self::Lifespan | Self::WindDiffusion => 3,
            Self::Image => 0,
            Self::Spawn => 9,
        }
    }

    /// Largest number of bytes this group can occupy.
    #[must_use]
    pub const fn max_encoded_len(self) -> usize {
        match self {
            Self::Image => RAW_IMAGE_LEN,
            _ => self.float_count() * QuantizedFloat::ENCODED_LEN,
        }
    }

    /// Number of bytes this group occupies for `config`.
    #[must_use]
    pub fn encoded_len(self, config: &ParticleSystemConfig) -> usize {
        match self {
            Self::Image => encoded_image_len(&config.image_id),
            _ => self.float_count() * QuantizedFloat::ENCODED_LEN,
        }
    }

    /// Float fields of this group in wire order.
    #[must_use]
    pub fn floats(self, config: &ParticleSystemConfig) -> GroupFloats {
        let c = config;
        match self {
            Self::KillPlane => GroupFloats::from_parts(&[
                &c.kill_plane_normal,
                &[c.kill_plane_z, c.distance_death],
            ]),
            Self::BouncePlane => {
                GroupFloats::from_parts(&[&c.bounce_plane_normal, &[c.bounce_plane_z]])
            }
            Self::BounceCoefficient => GroupFloats::from_parts(&[&[c.bounce_coefficient]]),
            Self::AlphaScaleDiffEq => {
                GroupFloats::from_parts(&[&c.diff_eq_alpha, &c.diff_eq_scale])
            }
            Self::ScaleRange => GroupFloats::from_parts(&[&c.scale_range]),
            Self::VelocityOffset => GroupFloats::from_parts(&[&c.velocity_offset]),
            Self::Image => GroupFloats::from_parts(&[]),
            Self::Spawn => GroupFloats::from_parts(&[
                &[c.spawn_range, c.spawn_frequency, c.spawn_frequency_range],
                &c.spawn_direction,
                &[
                    c.spawn_direction_range,
                    c.spawn_velocity,
                    c.spawn_velocity_range,
                ],
            ]),
            Self::Environment => GroupFloats::from_parts(&[
                &[c.wind_weight],
                &c.gravity,
                &[c.gravity_weight],
            ]),
            Self::Lifespan => GroupFloats::from_parts(&[&[
                c.global_lifetime,
                c.individual_lifetime,
                c.individual_lifetime_range,
            ]]),
            Self::DecayDamp => GroupFloats::from_parts(&[&[
                c.speed_limit,
                c.alpha_decay,
                c.scale_decay,
                c.damp_motion_factor,
            ]]),
            Self::WindDiffusion => GroupFloats::from_parts(&[&c.wind_diffusion]),
            Self::AlphaRange => GroupFloats::from_parts(&[&c.alpha_range]),
        }
    }

    /// Returns `true` if any field of the group differs from `defaults`.
    ///
    /// Floats compare with plain `!=`: no epsilon, and a NaN field always
    /// counts as changed.
    #[must_use]
    pub fn differs(
        self,
        config: &ParticleSystemConfig,
        defaults: &ParticleSystemConfig,
    ) -> bool {
        match self {
            Self::Image => config.image_id != defaults.image_id,
            _ => self.floats(config).as_slice() != self.floats(defaults).as_slice(),
        }
    }

    /// Writes the group's fields.
    pub fn write(
        self,
        writer: &mut ByteWriter<'_>,
        config: &ParticleSystemConfig,
    ) -> EncodeResult<()> {
        if self == Self::Image {
            return write_image_id(writer, &config.image_id);
        }
        writer.ensure_remaining(self.encoded_len(config))?;
        for value in self.floats(config).as_slice() {
            write_f32(writer, *value)?;
        }
        Ok(())
    }

    /// Reads the group's fields into `config`, leaving every other field alone.
    pub fn read(
        self,
        reader: &mut ByteReader<'_>,
        config: &mut ParticleSystemConfig,
    ) -> WireResult<()> {
        match self {
            Self::KillPlane => {
                let [x, y, z, plane_z, death] = read_floats(reader)?;
                config.kill_plane_normal = [x, y, z];
                config.kill_plane_z = plane_z;
                config.distance_death = death;
            }
            Self::BouncePlane => {
                let [x, y, z, plane_z] = read_floats(reader)?;
                config.bounce_plane_normal = [x, y, z];
                config.bounce_plane_z = plane_z;
            }
            Self::BounceCoefficient => {
                config.bounce_coefficient = read_f32(reader)?;
            }
            Self::AlphaScaleDiffEq => {
                let [a0, a1, a2, s0, s1, s2] = read_floats(reader)?;
                config.diff_eq_alpha = [a0, a1, a2];
                config.diff_eq_scale = [s0, s1, s2];
            }
            Self::ScaleRange => config.scale_range = read_floats(reader)?,
            Self::VelocityOffset => config.velocity_offset = read_floats(reader)?,
            Self::Image => config.image_id = read_image_id(reader)?,
            Self::Spawn => {
                let [range, freq, freq_range, dx, dy, dz, dir_range, vel, vel_range] =
                    read_floats(reader)?;
                config.spawn_range = range;
                config.spawn_frequency = freq;
                config.spawn_frequency_range = freq_range;
                config.spawn_direction = [dx, dy, dz];
                config.spawn_direction_range = dir_range;
                config.spawn_velocity = vel;
                config.spawn_velocity_range = vel_range;
            }
            Self::Environment => {
                let [wind, gx, gy, gz, gravity_weight] = read_floats(reader)?;
                config.wind_weight = wind;
                config.gravity = [gx, gy, gz];
                config.gravity_weight = gravity_weight;
            }
            Self::Lifespan => {
                let [global, individual, individual_range] = read_floats(reader)?;
                config.global_lifetime = global;
                config.individual_lifetime = individual;
                config.individual_lifetime_range = individual_range;
            }
            Self::DecayDamp => {
                let [speed, alpha, scale, damp] = read_floats(reader)?;
                config.speed_limit = speed;
                config.alpha_decay = alpha;
                config.scale_decay = scale;
                config.damp_motion_factor = damp;
            }
            Self::WindDiffusion => config.wind_diffusion = read_floats(reader)?,
            Self::AlphaRange => config.alpha_range = read_floats(reader)?,
        }
        Ok(())
    }
}

fn read_floats<const N: usize>(reader: &mut ByteReader<'_>) -> WireResult<[f32; N]> {
    let mut values = [0.0; N];
    for value in &mut values {
        *value = read_f32(reader)?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use wire::{PresenceHeader, IMG_FIRE};

    use super::*;
    use crate::config::default_config;

    #[test]
    fn table_covers_every_header_bit_once() {
        let mut header = PresenceHeader::new();
        for group in GROUP_TABLE {
            assert!(!header.is_set(group.presence_bit()), "{} reused", group.name());
            header.set(group.presence_bit());
        }
        assert_eq!(header.to_bytes(), [0xFE, 0x00, 0x01, 0x1F]);
    }

    #[test]
    fn table_matches_payload_order() {
        assert_eq!(
            GROUP_TABLE,
            [
                FieldGroup::KillPlane,
                FieldGroup::BouncePlane,
                FieldGroup::BounceCoefficient,
                FieldGroup::AlphaScaleDiffEq,
                FieldGroup::ScaleRange,
                FieldGroup::VelocityOffset,
                FieldGroup::Image,
                FieldGroup::Spawn,
                FieldGroup::Environment,
                FieldGroup::Lifespan,
                FieldGroup::DecayDamp,
                FieldGroup::WindDiffusion,
                FieldGroup::AlphaRange,
            ]
        );
    }

    #[test]
    fn byte_zero_masks_in_payload_order() {
        let masks: Vec<u8> = GROUP_TABLE
            .iter()
            .map(|g| g.presence_bit())
            .filter(|bit| bit.byte() == 0)
            .map(PresenceBit::mask)
            .collect();
        assert_eq!(masks, [0x02, 0x04, 0x08, 0x20, 0x40, 0x10, 0x80]);
    }

    #[test]
    fn table_order_is_byte_zero_then_three_then_two() {
        let bytes: Vec<usize> = GROUP_TABLE.iter().map(|g| g.presence_bit().byte()).collect();
        assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3, 2]);
    }

    #[test]
    fn float_counts_match_field_layout() {
        let config = default_config();
        for group in GROUP_TABLE {
            assert_eq!(group.floats(&config).as_slice().len(), group.float_count());
        }
        let total: usize = GROUP_TABLE.iter().map(|g| g.float_count()).sum();
        assert_eq!(total, 51);
    }

    #[test]
    fn max_float_group_is_spawn() {
        let largest = GROUP_TABLE.iter().map(|g| g.float_count()).max();
        assert_eq!(largest, Some(MAX_GROUP_FLOATS));
        assert_eq!(FieldGroup::Spawn.float_count(), MAX_GROUP_FLOATS);
    }

    #[test]
    fn defaults_never_differ_from_themselves() {
        let config = default_config();
        for group in GROUP_TABLE {
            assert!(!group.differs(&config, &config), "{}", group.name());
        }
    }

    #[test]
    fn one_changed_field_marks_only_its_group() {
        let defaults = default_config();
        let mut config = defaults;
        config.gravity[2] = -3.0;
        let changed: Vec<FieldGroup> = GROUP_TABLE
            .into_iter()
            .filter(|g| g.differs(&config, &defaults))
            .collect();
        assert_eq!(changed, [FieldGroup::Environment]);
    }

    #[test]
    fn nan_always_differs() {
        let mut config = default_config();
        config.spawn_velocity = f32::NAN;
        assert!(FieldGroup::Spawn.differs(&config, &config));
    }

    #[test]
    fn negative_zero_equals_zero() {
        let defaults = default_config();
        let mut config = defaults;
        config.velocity_offset = [-0.0; 3];
        assert!(!FieldGroup::VelocityOffset.differs(&config, &defaults));
    }

    #[test]
    fn image_group_compares_uuid() {
        let defaults = default_config();
        let mut config = defaults;
        config.image_id = IMG_FIRE;
        assert!(FieldGroup::Image.differs(&config, &defaults));
        assert_eq!(FieldGroup::Image.encoded_len(&config), 1);
    }

    #[test]
    fn spawn_wire_order() {
        let mut config = default_config();
        config.spawn_range = 2.0;
        config.spawn_frequency = 4.0;
        config.spawn_direction = [1.0, 0.5, 0.25];
        config.spawn_velocity_range = 8.0;
        assert_eq!(
            FieldGroup::Spawn.floats(&config).as_slice(),
            [2.0, 4.0, 0.0, 1.0, 0.5, 0.25, 1.0, 0.75, 8.0]
        );
    }

    #[test]
    fn write_then_read_group() {
        let mut source = default_config();
        source.kill_plane_normal = [0.0, 1.0, 0.0];
        source.kill_plane_z = 12.0;
        source.distance_death = 32.0;

        let mut buf = [0u8; 16];
        let mut writer = ByteWriter::new(&mut buf);
        FieldGroup::KillPlane.write(&mut writer, &source).unwrap();
        assert_eq!(writer.finish(), FieldGroup::KillPlane.max_encoded_len());

        let mut target = default_config();
        let mut reader = ByteReader::new(&buf[..10]);
        FieldGroup::KillPlane.read(&mut reader, &mut target).unwrap();
        assert!(reader.is_empty());
        assert_eq!(target, source);
    }

    #[test]
    fn short_buffer_writes_nothing() {
        let mut buf = [0xAAu8; 5];
        let mut writer = ByteWriter::new(&mut buf);
        assert!(FieldGroup::DecayDamp.write(&mut writer, &default_config()).is_err());
        assert_eq!(writer.finish(), 0);
        assert_eq!(buf, [0xAA; 5]);
    }

    #[test]
    fn truncated_group_read_fails() {
        let mut config = default_config();
        let mut reader = ByteReader::new(&[64, 0xFA, 64]);
        assert!(FieldGroup::Lifespan.read(&mut reader, &mut config).is_err());
    }

    #[test]
    fn quantized_defaults_are_close() {
        let defaults = default_config();
        let mut buf = [0u8; MAX_GROUP_FLOATS * 2];
        let mut writer = ByteWriter::new(&mut buf);
        FieldGroup::Environment.write(&mut writer, &defaults).unwrap();
        let len = writer.finish();

        let mut decoded = defaults;
        let mut reader = ByteReader::new(&buf[..len]);
        FieldGroup::Environment.read(&mut reader, &mut decoded).unwrap();
        assert_eq!(decoded.wind_weight, 0.5);
        assert_eq!(decoded.gravity, [0.0, 0.0, -9.75]);
    }
}
