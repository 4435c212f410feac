//! Particle-system packet codec.
//!
//! Encodes a [`ParticleSystemConfig`] as the difference from a shared
//! defaults baseline: a four-byte presence header, the field groups that
//! changed (floats quantized to two bytes each), the particle counts and any
//! non-zero flag bytes. Decoding starts from a copy of the same defaults and
//! overwrites whatever the header says is present.
//!
//! # Example
//!
//! ```
//! use codec::{decode_config, default_config, encode_config, MAX_ENCODED_LEN};
//!
//! let defaults = default_config();
//! let mut config = defaults;
//! config.gravity = [0.0, 0.0, -2.0];
//!
//! let mut buf = [0u8; MAX_ENCODED_LEN];
//! let len = encode_config(&config, &defaults, &mut buf).unwrap();
//! assert_eq!(len, 4 + 5 * 2 + 2);
//!
//! let decoded = decode_config(&buf[..len], &defaults).unwrap();
//! assert_eq!(decoded.config.gravity, [0.0, 0.0, -2.0]);
//! ```
//!
//! # Design Principles
//!
//! - **One table** - Encoder and decoder walk the same [`GROUP_TABLE`].
//! - **No allocations** - Encoding writes into caller-provided buffers.
//! - **Bounded decoding** - Truncated or oversized input is an error, never a panic.

mod config;
mod error;
pub mod flags;
mod group;
mod limits;
mod packet;

pub use config::{default_config, ParticleSystemConfig};
pub use error::{CodecError, CodecResult};
pub use group::{FieldGroup, GroupFloats, GROUP_TABLE, MAX_GROUP_FLOATS};
pub use limits::{MAX_ENCODED_LEN, MIN_ENCODED_LEN};
pub use packet::{
    decode_config, encode_config, encoded_len, presence_header, CompressedPacket, DecodedConfig,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = default_config();
        let _ = CompressedPacket::new();
        let _ = GROUP_TABLE;
        let _ = flags::ACTION_BYTE;

        let _: CodecResult<()> = Ok(());
    }

    #[test]
    fn worst_case_packet_fits_max_encoded_len() {
        let defaults = default_config();
        let mut config = ParticleSystemConfig::explosion();
        config.flags = [0xFF; wire::FLAG_SLOTS];
        config.image_id = uuid::Uuid::from_u128(7);
        config.kill_plane_normal = [1.0, 0.0, 0.0];
        config.bounce_plane_z = 3.0;
        config.bounce_coefficient = 0.5;
        config.diff_eq_alpha = [1.0; 3];
        config.scale_range = [2.0; 4];
        config.velocity_offset = [1.0; 3];
        config.spawn_range = 4.0;
        config.wind_weight = 0.25;
        config.global_lifetime = 30.0;
        config.speed_limit = 2.0;
        config.wind_diffusion = [1.0; 3];
        config.alpha_range = [0.5; 4];

        assert_eq!(encoded_len(&config, &defaults), MAX_ENCODED_LEN);
        let mut buf = [0u8; MAX_ENCODED_LEN];
        assert_eq!(
            encode_config(&config, &defaults, &mut buf).unwrap(),
            MAX_ENCODED_LEN
        );
    }
}
