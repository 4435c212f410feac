//! Particle-system configuration and its default baseline.

use uuid::Uuid;
use wire::{FLAG_SLOTS, IMG_SHOT};

use crate::flags;

// One sim away the emitter starts fading; two sim diagonals away it is gone.
const FADE_BEGIN_DISTANCE: f32 = 256.0;
const FADE_END_DISTANCE: f32 = 1.414 * 512.0;

/// Everything a peer needs to recreate a particle emitter.
///
/// Fields are grouped the way the packet gates them; see [`FieldGroup`]
/// for the group boundaries. All floats travel quantized, so a decoded
/// config only approximates the encoded one.
///
/// [`FieldGroup`]: crate::FieldGroup
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParticleSystemConfig {
    /// Kill plane normal.
    pub kill_plane_normal: [f32; 3],
    /// Kill plane offset along its normal.
    pub kill_plane_z: f32,
    /// Particles farther than this from the emitter die.
    pub distance_death: f32,

    /// Bounce plane normal.
    pub bounce_plane_normal: [f32; 3],
    /// Bounce plane offset along its normal.
    pub bounce_plane_z: f32,
    /// Velocity attenuation applied when reflecting off the bounce plane.
    pub bounce_coefficient: f32,

    pub diff_eq_alpha: [f32; 3],
    pub diff_eq_scale: [f32; 3],

    /// Minimum scale, maximum scale, and their variations.
    pub scale_range: [f32; 4],
    /// Minimum alpha, maximum alpha, and their variations.
    pub alpha_range: [f32; 4],
    pub velocity_offset: [f32; 3],

    /// Sprite texture.
    pub image_id: Uuid,

    pub spawn_range: f32,
    /// Seconds between spawns; zero respawns the moment a particle dies.
    pub spawn_frequency: f32,
    pub spawn_frequency_range: f32,
    pub spawn_direction: [f32; 3],
    pub spawn_direction_range: f32,
    pub spawn_velocity: f32,
    pub spawn_velocity_range: f32,

    /// Zero behaves like a heavy object, one like something light and fluffy.
    pub wind_weight: f32,
    pub gravity: [f32; 3],
    /// Zero floats in air, one falls like lead.
    pub gravity_weight: f32,

    /// Lifetime of the whole system; zero means it never dies as a whole.
    pub global_lifetime: f32,
    pub individual_lifetime: f32,
    pub individual_lifetime_range: f32,

    pub speed_limit: f32,
    pub alpha_decay: f32,
    pub scale_decay: f32,
    pub damp_motion_factor: f32,

    pub wind_diffusion: [f32; 3],

    /// Render-side fade start distance. Never sent.
    pub fade_begin_distance: f32,
    /// Render-side fade end distance. Never sent.
    pub fade_end_distance: f32,

    pub max_particles: u8,
    pub initial_particles: u8,

    /// Opaque behavior flag bytes; see [`crate::flags`] for known slots.
    pub flags: [u8; FLAG_SLOTS],
}

/// Returns the baseline both peers encode against and decode onto.
///
/// Changing any value here changes which groups get sent and what an absent
/// group decodes to, so both peers must agree on it.
#[must_use]
pub const fn default_config() -> ParticleSystemConfig {
    ParticleSystemConfig {
        kill_plane_normal: [0.0, 0.0, 1.0],
        kill_plane_z: 0.0,
        distance_death: 10.0,

        bounce_plane_normal: [0.0, 0.0, 1.0],
        bounce_plane_z: 0.0,
        bounce_coefficient: 1.0,

        diff_eq_alpha: [0.0; 3],
        diff_eq_scale: [0.0; 3],

        scale_range: [1.0, 5.0, 0.0, 0.0],
        alpha_range: [1.0, 1.0, 0.0, 0.0],
        velocity_offset: [0.0; 3],

        image_id: IMG_SHOT,

        spawn_range: 1.0,
        spawn_frequency: 0.0,
        spawn_frequency_range: 0.0,
        spawn_direction: [0.0, 0.0, 1.0],
        spawn_direction_range: 1.0,
        spawn_velocity: 0.75,
        spawn_velocity_range: 0.25,

        wind_weight: 0.5,
        gravity: [0.0, 0.0, -9.81],
        gravity_weight: 0.5,

        global_lifetime: 0.0,
        individual_lifetime: 5.0,
        individual_lifetime_range: 1.0,

        speed_limit: 1.0,
        alpha_decay: 1.0,
        scale_decay: 0.0,
        damp_motion_factor: 0.0,

        wind_diffusion: [0.0; 3],

        fade_begin_distance: FADE_BEGIN_DISTANCE,
        fade_end_distance: FADE_END_DISTANCE,

        max_particles: 25,
        initial_particles: 25,

        flags: [0; FLAG_SLOTS],
    }
}

impl Default for ParticleSystemConfig {
    fn default() -> Self {
        default_config()
    }
}

impl ParticleSystemConfig {
    /// Short-lived debris pulled down by gravity and pushed by wind.
    ///
    /// The defaults plus the action and kill flags that make an explosion.
    #[must_use]
    pub const fn explosion() -> Self {
        let mut config = default_config();
        config.flags[flags::ACTION_BYTE] =
            flags::AFFECTED_BY_WIND | flags::AFFECTED_BY_GRAVITY | flags::DISTANCE_DEATH;
        config.flags[flags::KILL_BYTE] = flags::DISTANCE_DEATH | flags::TIME_DEATH;
        config
    }

    /// Returns `true` if flag `bit` is set in flag byte `slot`.
    #[must_use]
    pub const fn has_flag(&self, slot: usize, bit: u8) -> bool {
        self.flags[slot] & bit != 0
    }
}
