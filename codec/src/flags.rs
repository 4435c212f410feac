//! Known behavior flag bytes.
//!
//! The packet treats [`ParticleSystemConfig::flags`] as eight opaque bytes;
//! these names only document what the simulation reads out of them.
//!
//! [`ParticleSystemConfig::flags`]: crate::ParticleSystemConfig::flags

/// Flag slot holding per-particle behavior bits.
pub const ACTION_BYTE: usize = 1;

/// Flag slot holding particle death conditions.
pub const KILL_BYTE: usize = 2;

/// Flag slot holding the bounce switch.
pub const BOUNCE_BYTE: usize = 3;

// Action byte.

/// Particles rotate as they move.
pub const SPIN: u8 = 0x01;
pub const AFFECTED_BY_WIND: u8 = 0x02;
pub const AFFECTED_BY_GRAVITY: u8 = 0x04;
/// Sample wind per particle instead of once per system.
pub const EVALUATE_WIND_PER_PARTICLE: u8 = 0x08;
pub const DAMP_MOTION: u8 = 0x10;
pub const WIND_DIFFUSION: u8 = 0x20;

// Kill byte.

/// Particles die when they cross the kill plane.
pub const KILL_PLANE: u8 = 0x01;
/// The whole system dies after its global lifetime.
pub const GLOBAL_DIE: u8 = 0x02;
/// Particles die past `distance_death` from the emitter.
pub const DISTANCE_DEATH: u8 = 0x04;
/// Particles die after their individual lifetime.
pub const TIME_DEATH: u8 = 0x08;

// Bounce byte.

/// Particles reflect off the bounce plane.
pub const BOUNCE: u8 = 0x01;
