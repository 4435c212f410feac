//! Decoding and encoding packets for humans.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use codec::{default_config, encode_config, ParticleSystemConfig, MAX_ENCODED_LEN};
use serde::Serialize;

use crate::inspect::inspect_packet;

/// Decoded packet contents in a serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeOutput {
    pub length: usize,
    /// Presence header as hex, e.g. `"80000000"`.
    pub header: String,
    /// Names of the groups the packet carries.
    pub present_groups: Vec<&'static str>,
    /// Stock name of the image, if it is a well-known one.
    pub image_name: Option<&'static str>,
    pub config: ParticleSystemConfig,
}

/// Decodes `bytes` against the standard defaults.
pub fn decode_packet_json(bytes: &[u8]) -> Result<DecodeOutput> {
    let report = inspect_packet(bytes)?;
    let config = report.config;

    let header = report
        .header
        .to_bytes()
        .iter()
        .fold(String::new(), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        });

    Ok(DecodeOutput {
        length: report.used_len,
        header,
        present_groups: report.groups.iter().map(|span| span.group.name()).collect(),
        image_name: wire::well_known_name(&config.image_id),
        config,
    })
}

/// Renders a decode result as indented text.
pub fn format_decode_pretty(output: &DecodeOutput) -> String {
    let mut out = String::new();
    let config = &output.config;
    let _ = writeln!(out, "length: {} bytes", output.length);
    let _ = writeln!(out, "header: {}", output.header);
    if output.present_groups.is_empty() {
        let _ = writeln!(out, "groups: (defaults)");
    } else {
        let _ = writeln!(out, "groups: {}", output.present_groups.join(", "));
    }
    let image = output
        .image_name
        .map_or_else(|| config.image_id.to_string(), str::to_string);
    let _ = writeln!(out, "image: {image}");
    let _ = writeln!(
        out,
        "particles: max {} initial {}",
        config.max_particles, config.initial_particles
    );
    let _ = writeln!(
        out,
        "spawn: range {} freq {}±{} dir {:?}±{} vel {}±{}",
        config.spawn_range,
        config.spawn_frequency,
        config.spawn_frequency_range,
        config.spawn_direction,
        config.spawn_direction_range,
        config.spawn_velocity,
        config.spawn_velocity_range
    );
    let _ = writeln!(
        out,
        "environment: wind {} gravity {:?} weight {}",
        config.wind_weight, config.gravity, config.gravity_weight
    );
    let _ = writeln!(
        out,
        "lifespan: global {} individual {}±{}",
        config.global_lifetime, config.individual_lifetime, config.individual_lifetime_range
    );
    let _ = write!(out, "flags:");
    for (slot, value) in config.flags.iter().enumerate() {
        if *value != 0 {
            let _ = write!(out, " [{slot}]=0x{value:02x}");
        }
    }
    out
}

/// Parses a JSON config and encodes it against the standard defaults.
///
/// Fields missing from the JSON take their default values.
pub fn encode_config_json(json: &str) -> Result<Vec<u8>> {
    let config: ParticleSystemConfig =
        serde_json::from_str(json).context("parse particle system json")?;
    let mut buf = [0u8; MAX_ENCODED_LEN];
    let len = encode_config(&config, &default_config(), &mut buf)
        .context("encode particle system")?;
    log::debug!("encoded {len}-byte particle system packet");
    Ok(buf[..len].to_vec())
}
