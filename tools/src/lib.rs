//! Introspection and debugging tools for the partsys packet codec.
//!
//! This crate provides utilities for inspecting and understanding encoded packets:
//!
//! - List a directory of captured packets
//! - Break a packet down into header, group spans, counts and flag bytes
//! - Decode a packet into JSON or readable text
//! - Encode a JSON config into packet bytes
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

mod capture;
mod decode;
mod inspect;

pub use capture::{collect_captures, sort_captures, CaptureOrder, PacketCapture};
pub use decode::{decode_packet_json, encode_config_json, format_decode_pretty, DecodeOutput};
pub use inspect::{inspect_packet, FlagByte, GroupSpan, InspectReport};
