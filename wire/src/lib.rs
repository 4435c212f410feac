//! Wire primitives for the partsys particle-system packet format.
//!
//! This crate owns the byte-level vocabulary of a packet: the four-byte
//! presence header, the two-byte quantized float, the image reference and
//! the size limits. It does not know which fields make up a particle
//! system; that mapping lives in the codec crate.
//!
//! # Design Principles
//!
//! - **Stable wire format** - Bit assignments and tables are fixed; see `WIRE_FORMAT.md`.
//! - **Bounded decoding** - Every read is checked against the bytes actually supplied.
//! - **Lossy by contract** - Float quantization is part of the format, not an error.

mod error;
mod header;
mod image;
mod limits;
mod quantized;

pub use error::{DecodeError, EncodeError, EncodeResult, WireResult};
pub use header::{PresenceBit, PresenceHeader, FLAG_PRESENCE_BYTE, HEADER_SIZE};
pub use image::{
    encoded_image_len, read_image_id, well_known_image, well_known_name, well_known_tag,
    write_image_id, IMG_BIG_EXPLOSION_1, IMG_BIG_EXPLOSION_2, IMG_EXPLOSION, IMG_EXPLOSION_2,
    IMG_EXPLOSION_3, IMG_EXPLOSION_4, IMG_FIRE, IMG_SHOT, IMG_SMOKE_POOF, IMG_SPARK,
    RAW_IMAGE_LEN, RAW_IMAGE_TAG, WELL_KNOWN_IMAGES,
};
pub use limits::{check_packet_len, FLAG_SLOTS, MAX_PACKET_SIZE, PARTICLE_COUNT_BYTES};
pub use quantized::{read_f32, write_f32, QuantizedFloat};
