//! Sprite image reference encoding.
//!
//! Ten stock particle textures are sent as a one-byte index. Any other image
//! is sent as [`RAW_IMAGE_TAG`] followed by the 16 UUID bytes.

use bytestream::{ByteReader, ByteWriter};
use uuid::Uuid;

use crate::error::{DecodeError, EncodeResult, WireResult};

/// Tag byte announcing a literal 16-byte UUID.
pub const RAW_IMAGE_TAG: u8 = 0x00;

/// Length of a raw image reference: tag plus UUID bytes.
pub const RAW_IMAGE_LEN: usize = 1 + 16;

pub const IMG_SHOT: Uuid = Uuid::from_u128(0x35f2_17a3_f618_49cf_bbca_c86d_4865_51a9);
pub const IMG_SPARK: Uuid = Uuid::from_u128(0xd2e7_5ac1_d0fb_4532_820e_a200_34ac_814d);
pub const IMG_BIG_EXPLOSION_1: Uuid = Uuid::from_u128(0x5e47_a0dc_97bf_44e0_8b40_de06_718c_ee9d);
pub const IMG_BIG_EXPLOSION_2: Uuid = Uuid::from_u128(0x9c8e_ca51_53d5_42a7_bb58_cef0_7039_5db8);
pub const IMG_SMOKE_POOF: Uuid = Uuid::from_u128(0x1e63_e323_5fe0_452e_92f8_b98b_d0f7_64e3);
pub const IMG_FIRE: Uuid = Uuid::from_u128(0xaca4_0aa8_44cf_44ca_a0fa_93e1_a298_6f82);
pub const IMG_EXPLOSION: Uuid = Uuid::from_u128(0x68ed_cf47_ccd7_45b8_9f90_1649_d7f1_2806);
pub const IMG_EXPLOSION_2: Uuid = Uuid::from_u128(0x21ce_046c_83fe_430a_b629_c766_0ac7_8d7c);
pub const IMG_EXPLOSION_3: Uuid = Uuid::from_u128(0xfede_a30a_1be8_47a6_bc06_337a_04a3_9c4b);
pub const IMG_EXPLOSION_4: Uuid = Uuid::from_u128(0xabf0_d56b_82e5_47a2_a8ad_7474_1bb2_c29e);

/// Well-known images in tag order: entry `i` is sent as tag `i + 1`.
///
/// Reordering or extending this table changes the protocol.
pub const WELL_KNOWN_IMAGES: [(&str, Uuid); 10] = [
    ("shot", IMG_SHOT),
    ("spark", IMG_SPARK),
    ("big_explosion_1", IMG_BIG_EXPLOSION_1),
    ("big_explosion_2", IMG_BIG_EXPLOSION_2),
    ("smoke_poof", IMG_SMOKE_POOF),
    ("fire", IMG_FIRE),
    ("explosion", IMG_EXPLOSION),
    ("explosion_2", IMG_EXPLOSION_2),
    ("explosion_3", IMG_EXPLOSION_3),
    ("explosion_4", IMG_EXPLOSION_4),
];

/// Returns the one-byte tag for a well-known image.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn well_known_tag(id: &Uuid) -> Option<u8> {
    WELL_KNOWN_IMAGES
        .iter()
        .position(|(_, known)| known == id)
        .map(|index| index as u8 + 1)
}

/// Returns the image a one-byte tag stands for.
#[must_use]
pub fn well_known_image(tag: u8) -> Option<Uuid> {
    let index = usize::from(tag).checked_sub(1)?;
    WELL_KNOWN_IMAGES.get(index).map(|(_, id)| *id)
}

/// Returns the stock name of a well-known image.
#[must_use]
pub fn well_known_name(id: &Uuid) -> Option<&'static str> {
    WELL_KNOWN_IMAGES
        .iter()
        .find(|(_, known)| known == id)
        .map(|(name, _)| *name)
}

/// Encoded size of an image reference: 1 or [`RAW_IMAGE_LEN`].
#[must_use]
pub fn encoded_image_len(id: &Uuid) -> usize {
    if well_known_tag(id).is_some() {
        1
    } else {
        RAW_IMAGE_LEN
    }
}

/// Writes an image reference.
pub fn write_image_id(writer: &mut ByteWriter<'_>, id: &Uuid) -> EncodeResult<()> {
    if let Some(tag) = well_known_tag(id) {
        writer.write_u8(tag)?;
        return Ok(());
    }
    writer.ensure_remaining(RAW_IMAGE_LEN)?;
    writer.write_u8(RAW_IMAGE_TAG)?;
    writer.write_bytes(id.as_bytes())?;
    Ok(())
}

/// Reads an image reference.
pub fn read_image_id(reader: &mut ByteReader<'_>) -> WireResult<Uuid> {
    let tag = reader.read_u8()?;
    if tag == RAW_IMAGE_TAG {
        return Ok(Uuid::from_bytes(reader.read_array::<16>()?));
    }
    well_known_image(tag).ok_or(DecodeError::UnknownImageTag { tag })
}
