//! Two-byte lossy float encoding.
//!
//! A float travels as a signed 8-bit mantissa and a signed 8-bit power-of-two
//! exponent. Encoding scales the (clamped) value until its magnitude is at
//! least 64 and then truncates toward zero, so the round trip keeps about
//! seven significant bits and the decoded magnitude never exceeds the input's.
//!
//! The scaling loops must stay exactly as written; peers expect these bytes.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{EncodeResult, WireResult};

/// A float reduced to a mantissa/exponent byte pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuantizedFloat {
    mantissa: i8,
    exponent: i8,
}

impl QuantizedFloat {
    /// Encoded size in bytes.
    pub const ENCODED_LEN: usize = 2;

    /// Inputs are clamped to `[-MAX_MAGNITUDE, MAX_MAGNITUDE]` before encoding.
    pub const MAX_MAGNITUDE: f32 = 127.0;

    /// Creates a value from raw wire parts.
    #[must_use]
    pub const fn from_parts(mantissa: i8, exponent: i8) -> Self {
        Self { mantissa, exponent }
    }

    /// Returns the mantissa byte.
    #[must_use]
    pub const fn mantissa(self) -> i8 {
        self.mantissa
    }

    /// Returns the exponent byte.
    #[must_use]
    pub const fn exponent(self) -> i8 {
        self.exponent
    }

    /// Quantizes `value`.
    ///
    /// Zero (and anything too small to reach a mantissa of 64 within 127
    /// doublings) ends with exponent -127 and mantissa 0. NaN encodes as
    /// mantissa 0, exponent 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn quantize(value: f32) -> Self {
        let mut scaled = value.clamp(-Self::MAX_MAGNITUDE, Self::MAX_MAGNITUDE);
        let mut exponent: i8 = 0;

        while scaled < 64.0 && scaled > -64.0 && exponent > -127 {
            scaled *= 2.0;
            exponent -= 1;
        }
        // Unreachable after the clamp; kept so the exponent range matches peers.
        while (scaled > 128.0 || scaled < -128.0) && exponent < 127 {
            scaled *= 0.5;
            exponent += 1;
        }

        Self {
            mantissa: scaled as i8,
            exponent,
        }
    }

    /// Expands back to a float.
    #[must_use]
    pub fn to_f32(self) -> f32 {
        let mut result = f32::from(self.mantissa);
        let mut exponent = self.exponent;
        while exponent > 0 {
            result *= 2.0;
            exponent -= 1;
        }
        while exponent < 0 {
            result *= 0.5;
            exponent += 1;
        }
        result
    }

    /// Writes mantissa then exponent.
    pub fn write(self, writer: &mut ByteWriter<'_>) -> EncodeResult<()> {
        writer.write_i8(self.mantissa)?;
        writer.write_i8(self.exponent)?;
        Ok(())
    }

    /// Reads mantissa then exponent.
    pub fn read(reader: &mut ByteReader<'_>) -> WireResult<Self> {
        let mantissa = reader.read_i8()?;
        let exponent = reader.read_i8()?;
        Ok(Self { mantissa, exponent })
    }
}

impl From<f32> for QuantizedFloat {
    fn from(value: f32) -> Self {
        Self::quantize(value)
    }
}

impl From<QuantizedFloat> for f32 {
    fn from(value: QuantizedFloat) -> Self {
        value.to_f32()
    }
}

/// Quantizes and writes one float.
pub fn write_f32(writer: &mut ByteWriter<'_>, value: f32) -> EncodeResult<()> {
    QuantizedFloat::quantize(value).write(writer)
}

/// Reads and expands one float.
pub fn read_f32(reader: &mut ByteReader<'_>) -> WireResult<f32> {
    Ok(QuantizedFloat::read(reader)?.to_f32())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(value: f32) -> (i8, i8) {
        let q = QuantizedFloat::quantize(value);
        (q.mantissa(), q.exponent())
    }

    #[test]
    fn zero_scales_to_minimum_exponent() {
        assert_eq!(parts(0.0), (0, -127));
        assert_eq!(QuantizedFloat::quantize(0.0).to_f32().to_bits(), 0.0f32.to_bits());
    }

    #[test]
    fn negative_zero_decodes_to_zero() {
        assert_eq!(QuantizedFloat::quantize(-0.0).to_f32(), 0.0);
    }

    #[test]
    fn powers_of_two_are_exact() {
        assert_eq!(parts(1.0), (64, -6));
        assert_eq!(parts(-1.0), (-64, -6));
        assert_eq!(parts(0.5), (64, -7));
        assert_eq!(parts(0.25), (64, -8));
        for value in [1.0f32, -1.0, 0.5, 0.25, 2.0, 64.0, -32.0] {
            assert_eq!(QuantizedFloat::quantize(value).to_f32(), value);
        }
    }

    #[test]
    fn large_values_skip_scaling() {
        assert_eq!(parts(64.0), (64, 0));
        assert_eq!(parts(100.0), (100, 0));
        assert_eq!(parts(127.0), (127, 0));
        assert_eq!(parts(-100.5), (-100, 0));
    }

    #[test]
    fn clamps_to_127() {
        assert_eq!(
            QuantizedFloat::quantize(200.0),
            QuantizedFloat::quantize(127.0)
        );
        assert_eq!(
            QuantizedFloat::quantize(-200.0),
            QuantizedFloat::quantize(-127.0)
        );
        assert_eq!(QuantizedFloat::quantize(f32::INFINITY).to_f32(), 127.0);
        assert_eq!(QuantizedFloat::quantize(f32::NEG_INFINITY).to_f32(), -127.0);
    }

    #[test]
    fn truncates_instead_of_rounding() {
        // 63.9 doubles once to 127.8 and truncates to 127.
        assert_eq!(parts(63.9), (127, -1));
        assert_eq!(QuantizedFloat::quantize(63.9).to_f32(), 63.5);
        // Gravity default: -9.81 * 8 = -78.48 truncates toward zero.
        assert_eq!(parts(-9.81), (-78, -3));
        assert_eq!(QuantizedFloat::quantize(-9.81).to_f32(), -9.75);
    }

    #[test]
    fn common_defaults_round_trip() {
        for value in [0.75f32, 0.25, 5.0, 10.0, 1.0] {
            assert_eq!(QuantizedFloat::quantize(value).to_f32(), value);
        }
    }

    #[test]
    fn nan_encodes_as_zero_mantissa() {
        assert_eq!(parts(f32::NAN), (0, 0));
    }

    #[test]
    fn subnormal_underflows_to_zero() {
        let q = QuantizedFloat::quantize(1e-40);
        assert_eq!(q.exponent(), -127);
        assert_eq!(q.to_f32(), 0.0);
    }

    #[test]
    fn extreme_wire_exponents_do_not_panic() {
        assert_eq!(QuantizedFloat::from_parts(127, 127).to_f32(), f32::INFINITY);
        let tiny = QuantizedFloat::from_parts(-128, -128).to_f32();
        assert!(tiny < 0.0 && tiny > -1e-36);
    }

    #[test]
    fn write_read_bytes() {
        let mut buf = [0u8; 4];
        let mut writer = ByteWriter::new(&mut buf);
        write_f32(&mut writer, -9.81).unwrap();
        write_f32(&mut writer, 0.0).unwrap();
        assert_eq!(writer.finish(), 4);
        assert_eq!(buf, [0xB2, 0xFD, 0x00, 0x81]);

        let mut reader = ByteReader::new(&buf);
        assert_eq!(read_f32(&mut reader).unwrap(), -9.75);
        assert_eq!(read_f32(&mut reader).unwrap(), 0.0);
    }

    #[test]
    fn read_keeps_sign_of_both_bytes() {
        let mut reader = ByteReader::new(&[0xC0, 0x81, 0x7F, 0x00]);
        assert_eq!(
            QuantizedFloat::read(&mut reader).unwrap(),
            QuantizedFloat::from_parts(-64, -127)
        );
        assert_eq!(
            QuantizedFloat::read(&mut reader).unwrap(),
            QuantizedFloat::from_parts(127, 0)
        );
        assert!(reader.is_empty());
    }

    #[test]
    fn read_needs_two_bytes() {
        let mut reader = ByteReader::new(&[0x40]);
        assert!(QuantizedFloat::read(&mut reader).is_err());
    }
}
