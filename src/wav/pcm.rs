//! Quantization of normalized samples into PCM bytes.
//!
//! A sample of `1.0` maps to the largest positive value of the bit depth.
//! Values outside `[-1, 1]` wrap around instead of clipping.

use super::{BitDepth, Endianness};

/// Quantize one sample into the integer written to the file.
///
/// 8 bit PCM is unsigned with silence at `0x80`; wider depths are two's
/// complement. Only the low `bits` bits of the result are meaningful.
pub fn quantize(sample: f64, bit_depth: BitDepth) -> u32 {
    let bits = bit_depth.bits() as u32;
    let amplitude = ((1u64 << (bits - 1)) - 1) as f64;
    let offset = match bit_depth {
        BitDepth::Eight => 0x80 as f64,
        _ => (1u64 << bits) as f64,
    };
    let mask = (1i64 << bits) - 1;

    ((sample * amplitude + offset).floor() as i64 & mask) as u32
}

/// Append `samples` to `out`, each quantized and laid out in `endianness`.
pub fn encode(samples: &[f64], bit_depth: BitDepth, endianness: Endianness, out: &mut Vec<u8>) {
    let width = bit_depth.bytes_per_sample() as usize;
    out.reserve(samples.len() * width);
    for &sample in samples {
        endianness.put(out, quantize(sample, bit_depth), width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn eight_bit_is_unsigned() {
        assert_eq!(quantize(0., BitDepth::Eight), 0x80);
        assert_eq!(quantize(1., BitDepth::Eight), 0xFF);
        assert_eq!(quantize(-1., BitDepth::Eight), 0x01);
    }

    #[test]
    fn wider_depths_are_twos_complement() {
        assert_eq!(quantize(0., BitDepth::Sixteen), 0);
        assert_eq!(quantize(1., BitDepth::Sixteen), 0x7FFF);
        assert_eq!(quantize(-1., BitDepth::Sixteen), 0x8001);
        assert_eq!(quantize(-0.5, BitDepth::Sixteen), 0xC000);

        assert_eq!(quantize(1., BitDepth::TwentyFour), 0x7F_FFFF);
        assert_eq!(quantize(-1., BitDepth::TwentyFour), 0x80_0001);

        assert_eq!(quantize(1., BitDepth::ThirtyTwo), 0x7FFF_FFFF);
        assert_eq!(quantize(-1., BitDepth::ThirtyTwo), 0x8000_0001);
    }

    #[test]
    fn out_of_range_wraps() {
        // 2 * 32767 = 65534, which reads back as -2
        assert_eq!(quantize(2., BitDepth::Sixteen), 0xFFFE);
    }

    #[test]
    fn byte_order_per_sample() {
        let mut little = Vec::new();
        encode(&[1., -1.], BitDepth::TwentyFour, Endianness::Little, &mut little);
        assert_eq!(little, [0xFF, 0xFF, 0x7F, 0x01, 0x00, 0x80]);

        let mut big = Vec::new();
        encode(&[1., -1.], BitDepth::TwentyFour, Endianness::Big, &mut big);
        assert_eq!(big, [0x7F, 0xFF, 0xFF, 0x80, 0x00, 0x01]);

        let mut eight = Vec::new();
        encode(&[0., 1.], BitDepth::Eight, Endianness::Big, &mut eight);
        assert_eq!(eight, [0x80, 0xFF]);
    }
}
