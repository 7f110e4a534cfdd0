use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Size of the canonical RIFF/WAVE header in bytes
pub const HEADER_LEN: usize = 44;

/// The largest data chunk whose `ChunkSize` still fits in 32 bits
pub const MAX_DATA_SIZE: u32 = u32::MAX - (HEADER_LEN as u32 - 8);

const FMT_CHUNK_SIZE: u32 = 16;
const PCM: u16 = 1;

/// Byte order of the header fields and of the PCM samples.
///
/// Little endian files are tagged `RIFF`, big endian ones `RIFX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endianness {
    /// Least significant byte first
    #[default]
    Little,
    /// Most significant byte first
    Big,
}

impl Endianness {
    /// The RIFF chunk id for this byte order
    pub const fn chunk_id(&self) -> [u8; 4] {
        match self {
            Self::Little => *b"RIFF",
            Self::Big => *b"RIFX",
        }
    }

    /// Append the `len` low bytes of `value` to `out` in this byte order
    pub(crate) fn put(&self, out: &mut Vec<u8>, value: u32, len: usize) {
        let bytes = value.to_le_bytes();
        match self {
            Self::Little => out.extend_from_slice(&bytes[..len]),
            Self::Big => out.extend(bytes[..len].iter().rev()),
        }
    }
}

/// Bits per PCM sample.
///
/// ```rust
/// # use midi2wav::prelude::*;
/// assert_eq!(BitDepth::try_from(24u16).ok(), Some(BitDepth::TwentyFour));
/// assert!(BitDepth::try_from(12u16).is_err());
/// assert_eq!(BitDepth::TwentyFour.bytes_per_sample(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum BitDepth {
    /// Unsigned 8 bit
    Eight = 8,
    /// Signed 16 bit
    #[default]
    Sixteen = 16,
    /// Signed 24 bit
    TwentyFour = 24,
    /// Signed 32 bit
    ThirtyTwo = 32,
}

impl BitDepth {
    /// The number of bits
    pub const fn bits(&self) -> u16 {
        *self as u16
    }

    /// The number of bytes one sample occupies
    pub const fn bytes_per_sample(&self) -> u16 {
        self.bits() >> 3
    }
}

/// The fields of a canonical 44 byte WAV header.
///
/// Derived fields (`ChunkSize`, `ByteRate`, `BlockAlign`) are computed from
/// the others so the header can never disagree with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    endianness: Endianness,
    channels: u16,
    sample_rate: u32,
    bit_depth: BitDepth,
    data_size: u32,
}

impl WavHeader {
    /// A header describing an empty data chunk
    pub const fn new(
        channels: u16,
        sample_rate: u32,
        bit_depth: BitDepth,
        endianness: Endianness,
    ) -> Self {
        Self {
            endianness,
            channels,
            sample_rate,
            bit_depth,
            data_size: 0,
        }
    }

    /// `RIFF` or `RIFX`
    pub const fn chunk_id(&self) -> [u8; 4] {
        self.endianness.chunk_id()
    }

    /// Length of the file minus the first eight bytes
    pub const fn chunk_size(&self) -> u32 {
        self.data_size.saturating_add((HEADER_LEN - 8) as u32)
    }

    /// Always 16 for PCM
    pub const fn sub_chunk1_size(&self) -> u32 {
        FMT_CHUNK_SIZE
    }

    /// Always 1, uncompressed PCM
    pub const fn audio_format(&self) -> u16 {
        PCM
    }

    /// Number of interleaved channels
    pub const fn channels(&self) -> u16 {
        self.channels
    }

    /// Frames per second
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// `channels * sample_rate * bytes_per_sample`
    pub const fn byte_rate(&self) -> u32 {
        (self.channels as u32)
            .saturating_mul(self.sample_rate)
            .saturating_mul(self.bit_depth.bytes_per_sample() as u32)
    }

    /// Bytes per frame, `channels * bytes_per_sample`
    pub const fn block_align(&self) -> u16 {
        self.channels.saturating_mul(self.bit_depth.bytes_per_sample())
    }

    /// Bits per sample
    pub const fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Byte order of the fields and samples
    pub const fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Length of the data chunk in bytes
    pub const fn data_size(&self) -> u32 {
        self.data_size
    }

    pub(crate) fn set_data_size(&mut self, data_size: u32) {
        self.data_size = data_size;
    }

    /// Number of samples the data chunk holds, over all channels
    pub const fn sample_count(&self) -> usize {
        (self.data_size / self.bit_depth.bytes_per_sample() as u32) as usize
    }

    /// Serialize the header in its byte order
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = Vec::with_capacity(HEADER_LEN);
        self.write_into(&mut out);

        let mut bytes = [0; HEADER_LEN];
        bytes.copy_from_slice(&out);
        bytes
    }

    pub(crate) fn write_into(&self, out: &mut Vec<u8>) {
        let e = self.endianness;
        out.extend_from_slice(&self.chunk_id());
        e.put(out, self.chunk_size(), 4);
        out.extend_from_slice(b"WAVE");

        out.extend_from_slice(b"fmt ");
        e.put(out, self.sub_chunk1_size(), 4);
        e.put(out, self.audio_format() as u32, 2);
        e.put(out, self.channels as u32, 2);
        e.put(out, self.sample_rate, 4);
        e.put(out, self.byte_rate(), 4);
        e.put(out, self.block_align() as u32, 2);
        e.put(out, self.bit_depth.bits() as u32, 2);

        out.extend_from_slice(b"data");
        e.put(out, self.data_size, 4);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn little_endian_layout() {
        let mut header = WavHeader::new(1, 44_100, BitDepth::Sixteen, Endianness::Little);
        header.set_data_size(44_100);

        #[rustfmt::skip]
        let expected: [u8; 44] = [
            b'R', b'I', b'F', b'F', 0x68, 0xAC, 0x00, 0x00,
            b'W', b'A', b'V', b'E',
            b'f', b'm', b't', b' ', 0x10, 0x00, 0x00, 0x00,
            0x01, 0x00, // PCM
            0x01, 0x00, // mono
            0x44, 0xAC, 0x00, 0x00, // 44100
            0x88, 0x58, 0x01, 0x00, // 88200
            0x02, 0x00,
            0x10, 0x00,
            b'd', b'a', b't', b'a', 0x44, 0xAC, 0x00, 0x00,
        ];
        assert_eq!(header.to_bytes(), expected);
    }

    #[test]
    fn big_endian_layout() {
        let mut header = WavHeader::new(2, 8_000, BitDepth::TwentyFour, Endianness::Big);
        header.set_data_size(6);

        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], b"RIFX");
        assert_eq!(&bytes[4..8], &[0, 0, 0, 42]);
        assert_eq!(&bytes[22..24], &[0, 2]);
        assert_eq!(&bytes[24..28], &[0, 0, 0x1F, 0x40]);
        // 2 * 8000 * 3
        assert_eq!(&bytes[28..32], &[0, 0, 0xBB, 0x80]);
        assert_eq!(&bytes[32..34], &[0, 6]);
        assert_eq!(&bytes[34..36], &[0, 24]);
        assert_eq!(&bytes[40..44], &[0, 0, 0, 6]);
        assert_eq!(header.sample_count(), 2);
    }

    #[test]
    fn largest_data_chunk_fills_chunk_size() {
        let mut header = WavHeader::new(1, 8_000, BitDepth::Eight, Endianness::Little);
        header.set_data_size(MAX_DATA_SIZE);
        assert_eq!(header.chunk_size(), u32::MAX);
    }

    #[test]
    fn bit_depths() {
        assert_eq!(u16::from(BitDepth::Eight), 8);
        assert_eq!(BitDepth::ThirtyTwo.bytes_per_sample(), 4);
        assert_eq!(BitDepth::try_from(16u16).ok(), Some(BitDepth::Sixteen));
        assert_eq!(BitDepth::try_from(0u16).map_err(|e| e.number), Err(0));
    }
}
