use num_enum::FromPrimitive;

use super::Timing;
use crate::{
    HeaderError,
    reader::{ReadResult, Reader, ReaderError},
};

/// The file format declared in the header.
///
/// The renderer treats every format the same way: all tracks play at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u16)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
    /// Anything else
    #[num_enum(catch_all)]
    Unknown(u16),
}

#[doc = r#"
The contents of the `MThd` chunk: format, number of track chunks and timing
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiFileHeader {
    format: FormatType,
    track_count: u16,
    timing: Timing,
}

impl MidiFileHeader {
    /// Create a new header
    pub fn new(format: FormatType, track_count: u16, timing: Timing) -> Self {
        Self {
            format,
            track_count,
            timing,
        }
    }

    /// Read the header chunk at the reader's position.
    ///
    /// # Errors
    /// - [`HeaderError::InvalidId`] if the chunk is not tagged `MThd`
    /// - [`HeaderError::InvalidLength`] if the chunk is not 6 bytes long
    /// - out of bounds if the buffer ends early
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let chunk = reader.read_chunk()?;

        if !chunk.is_header() {
            return Err(ReaderError::parse_error(
                start,
                HeaderError::InvalidId(chunk.id()).into(),
            ));
        }
        if chunk.length() != 6 {
            return Err(ReaderError::parse_error(
                start,
                HeaderError::InvalidLength(chunk.length()).into(),
            ));
        }

        let mut body = Reader::from_byte_slice(chunk.data());
        let format = FormatType::from(body.read_u16()?);
        let track_count = body.read_u16()?;
        let timing = Timing::from_division(body.read_u16()?);

        Ok(Self::new(format, track_count, timing))
    }

    /// Get the declared format
    pub fn format(&self) -> FormatType {
        self.format
    }
    /// The number of chunks following the header
    pub fn track_count(&self) -> u16 {
        self.track_count
    }
    /// Get the timing props
    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}
