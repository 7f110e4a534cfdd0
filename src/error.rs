use thiserror::Error;

use crate::reader::ReaderError;

/// Errors raised while interpreting structurally valid bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The file header chunk is malformed
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
}

/// The `MThd` chunk did not look like a MIDI header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The first chunk was not tagged `MThd`
    #[error("Expected chunk id MThd, found {0:?}")]
    InvalidId([u8; 4]),
    /// `MThd` must always be six bytes long
    #[error("Expected header length 6, found {0}")]
    InvalidLength(u32),
}

/// A fatal failure of [`convert`](crate::convert()).
///
/// Unsupported timing is not an error, see
/// [`Conversion::UnsupportedTiming`](crate::Conversion::UnsupportedTiming).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The MIDI bytes could not be read
    #[error(transparent)]
    Read(#[from] ReaderError),
    /// Only 8, 16, 24 and 32 bit PCM can be rendered
    #[error("Unsupported bits per sample: {0}")]
    UnsupportedBitDepth(u16),
    /// The sample rate must be non-zero
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),
    /// The rendered data chunk would be larger than a RIFF size field can describe
    #[error("Rendered audio needs {0} bytes, more than a WAV file can hold")]
    OutputTooLarge(u64),
}
