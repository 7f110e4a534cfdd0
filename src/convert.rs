#![doc = r#"
The decode-to-render pipeline

[`convert`] reads the header and every track chunk, drops the tracks the
skip policy rejects, builds the tempo timeline from the first remaining
track, pairs notes across all tracks, normalizes loudness and renders a mono
[`Wav`]. A file timed in SMPTE frames stops right after its header.

# Example
```rust
# use midi2wav::prelude::*;
#[rustfmt::skip]
let midi = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 13,
    0x00, 0x90, 69, 64,
    0x83, 0x60, 0x80, 69, 0,
    0x00, 0xFF, 0x2F, 0x00,
];
let config = ConvertConfig::default().with_sample_rate(8_000);
let wav = convert(&midi, &config).unwrap().into_wav().unwrap();

// 480 ticks at 120 BPM is half a second
assert_eq!(wav.samples().len(), 4_000);
```
"#]

use crate::{
    ConvertError,
    config::ConvertConfig,
    file::{MidiFileHeader, SmpteHeader, Timing},
    normalize::Normalization,
    reader::Reader,
    scheduler::Scheduler,
    timeline::Timeline,
    track::{Track, TrackFilter},
    wav::{BitDepth, Endianness, MAX_DATA_SIZE, Wav},
};

/// Length of a chunk's id and length fields
const CHUNK_PREAMBLE: usize = 8;

/// What a conversion produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    /// The rendered mono audio
    Rendered(Wav),
    /// The file is valid but times its events in SMPTE frames, which cannot
    /// be rendered. Nothing was rendered.
    UnsupportedTiming(SmpteHeader),
}

impl Conversion {
    /// The rendered audio, if any
    pub fn into_wav(self) -> Option<Wav> {
        match self {
            Self::Rendered(wav) => Some(wav),
            Self::UnsupportedTiming(_) => None,
        }
    }

    /// True if the file used SMPTE timing
    pub const fn is_unsupported_timing(&self) -> bool {
        matches!(self, Self::UnsupportedTiming(_))
    }
}

/// Render a Standard MIDI File.
///
/// # Errors
/// - [`ConvertError::UnsupportedBitDepth`] unless `bits_per_sample` is 8, 16, 24 or 32
/// - [`ConvertError::InvalidSampleRate`] if `sample_rate` is zero
/// - [`ConvertError::Read`] if the header is malformed or a chunk ends early
/// - [`ConvertError::OutputTooLarge`] if the audio would not fit a WAV file
///
/// A file timed in SMPTE frames returns [`Conversion::UnsupportedTiming`]
/// as soon as its header is read; its tracks are not decoded.
pub fn convert(bytes: &[u8], config: &ConvertConfig) -> Result<Conversion, ConvertError> {
    let bit_depth = BitDepth::try_from(config.bits_per_sample)
        .map_err(|e| ConvertError::UnsupportedBitDepth(e.number))?;
    if config.sample_rate == 0 {
        return Err(ConvertError::InvalidSampleRate(config.sample_rate));
    }
    let verbose = config.verbose;

    if verbose {
        tracing::info!("parsing MIDI header...");
    }
    let mut reader = Reader::from_byte_slice(bytes);
    let header = MidiFileHeader::read(&mut reader)?;

    let ticks_per_beat = match header.timing() {
        Timing::TicksPerQuarterNote(tpqn) => tpqn.ticks_per_quarter_note(),
        Timing::Smpte(smpte) => {
            tracing::warn!(
                fps = ?smpte.fps(),
                ticks_per_frame = smpte.ticks_per_frame(),
                "Detected unsupported MIDI timing mode"
            );
            return Ok(Conversion::UnsupportedTiming(*smpte));
        }
    };
    let filter = config.skip.as_ref().map(|skip| skip as &dyn TrackFilter);

    let mut decoded = 0usize;
    let mut tracks = Vec::new();
    for number in 1..=header.track_count() {
        if verbose {
            tracing::info!("parsing track {number}...");
        }
        let start = reader.buffer_position();
        let chunk = reader.read_chunk()?;

        if !chunk.is_track() {
            tracing::debug!(id = ?chunk.id(), "ignoring chunk {number}");
            continue;
        }
        decoded += 1;

        let track = Track::read(chunk.data(), filter)
            .map_err(|e| e.shifted(start + CHUNK_PREAMBLE))?;
        tracing::debug!(
            events = track.events().len(),
            kept = track.is_kept(),
            "decoded track {number}"
        );
        if track.is_kept() {
            tracks.push(track);
        } else if verbose {
            tracing::info!("skipping track {number}...");
        }
    }

    if tracks.is_empty() && decoded > 0 {
        tracing::warn!("the skip policy dropped all {decoded} tracks");
    }

    if verbose {
        tracing::info!("initializing timer...");
    }
    let timeline = match tracks.first() {
        Some(track) => Timeline::from_track(ticks_per_beat, track.events()),
        None => Timeline::new(ticks_per_beat),
    };

    let mut scheduler = Scheduler::new(&timeline).verbose(verbose);
    for (index, track) in tracks.iter().enumerate() {
        if verbose {
            tracing::info!("generating progression from track {}...", index + 1);
        }
        scheduler.schedule_track(track.events());
    }
    let (notes, mut accounting) = scheduler.into_parts();

    if verbose {
        tracing::info!("normalizing volume...");
    }
    let normalization = Normalization::compute(&mut accounting);

    if verbose {
        let last = accounting.last().map_or(0, |event| event.tick);
        tracing::info!("total notes: {}", notes.len());
        tracing::info!("total time: {} seconds", timeline.seconds_at(last));
        tracing::info!("setting volume to {}", normalization.factor);
        tracing::info!(
            "  maximum chord of {} at {} seconds",
            normalization.max_chord,
            timeline.seconds_at(normalization.max_chord_tick)
        );
        tracing::info!(
            "  maximum velocity of {} at {} seconds",
            normalization.max_velocity - 1,
            timeline.seconds_at(normalization.max_velocity_tick)
        );
        tracing::info!("generating WAV buffer...");
    }

    let mut wav = Wav::new(1, config.sample_rate, bit_depth, Endianness::Little);
    let samples = wav.progression_extent(&notes, config.duration);
    let data_size = (samples as u64).saturating_mul(bit_depth.bytes_per_sample() as u64);
    if data_size > MAX_DATA_SIZE as u64 {
        return Err(ConvertError::OutputTooLarge(data_size));
    }
    wav.write_progression(
        &notes,
        normalization.factor,
        &[0],
        true,
        true,
        config.duration,
    );

    Ok(Conversion::Rendered(wav))
}
