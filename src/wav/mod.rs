#![doc = r#"
A growable PCM sample buffer with a canonical WAV header

Samples are kept as normalized `f64`, interleaved by channel, and only
quantized by [`Wav::to_bytes`]. A write cursor, counted in samples, decides
where the next note goes; [`Wav::seek`] and [`Wav::tell`] move it in seconds.

# Example
```rust
# use midi2wav::prelude::*;
let mut wav = Wav::new(1, 8_000, BitDepth::Sixteen, Endianness::Little);
wav.write_note(&Note::new("A4", 0.5, 1.), &[], true, false);

assert_eq!(wav.samples().len(), 4_000);
assert_eq!(wav.tell(), 0.5);
assert_eq!(wav.header().data_size(), 8_000);
assert_eq!(wav.to_bytes().len(), 44 + 8_000);
```
"#]

mod header;
pub use header::*;
pub mod pcm;

use std::f64::consts::TAU;

use crate::note::{Note, frequency};
use pcm::encode;

const FADE_SECONDS: f64 = 0.001;

/// A WAV file being rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Wav {
    header: WavHeader,
    data: Vec<f64>,
    pointer: usize,
}

impl Wav {
    /// An empty buffer. The byte order is fixed for the life of the buffer.
    pub const fn new(
        channels: u16,
        sample_rate: u32,
        bit_depth: BitDepth,
        endianness: Endianness,
    ) -> Self {
        Self {
            header: WavHeader::new(channels, sample_rate, bit_depth, endianness),
            data: Vec::new(),
            pointer: 0,
        }
    }

    /// Start from existing interleaved samples. The cursor stays at the start.
    pub fn with_data(mut self, data: Vec<f64>) -> Self {
        self.data = data;
        self.sync_data_size(self.data.len());
        self
    }

    /// The header as it would be written now
    pub const fn header(&self) -> &WavHeader {
        &self.header
    }

    /// The normalized, interleaved samples
    pub fn samples(&self) -> &[f64] {
        &self.data
    }

    /// The write cursor, in samples
    pub const fn pointer(&self) -> usize {
        self.pointer
    }

    fn channels(&self) -> usize {
        self.header.channels().max(1) as usize
    }

    fn rate(&self) -> f64 {
        self.header.sample_rate() as f64
    }

    fn sync_data_size(&mut self, samples: usize) {
        let bytes = samples.saturating_mul(self.header.bit_depth().bytes_per_sample() as usize);
        self.header.set_data_size(u32::try_from(bytes).unwrap_or(u32::MAX));
    }

    /// The time of the write cursor in seconds
    pub fn tell(&self) -> f64 {
        self.pointer as f64 / self.channels() as f64 / self.rate()
    }

    /// Move the write cursor to `seconds`, rounded to the nearest frame.
    ///
    /// With `fill`, the buffer is padded with silence up to the cursor.
    /// Without it, the cursor snaps to the end of the buffer instead.
    /// A time that is not finite counts as the start.
    pub fn seek(&mut self, seconds: f64, fill: bool) {
        let frame = frames(self.rate() * seconds);
        self.pointer = self.channels().saturating_mul(frame);

        if fill {
            if self.data.len() < self.pointer {
                self.data.resize(self.pointer, 0.);
            }
        } else {
            self.pointer = self.data.len();
        }
    }

    /// Render one note at the cursor.
    ///
    /// `channels` lists the channels that receive the tone; empty means all.
    /// With `blend` the tone is added to what is already there, otherwise
    /// it replaces it. With `reset` the cursor stays where it was, otherwise
    /// it moves to the end of the note.
    pub fn write_note(&mut self, note: &Note, channels: &[u16], blend: bool, reset: bool) {
        self.render(
            note.semitone(),
            note.duration,
            note.amplitude,
            channels,
            blend,
            reset,
        );
    }

    /// Render notes one after the other, scaling each amplitude by `amplitude`.
    ///
    /// A note with an offset is placed there rather than after the previous
    /// one. A `relative_duration` other than 1 makes each note sound for that
    /// share of its duration; below 1 the remainder is a rest. With `reset`
    /// the cursor returns to where it started.
    pub fn write_progression(
        &mut self,
        notes: &[Note],
        amplitude: f64,
        channels: &[u16],
        blend: bool,
        reset: bool,
        relative_duration: f64,
    ) {
        let start = self.pointer;

        for note in notes {
            if let Some(offset) = note.offset {
                self.seek(offset, true);
            }

            let semitone = note.semitone();
            let amplitude = note.amplitude * amplitude;

            if semitone.is_none() || relative_duration == 1. {
                self.render(semitone, note.duration, amplitude, channels, blend, false);
            } else {
                let sounding = note.duration * relative_duration;
                self.render(semitone, sounding, amplitude, channels, blend, false);
                self.render(None, note.duration - sounding, 0., channels, blend, false);
            }
        }

        if reset {
            self.pointer = start;
        }
    }

    /// Length in samples the buffer would have after
    /// [`write_progression`](Wav::write_progression) with the same notes.
    ///
    /// Nothing is written, so the size of a rendering can be checked
    /// before any memory is committed to it.
    pub fn progression_extent(&self, notes: &[Note], relative_duration: f64) -> usize {
        let count = self.channels();
        let rate = self.rate();
        let mut pointer = self.pointer;
        let mut extent = self.data.len();

        for note in notes {
            if let Some(offset) = note.offset {
                pointer = count.saturating_mul(frames(rate * offset));
                extent = extent.max(pointer);
            }
            let blocks = if note.is_rest() || relative_duration == 1. {
                frames(rate * note.duration)
            } else {
                let sounding = note.duration * relative_duration;
                frames(rate * sounding).saturating_add(frames(rate * (note.duration - sounding)))
            };
            pointer = pointer.saturating_add(count.saturating_mul(blocks));
            extent = extent.max(pointer);
        }
        extent
    }

    fn render(
        &mut self,
        semitone: Option<i32>,
        duration: f64,
        amplitude: f64,
        channels: &[u16],
        blend: bool,
        reset: bool,
    ) {
        let count = self.channels();
        let rate = self.rate();
        let angular = frequency(semitone) * TAU / rate;

        let blocks_out = frames(rate * duration);
        let non_zero = blocks_out as f64 - rate * FADE_SECONDS;
        let fade = rate * FADE_SECONDS + 1.;

        let start = self.pointer;
        let stop = self.data.len();
        let blocks_in = (stop.saturating_sub(start) / count).min(blocks_out);
        let end = start + blocks_out * count;

        let targeted: Vec<bool> = (0..count)
            .map(|c| channels.is_empty() || channels.iter().any(|&t| t as usize == c))
            .collect();

        if self.data.len() < end {
            self.data.resize(end, 0.);
        }

        for i in 0..blocks_out {
            let value = if angular > 0. {
                let t = i as f64;
                let envelope = if t < fade {
                    t
                } else if t > non_zero {
                    blocks_out as f64 - t + 1.
                } else {
                    fade
                };
                amplitude * (angular * t).sin() * envelope / fade
            } else {
                0.
            };

            let frame = start + i * count;
            for (c, &on) in targeted.iter().enumerate() {
                let slot = &mut self.data[frame + c];
                if i < blocks_in {
                    if on {
                        *slot = if blend { *slot + value } else { value };
                    }
                } else {
                    *slot = if on { value } else { 0. };
                }
            }
        }

        self.sync_data_size(end.max(stop));

        if !reset {
            self.pointer = end;
        }
    }

    /// The complete file: header followed by the quantized samples.
    ///
    /// As many samples are written as the header's data size announces.
    pub fn to_bytes(&self) -> Vec<u8> {
        let count = self.header.sample_count();
        let mut out = Vec::with_capacity(HEADER_LEN + self.header.data_size() as usize);
        self.header.write_into(&mut out);

        let available = count.min(self.data.len());
        encode(
            &self.data[..available],
            self.header.bit_depth(),
            self.header.endianness(),
            &mut out,
        );
        // samples announced but never written are silence
        let missing = vec![0.; count - available];
        encode(
            &missing,
            self.header.bit_depth(),
            self.header.endianness(),
            &mut out,
        );
        out
    }
}

/// Whole frames in `samples`, with anything negative or not finite as zero
fn frames(samples: f64) -> usize {
    if samples.is_finite() {
        samples.round().max(0.) as usize
    } else {
        0
    }
}
