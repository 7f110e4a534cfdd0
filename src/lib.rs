#![warn(missing_docs)]
#![doc = r#"
Render Standard MIDI Files into PCM WAV buffers

`midi2wav` decodes a MIDI file, maps its ticks to seconds through the tempo
map, pairs every note-on with its note-off, scales the loudness so the
busiest instant does not clip, and renders each note as a sine tone into a
mono WAV buffer.

Reading and writing files is left to the caller: [`convert`] takes the bytes
of a `.mid` file and returns a [`Wav`](crate::wav::Wav), whose
[`to_bytes`](crate::wav::Wav::to_bytes) is the content of a `.wav` file.

# Example
```rust
use midi2wav::prelude::*;

#[rustfmt::skip]
let midi = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x00, 0x60,
    b'M', b'T', b'r', b'k', 0, 0, 0, 11,
    0x00, 0x90, 60, 100,
    0x60, 60, 0,
    0x00, 0xFF, 0x2F, 0x00,
];

let config = ConvertConfig::default().with_sample_rate(22_050).with_bits_per_sample(8);
match convert(&midi, &config).unwrap() {
    Conversion::Rendered(wav) => {
        let bytes = wav.to_bytes();
        assert_eq!(&bytes[..4], b"RIFF");
        // one beat at 120 BPM
        assert_eq!(bytes.len(), 44 + 11_025);
    }
    Conversion::UnsupportedTiming(smpte) => panic!("{smpte:?}"),
}
```

# Logging
Diagnostics go through [`tracing`](https://docs.rs/tracing). Install a
subscriber to see them; with [`ConvertConfig::verbose`](crate::config::ConvertConfig::verbose)
set, progress is reported at the info level.
"#]

pub mod config;
pub mod convert;
pub mod events;
pub mod file;
pub mod normalize;
pub mod note;
pub mod reader;
pub mod scheduler;
pub mod timeline;
pub mod track;
pub mod wav;

mod error;
pub use error::*;

pub use convert::{Conversion, convert};

#[allow(missing_docs)]
pub mod prelude {
    pub use crate::{
        ConvertError, HeaderError, ParseError,
        config::*,
        convert::*,
        events::*,
        file::*,
        normalize::*,
        note::*,
        reader::*,
        scheduler::*,
        timeline::*,
        track::*,
        wav::*,
    };
}
