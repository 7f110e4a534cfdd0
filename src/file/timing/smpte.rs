#![doc = r#"
SMPTE (Society of Motion Picture and Television Engineers) time code support

MIDI supports two timing methods:

1. **Musical Time** - Based on beats and tempo (ticks per quarter note)
2. **Absolute Time** - Based on SMPTE time code (frames per second)

Only musical time can be rendered. Absolute time is still decoded so that
callers can report what the file asked for.

# SMPTE Frame Rates in MIDI

- 24 fps: Film standard
- 25 fps: PAL/SECAM video standard
- 29.97 fps: NTSC color video - "drop frame"
- 30 fps: NTSC black & white video, some digital formats
"#]

/// The possible FPS (Frames Per Second) for MIDI tracks and files
///
/// # Drop-Frame Timecode
///
/// The "TwentyNine" variant represents 29.97 fps, also known as "drop-frame" timecode.
/// This rate (30000/1001 fps) was introduced for NTSC color television to maintain
/// backward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second - Standard film rate
    TwentyFour,
    /// 25 frames per second - PAL/SECAM television standard
    TwentyFive,
    /// 29.97 frames per second (30000/1001) - NTSC color television drop-frame rate
    TwentyNine,
    /// 30 frames per second - NTSC black & white, some digital formats
    Thirty,
}

/// The frames-per-second form of the header's division field.
///
/// The high byte holds the negated frame rate (-24, -25, -29 or -30) and the
/// low byte the ticks per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmpteHeader {
    pub(crate) bytes: [u8; 2],
}

impl SmpteHeader {
    /// Returns the frames per second, if the high byte holds a known rate
    pub const fn fps(&self) -> Option<SmpteFps> {
        match self.bytes[0] as i8 {
            -24 => Some(SmpteFps::TwentyFour),
            -25 => Some(SmpteFps::TwentyFive),
            -29 => Some(SmpteFps::TwentyNine),
            -30 => Some(SmpteFps::Thirty),
            _ => None,
        }
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.bytes[1]
    }

    /// Returns the raw division field
    pub const fn division(&self) -> u16 {
        u16::from_be_bytes(self.bytes)
    }
}

#[test]
fn decode_smpte_header() {
    let header = SmpteHeader { bytes: [0xE7, 40] };
    assert_eq!(header.fps(), Some(SmpteFps::TwentyFive));
    assert_eq!(header.ticks_per_frame(), 40);

    let odd = SmpteHeader { bytes: [0xF0, 1] };
    assert_eq!(odd.fps(), None);
}
