#![doc = r#"
SMPTE Offset - the time code at which a track is meant to start

The SMPTE Offset meta event (`FF 54 05 hr mn se fr ff`) contains:
- Frame rate (24, 25, 29.97, or 30 fps) in the top two bits of the hour byte
- Hours in the low six bits of the hour byte
- Minutes
- Seconds
- Frames
- Subframes (1/100 of a frame)

Values are taken as written; nothing is range checked.
"#]

use crate::file::SmpteFps;

/// A track's starting position in SMPTE time code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SmpteOffset {
    /// The frame rate for this offset.
    pub fps: SmpteFps,
    /// Hour component of the time code.
    pub hour: u8,
    /// Minute component of the time code.
    pub minute: u8,
    /// Second component of the time code.
    pub second: u8,
    /// Frame number within the current second.
    pub frame: u8,
    /// Subframe component, in 1/100 of a frame.
    pub subframe: u8,
}

impl SmpteOffset {
    /// Decode the five payload bytes of the meta event.
    ///
    /// The frame rate is encoded in bits 6-7 of the first byte:
    /// - `00`: 24 fps
    /// - `01`: 25 fps
    /// - `10`: 29.97 fps (drop frame)
    /// - `11`: 30 fps
    pub const fn from_bytes(data: [u8; 5]) -> Self {
        let fps = match data[0] >> 6 {
            0 => SmpteFps::TwentyFour,
            1 => SmpteFps::TwentyFive,
            2 => SmpteFps::TwentyNine,
            _ => SmpteFps::Thirty,
        };
        Self {
            fps,
            hour: data[0] & 0b0011_1111,
            minute: data[1],
            second: data[2],
            frame: data[3],
            subframe: data[4],
        }
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // these are the bytes after 00 FF 54 05
    let bytes = [0x81, 0x17, 0x2D, 0x0C, 0x22];
    let offset = SmpteOffset::from_bytes(bytes);

    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);
}

#[test]
fn smpte_offset_hour_uses_six_bits() {
    let offset = SmpteOffset::from_bytes([0xFF, 0, 0, 0, 0]);
    assert_eq!(offset.fps, SmpteFps::Thirty);
    assert_eq!(offset.hour, 63);
}
