use num_enum::FromPrimitive;

use super::SmpteOffset;

/// The type byte following `0xFF` in a meta event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum MetaType {
    /// `FF 00 02`
    SequenceNumber = 0x00,
    /// `FF 01 len`
    Text = 0x01,
    /// `FF 02 len`
    CopyrightNotice = 0x02,
    /// `FF 03 len`
    TrackName = 0x03,
    /// `FF 04 len`
    InstrumentName = 0x04,
    /// `FF 05 len`
    Lyrics = 0x05,
    /// `FF 06 len`
    Marker = 0x06,
    /// `FF 07 len`
    CuePoint = 0x07,
    /// `FF 20 01`
    MidiChannelPrefix = 0x20,
    /// `FF 2F 00`
    EndOfTrack = 0x2F,
    /// `FF 51 03`
    SetTempo = 0x51,
    /// `FF 54 05`
    SmpteOffset = 0x54,
    /// `FF 58 04`
    TimeSignature = 0x58,
    /// `FF 59 02`
    KeySignature = 0x59,
    /// `FF 7F len`
    SequencerSpecific = 0x7F,
    /// Anything else
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl MetaType {
    /// The payload length this type must have to be parsed, if it is fixed.
    pub const fn expected_length(&self) -> Option<u32> {
        match self {
            Self::SequenceNumber => Some(2),
            Self::MidiChannelPrefix => Some(1),
            Self::EndOfTrack => Some(0),
            Self::SetTempo => Some(3),
            Self::SmpteOffset => Some(5),
            Self::TimeSignature => Some(4),
            Self::KeySignature => Some(2),
            _ => None,
        }
    }
}

#[doc = r#"
A meta event.

Fixed-size payloads (sequence number, channel prefix, tempo, SMPTE offset,
time and key signatures) are only parsed when the declared length matches
the expected one; otherwise the payload is skipped and the value is `None`.
"#]
#[derive(Debug, Clone, PartialEq)]
pub enum MetaEvent {
    /// Sequence number of a format 2 pattern
    SequenceNumber(Option<u16>),
    /// Arbitrary text
    Text(String),
    /// Copyright notice
    CopyrightNotice(String),
    /// Name of the sequence or track
    TrackName(String),
    /// Name of the instrument
    InstrumentName(String),
    /// A lyric syllable
    Lyrics(String),
    /// A rehearsal letter or section name
    Marker(String),
    /// A description of something happening on stage
    CuePoint(String),
    /// Channel the following meta/sysex events refer to
    MidiChannelPrefix(Option<u8>),
    /// Marks the end of the track
    EndOfTrack,
    /// Microseconds per quarter note
    SetTempo(Option<u32>),
    /// Track start time in SMPTE time code
    SmpteOffset(Option<SmpteOffset>),
    /// Time signature
    TimeSignature(Option<TimeSignature>),
    /// Key signature
    KeySignature(Option<KeySignature>),
    /// Sequencer-specific payload
    SequencerSpecific(String),
    /// A meta type not listed above
    Unknown {
        /// The type byte
        type_byte: u8,
        /// The payload
        value: String,
    },
}

impl MetaEvent {
    /// The camelCase name of the meta type
    pub const fn sub_type(&self) -> &'static str {
        match self {
            Self::SequenceNumber(_) => "sequenceNumber",
            Self::Text(_) => "text",
            Self::CopyrightNotice(_) => "copyrightNotice",
            Self::TrackName(_) => "trackName",
            Self::InstrumentName(_) => "instrumentName",
            Self::Lyrics(_) => "lyrics",
            Self::Marker(_) => "marker",
            Self::CuePoint(_) => "cuePoint",
            Self::MidiChannelPrefix(_) => "midiChannelPrefix",
            Self::EndOfTrack => "endOfTrack",
            Self::SetTempo(_) => "setTempo",
            Self::SmpteOffset(_) => "smpteOffset",
            Self::TimeSignature(_) => "timeSignature",
            Self::KeySignature(_) => "keySignature",
            Self::SequencerSpecific(_) => "sequencerSpecific",
            Self::Unknown { .. } => "unknown",
        }
    }

    /// The string payload, for the text-like meta types
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s)
            | Self::CopyrightNotice(s)
            | Self::TrackName(s)
            | Self::InstrumentName(s)
            | Self::Lyrics(s)
            | Self::Marker(s)
            | Self::CuePoint(s)
            | Self::SequencerSpecific(s)
            | Self::Unknown { value: s, .. } => Some(s),
            _ => None,
        }
    }

    /// Microseconds per quarter note, for a well-formed `setTempo`
    pub const fn tempo(&self) -> Option<u32> {
        match self {
            Self::SetTempo(tempo) => *tempo,
            _ => None,
        }
    }
}

/// `FF 58 04 nn dd cc bb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// Note value of a beat. Stored on the wire as a power of two.
    pub denominator: u32,
    /// MIDI clocks per metronome click
    pub metronome: u8,
    /// Notated 32nd notes per MIDI quarter note
    pub thirtyseconds: u8,
}

impl TimeSignature {
    pub(crate) fn from_bytes([numerator, power, metronome, thirtyseconds]: [u8; 4]) -> Self {
        Self {
            numerator,
            denominator: 1u32.checked_shl(power as u32).unwrap_or(0),
            metronome,
            thirtyseconds,
        }
    }
}

/// `FF 59 02 sf mi`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Sharps (positive) or flats (negative)
    pub key: i8,
    /// 0 for major, 1 for minor
    pub scale: u8,
}

#[test]
fn meta_type_from_byte() {
    assert_eq!(MetaType::from(0x51), MetaType::SetTempo);
    assert_eq!(MetaType::from(0x03), MetaType::TrackName);
    assert_eq!(MetaType::from(0x21), MetaType::Unknown(0x21));
    assert_eq!(MetaType::SmpteOffset.expected_length(), Some(5));
    assert_eq!(MetaType::Lyrics.expected_length(), None);
}

#[test]
fn time_signature_denominator_is_a_power_of_two() {
    let sig = TimeSignature::from_bytes([6, 3, 24, 8]);
    assert_eq!(sig.numerator, 6);
    assert_eq!(sig.denominator, 8);
}
