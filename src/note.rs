#![doc = r#"
Conversions between semitone numbers and note names.

Semitones are numbered like MIDI note numbers: `C-1` is `0`, `A4` is `69`.
Names are a tone letter, an octave from -1 to 10, then up to two sharps or
flats: `A4`, `C4#`, `E2b`, `F-1##`. Octave 10 extends past the MIDI range,
so semitones `0..=143` have names.

Anything that is not a valid name is a rest, and a rest has no semitone.

# Example
```rust
# use midi2wav::prelude::*;
assert_eq!(semitone_to_name(61), "C4#");
assert_eq!(name_to_semitone("D4b"), Some(61));
assert_eq!(name_to_semitone("REST"), None);
assert_eq!(semitone_to_name(-5), REST);
```
"#]

use core::fmt;

/// The name of silence
pub const REST: &str = "REST";

/// The name of a semitone, or [`REST`] if it is outside `0..=143`.
pub fn semitone_to_name(semitone: i32) -> String {
    let octave = i8::try_from(semitone.div_euclid(12) - 1)
        .ok()
        .and_then(Octave::new);
    match octave {
        Some(octave) => {
            let key = Key::from_mod_12(semitone.rem_euclid(12) as u8);
            let accidental = if key.is_sharp() { "#" } else { "" };
            format!("{}{}{}", key.letter(), octave, accidental)
        }
        None => REST.to_string(),
    }
}

/// The semitone of a note name, or `None` if the name is a rest.
pub fn name_to_semitone(name: &str) -> Option<i32> {
    let mut chars = name.chars();
    let key = Key::from_letter(chars.next()?)?;
    let tail = chars.as_str();

    let body = tail.trim_end_matches(['b', '#']);
    let accidental = Accidental::parse(&tail[body.len()..])?;
    let octave = Octave::parse(body)?;

    Some(key.get_mod_12() as i32 + octave.index() * 12 + accidental.offset())
}

/// The equal tempered frequency of a semitone in Hz, with A4 at 440 Hz.
///
/// A rest has a frequency of 0.
pub fn frequency(semitone: Option<i32>) -> f64 {
    match semitone {
        Some(semitone) => 440. * 2f64.powf((semitone - 69) as f64 / 12.),
        None => 0.,
    }
}

/// A tone to render: a pitch name, how long it sounds, how loud, and where.
///
/// Notes without an offset are placed one after the other.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// A note name such as `A4`, or [`REST`]
    pub pitch: String,
    /// Duration in seconds
    pub duration: f64,
    /// Peak amplitude, normally within `[0, 1]`
    pub amplitude: f64,
    /// Start time in seconds
    pub offset: Option<f64>,
}

impl Note {
    /// A note that starts where the previous one ended
    pub fn new(pitch: impl Into<String>, duration: f64, amplitude: f64) -> Self {
        Self {
            pitch: pitch.into(),
            duration,
            amplitude,
            offset: None,
        }
    }

    /// Silence for `duration` seconds
    pub fn rest(duration: f64) -> Self {
        Self::new(REST, duration, 0.)
    }

    /// Place the note at an absolute start time
    pub fn at(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The semitone of the pitch, or `None` for a rest
    pub fn semitone(&self) -> Option<i32> {
        name_to_semitone(&self.pitch)
    }

    /// True if the pitch does not name a note
    pub fn is_rest(&self) -> bool {
        self.semitone().is_none()
    }
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[doc = r#"
One of the twelve pitch classes of an octave
"#]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}
impl Key {
    /// Returns an array beginning with [`Key::C`] to [`Key::B`]
    pub fn all() -> [Key; 12] {
        use Key::*;
        [C, CSharp, D, DSharp, E, F, FSharp, G, GSharp, A, ASharp, B]
    }

    /// Returns true if the key is one of the black keys.
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        use Key::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }

    /// The natural tone letter of the key. Sharps share the letter below them.
    pub const fn letter(&self) -> char {
        use Key::*;
        match self {
            C | CSharp => 'C',
            D | DSharp => 'D',
            E => 'E',
            F | FSharp => 'F',
            G | GSharp => 'G',
            A | ASharp => 'A',
            B => 'B',
        }
    }

    /// The natural key of an uppercase tone letter
    pub const fn from_letter(letter: char) -> Option<Self> {
        use Key::*;
        Some(match letter {
            'C' => C,
            'D' => D,
            'E' => E,
            'F' => F,
            'G' => G,
            'A' => A,
            'B' => B,
            _ => return None,
        })
    }

    /// Identify the key from a value in `0..12`.
    #[inline]
    pub const fn from_mod_12(value: u8) -> Self {
        use Key::*;
        match value % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }

    /// Semitones above C
    pub const fn get_mod_12(&self) -> u8 {
        use Key::*;
        match self {
            C => 0,
            CSharp => 1,
            D => 2,
            DSharp => 3,
            E => 4,
            F => 5,
            FSharp => 6,
            G => 7,
            GSharp => 8,
            A => 9,
            ASharp => 10,
            B => 11,
        }
    }
}

#[doc = r#"
An octave of a note name. Values range from -1 to 10.
"#]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Octave(i8);

impl Octave {
    /// The lowest octave
    pub const MIN: i8 = -1;
    /// The highest octave
    pub const MAX: i8 = 10;

    /// Returns `None` outside `[-1, 10]`.
    pub const fn new(octave: i8) -> Option<Self> {
        if octave < Self::MIN || octave > Self::MAX {
            None
        } else {
            Some(Self(octave))
        }
    }

    /// Parse an octave written exactly as [`Display`](fmt::Display) writes it,
    /// so `04`, `+4` and `-0` are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let octave = Self::new(s.parse().ok()?)?;
        (octave.to_string() == s).then_some(octave)
    }

    /// Zero-based octave index, where octave -1 is 0
    const fn index(&self) -> i32 {
        self.0 as i32 + 1
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "bb" => Self::DoubleFlat,
            "b" => Self::Flat,
            "" => Self::Natural,
            "#" => Self::Sharp,
            "##" => Self::DoubleSharp,
            _ => return None,
        })
    }

    const fn offset(&self) -> i32 {
        match self {
            Self::DoubleFlat => -2,
            Self::Flat => -1,
            Self::Natural => 0,
            Self::Sharp => 1,
            Self::DoubleSharp => 2,
        }
    }
}

#[test]
fn every_named_semitone_round_trips() {
    for semitone in 0..144 {
        let name = semitone_to_name(semitone);
        assert_eq!(name_to_semitone(&name), Some(semitone), "{name}");
    }
}

#[test]
fn known_names() {
    assert_eq!(semitone_to_name(0), "C-1");
    assert_eq!(semitone_to_name(60), "C4");
    assert_eq!(semitone_to_name(69), "A4");
    assert_eq!(semitone_to_name(70), "A4#");
    assert_eq!(semitone_to_name(143), "B10");

    assert_eq!(name_to_semitone("A4"), Some(69));
    assert_eq!(name_to_semitone("B3b"), Some(58));
    assert_eq!(name_to_semitone("C4bb"), Some(58));
    assert_eq!(name_to_semitone("G4##"), Some(69));
    assert_eq!(name_to_semitone("C-1b"), Some(-1));
}

#[test]
fn unrecognized_is_rest() {
    assert_eq!(semitone_to_name(-1), REST);
    assert_eq!(semitone_to_name(144), REST);
    assert_eq!(semitone_to_name(i32::MIN), REST);

    for name in ["REST", "", "H4", "c4", "A", "A11", "A-2", "A04", "A+4", "A-0", "A4b#", "A4###"] {
        assert_eq!(name_to_semitone(name), None, "{name}");
    }
}

#[test]
fn equal_temperament() {
    assert_eq!(frequency(Some(69)), 440.);
    assert_eq!(frequency(Some(81)), 880.);
    assert_eq!(frequency(Some(57)), 220.);
    assert!((frequency(Some(60)) - 261.625_565).abs() < 1e-5);
    assert_eq!(frequency(None), 0.);
}

#[test]
fn key_letters_follow_the_octave() {
    let letters: String = Key::all().iter().map(Key::letter).collect();
    assert_eq!(letters, "CCDDEFFGGAAB");
    for key in Key::all() {
        assert_eq!(Key::from_mod_12(key.get_mod_12()), key);
    }
}
