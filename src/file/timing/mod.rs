mod smpte;
pub use smpte::*;

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format, selected by the top bit of the division field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// The midi file's delta times are defined using an SMPTE and MIDI Time Code
    Smpte(SmpteHeader),
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(TicksPerQuarterNote {
            inner: (tpqn & 0x7FFF).to_be_bytes(),
        })
    }

    /// Interpret the 16-bit division field of the header chunk
    pub const fn from_division(division: u16) -> Self {
        let bytes = division.to_be_bytes();
        match bytes[0] >> 7 {
            0 => Timing::TicksPerQuarterNote(TicksPerQuarterNote { inner: bytes }),
            _ => Timing::Smpte(SmpteHeader { bytes }),
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            _ => None,
        }
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct TicksPerQuarterNote {
    pub(crate) inner: [u8; 2],
}
impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        let v = u16::from_be_bytes(self.inner);
        v & 0x7FFF
    }
}

#[test]
fn division_top_bit_selects_timing() {
    assert_eq!(Timing::from_division(480).ticks_per_quarter_note(), Some(480));
    assert_eq!(
        Timing::from_division(480),
        Timing::new_ticks_per_quarter_note(480)
    );
    let Timing::Smpte(smpte) = Timing::from_division(0xE228) else {
        panic!("expected smpte timing");
    };
    assert_eq!(smpte.fps(), Some(SmpteFps::Thirty));
    assert_eq!(smpte.ticks_per_frame(), 40);
    assert_eq!(smpte.division(), 0xE228);
}
