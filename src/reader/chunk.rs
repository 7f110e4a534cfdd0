use core::fmt;

/// A self-contained region of a MIDI file: a 4 byte tag, a length and a body.
///
/// The file header is tagged `MThd` and each track is tagged `MTrk`.
/// Anything else is an unknown chunk and may be ignored.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'slc> {
    id: [u8; 4],
    length: u32,
    data: &'slc [u8],
}

impl<'slc> Chunk<'slc> {
    /// The tag of a header chunk
    pub const HEADER_ID: [u8; 4] = *b"MThd";
    /// The tag of a track chunk
    pub const TRACK_ID: [u8; 4] = *b"MTrk";

    pub(crate) const fn new(id: [u8; 4], length: u32, data: &'slc [u8]) -> Self {
        Self { id, length, data }
    }

    /// The raw 4 byte tag
    pub const fn id(&self) -> [u8; 4] {
        self.id
    }

    /// The declared body length
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// The body of the chunk
    pub const fn data(&self) -> &'slc [u8] {
        self.data
    }

    /// True for `MThd`
    pub fn is_header(&self) -> bool {
        self.id == Self::HEADER_ID
    }

    /// True for `MTrk`
    pub fn is_track(&self) -> bool {
        self.id == Self::TRACK_ID
    }
}

impl fmt::Debug for Chunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("id", &super::latin1(&self.id))
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}
