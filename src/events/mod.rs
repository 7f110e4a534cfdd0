#![doc = r#"
Decoded MIDI track events

Every event read from a track carries a `delta` (ticks since the previous
event of the same track) and one of five kinds:

```text
                         |-------|
                         | Event |
                         |-------|
      /         /            |             \            \
|------|   |-------|   |--------------|   |---------|   |---------|
| Meta |   | SysEx |   | DividedSysEx |   | Unknown |   | Channel |
|------|   |-------|   |--------------|   |---------|   |---------|
```

Events are produced by [`Reader::read_event`](crate::reader::Reader::read_event).
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

mod smpte_offset;
pub use smpte_offset::*;

/// One event of a track, with its delta time.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    delta: u32,
    kind: EventKind,
}

impl Event {
    /// Create a new event
    pub const fn new(delta: u32, kind: EventKind) -> Self {
        Self { delta, kind }
    }

    /// Ticks since the previous event in the same track
    pub const fn delta(&self) -> u32 {
        self.delta
    }

    /// What happened
    pub const fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// The camelCase name of the event's sub type, e.g. `trackName` or `noteOn`.
    pub fn sub_type(&self) -> &'static str {
        self.kind.sub_type()
    }

    /// The string payload of the event, if it has one.
    ///
    /// This is what skip rules are matched against.
    pub fn text(&self) -> Option<&str> {
        self.kind.text()
    }
}

/// The five families of track events
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// `0xFF`: non-transmitted information about the track
    Meta(MetaEvent),
    /// `0xF0`: a system exclusive message
    SysEx(String),
    /// `0xF7`: a continuation of a system exclusive message
    DividedSysEx(String),
    /// Any other `0xFx` status byte
    Unknown(String),
    /// A channel voice message
    Channel(ChannelEvent),
}

impl EventKind {
    /// See [`Event::sub_type`]
    pub fn sub_type(&self) -> &'static str {
        match self {
            Self::Meta(meta) => meta.sub_type(),
            Self::SysEx(_) => "sysEx",
            Self::DividedSysEx(_) => "dividedSysEx",
            Self::Unknown(_) => "unknown",
            Self::Channel(channel) => channel.kind().sub_type(),
        }
    }

    /// See [`Event::text`]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Meta(meta) => meta.text(),
            Self::SysEx(s) | Self::DividedSysEx(s) | Self::Unknown(s) => Some(s),
            Self::Channel(_) => None,
        }
    }

    /// Returns the channel event, if this is one
    pub const fn channel(&self) -> Option<&ChannelEvent> {
        match self {
            Self::Channel(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the meta event, if this is one
    pub const fn meta(&self) -> Option<&MetaEvent> {
        match self {
            Self::Meta(m) => Some(m),
            _ => None,
        }
    }
}
