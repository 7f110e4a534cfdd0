/// A channel message and the channel (0-15) it is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelEvent {
    channel: u8,
    kind: ChannelEventKind,
}

impl ChannelEvent {
    /// Create a channel event. Only the low nibble of `channel` is kept.
    pub const fn new(channel: u8, kind: ChannelEventKind) -> Self {
        Self {
            channel: channel & 0x0F,
            kind,
        }
    }

    /// The zero-based channel
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// The message
    pub const fn kind(&self) -> &ChannelEventKind {
        &self.kind
    }
}

/// The message carried by a [`ChannelEvent`], keyed on the high nibble of the status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEventKind {
    /// `0x8n`
    NoteOff {
        /// The MIDI note number
        note: u8,
        /// Release velocity
        velocity: u8,
    },
    /// `0x9n` with a non-zero velocity.
    ///
    /// A `0x9n` with velocity 0 decodes as [`ChannelEventKind::NoteOff`].
    NoteOn {
        /// The MIDI note number
        note: u8,
        /// Attack velocity
        velocity: u8,
    },
    /// `0xAn`
    NoteAftertouch {
        /// The MIDI note number
        note: u8,
        /// Pressure
        amount: u8,
    },
    /// `0xBn`
    Controller {
        /// Controller number
        controller: u8,
        /// Controller value
        value: u8,
    },
    /// `0xCn`
    ProgramChange(u8),
    /// `0xDn`
    ChannelAftertouch(u8),
    /// `0xEn`: first data byte plus the second shifted left by 7
    PitchBend(u16),
    /// Any other nibble: first data byte shifted left by 8 plus the second
    Unknown(u16),
}

impl ChannelEventKind {
    /// The camelCase name of the message
    pub const fn sub_type(&self) -> &'static str {
        match self {
            Self::NoteOff { .. } => "noteOff",
            Self::NoteOn { .. } => "noteOn",
            Self::NoteAftertouch { .. } => "noteAftertouch",
            Self::Controller { .. } => "controller",
            Self::ProgramChange(_) => "programChange",
            Self::ChannelAftertouch(_) => "channelAftertouch",
            Self::PitchBend(_) => "pitchBend",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Decode the message for the status nibble `kind` from its two data bytes.
    ///
    /// `second` is only consulted by messages that carry two data bytes; the
    /// decoder reads it lazily through the closure.
    pub(crate) fn decode<E>(
        kind: u8,
        param: u8,
        second: impl FnOnce() -> Result<u8, E>,
    ) -> Result<Self, E> {
        Ok(match kind {
            0x8 => Self::NoteOff {
                note: param,
                velocity: second()?,
            },
            0x9 => match second()? {
                0 => Self::NoteOff {
                    note: param,
                    velocity: 0,
                },
                velocity => Self::NoteOn {
                    note: param,
                    velocity,
                },
            },
            0xA => Self::NoteAftertouch {
                note: param,
                amount: second()?,
            },
            0xB => Self::Controller {
                controller: param,
                value: second()?,
            },
            0xC => Self::ProgramChange(param),
            0xD => Self::ChannelAftertouch(param),
            0xE => Self::PitchBend(param as u16 + ((second()? as u16) << 7)),
            _ => Self::Unknown(((param as u16) << 8) + second()? as u16),
        })
    }
}
