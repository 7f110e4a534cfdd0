use super::{ReadResult, Reader};
use crate::events::*;

impl<'slc> Reader<'slc> {
    /// Decode the next track event.
    ///
    /// Reads the delta time, then the status byte. Status bytes `0xF0..=0xFF`
    /// start system events (meta, sysex, divided sysex, unknown). Anything
    /// else is a channel event; a status byte with the high bit clear means
    /// running status, and the byte just read is the first data byte of an
    /// event sharing the previous channel status.
    pub fn read_event(&mut self) -> ReadResult<Event> {
        let delta = self.read_var_u32()?;
        let status = self.read_u8()?;

        let kind = if status & 0xF0 == 0xF0 {
            match status {
                0xFF => EventKind::Meta(self.read_meta()?),
                0xF0 => {
                    let len = self.read_var_u32()?;
                    EventKind::SysEx(self.read_string(len as usize)?)
                }
                0xF7 => {
                    let len = self.read_var_u32()?;
                    EventKind::DividedSysEx(self.read_string(len as usize)?)
                }
                _ => {
                    let len = self.read_var_u32()?;
                    EventKind::Unknown(self.read_string(len as usize)?)
                }
            }
        } else {
            let (status, param) = if status & 0x80 == 0 {
                (self.last_status, status)
            } else {
                self.last_status = status;
                (status, self.read_u8()?)
            };
            let kind = ChannelEventKind::decode(status >> 4, param, || self.read_u8())?;
            EventKind::Channel(ChannelEvent::new(status & 0x0F, kind))
        };

        Ok(Event::new(delta, kind))
    }

    fn read_meta(&mut self) -> ReadResult<MetaEvent> {
        let meta_type = MetaType::from(self.read_u8()?);
        let len = self.read_var_u32()?;
        let fits = meta_type.expected_length().is_none_or(|expected| expected == len);

        if !fits {
            self.skip(len as usize)?;
        }

        Ok(match meta_type {
            MetaType::SequenceNumber => MetaEvent::SequenceNumber(self.read_if(fits, Self::read_u16)?),
            MetaType::Text => MetaEvent::Text(self.read_string(len as usize)?),
            MetaType::CopyrightNotice => MetaEvent::CopyrightNotice(self.read_string(len as usize)?),
            MetaType::TrackName => MetaEvent::TrackName(self.read_string(len as usize)?),
            MetaType::InstrumentName => MetaEvent::InstrumentName(self.read_string(len as usize)?),
            MetaType::Lyrics => MetaEvent::Lyrics(self.read_string(len as usize)?),
            MetaType::Marker => MetaEvent::Marker(self.read_string(len as usize)?),
            MetaType::CuePoint => MetaEvent::CuePoint(self.read_string(len as usize)?),
            MetaType::MidiChannelPrefix => {
                MetaEvent::MidiChannelPrefix(self.read_if(fits, Self::read_u8)?)
            }
            MetaType::EndOfTrack => {
                // a trailing payload was already skipped above
                MetaEvent::EndOfTrack
            }
            MetaType::SetTempo => MetaEvent::SetTempo(self.read_if(fits, Self::read_u24)?),
            MetaType::SmpteOffset => MetaEvent::SmpteOffset(
                self.read_if(fits, |r| r.read_exact_size().map(SmpteOffset::from_bytes))?,
            ),
            MetaType::TimeSignature => MetaEvent::TimeSignature(
                self.read_if(fits, |r| r.read_exact_size().map(TimeSignature::from_bytes))?,
            ),
            MetaType::KeySignature => MetaEvent::KeySignature(self.read_if(fits, |r| {
                Ok(KeySignature {
                    key: r.read_i8()?,
                    scale: r.read_u8()?,
                })
            })?),
            MetaType::SequencerSpecific => {
                MetaEvent::SequencerSpecific(self.read_string(len as usize)?)
            }
            MetaType::Unknown(type_byte) => MetaEvent::Unknown {
                type_byte,
                value: self.read_string(len as usize)?,
            },
        })
    }

    fn read_if<T>(
        &mut self,
        fits: bool,
        read: impl FnOnce(&mut Self) -> ReadResult<T>,
    ) -> ReadResult<Option<T>> {
        if fits { read(self).map(Some) } else { Ok(None) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode_all(bytes: &[u8]) -> Vec<Event> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut events = Vec::new();
        while !reader.is_at_end() {
            events.push(reader.read_event().unwrap());
        }
        events
    }

    fn channel(event: &Event) -> (u8, ChannelEventKind) {
        let c = event.kind().channel().unwrap();
        (c.channel(), *c.kind())
    }

    #[test]
    fn running_status_reuses_previous_status() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0x93, 60, 100,
            0x10, 64, 90,
            0x10, 67, 80,
            0x20, 60, 0,
        ];
        let events = decode_all(&bytes);
        assert_eq!(events.len(), 4);
        assert_eq!(
            channel(&events[0]),
            (3, ChannelEventKind::NoteOn { note: 60, velocity: 100 })
        );
        assert_eq!(
            channel(&events[1]),
            (3, ChannelEventKind::NoteOn { note: 64, velocity: 90 })
        );
        assert_eq!(
            channel(&events[2]),
            (3, ChannelEventKind::NoteOn { note: 67, velocity: 80 })
        );
        // zero velocity note on is a note off
        assert_eq!(
            channel(&events[3]),
            (3, ChannelEventKind::NoteOff { note: 60, velocity: 0 })
        );
        assert_eq!(events[3].delta(), 0x20);
        assert_eq!(events[3].sub_type(), "noteOff");
    }

    #[test]
    fn running_status_survives_meta_events() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0xB1, 7, 100,
            0x00, 0xFF, 0x01, 0x02, b'h', b'i',
            0x00, 10, 64,
        ];
        let events = decode_all(&bytes);
        assert_eq!(events[1].text(), Some("hi"));
        assert_eq!(
            channel(&events[2]),
            (1, ChannelEventKind::Controller { controller: 10, value: 64 })
        );
    }

    #[test]
    fn single_data_byte_messages() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0xC5, 12,
            0x00, 0xD5, 99,
            0x00, 0xE5, 0x01, 0x40,
            0x00, 0xA5, 60, 33,
        ];
        let events = decode_all(&bytes);
        assert_eq!(channel(&events[0]), (5, ChannelEventKind::ProgramChange(12)));
        assert_eq!(channel(&events[1]), (5, ChannelEventKind::ChannelAftertouch(99)));
        assert_eq!(channel(&events[2]), (5, ChannelEventKind::PitchBend(0x01 + (0x40 << 7))));
        assert_eq!(
            channel(&events[3]),
            (5, ChannelEventKind::NoteAftertouch { note: 60, amount: 33 })
        );
    }

    #[test]
    fn running_status_without_prior_status_is_unknown() {
        let events = decode_all(&[0x00, 0x12, 0x34]);
        assert_eq!(channel(&events[0]), (0, ChannelEventKind::Unknown(0x1234)));
    }

    #[test]
    fn fixed_size_meta_events() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0xFF, 0x00, 0x02, 0x01, 0x02,
            0x00, 0xFF, 0x20, 0x01, 0x09,
            0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20,
            0x00, 0xFF, 0x58, 0x04, 0x03, 0x02, 0x18, 0x08,
            0x00, 0xFF, 0x59, 0x02, 0xFE, 0x01,
            0x00, 0xFF, 0x54, 0x05, 0x41, 0x02, 0x03, 0x04, 0x05,
            0x00, 0xFF, 0x2F, 0x00,
        ];
        let events = decode_all(&bytes);
        let metas: Vec<_> = events.iter().map(|e| e.kind().meta().unwrap().clone()).collect();
        assert_eq!(metas[0], MetaEvent::SequenceNumber(Some(0x0102)));
        assert_eq!(metas[1], MetaEvent::MidiChannelPrefix(Some(9)));
        assert_eq!(metas[2], MetaEvent::SetTempo(Some(500_000)));
        assert_eq!(
            metas[3],
            MetaEvent::TimeSignature(Some(TimeSignature {
                numerator: 3,
                denominator: 4,
                metronome: 24,
                thirtyseconds: 8
            }))
        );
        assert_eq!(metas[4], MetaEvent::KeySignature(Some(KeySignature { key: -2, scale: 1 })));
        let MetaEvent::SmpteOffset(Some(offset)) = &metas[5] else {
            panic!("expected smpte offset, got {:?}", metas[5]);
        };
        assert_eq!(offset.fps, crate::file::SmpteFps::TwentyFive);
        assert_eq!(offset.hour, 1);
        assert_eq!(offset.subframe, 5);
        assert_eq!(metas[6], MetaEvent::EndOfTrack);
    }

    #[test]
    fn mismatched_meta_length_skips_payload() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0xFF, 0x51, 0x02, 0xAA, 0xBB,
            0x00, 0xFF, 0x2F, 0x01, 0xCC,
            0x00, 0x90, 60, 1,
        ];
        let mut reader = Reader::from_byte_slice(&bytes);
        let tempo = reader.read_event().unwrap();
        assert_eq!(tempo.kind().meta(), Some(&MetaEvent::SetTempo(None)));
        assert_eq!(reader.buffer_position(), 6);

        let end = reader.read_event().unwrap();
        assert_eq!(end.kind().meta(), Some(&MetaEvent::EndOfTrack));
        assert_eq!(reader.buffer_position(), 11);

        let note = reader.read_event().unwrap();
        assert_eq!(note.sub_type(), "noteOn");
    }

    #[test]
    fn string_events() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0xFF, 0x03, 0x05, b'P', b'i', b'a', b'n', b'o',
            0x00, 0xFF, 0x7F, 0x01, 0x41,
            0x00, 0xFF, 0x4B, 0x01, 0x42,
            0x00, 0xF0, 0x02, 0x7E, 0xF7,
            0x00, 0xF7, 0x01, 0x43,
            0x00, 0xF3, 0x01, 0x44,
        ];
        let events = decode_all(&bytes);
        let described: Vec<_> = events.iter().map(|e| (e.sub_type(), e.text().unwrap())).collect();
        assert_eq!(
            described,
            vec![
                ("trackName", "Piano"),
                ("sequencerSpecific", "A"),
                ("unknown", "B"),
                ("sysEx", "\u{7e}\u{f7}"),
                ("dividedSysEx", "C"),
                ("unknown", "D"),
            ]
        );
        assert!(matches!(
            events[2].kind(),
            EventKind::Meta(MetaEvent::Unknown { type_byte: 0x4B, .. })
        ));
    }

    #[test]
    fn truncated_event_is_out_of_bounds() {
        let mut reader = Reader::from_byte_slice(&[0x00, 0x90, 60]);
        let err = reader.read_event().unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(err.position(), 3);
    }
}
