#![doc = r#"
Pairs note-on and note-off events into timed [`Note`]s

Each retained track is replayed from its first event, accumulating delta
times. A note-on is pushed on a stack for its note number; a note-off pops the
most recent pending note-on for the same number, so overlapping notes of the
same pitch pair last-in, first-out.

Every pairing step is also recorded as an [`AccountingEvent`], shared across
tracks, for [`Normalization`](crate::normalize::Normalization).
"#]

use std::collections::HashMap;

use crate::{
    events::{ChannelEventKind, Event, EventKind},
    note::{Note, semitone_to_name},
    timeline::Timeline,
};

/// A note-on or note-off, reduced to what loudness normalization needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountingEvent {
    /// Ticks since the start of the track
    pub tick: u32,
    /// Velocity of the note-on, or of the note-on a note-off closes
    pub velocity: u8,
    /// True for a note-on
    pub is_note_on: bool,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    offset: f64,
    velocity: u8,
}

/// Builds the progression of a conversion, one track at a time.
#[derive(Debug)]
pub struct Scheduler<'t> {
    timeline: &'t Timeline,
    notes: Vec<Note>,
    accounting: Vec<AccountingEvent>,
    verbose: bool,
}

impl<'t> Scheduler<'t> {
    /// Create a scheduler placing notes on `timeline`
    pub fn new(timeline: &'t Timeline) -> Self {
        Self {
            timeline,
            notes: Vec::new(),
            accounting: Vec::new(),
            verbose: false,
        }
    }

    /// Report text events with their time as they are replayed
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Replay one track, appending its notes and accounting events.
    pub fn schedule_track(&mut self, events: &[Event]) {
        let mut tick = 0u32;
        let mut pending: HashMap<u8, Vec<Pending>> = HashMap::new();

        for event in events {
            tick = tick.saturating_add(event.delta());

            match event.kind() {
                EventKind::Channel(channel) => match *channel.kind() {
                    ChannelEventKind::NoteOn { note, velocity } => {
                        pending.entry(note).or_default().push(Pending {
                            offset: self.timeline.seconds_at(tick),
                            velocity,
                        });
                        self.accounting.push(AccountingEvent {
                            tick,
                            velocity,
                            is_note_on: true,
                        });
                    }
                    ChannelEventKind::NoteOff { note, .. } => {
                        let Some(on) = pending.get_mut(&note).and_then(Vec::pop) else {
                            tracing::debug!(note, tick, "note off without a pending note on");
                            self.notes.push(Note::new(semitone_to_name(note as i32), 0., 0.).at(0.));
                            self.accounting.push(AccountingEvent {
                                tick,
                                velocity: 0,
                                is_note_on: false,
                            });
                            continue;
                        };
                        self.notes.push(
                            Note::new(
                                semitone_to_name(note as i32),
                                self.timeline.seconds_at(tick) - on.offset,
                                on.velocity as f64 / 128.,
                            )
                            .at(on.offset),
                        );
                        self.accounting.push(AccountingEvent {
                            tick,
                            velocity: on.velocity,
                            is_note_on: false,
                        });
                    }
                    _ => {}
                },
                EventKind::Meta(meta) if self.verbose => {
                    if let Some(text) = meta.text() {
                        tracing::info!(
                            "{:.2}s {}: {}",
                            self.timeline.seconds_at(tick),
                            meta.sub_type(),
                            text
                        );
                    }
                }
                _ => {}
            }
        }
    }

    /// The notes paired so far, in the order their note-offs were seen
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The accounting events recorded so far
    pub fn accounting(&self) -> &[AccountingEvent] {
        &self.accounting
    }

    /// Consume the scheduler, returning the progression and accounting events
    pub fn into_parts(self) -> (Vec<Note>, Vec<AccountingEvent>) {
        (self.notes, self.accounting)
    }
}
