#![doc = r#"
Piecewise tempo map from ticks to seconds

A MIDI file starts at 500 000 µs per quarter note (120 BPM). Every `setTempo`
event of the tempo track adds a [`TempoBreakpoint`] holding the number of
ticks since the previous breakpoint and the tempo that takes effect there.

# Example
```rust
# use midi2wav::prelude::*;
let mut timeline = Timeline::new(480);
timeline.add_breakpoint(480, 600_000);

assert_eq!(timeline.seconds_at(240), 0.25);
assert!((timeline.seconds_at(720) - 0.8).abs() < 1e-12);
```
"#]

use crate::events::Event;

/// The tempo at the start of every file, in microseconds per quarter note
pub const DEFAULT_TEMPO: u32 = 500_000;

const MICROS_PER_SECOND: f64 = 1_000_000.;

/// A tempo change, relative to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoBreakpoint {
    /// Ticks since the previous breakpoint, or since the start
    pub delta: u32,
    /// Microseconds per quarter note from here on
    pub micros_per_beat: u32,
}

/// Converts cumulative ticks into elapsed seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    ticks_per_beat: u16,
    breakpoints: Vec<TempoBreakpoint>,
}

impl Timeline {
    /// An empty timeline, which plays at [`DEFAULT_TEMPO`] throughout
    pub const fn new(ticks_per_beat: u16) -> Self {
        Self {
            ticks_per_beat,
            breakpoints: Vec::new(),
        }
    }

    /// Build the timeline from the `setTempo` events of a tempo track.
    ///
    /// A `setTempo` whose payload had the wrong length carries no tempo and
    /// is ignored; its ticks count towards the next breakpoint.
    pub fn from_track(ticks_per_beat: u16, events: &[Event]) -> Self {
        let mut timeline = Self::new(ticks_per_beat);
        let mut delta = 0u32;

        for event in events {
            delta = delta.saturating_add(event.delta());
            let Some(meta) = event.kind().meta() else {
                continue;
            };
            match meta.tempo() {
                Some(tempo) => {
                    timeline.add_breakpoint(delta, tempo);
                    delta = 0;
                }
                None if meta.sub_type() == "setTempo" => {
                    tracing::warn!("ignoring setTempo event with a malformed payload");
                }
                None => {}
            }
        }

        timeline
    }

    /// Append a tempo change `delta` ticks after the previous one
    pub fn add_breakpoint(&mut self, delta: u32, micros_per_beat: u32) {
        self.breakpoints.push(TempoBreakpoint {
            delta,
            micros_per_beat,
        });
    }

    /// The recorded tempo changes, in order
    pub fn breakpoints(&self) -> &[TempoBreakpoint] {
        &self.breakpoints
    }

    /// Ticks per quarter note
    pub const fn ticks_per_beat(&self) -> u16 {
        self.ticks_per_beat
    }

    /// Seconds elapsed after `ticks` ticks from the start of the file.
    ///
    /// Pure and independent of previous calls; ticks can be queried in any order.
    pub fn seconds_at(&self, ticks: u32) -> f64 {
        let mut remaining = ticks;
        let mut tempo = DEFAULT_TEMPO;
        let mut seconds = 0.;

        for breakpoint in &self.breakpoints {
            if remaining == 0 {
                break;
            }
            let consumed = remaining.min(breakpoint.delta);
            seconds += self.span(consumed, tempo);
            remaining -= consumed;
            tempo = breakpoint.micros_per_beat;
        }

        seconds + self.span(remaining, tempo)
    }

    fn span(&self, ticks: u32, micros_per_beat: u32) -> f64 {
        ticks as f64 * micros_per_beat as f64 / self.ticks_per_beat as f64 / MICROS_PER_SECOND
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, MetaEvent};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_tempo_without_breakpoints() {
        let timeline = Timeline::new(480);
        assert_eq!(timeline.seconds_at(0), 0.);
        assert_eq!(timeline.seconds_at(480), 0.5);
        assert_eq!(timeline.seconds_at(960), 1.);
    }

    #[test]
    fn tempo_changes_apply_after_their_breakpoint() {
        let mut timeline = Timeline::new(480);
        timeline.add_breakpoint(480, 600_000);

        assert_eq!(timeline.seconds_at(240), 0.25);
        assert_eq!(timeline.seconds_at(480), 0.5);
        assert!((timeline.seconds_at(720) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn queries_in_any_order() {
        let mut timeline = Timeline::new(96);
        timeline.add_breakpoint(0, 1_000_000);
        timeline.add_breakpoint(96, 250_000);

        let late = timeline.seconds_at(192);
        let early = timeline.seconds_at(48);
        assert_eq!(early, 0.5);
        assert_eq!(late, 1.25);
        assert_eq!(timeline.seconds_at(192), late);
    }

    #[test]
    fn built_from_set_tempo_events() {
        let events = vec![
            Event::new(0, EventKind::Meta(MetaEvent::TrackName("tempo".into()))),
            Event::new(100, EventKind::Meta(MetaEvent::SetTempo(Some(400_000)))),
            Event::new(50, EventKind::Meta(MetaEvent::SetTempo(None))),
            Event::new(50, EventKind::Meta(MetaEvent::SetTempo(Some(800_000)))),
            Event::new(10, EventKind::Meta(MetaEvent::EndOfTrack)),
        ];
        let timeline = Timeline::from_track(480, &events);
        assert_eq!(
            timeline.breakpoints(),
            &[
                TempoBreakpoint {
                    delta: 100,
                    micros_per_beat: 400_000
                },
                TempoBreakpoint {
                    delta: 100,
                    micros_per_beat: 800_000
                },
            ]
        );
    }
}
