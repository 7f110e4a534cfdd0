#![doc = r#"
Loudness normalization

Every note-on adds its velocity to a running sum and every note-off takes it
away. The largest sum reached, plus one, sets the gain applied to all notes so
the busiest instant stays within full scale.
"#]

use crate::scheduler::AccountingEvent;

/// The loudest moment of a progression and the gain that keeps it from clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Multiply every note amplitude by this
    pub factor: f64,
    /// Largest sum of velocities sounding at once, including one unit of headroom
    pub max_velocity: i64,
    /// Tick at which `max_velocity` was first reached
    pub max_velocity_tick: u32,
    /// Largest number of notes sounding at once
    pub max_chord: i64,
    /// Tick at which `max_chord` was first reached
    pub max_chord_tick: u32,
}

impl Normalization {
    /// Sweep the accounting events in tick order.
    ///
    /// Events are sorted in place by tick, with note-offs before note-ons on
    /// the same tick so a note ending exactly when another starts is not
    /// counted twice.
    pub fn compute(events: &mut [AccountingEvent]) -> Self {
        events.sort_by_key(|e| (e.tick, e.is_note_on));

        let mut velocity: i64 = 1;
        let mut chord: i64 = 0;
        let mut report = Self {
            factor: 1.,
            max_velocity: 1,
            max_velocity_tick: 0,
            max_chord: 0,
            max_chord_tick: 0,
        };

        for event in events.iter() {
            if event.is_note_on {
                velocity += event.velocity as i64;
                chord += 1;

                if velocity > report.max_velocity {
                    report.max_velocity = velocity;
                    report.max_velocity_tick = event.tick;
                }
                if chord > report.max_chord {
                    report.max_chord = chord;
                    report.max_chord_tick = event.tick;
                }
            } else {
                velocity -= event.velocity as i64;
                chord -= 1;
            }
        }

        report.factor = 128. / report.max_velocity as f64;
        report
    }
}
