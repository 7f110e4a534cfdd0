#![doc = r#"
Track decoding and the skip policy

A track is the ordered list of events of one `MTrk` chunk. While a track is
decoded, a [`TrackFilter`] may decide to drop it, either as soon as one event
matches (see [`SkipRule`]) or by looking at the whole event list once decoding
is done (see [`Skip::predicate`]).

# Example
```rust
# use midi2wav::prelude::*;
let skip = Skip::Rules(vec![SkipRule::new().with("trackName", "Drums")]);

// FF 03 05 "Drums"
let bytes = [0x00, 0xFF, 0x03, 0x05, b'D', b'r', b'u', b'm', b's'];
let track = Track::read(&bytes, Some(&skip)).unwrap();
assert!(!track.is_kept());
```
"#]

use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::{
    events::Event,
    reader::{ReadResult, Reader},
};

/// Decides whether a track is left out of the rendering.
///
/// Both checks default to keeping the track.
pub trait TrackFilter {
    /// Called on each event as it is decoded.
    ///
    /// Returning true stops decoding the track and drops it.
    fn rejects_event(&self, _event: &Event) -> bool {
        false
    }

    /// Called once with every decoded event of a track.
    ///
    /// Returning true drops the track.
    fn rejects_track(&self, _events: &[Event]) -> bool {
        false
    }
}

/// A set of `(subType, value)` pairs.
///
/// An event matches the rule when its sub type is one of the keys and its
/// string payload equals the value stored under that key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkipRule(BTreeMap<String, String>);

impl SkipRule {
    /// A rule that matches nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `(sub_type, value)` pair to the rule
    pub fn with(mut self, sub_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(sub_type.into(), value.into());
        self
    }

    /// True if the event carries a string equal to the one stored for its sub type
    pub fn matches(&self, event: &Event) -> bool {
        event
            .text()
            .is_some_and(|text| self.0.get(event.sub_type()).is_some_and(|v| v == text))
    }
}

impl FromIterator<(String, String)> for SkipRule {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TrackFilter for [SkipRule] {
    fn rejects_event(&self, event: &Event) -> bool {
        match self.iter().find(|rule| rule.matches(event)) {
            Some(_) => {
                tracing::debug!(
                    "skip match found: {{\"{}\":{:?}}}",
                    event.sub_type(),
                    event.text().unwrap_or_default()
                );
                true
            }
            None => false,
        }
    }
}

type Predicate = dyn Fn(&[Event]) -> bool + Send + Sync;

/// The skip policy of a conversion.
#[derive(Clone)]
pub enum Skip {
    /// Drop a track as soon as one of its events matches any rule
    Rules(Vec<SkipRule>),
    /// Drop a track when the predicate returns true for its events
    Predicate(Arc<Predicate>),
}

impl Skip {
    /// Wrap a whole-track predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&[Event]) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }
}

impl TrackFilter for Skip {
    fn rejects_event(&self, event: &Event) -> bool {
        match self {
            Self::Rules(rules) => rules.rejects_event(event),
            Self::Predicate(_) => false,
        }
    }

    fn rejects_track(&self, events: &[Event]) -> bool {
        match self {
            Self::Rules(_) => false,
            Self::Predicate(f) => f(events),
        }
    }
}

impl fmt::Debug for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules(rules) => f.debug_tuple("Rules").field(rules).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<Vec<SkipRule>> for Skip {
    fn from(rules: Vec<SkipRule>) -> Self {
        Self::Rules(rules)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Skip {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Rules(rules) => rules.serialize(serializer),
            Self::Predicate(_) => Err(serde::ser::Error::custom(
                "a skip predicate cannot be serialized",
            )),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Skip {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<SkipRule>::deserialize(deserializer).map(Self::Rules)
    }
}

/// The events of one track chunk, and whether the skip policy kept it.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    events: Vec<Event>,
    kept: bool,
}

impl Track {
    /// Create a kept track from already decoded events
    pub fn new(events: Vec<Event>) -> Self {
        Self { events, kept: true }
    }

    /// Decode the body of an `MTrk` chunk.
    ///
    /// Decoding stops early when the filter rejects an event; the events
    /// decoded so far are still returned. The whole-track check always runs.
    pub fn read(data: &[u8], filter: Option<&dyn TrackFilter>) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(data);
        let mut events = Vec::new();
        let mut kept = true;

        while kept && !reader.is_at_end() {
            let event = reader.read_event()?;

            if let Some(text) = event.text() {
                tracing::debug!("{{\"{}\":{:?}}}", event.sub_type(), text);
                if filter.is_some_and(|f| f.rejects_event(&event)) {
                    kept = false;
                }
            }
            events.push(event);
        }

        if filter.is_some_and(|f| f.rejects_track(&events)) {
            kept = false;
        }

        Ok(Self { events, kept })
    }

    /// The decoded events, in file order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// False if the skip policy dropped the track
    pub const fn is_kept(&self) -> bool {
        self.kept
    }
}
