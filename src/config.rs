//! Conversion settings

use crate::track::{Skip, SkipRule};

/// Settings for [`convert`](crate::convert()).
///
/// The output is always mono.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvertConfig {
    /// Frames per second of the rendered audio
    pub sample_rate: u32,

    /// 8, 16, 24 or 32
    pub bits_per_sample: u16,

    /// Share of each note's duration that sounds; the rest is silence
    pub duration: f64,

    /// Tracks to leave out
    pub skip: Option<Skip>,

    /// Report progress at info level
    pub verbose: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            bits_per_sample: 16,
            duration: 1.,
            skip: None,
            verbose: false,
        }
    }
}

impl ConvertConfig {
    /// Builder: set the sample rate
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Builder: set the bits per sample
    pub fn with_bits_per_sample(mut self, bits: u16) -> Self {
        self.bits_per_sample = bits;
        self
    }

    /// Builder: set the relative note duration
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Builder: set the skip policy
    pub fn with_skip(mut self, skip: impl Into<Skip>) -> Self {
        self.skip = Some(skip.into());
        self
    }

    /// Builder: skip tracks containing an event matching any of `rules`
    pub fn skip_rules(self, rules: impl IntoIterator<Item = SkipRule>) -> Self {
        self.with_skip(Skip::Rules(rules.into_iter().collect()))
    }

    /// Builder: report progress
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
