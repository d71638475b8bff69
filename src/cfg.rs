use hifitime::{Duration, Epoch, TimeSeries};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coords::ObserverPosition;

pub(crate) fn default_elevation_cutoff() -> f64 {
    10.0
}

/// Time window to be planned
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeWindow {
    /// First query epoch
    pub start: Epoch,
    /// Total window duration
    pub duration: Duration,
    /// Query interval
    pub step: Duration,
}

impl TimeWindow {
    /// Builds a new [TimeWindow]
    pub fn new(start: Epoch, duration: Duration, step: Duration) -> Self {
        Self {
            start,
            duration,
            step,
        }
    }

    /// Expands Self into query epochs, both ends included.
    /// Returns no epochs for a null or negative step.
    pub fn epochs(&self) -> Vec<Epoch> {
        if self.step <= Duration::ZERO || self.duration < Duration::ZERO {
            return Vec::new();
        }
        TimeSeries::inclusive(self.start, self.start + self.duration, self.step).collect()
    }
}

/// Planning session defaults
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Observer position
    #[cfg_attr(feature = "serde", serde(default))]
    pub observer: ObserverPosition,
    /// Vehicles below this elevation [ddeg] do not contribute to the DOP
    #[cfg_attr(feature = "serde", serde(default = "default_elevation_cutoff"))]
    pub elevation_cutoff_deg: f64,
    /// Query epochs to be generated, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub window: Option<TimeWindow>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            observer: ObserverPosition::default(),
            elevation_cutoff_deg: default_elevation_cutoff(),
            window: None,
        }
    }
}

impl Config {
    /// Returns Self with given observer position
    pub fn with_observer(&self, observer: ObserverPosition) -> Self {
        let mut s = self.clone();
        s.observer = observer;
        s
    }
    /// Returns Self with given time window
    pub fn with_window(&self, window: TimeWindow) -> Self {
        let mut s = self.clone();
        s.window = Some(window);
        s
    }
}
