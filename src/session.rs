//! Planning session: user inputs in, whole pipeline solutions out
#[cfg(feature = "log")]
use log::debug;

use std::collections::HashSet;

use hifitime::Epoch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    cfg::{Config, TimeWindow},
    coords::{self, GeocentricSet, ObserverPosition, TopocentricSet},
    dop::{self, DopSet, SelectionCriteria},
    ephemeris::EphemerisSet,
    kepler::{propagate, PositionSet},
    prelude::SV,
};

/// Input changes a [Session] reacts to
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// New ephemeris set, replaces the current one
    EphemerisLoaded(EphemerisSet),
    /// Observer relocation
    ObserverMoved(ObserverPosition),
    /// New elevation cutoff [ddeg]
    CutoffChanged(f64),
    /// New set of vehicles contributing to the DOP
    SelectionChanged(HashSet<SV>),
    /// Adds this vehicle to the selection, or removes it
    SatelliteToggled(SV),
    /// New query epochs
    EpochsChanged(Vec<Epoch>),
    /// New query epochs, generated from this window
    WindowChanged(TimeWindow),
}

/// Everything the pipeline produces for the current inputs
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solutions {
    /// ECEF positions
    pub positions: PositionSet,
    /// Ground tracks
    pub geocentric: GeocentricSet,
    /// Sky view
    pub topocentric: TopocentricSet,
    /// DOP per epoch
    pub dop: DopSet,
}

/// [Session] is an immutable snapshot of all planning inputs.
/// Every change goes through [Session::apply], which returns
/// the updated snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Session {
    ephemeris: EphemerisSet,
    observer: ObserverPosition,
    criteria: SelectionCriteria,
    epochs: Vec<Epoch>,
}

impl Session {
    /// Builds a new (empty) [Session] from [Config]
    pub fn new(cfg: &Config) -> Self {
        Self {
            ephemeris: EphemerisSet::new(),
            observer: cfg.observer,
            criteria: SelectionCriteria {
                satellites: HashSet::new(),
                elevation_cutoff_deg: cfg.elevation_cutoff_deg,
            },
            epochs: cfg.window.map(|w| w.epochs()).unwrap_or_default(),
        }
    }

    /// Current ephemeris set
    pub fn ephemeris(&self) -> &EphemerisSet {
        &self.ephemeris
    }
    /// Current observer position
    pub fn observer(&self) -> &ObserverPosition {
        &self.observer
    }
    /// Current DOP selection criteria
    pub fn criteria(&self) -> &SelectionCriteria {
        &self.criteria
    }
    /// Current query epochs
    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    /// Applies one [Event], returns the updated [Session].
    pub fn apply(self, event: Event) -> Self {
        let mut s = self;
        match event {
            Event::EphemerisLoaded(set) => {
                #[cfg(feature = "log")]
                debug!("ephemeris loaded: {} vehicle(s)", set.len());

                if s.criteria.satellites.is_empty() {
                    s.criteria.satellites = set.keys().copied().collect();
                }
                s.ephemeris = set;
            },
            Event::ObserverMoved(observer) => {
                #[cfg(feature = "log")]
                debug!("observer moved to {}", observer);

                s.observer = observer;
            },
            Event::CutoffChanged(cutoff) => {
                s.criteria.elevation_cutoff_deg = cutoff;
            },
            Event::SelectionChanged(satellites) => {
                s.criteria.satellites = satellites;
            },
            Event::SatelliteToggled(sv) => {
                if !s.criteria.satellites.remove(&sv) {
                    s.criteria.satellites.insert(sv);
                }
            },
            Event::EpochsChanged(epochs) => {
                s.epochs = epochs;
            },
            Event::WindowChanged(window) => {
                s.epochs = window.epochs();
            },
        }
        s
    }

    /// Runs the whole pipeline for the current inputs:
    /// propagation, coordinates transforms then DOP.
    pub fn solve(&self) -> Solutions {
        let positions = propagate(&self.ephemeris, &self.epochs);
        let geocentric = coords::geocentric(&positions);
        let topocentric = coords::topocentric(&positions, &self.observer);
        let dop = dop::compute(&positions, &topocentric, &self.observer, &self.criteria);
        Solutions {
            positions,
            geocentric,
            topocentric,
            dop,
        }
    }
}
