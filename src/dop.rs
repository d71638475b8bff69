//! Dilution of Precision: geometric quality of the visible constellation
#[cfg(feature = "log")]
use log::debug;

use std::collections::{BTreeMap, HashSet};

use hifitime::Epoch;
use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    cfg::default_elevation_cutoff,
    constants::DOP_DEGENERACY_THRESHOLD,
    coords::{ObserverPosition, TopocentricSet},
    kepler::{PositionSet, Vector3D},
    linalg::{invert, normal_matrix, rotated_diagonal, Matrix3},
    prelude::SV,
};

/// DOP figures, per epoch, ascending
pub type DopSet = BTreeMap<Epoch, DilutionOfPrecision>;

/// Minimal number of vehicles for a fix (3D + time)
const MIN_VEHICLES: usize = 4;

/// [DilutionOfPrecision] of one epoch.
/// Either all components are finite, or all of them are [Self::UNDETERMINED].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DilutionOfPrecision {
    /// Time DOP
    pub tdop: f64,
    /// Position DOP
    pub pdop: f64,
    /// Horizontal DOP
    pub hdop: f64,
    /// Vertical DOP
    pub vdop: f64,
}

impl Default for DilutionOfPrecision {
    fn default() -> Self {
        Self::undetermined()
    }
}

impl DilutionOfPrecision {
    /// Sentinel value of undetermined components
    pub const UNDETERMINED: f64 = -1.0;

    /// Not enough vehicles, or degenerate geometry
    pub fn undetermined() -> Self {
        Self {
            tdop: Self::UNDETERMINED,
            pdop: Self::UNDETERMINED,
            hdop: Self::UNDETERMINED,
            vdop: Self::UNDETERMINED,
        }
    }

    /// Returns true if this fix could be resolved
    pub fn is_determined(&self) -> bool {
        self.pdop != Self::UNDETERMINED
    }

    /// Geometric DOP, or [Self::UNDETERMINED]
    pub fn gdop(&self) -> f64 {
        if self.is_determined() {
            (self.pdop.powi(2) + self.tdop.powi(2)).sqrt()
        } else {
            Self::UNDETERMINED
        }
    }

    /// Resolves DOP figures from line of sight rows `[-ux, -uy, -uz, 1]`.
    /// `rotation` is the ECEF to (East, North, Up) rotation at the observer.
    fn from_geometry(rows: &[[f64; 4]], rotation: &Matrix3) -> Option<Self> {
        if rows.len() < MIN_VEHICLES {
            return None;
        }

        let q = invert(&normal_matrix(rows))?;
        let enu = rotated_diagonal(rotation, &q);

        let dop = Self {
            tdop: q[3][3].sqrt(),
            pdop: (q[0][0] + q[1][1] + q[2][2]).sqrt(),
            hdop: (enu[0] + enu[1]).sqrt(),
            vdop: enu[2].sqrt(),
        };

        let components = [dop.tdop, dop.pdop, dop.hdop, dop.vdop];
        if components
            .iter()
            .all(|x| x.is_finite() && *x <= DOP_DEGENERACY_THRESHOLD)
        {
            Some(dop)
        } else {
            None
        }
    }
}

/// Defines which vehicles contribute to the DOP
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectionCriteria {
    /// Eligible vehicles
    pub satellites: HashSet<SV>,
    /// Vehicles below this elevation [ddeg] are ignored
    pub elevation_cutoff_deg: f64,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            satellites: HashSet::new(),
            elevation_cutoff_deg: default_elevation_cutoff(),
        }
    }
}

impl SelectionCriteria {
    /// Builds new criteria from eligible vehicles and elevation cutoff [ddeg]
    pub fn new(satellites: impl IntoIterator<Item = SV>, elevation_cutoff_deg: f64) -> Self {
        Self {
            satellites: satellites.into_iter().collect(),
            elevation_cutoff_deg,
        }
    }
    /// Copies and returns Self with updated elevation cutoff [ddeg]
    pub fn with_elevation_cutoff(&self, elevation_cutoff_deg: f64) -> Self {
        let mut s = self.clone();
        s.elevation_cutoff_deg = elevation_cutoff_deg;
        s
    }
}

/// Lists the vehicles at or above `cutoff_deg` at this epoch,
/// in constellation priority order.
pub fn visible(topocentric: &TopocentricSet, epoch: Epoch, cutoff_deg: f64) -> Vec<SV> {
    topocentric
        .iter()
        .filter_map(|(sv, sky)| {
            let fix = sky.get(&epoch)?;
            if fix.elevation_deg() >= cutoff_deg {
                Some(*sv)
            } else {
                None
            }
        })
        .collect()
}

/// Unit line of sight row, from observer to vehicle
fn line_of_sight(ecef: Vector3D, observer: Vector3D) -> Option<[f64; 4]> {
    let (dx, dy, dz) = (ecef.0 - observer.0, ecef.1 - observer.1, ecef.2 - observer.2);
    let range = (dx.powi(2) + dy.powi(2) + dz.powi(2)).sqrt();
    if range == 0.0 || !range.is_finite() {
        return None;
    }
    Some([-dx / range, -dy / range, -dz / range, 1.0])
}

/// Computes the DOP at every epoch found in the [PositionSet].
/// Only selected vehicles, at or above the elevation cutoff, with both
/// a position and a topocentric fix at that epoch, contribute.
/// Epochs with less than 4 contributors, or a singular or degenerate
/// (any component above 100) geometry, are [DilutionOfPrecision::undetermined].
pub fn compute(
    positions: &PositionSet,
    topocentric: &TopocentricSet,
    observer: &ObserverPosition,
    criteria: &SelectionCriteria,
) -> DopSet {
    let observer_ecef = observer.to_ecef_wgs84();
    let rotation = observer.enu_rotation();

    let epochs = positions
        .values()
        .flat_map(|sv_positions| sv_positions.keys())
        .sorted()
        .dedup();

    let mut dops = DopSet::new();
    for epoch in epochs {
        let rows = positions
            .iter()
            .filter(|(sv, _)| criteria.satellites.contains(*sv))
            .filter_map(|(sv, sv_positions)| {
                let fix = topocentric.get(sv)?.get(epoch)?;
                if fix.elevation_deg() < criteria.elevation_cutoff_deg {
                    return None;
                }
                line_of_sight(*sv_positions.get(epoch)?, observer_ecef)
            })
            .collect::<Vec<_>>();

        let dop = DilutionOfPrecision::from_geometry(&rows, &rotation).unwrap_or_default();

        #[cfg(feature = "log")]
        debug!("{}: {} vehicle(s) - {:?}", epoch, rows.len(), dop);

        dops.insert(*epoch, dop);
    }

    dops
}
