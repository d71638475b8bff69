//! Keplerian orbit propagation: broadcast elements to ECEF positions
#[cfg(feature = "log")]
use log::{debug, error};

use std::collections::BTreeMap;

use hifitime::Epoch;

use crate::{
    constants::{Kepler as KeplerSolver, GM, OMEGA_E},
    ephemeris::{EphemerisSet, Kepler},
    prelude::SV,
};

/// ECEF coordinates [m]
pub type Vector3D = (f64, f64, f64);

/// Propagated ECEF positions: vehicles, then query epochs, ascending.
pub type PositionSet = BTreeMap<SV, BTreeMap<Epoch, Vector3D>>;

/// Solves Kepler's equation `E = M + e.sin(E)` for the eccentric anomaly,
/// by fixed point iteration starting from `E = M`. Iteration stops once two
/// successive values are closer than 1E-12 rad, or after 30 iterations.
pub fn eccentric_anomaly(m_k: f64, e: f64) -> f64 {
    let mut e_k = m_k;
    for _ in 0..KeplerSolver::MAX_ITER {
        let next = m_k + e * e_k.sin();
        if (next - e_k).abs() < KeplerSolver::TOLERANCE {
            return next;
        }
        e_k = next;
    }

    #[cfg(feature = "log")]
    error!("kepler iteration overflow (M={}, e={})", m_k, e);

    e_k
}

impl Kepler {
    /// Mean motion [rad.s^-1]
    pub fn mean_motion(&self) -> f64 {
        (GM / self.a.powi(3)).sqrt()
    }

    /// Returns ECEF position [m] `t_k` seconds after the reference epoch.
    pub fn position(&self, t_k: f64) -> Vector3D {
        let m_k = self.m_0 + self.mean_motion() * t_k;
        let e_k = eccentric_anomaly(m_k, self.e);

        // true anomaly
        let (sin_e_k, cos_e_k) = e_k.sin_cos();
        let v_k = ((1.0 - self.e.powi(2)).sqrt() * sin_e_k).atan2(cos_e_k - self.e);

        // argument of latitude
        let psi_k = v_k + self.omega;

        // in plane coordinates
        let r_k = self.a * (1.0 - self.e * cos_e_k);
        let (sin_psi_k, cos_psi_k) = psi_k.sin_cos();
        let (x_k, y_k) = (r_k * cos_psi_k, r_k * sin_psi_k);

        // corrected longitude of ascending node
        let omega_k = self.omega_0 + (self.omega_dot - OMEGA_E) * t_k - OMEGA_E * self.toe;

        let (sin_omega_k, cos_omega_k) = omega_k.sin_cos();
        let (sin_i, cos_i) = self.i_0.sin_cos();
        (
            x_k * cos_omega_k - y_k * cos_i * sin_omega_k,
            x_k * sin_omega_k + y_k * cos_i * cos_omega_k,
            y_k * sin_i,
        )
    }
}

/// Propagates every vehicle of the [EphemerisSet] to every query epoch.
///
/// Records are evaluated in chronological order and each of them is
/// evaluated at every query epoch: the last valid record of a vehicle
/// determines its position at all epochs, whatever its distance to them.
/// Records missing any required element are skipped, vehicles without
/// a single valid record are absent from the output.
pub fn propagate(set: &EphemerisSet, epochs: &[Epoch]) -> PositionSet {
    let mut positions = PositionSet::new();
    if epochs.is_empty() {
        return positions;
    }

    for (sv, records) in set.iter() {
        for (toc, eph) in records.iter() {
            let kepler = match eph.kepler() {
                Some(kepler) => kepler,
                None => {
                    #[cfg(feature = "log")]
                    debug!("{}({}): incomplete ephemeris", sv, toc);
                    continue;
                },
            };

            let sv_positions = positions.entry(*sv).or_default();
            for t in epochs.iter() {
                let t_k = (*t - *toc).to_seconds();
                sv_positions.insert(*t, kepler.position(t_k));
            }
        }
    }

    positions
}
