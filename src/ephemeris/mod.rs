//! Broadcast ephemeris: canonical orbital elements
//! shared by the Almanac and RINEX Navigation parsers.
use std::collections::BTreeMap;

use hifitime::Epoch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::SV;

mod almanac;
mod rinex;

pub use almanac::parse_almanac;
pub use rinex::parse_rinex_navigation;

/// Ephemeris collection: vehicles in priority order,
/// and for each vehicle its records by ascending reference epoch.
pub type EphemerisSet = BTreeMap<SV, BTreeMap<Epoch, Ephemeris>>;

/// RINEX Navigation orbit schema, in file (row major) order.
/// The first slot of a record is the vehicle / timestamp descriptor
/// and does not appear here.
pub const NAV_SCHEMA: [&str; 28] = [
    "af0", "af1", "af2", "IODE", "Crs", "delta_n", "M0", "Cuc", "e", "Cus", "sqrt_a", "toe",
    "Cic", "Omega0", "Cis", "i0", "Crc", "omega", "OmegaDot", "IDOT", "L2", "GPSWeek", "L2P",
    "accuracy", "health", "TGD", "IODC", "Tom",
];

/// Orbit [Perturbations]: second order terms
/// only furnished by RINEX Navigation.
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Perturbations {
    /// Amplitude of sine harmonic correction term of the orbit radius [m]
    pub crs: f64,
    /// Amplitude of sine harmonic correction term of the argument
    /// of latitude [rad]
    pub cus: f64,
    /// Amplitude of cosine harmonic correction term of the argument
    /// of latitude [rad]
    pub cuc: f64,
    /// Amplitude of cosine harmonic correction term of the angle of inclination [rad]
    pub cic: f64,
    /// Amplitude of sine harmonic correction term of the angle of inclination [rad]
    pub cis: f64,
    /// Amplitude of cosine harmonic correction term of the orbit radius [m]
    pub crc: f64,
    /// Mean motion difference from computed value [rad.s^-1]
    pub delta_n: f64,
    /// Inclination rate of change [rad.s^-1]
    pub idot: f64,
}

/// Navigation message bookkeeping, only furnished by RINEX Navigation.
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavTerms {
    /// Issue of data, ephemeris
    pub iode: f64,
    /// Issue of data, clock
    pub iodc: f64,
    /// SV accuracy [m]
    pub accuracy: f64,
    /// Total group delay [s]
    pub tgd: f64,
    /// Codes on L2 channel
    pub l2_codes: f64,
    /// L2 P data flag
    pub l2p_flag: f64,
    /// Transmission time of message [s of week]
    pub tom: f64,
}

/// [Kepler] stores the elements the propagator requires,
/// all of them guaranteed to be finite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Kepler {
    /// Eccentricity (n.a)
    pub e: f64,
    /// Semi major axis [m]
    pub a: f64,
    /// Longitude of ascending node at reference time [rad]
    pub omega_0: f64,
    /// Argument of perigee [rad]
    pub omega: f64,
    /// Mean anomaly at reference time [rad]
    pub m_0: f64,
    /// Inclination at reference time [rad]
    pub i_0: f64,
    /// Right ascension rate of change [rad.s^-1]
    pub omega_dot: f64,
    /// Time of ephemeris [s of week]
    pub toe: f64,
}

/// Canonical broadcast [Ephemeris] for one vehicle at one reference epoch.
/// Angles are expressed in radians whatever the source format.
/// Malformed source fields are stored as NaN.
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ephemeris {
    /// Clock bias [s]
    pub af0: f64,
    /// Clock drift [s.s^-1]
    pub af1: f64,
    /// Clock drift rate [s.s^-2]
    pub af2: f64,
    /// Eccentricity
    pub e: f64,
    /// Square root of the semi major axis [m^1/2]
    pub sqrt_a: f64,
    /// Longitude of ascending node at reference time [rad]
    pub omega_0: f64,
    /// Argument of perigee [rad]
    pub omega: f64,
    /// Mean anomaly at reference time [rad]
    pub m_0: f64,
    /// Inclination at reference time [rad]
    pub i_0: f64,
    /// Right ascension rate of change [rad.s^-1]
    pub omega_dot: f64,
    /// Time of ephemeris [s of week]
    pub toe: f64,
    /// Health flag, 0 means healthy
    pub health: f64,
    /// GPS week number
    pub week: f64,
    /// Second order terms, RINEX Navigation only
    pub perturbations: Option<Perturbations>,
    /// Message bookkeeping, RINEX Navigation only
    pub nav: Option<NavTerms>,
}

impl Ephemeris {
    /// Retrieves Keplerian elements.
    /// Returns None when any required element is missing (NaN):
    /// such record must not be propagated.
    pub fn kepler(&self) -> Option<Kepler> {
        let kepler = Kepler {
            e: self.e,
            a: self.sqrt_a.powi(2),
            omega_0: self.omega_0,
            omega: self.omega,
            m_0: self.m_0,
            i_0: self.i_0,
            omega_dot: self.omega_dot,
            toe: self.toe,
        };
        let elements = [
            kepler.e,
            kepler.a,
            kepler.omega_0,
            kepler.omega,
            kepler.m_0,
            kepler.i_0,
            kepler.omega_dot,
            kepler.toe,
        ];
        if elements.iter().all(|v| v.is_finite()) {
            Some(kepler)
        } else {
            None
        }
    }

    /// Returns true if this vehicle declared itself healthy
    pub fn is_healthy(&self) -> bool {
        self.health == 0.0
    }

    /// Returns the (bias, drift, drift rate) clock terms
    pub fn sv_clock(&self) -> (f64, f64, f64) {
        (self.af0, self.af1, self.af2)
    }

    /// Evaluates the clock correction polynomial [s],
    /// `dt` being the elapsed time since reference epoch [s]
    pub fn clock_correction(&self, dt: f64) -> f64 {
        self.af0 + self.af1 * dt + self.af2 * dt.powi(2)
    }

    /// Retrieves a field by its [NAV_SCHEMA] name.
    /// Returns None for unknown keys, and for RINEX-only keys
    /// of records that do not carry them.
    pub fn get(&self, key: &str) -> Option<f64> {
        let p = self.perturbations.as_ref();
        let n = self.nav.as_ref();
        match key {
            "af0" => Some(self.af0),
            "af1" => Some(self.af1),
            "af2" => Some(self.af2),
            "e" => Some(self.e),
            "sqrt_a" => Some(self.sqrt_a),
            "Omega0" => Some(self.omega_0),
            "omega" => Some(self.omega),
            "M0" => Some(self.m_0),
            "i0" => Some(self.i_0),
            "OmegaDot" => Some(self.omega_dot),
            "toe" => Some(self.toe),
            "health" => Some(self.health),
            "GPSWeek" => Some(self.week),
            "Crs" => p.map(|p| p.crs),
            "Cus" => p.map(|p| p.cus),
            "Cuc" => p.map(|p| p.cuc),
            "Cic" => p.map(|p| p.cic),
            "Cis" => p.map(|p| p.cis),
            "Crc" => p.map(|p| p.crc),
            "delta_n" => p.map(|p| p.delta_n),
            "IDOT" => p.map(|p| p.idot),
            "IODE" => n.map(|n| n.iode),
            "IODC" => n.map(|n| n.iodc),
            "accuracy" => n.map(|n| n.accuracy),
            "TGD" => n.map(|n| n.tgd),
            "L2" => n.map(|n| n.l2_codes),
            "L2P" => n.map(|n| n.l2p_flag),
            "Tom" => n.map(|n| n.tom),
            _ => None,
        }
    }

    /// Assigns a field by its [NAV_SCHEMA] name.
    /// Assigning a RINEX-only key creates the corresponding terms.
    /// Returns false for unknown keys.
    pub fn set(&mut self, key: &str, value: f64) -> bool {
        match key {
            "af0" => self.af0 = value,
            "af1" => self.af1 = value,
            "af2" => self.af2 = value,
            "e" => self.e = value,
            "sqrt_a" => self.sqrt_a = value,
            "Omega0" => self.omega_0 = value,
            "omega" => self.omega = value,
            "M0" => self.m_0 = value,
            "i0" => self.i_0 = value,
            "OmegaDot" => self.omega_dot = value,
            "toe" => self.toe = value,
            "health" => self.health = value,
            "GPSWeek" => self.week = value,
            "Crs" | "Cus" | "Cuc" | "Cic" | "Cis" | "Crc" | "delta_n" | "IDOT" => {
                let p = self.perturbations.get_or_insert_with(Default::default);
                match key {
                    "Crs" => p.crs = value,
                    "Cus" => p.cus = value,
                    "Cuc" => p.cuc = value,
                    "Cic" => p.cic = value,
                    "Cis" => p.cis = value,
                    "Crc" => p.crc = value,
                    "delta_n" => p.delta_n = value,
                    _ => p.idot = value,
                }
            },
            "IODE" | "IODC" | "accuracy" | "TGD" | "L2" | "L2P" | "Tom" => {
                let n = self.nav.get_or_insert_with(Default::default);
                match key {
                    "IODE" => n.iode = value,
                    "IODC" => n.iodc = value,
                    "accuracy" => n.accuracy = value,
                    "TGD" => n.tgd = value,
                    "L2" => n.l2_codes = value,
                    "L2P" => n.l2p_flag = value,
                    _ => n.tom = value,
                }
            },
            _ => return false,
        }
        true
    }
}

/// Parses a numerical field. Empty or malformed content is NaN.
/// Fortran `D` exponents are supported.
pub(crate) fn parse_f64(content: &str) -> f64 {
    content
        .trim()
        .replace('D', "E")
        .parse::<f64>()
        .unwrap_or(f64::NAN)
}
