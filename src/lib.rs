#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::type_complexity)]

/*
 * GNSS planning is part of the Geo-Rust framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al.
 * This framework is shipped under the Mozilla Public License 2.0.
 *
 * Documentation: https://github.com/rtk-rs/gnss-planning
 */

pub mod cfg;
pub mod constellation;
pub mod coords;
pub mod dop;
pub mod ephemeris;
pub mod epoch;
pub mod kepler;
pub mod session;
pub mod sv;
pub mod types;

mod constants;
mod error;
mod linalg;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    // export
    pub use crate::{
        cfg::{Config, TimeWindow},
        constellation::Constellation,
        coords::{
            GeocentricPosition, GeocentricSet, ObserverPosition, TopocentricPosition,
            TopocentricSet,
        },
        dop::{DilutionOfPrecision, DopSet, SelectionCriteria},
        ephemeris::{
            parse_almanac, parse_rinex_navigation, Ephemeris, EphemerisSet, Kepler, NavTerms,
            Perturbations,
        },
        error::ParsingError,
        kepler::{propagate, PositionSet, Vector3D},
        session::{Event, Session, Solutions},
        sv::SV,
        types::{check_file_kind, FileKind},
    };

    // pub re-export
    pub use hifitime::{Duration, Epoch, TimeScale, TimeSeries};
}
