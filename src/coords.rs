//! Observer position and viewing geometry:
//! ECEF to geocentric (ground track) and topocentric (sky) coordinates.
use std::{collections::BTreeMap, f64::consts::TAU};

use dms_coordinates::DMS;
use hifitime::Epoch;
use map_3d::{geodetic2ecef, Ellipsoid};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    kepler::{PositionSet, Vector3D},
    prelude::SV,
};

/// Ground track: vehicles, then epochs, ascending.
pub type GeocentricSet = BTreeMap<SV, BTreeMap<Epoch, GeocentricPosition>>;

/// Sky view from the observer: vehicles, then epochs, ascending.
pub type TopocentricSet = BTreeMap<SV, BTreeMap<Epoch, TopocentricPosition>>;

/// [ObserverPosition] on the WGS84 ellipsoid
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObserverPosition {
    /// Latitude [ddeg]
    pub latitude: f64,
    /// Longitude [ddeg]
    pub longitude: f64,
    /// Ellipsoidal height [m]
    pub height: f64,
}

impl From<(f64, f64, f64)> for ObserverPosition {
    fn from(geo: (f64, f64, f64)) -> Self {
        Self::new(geo.0, geo.1, geo.2)
    }
}

impl ObserverPosition {
    /// Builds Self from geodetic coordinates in ddeg, height in meters
    pub fn new(latitude: f64, longitude: f64, height: f64) -> Self {
        Self {
            latitude,
            longitude,
            height,
        }
    }

    /// Converts Self to ECEF WGS84 [m]
    pub fn to_ecef_wgs84(&self) -> Vector3D {
        geodetic2ecef(
            self.latitude.to_radians(),
            self.longitude.to_radians(),
            self.height,
            Ellipsoid::WGS84,
        )
    }

    /// Returns the ECEF to local (East, North, Up) rotation matrix, row wise
    pub fn enu_rotation(&self) -> [[f64; 3]; 3] {
        let (sin_lat, cos_lat) = self.latitude.to_radians().sin_cos();
        let (sin_lon, cos_lon) = self.longitude.to_radians().sin_cos();
        [
            [-sin_lon, cos_lon, 0.0],
            [-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat],
            [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat],
        ]
    }
}

impl std::fmt::Display for ObserverPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} {:.3}m",
            DMS::from_ddeg_latitude(self.latitude),
            DMS::from_ddeg_longitude(self.longitude),
            self.height
        )
    }
}

/// Geocentric (spherical) projection of an ECEF position
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeocentricPosition {
    /// Latitude [ddeg]
    pub latitude: f64,
    /// Longitude [ddeg]
    pub longitude: f64,
}

/// Topocentric fix of a vehicle, as seen from the observer
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TopocentricPosition {
    /// Elevation above local horizon [rad]
    pub elevation: f64,
    /// Azimuth, clockwise from North, in [0, 2π[ [rad]
    pub azimuth: f64,
}

impl TopocentricPosition {
    /// Elevation [ddeg]
    pub fn elevation_deg(&self) -> f64 {
        self.elevation.to_degrees()
    }
    /// Azimuth [ddeg]
    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth.to_degrees()
    }
}

/// Brings an angle into [0, 2π[
fn normalize_azimuth(azimuth: f64) -> f64 {
    let azimuth = azimuth.rem_euclid(TAU);
    // rem_euclid may round up to TAU itself
    if azimuth >= TAU {
        0.0
    } else {
        azimuth
    }
}

/// Projects an ECEF position onto the geocentric sphere.
/// Returns None for the origin.
pub fn to_geocentric(ecef: Vector3D) -> Option<GeocentricPosition> {
    let (x, y, z) = ecef;
    let r = (x.powi(2) + y.powi(2) + z.powi(2)).sqrt();
    if r == 0.0 || !r.is_finite() {
        return None;
    }
    Some(GeocentricPosition {
        latitude: (z / r).asin().to_degrees(),
        longitude: y.atan2(x).to_degrees(),
    })
}

/// Topocentric fix from pre computed observer ECEF position and rotation
fn topocentric_fix(
    ecef: Vector3D,
    observer_ecef: Vector3D,
    rotation: &[[f64; 3]; 3],
) -> Option<TopocentricPosition> {
    let d = [
        ecef.0 - observer_ecef.0,
        ecef.1 - observer_ecef.1,
        ecef.2 - observer_ecef.2,
    ];
    let range = (d[0].powi(2) + d[1].powi(2) + d[2].powi(2)).sqrt();
    if range == 0.0 || !range.is_finite() {
        return None;
    }
    let project = |row: &[f64; 3]| row[0] * d[0] + row[1] * d[1] + row[2] * d[2];
    let (east, north, up) = (
        project(&rotation[0]),
        project(&rotation[1]),
        project(&rotation[2]),
    );
    Some(TopocentricPosition {
        elevation: (up / range).clamp(-1.0, 1.0).asin(),
        azimuth: normalize_azimuth(east.atan2(north)),
    })
}

/// Computes the topocentric fix of an ECEF position, as seen from the observer.
/// Returns None when the vehicle is located on the observer.
pub fn to_topocentric(ecef: Vector3D, observer: &ObserverPosition) -> Option<TopocentricPosition> {
    topocentric_fix(ecef, observer.to_ecef_wgs84(), &observer.enu_rotation())
}

/// Projects every propagated position onto the geocentric sphere
pub fn geocentric(positions: &PositionSet) -> GeocentricSet {
    positions
        .iter()
        .map(|(sv, epochs)| {
            let track = epochs
                .iter()
                .filter_map(|(t, ecef)| Some((*t, to_geocentric(*ecef)?)))
                .collect();
            (*sv, track)
        })
        .collect()
}

/// Computes the topocentric fix of every propagated position
pub fn topocentric(positions: &PositionSet, observer: &ObserverPosition) -> TopocentricSet {
    let observer_ecef = observer.to_ecef_wgs84();
    let rotation = observer.enu_rotation();
    positions
        .iter()
        .map(|(sv, epochs)| {
            let sky = epochs
                .iter()
                .filter_map(|(t, ecef)| {
                    Some((*t, topocentric_fix(*ecef, observer_ecef, &rotation)?))
                })
                .collect();
            (*sv, sky)
        })
        .collect()
}
