use crate::{
    coords::{self, ObserverPosition, TopocentricSet},
    kepler::{PositionSet, Vector3D},
    prelude::{Epoch, TimeScale, SV},
};

/* Navigation files generators */
mod almanac;
pub use almanac::{almanac, AlmanacColumn};

mod nav;
pub use nav::{constellation, rinex_navigation, NavRecord};

/// 2023-01-01T00:00:00 GPST in continuous GPS seconds
pub const GPS_SECONDS_2023: f64 = 1356566400.0;

/// Builds a GPST epoch
pub fn gpst(y: i32, m: u8, d: u8, hh: u8, mm: u8, ss: u8) -> Epoch {
    Epoch::from_gregorian(y, m, d, hh, mm, ss, 0, TimeScale::GPST)
}

/*
 * ECEF position of a vehicle seen at given elevation and azimuth [ddeg],
 * `range` meters away from the observer
 */
pub fn sky_position(
    observer: &ObserverPosition,
    elevation_deg: f64,
    azimuth_deg: f64,
    range: f64,
) -> Vector3D {
    let (sin_el, cos_el) = elevation_deg.to_radians().sin_cos();
    let (sin_az, cos_az) = azimuth_deg.to_radians().sin_cos();
    let enu = [range * cos_el * sin_az, range * cos_el * cos_az, range * sin_el];
    let r = observer.enu_rotation();
    let (x0, y0, z0) = observer.to_ecef_wgs84();
    (
        x0 + r[0][0] * enu[0] + r[1][0] * enu[1] + r[2][0] * enu[2],
        y0 + r[0][1] * enu[0] + r[1][1] * enu[1] + r[2][1] * enu[2],
        z0 + r[0][2] * enu[0] + r[1][2] * enu[1] + r[2][2] * enu[2],
    )
}

/*
 * Builds a one epoch sky: (vehicle, elevation, azimuth) [ddeg],
 * all vehicles 20'000 km away
 */
pub fn sky(
    observer: &ObserverPosition,
    epoch: Epoch,
    fixes: &[(SV, f64, f64)],
) -> (PositionSet, TopocentricSet) {
    let mut positions = PositionSet::new();
    for (sv, elevation, azimuth) in fixes {
        let ecef = sky_position(observer, *elevation, *azimuth, 20.0E6);
        positions.entry(*sv).or_default().insert(epoch, ecef);
    }
    let topocentric = coords::topocentric(&positions, observer);
    (positions, topocentric)
}

/// Asserts two floats are within `tolerance`
pub fn assert_close(value: f64, expected: f64, tolerance: f64, context: &str) {
    assert!(
        (value - expected).abs() <= tolerance,
        "{}: {} != {} (tolerance {})",
        context,
        value,
        expected,
        tolerance
    );
}
