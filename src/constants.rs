//! const values used in orbit and geometry calculations

/// WGS84 earth gravitational parameter [m^3.s^-2]
pub(crate) const GM: f64 = 3.986005E14;

/// WGS84 earth rotation rate [rad.s^-1]
pub(crate) const OMEGA_E: f64 = 7.2921151467E-5;

/// Kepler solver settings
pub(crate) struct Kepler;

impl Kepler {
    /// Fixed point iteration stops once two successive
    /// eccentric anomalies are closer than this [rad]
    pub const TOLERANCE: f64 = 1.0E-12;
    /// Maximum number of iterations
    pub const MAX_ITER: usize = 30;
}

/// Seconds in one GPS week
pub(crate) const SECONDS_PER_WEEK: f64 = 604800.0;

/// Any DOP component above this value is considered numerically degenerate
pub(crate) const DOP_DEGENERACY_THRESHOLD: f64 = 100.0;
