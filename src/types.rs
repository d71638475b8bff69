//! Input file classification
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Header label carrying the file type
const VERSION_TYPE_LABEL: &str = "RINEX VERSION / TYPE";

/// Describes the kind of `RINEX` file we were handed.
/// Classification is advisory: only [FileKind::Navigation]
/// content is numerically exploited.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FileKind {
    /// Navigation Data (NAV): broadcast ephemeris
    Navigation,
    /// Observation Data (OBS)
    Observation,
    /// Meteorological Data (MET)
    Meteo,
    /// Not recognized, left to the caller to report
    #[default]
    Unknown,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Navigation => write!(f, "NAVIGATION DATA"),
            Self::Observation => write!(f, "OBSERVATION DATA"),
            Self::Meteo => write!(f, "METEOROLOGICAL DATA"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Classifies given file content by scanning the version/type header line.
/// Returns [FileKind::Unknown] when no marker matches.
pub fn check_file_kind(content: &str) -> FileKind {
    let line = match content
        .lines()
        .find(|line| line.contains(VERSION_TYPE_LABEL))
    {
        Some(line) => line,
        None => return FileKind::Unknown,
    };

    // markers live before the label
    let descriptor = line
        .split(VERSION_TYPE_LABEL)
        .next()
        .unwrap_or_default()
        .to_uppercase();

    if descriptor.contains("NAV") {
        FileKind::Navigation
    } else if descriptor.contains("OBSERVATION") || descriptor.contains("OBS DATA") {
        FileKind::Observation
    } else if descriptor.contains("METEO") {
        FileKind::Meteo
    } else {
        FileKind::Unknown
    }
}
