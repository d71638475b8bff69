//! sv.rs describes a satellite vehicle
use crate::constellation::{Constellation, Error as ConstellationError};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};

/// ̀`SV` describes a Satellite Vehicle.
/// Ordering follows [Constellation] priority, then ascending number.
/// Serdes uses the "G01" descriptor, so `SV` may key maps.
#[derive(Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SV {
    /// `GNSS` Constellation to which this vehicle is tied to
    pub constellation: Constellation,
    /// identification # for this vehicle, within its constellation
    pub prn: u16,
}

/// ̀`SV` parsing & identification related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("empty vehicle descriptor")]
    Empty,
    #[error("unknown constellation")]
    Constellation(#[from] ConstellationError),
    #[error("failed to parse prn")]
    ParseIntError(#[from] std::num::ParseIntError),
}

/// Almanac raw identifier ranges: (constellation, first id, last id).
/// Vehicle number is the offset within the range, starting at 1.
const ALMANAC_ID_RANGES: [(Constellation, u16, u16); 5] = [
    (Constellation::GPS, 1, 37),
    (Constellation::Glonass, 38, 64),
    (Constellation::QZSS, 111, 118),
    (Constellation::Galileo, 201, 263),
    (Constellation::BeiDou, 264, 310),
];

impl SV {
    /// Creates a new `SV` descriptor
    pub const fn new(constellation: Constellation, prn: u16) -> Self {
        Self { constellation, prn }
    }

    /// Maps a raw Almanac satellite identifier to an `SV`.
    /// Identifiers outside of all known ranges are kept as-is,
    /// tied to the generic [Constellation::SBAS] label.
    pub fn from_almanac_id(id: u16) -> Self {
        ALMANAC_ID_RANGES
            .iter()
            .find(|(_, first, last)| (*first..=*last).contains(&id))
            .map(|(constellation, first, _)| Self::new(*constellation, id - first + 1))
            .unwrap_or(Self::new(Constellation::SBAS, id))
    }
}

impl std::fmt::Display for SV {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{:02}", self.constellation.to_1_letter_code(), self.prn)
    }
}

impl std::str::FromStr for SV {
    type Err = Error;
    /// Builds an `SV` from XYY identification code.
    /// code should follow rinex conventions.
    /// This method tolerates whitespaces between the
    /// constellation letter and the number, and trailing whitespaces
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let letter = s.chars().next().ok_or(Error::Empty)?;
        let constellation = Constellation::from_1_letter_code(letter)?;
        let prn = s[letter.len_utf8()..].trim().parse::<u16>()?;
        Ok(Self { constellation, prn })
    }
}

#[cfg(feature = "serde")]
impl Serialize for SV {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SV {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Self>().map_err(D::Error::custom)
    }
}
