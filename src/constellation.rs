//! `GNSS` constellations & associated methods
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq)]
/// Constellation parsing & identification related errors
pub enum Error {
    #[error("code length mismatch, expecting {0} got {1}")]
    CodeLengthMismatch(usize, usize),
    #[error("unknown constellation code \"{0}\"")]
    UnknownCode(String),
}

/// Describes all `GNSS` constellations we plan with.
/// Declaration order is the display priority (G, R, J, E, C, ...):
/// sorting vehicles sorts them by constellation first.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constellation {
    /// `GPS` american constellation
    #[default]
    GPS,
    /// `Glonass` russian constellation
    Glonass,
    /// `QZSS` japanese constellation
    QZSS,
    /// `Galileo` european constellation
    Galileo,
    /// `BeiDou` chinese constellation
    BeiDou,
    /// `IRNSS` indian constellation
    IRNSS,
    /// `SBAS` vehicles, also used for any identifier
    /// that does not belong to a known constellation
    SBAS,
}

impl Constellation {
    /// Identifies `gnss` constellation from given 1 letter code.
    /// Given code should match official RINEX codes,
    /// vendor code `D` is understood as Galileo.
    /// This method is case insensitive
    pub fn from_1_letter_code(code: char) -> Result<Self, Error> {
        match code.to_ascii_uppercase() {
            'G' => Ok(Self::GPS),
            'R' => Ok(Self::Glonass),
            'J' => Ok(Self::QZSS),
            'E' | 'D' => Ok(Self::Galileo),
            'C' => Ok(Self::BeiDou),
            'I' => Ok(Self::IRNSS),
            'S' => Ok(Self::SBAS),
            _ => Err(Error::UnknownCode(code.to_string())),
        }
    }
    /// Converts self to 1 letter code (RINEX standard code)
    pub fn to_1_letter_code(&self) -> char {
        match self {
            Self::GPS => 'G',
            Self::Glonass => 'R',
            Self::QZSS => 'J',
            Self::Galileo => 'E',
            Self::BeiDou => 'C',
            Self::IRNSS => 'I',
            Self::SBAS => 'S',
        }
    }
    /// Converts self to 3 letter code (RINEX standard code)
    pub fn to_3_letter_code(&self) -> &str {
        match self {
            Self::GPS => "GPS",
            Self::Glonass => "GLO",
            Self::QZSS => "QZS",
            Self::Galileo => "GAL",
            Self::BeiDou => "BDS",
            Self::IRNSS => "IRN",
            Self::SBAS => "SBS",
        }
    }
    /// Returns true if vehicles of this constellation are described
    /// by Keplerian elements in broadcast navigation messages
    pub fn is_keplerian(&self) -> bool {
        !matches!(self, Self::Glonass | Self::SBAS)
    }
}

impl std::fmt::Display for Constellation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_3_letter_code())
    }
}

impl std::str::FromStr for Constellation {
    type Err = Error;
    /// Identifies `gnss` constellation from given
    /// official 1/3 letter RINEX code. Case insensitive.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let code = code.trim();
        match code.len() {
            1 => code
                .chars()
                .next()
                .ok_or(Error::CodeLengthMismatch(1, 0))
                .and_then(Self::from_1_letter_code),
            3 => match code.to_lowercase().as_str() {
                "gps" => Ok(Self::GPS),
                "glo" => Ok(Self::Glonass),
                "qzs" => Ok(Self::QZSS),
                "gal" => Ok(Self::Galileo),
                "bds" => Ok(Self::BeiDou),
                "irn" => Ok(Self::IRNSS),
                "sbs" => Ok(Self::SBAS),
                _ => Err(Error::UnknownCode(code.to_string())),
            },
            len => Err(Error::CodeLengthMismatch(1, len)),
        }
    }
}
