use thiserror::Error;

use crate::sv::Error as SvError;

/// Errors that may rise in Parsing process.
/// Only structural problems are reported: malformed
/// numerical content is never an error, it parses as NaN.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    /// Navigation files must terminate their header section
    #[error("missing \"END OF HEADER\" delimiter")]
    MissingHeaderTerminator,
    /// Record does not have a single line
    #[error("empty record")]
    EmptyRecord,
    /// Record line is too short to contain the vehicle descriptor
    #[error("missing vehicle descriptor")]
    MissingSatellite,
    /// Vehicle descriptor could not be interpreted
    #[error("invalid vehicle descriptor: {0}")]
    SatelliteParsing(#[from] SvError),
    /// Record timestamp is missing or is not a valid calendar date
    #[error("invalid timestamp \"{0}\"")]
    DateTimeParsing(String),
}
