//! GPS time helpers.
//! Every [Epoch] handled by this crate is expressed in [TimeScale::GPST]:
//! continuous seconds since 1980-01-06T00:00:00, without leap seconds.
use hifitime::{Epoch, TimeScale};

use crate::error::ParsingError;

/// Builds an [Epoch] from continuous GPS seconds.
/// Returns None on non finite input.
pub fn from_gps_seconds(seconds: f64) -> Option<Epoch> {
    if seconds.is_finite() {
        Some(Epoch::from_gpst_seconds(seconds))
    } else {
        None
    }
}

/// Returns continuous GPS seconds of given [Epoch]
pub fn to_gps_seconds(epoch: Epoch) -> f64 {
    epoch.to_gpst_seconds()
}

/// Parses a calendar timestamp "yyyy mm dd hh mm ss[.sss]",
/// as found in navigation records, expressed in GPS time.
/// Two digit years are understood as 1980-2079.
pub(crate) fn parse_gpst(content: &str) -> Result<Epoch, ParsingError> {
    let err = || ParsingError::DateTimeParsing(content.trim().to_string());
    let items: Vec<&str> = content.split_ascii_whitespace().collect();
    if items.len() != 6 {
        return Err(err());
    }

    let mut y = items[0].parse::<i32>().map_err(|_| err())?;
    if y < 100 {
        y += if y >= 80 { 1900 } else { 2000 };
    }

    let mut fields = [0_u8; 4];
    for (field, item) in fields.iter_mut().zip(&items[1..5]) {
        *field = item.parse::<u8>().map_err(|_| err())?;
    }
    let [m, d, hh, mm] = fields;

    let seconds = items[5].parse::<f64>().map_err(|_| err())?;
    if !(0.0..61.0).contains(&seconds) {
        return Err(err());
    }
    let ss = seconds.trunc();
    let nanos = ((seconds - ss) * 1.0E9).round() as u32;

    Epoch::maybe_from_gregorian(y, m, d, hh, mm, ss as u8, nanos, TimeScale::GPST)
        .map_err(|_| err())
}
