//! Almanac (fixed width, column oriented) parser.
//!
//! One block is 13 text rows, each row holding one 10 character
//! wide field per vehicle. Each column describes one vehicle:
//!
//! | row | content                                   |
//! |-----|-------------------------------------------|
//! |  0  | raw vehicle identifier                    |
//! |  1  | health                                    |
//! |  2  | eccentricity                              |
//! |  3  | sqrt(a) [m^1/2]                           |
//! |  4  | Omega0 [deg]                              |
//! |  5  | omega [deg]                               |
//! |  6  | M0 [deg]                                  |
//! |  7  | toe [s]                                   |
//! |  8  | inclination offset to 54° [deg]           |
//! |  9  | OmegaDot [deg per 1000 s]                 |
//! | 10  | af0 [s]                                   |
//! | 11  | af1 [s.s^-1]                              |
//! | 12  | GPS week                                  |
#[cfg(feature = "log")]
use log::{debug, warn};

use hifitime::Epoch;

use super::{parse_f64, Ephemeris, EphemerisSet};
use crate::{constants::SECONDS_PER_WEEK, epoch::from_gps_seconds, prelude::SV};

/// Number of rows in one block
const BLOCK_ROWS: usize = 13;

/// Width of one field
const FIELD_WIDTH: usize = 10;

/// Inclination is expressed as an offset to this value [deg]
const INCLINATION_BIAS_DEG: f64 = 54.0;

/// Returns field content of given column, empty when the row is too short.
fn field(row: &str, column: usize) -> &str {
    let start = column * FIELD_WIDTH;
    let end = (start + FIELD_WIDTH).min(row.len());
    row.get(start..end).unwrap_or_default()
}

/// Parses one column of a block.
/// Returns None when the vehicle, its toe or its week is missing.
fn parse_column(rows: &[&str], column: usize) -> Option<(SV, Epoch, Ephemeris)> {
    let value = |row: usize| {
        rows.get(row)
            .map(|r| parse_f64(field(r, column)))
            .unwrap_or(f64::NAN)
    };

    let id = field(rows[0], column).trim().parse::<u16>().ok()?;
    let sv = SV::from_almanac_id(id);

    let toe = value(7);
    let week = value(12);
    let toc = from_gps_seconds(toe + week * SECONDS_PER_WEEK)?;

    let eph = Ephemeris {
        health: value(1),
        e: value(2),
        sqrt_a: value(3),
        omega_0: value(4).to_radians(),
        omega: value(5).to_radians(),
        m_0: value(6).to_radians(),
        toe,
        i_0: (value(8) + INCLINATION_BIAS_DEG).to_radians(),
        omega_dot: value(9).to_radians() / 1000.0,
        af0: value(10),
        af1: value(11),
        af2: 0.0,
        week,
        perturbations: None,
        nav: None,
    };

    Some((sv, toc, eph))
}

/// Parses one block, extracting every column it holds.
fn parse_block(rows: &[&str], set: &mut EphemerisSet) {
    if rows.len() < BLOCK_ROWS {
        #[cfg(feature = "log")]
        warn!("almanac: truncated block ({} rows)", rows.len());
    }

    let columns = rows
        .iter()
        .map(|row| row.trim_end().len().div_ceil(FIELD_WIDTH))
        .max()
        .unwrap_or_default();

    for column in 0..columns {
        match parse_column(rows, column) {
            Some((sv, toc, eph)) => {
                set.entry(sv).or_default().insert(toc, eph);
            },
            None => {
                #[cfg(feature = "log")]
                debug!("almanac: skipped column #{}", column);
            },
        }
    }
}

/// Parses Almanac content into an [EphemerisSet].
/// This never fails: columns missing their vehicle, toe or week
/// are skipped, malformed numerical fields are stored as NaN.
/// Blank lines separate blocks; within a block, a blank row
/// is a row of missing fields.
pub fn parse_almanac(content: &str) -> EphemerisSet {
    let mut set = EphemerisSet::new();
    let mut rows = Vec::<&str>::with_capacity(BLOCK_ROWS);

    for line in content.lines() {
        if rows.is_empty() && line.trim().is_empty() {
            continue;
        }
        rows.push(line);
        if rows.len() == BLOCK_ROWS {
            parse_block(&rows, &mut set);
            rows.clear();
        }
    }

    if !rows.is_empty() {
        parse_block(&rows, &mut set);
    }

    set
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::Constellation;
    #[test]
    fn single_column() {
        let rows = [
            "1", "0", "0.0100", "5153.6", "10.0", "-90.0", "180.0", "589824", "1.0", "-0.45",
            "1.0E-4", "1.0E-12", "2200",
        ];
        let content = rows.join("\n");
        let set = parse_almanac(&content);
        assert_eq!(set.len(), 1);
        let (sv, records) = set.iter().next().unwrap();
        assert_eq!(*sv, SV::new(Constellation::GPS, 1));
        let (toc, eph) = records.iter().next().unwrap();
        assert_eq!(toc.to_gpst_seconds(), 589824.0 + 2200.0 * 604800.0);
        assert_eq!(eph.i_0, 55.0_f64.to_radians());
        assert!(eph.perturbations.is_none());
    }
    #[test]
    fn missing_identifier() {
        let rows = [
            format!("{:10}{:<10}", "", "2"),
            format!("{:<10}{:<10}", "0", "0"),
            format!("{:<10}{:<10}", "0.01", "0.02"),
            format!("{:<10}{:<10}", "5153.6", "5153.7"),
            format!("{:<10}{:<10}", "10.0", "20.0"),
            format!("{:<10}{:<10}", "-90.0", "90.0"),
            format!("{:<10}{:<10}", "180.0", "0.0"),
            format!("{:<10}{:<10}", "589824", "589824"),
            format!("{:<10}{:<10}", "1.0", "0.5"),
            format!("{:<10}{:<10}", "-0.45", "-0.45"),
            format!("{:<10}{:<10}", "0.0", "0.0"),
            format!("{:<10}{:<10}", "0.0", "0.0"),
            format!("{:<10}{:<10}", "2200", "2200"),
        ];
        let set = parse_almanac(&rows.join("\n"));
        assert_eq!(set.len(), 1);
        assert!(set.contains_key(&SV::new(Constellation::GPS, 2)));
    }
}
