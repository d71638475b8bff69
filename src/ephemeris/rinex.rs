//! RINEX Navigation (V3 layout) parser
#[cfg(feature = "log")]
use log::{debug, warn};

use std::str::FromStr;

use hifitime::Epoch;

use super::{parse_f64, Ephemeris, EphemerisSet, NAV_SCHEMA};
use crate::{epoch::parse_gpst, error::ParsingError, prelude::SV};

/// End of Header section reached
pub const HEADER_END_MARKER: &str = "END OF HEADER";

/// Maximal number of lines of one record
const RECORD_LINES: usize = 8;

/// Number of field slots per line
const SLOTS_PER_LINE: usize = 4;

/// Offset of the first field slot
const SLOT_OFFSET: usize = 4;

/// Width of one field slot
const SLOT_WIDTH: usize = 19;

/// Vehicle descriptor length, starting line #1
const SV_DESCRIPTOR_LEN: usize = 3;

/// Returns true if this line starts a new record:
/// only the first line of a record starts with the vehicle descriptor
fn is_new_record(line: &str) -> bool {
    line.chars().next().map_or(false, |c| !c.is_whitespace())
}

/// Returns line content in [start, end[, truncated to line length
fn substr(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or_default()
}

/// Returns content of given field slot
fn slot(line: &str, index: usize) -> &str {
    let start = SLOT_OFFSET + index * SLOT_WIDTH;
    substr(line, start, start + SLOT_WIDTH)
}

/// Parses one record from its lines.
/// Fails only when the vehicle or its timestamp cannot be identified,
/// missing or malformed orbit fields are NaN.
pub(crate) fn parse_record(lines: &[&str]) -> Result<(SV, Epoch, Ephemeris), ParsingError> {
    let first = lines.first().ok_or(ParsingError::EmptyRecord)?;

    let descriptor = substr(first, 0, SV_DESCRIPTOR_LEN);
    if descriptor.trim().is_empty() {
        return Err(ParsingError::MissingSatellite);
    }
    let sv = SV::from_str(descriptor)?;

    let epoch = parse_gpst(substr(first, SV_DESCRIPTOR_LEN, SLOT_OFFSET + SLOT_WIDTH))?;

    let mut eph = Ephemeris::default();
    for (index, key) in NAV_SCHEMA.iter().enumerate() {
        // first slot of line #1 is the descriptor
        let position = index + 1;
        let value = lines
            .get(position / SLOTS_PER_LINE)
            .map(|line| parse_f64(slot(line, position % SLOTS_PER_LINE)))
            .unwrap_or(f64::NAN);
        eph.set(key, value);
    }

    Ok((sv, epoch, eph))
}

/// Parses and stores one record, malformed records are dropped.
fn store_record(set: &mut EphemerisSet, lines: &[&str]) {
    match parse_record(lines) {
        Ok((sv, epoch, eph)) => {
            #[cfg(feature = "log")]
            debug!("{}({}): parsed ephemeris", sv, epoch);

            set.entry(sv).or_default().insert(epoch, eph);
        },
        Err(_e) => {
            #[cfg(feature = "log")]
            warn!("dropped navigation record: {}", _e);
        },
    }
}

/// Parses RINEX Navigation content into an [EphemerisSet].
/// Fails only when the header terminator is missing. Records that
/// cannot be identified are dropped, malformed fields are NaN.
/// Vehicles come out in constellation priority order, and records
/// of each vehicle in chronological order.
pub fn parse_rinex_navigation(content: &str) -> Result<EphemerisSet, ParsingError> {
    let mut lines = content.lines();

    if !lines.by_ref().any(|line| line.contains(HEADER_END_MARKER)) {
        return Err(ParsingError::MissingHeaderTerminator);
    }

    let mut set = EphemerisSet::new();
    let mut record = Vec::<&str>::with_capacity(RECORD_LINES);

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if is_new_record(line) {
            if !record.is_empty() {
                store_record(&mut set, &record);
                record.clear();
            }
        } else if record.is_empty() {
            #[cfg(feature = "log")]
            debug!("orphan navigation line \"{}\"", line);
            continue;
        }
        if record.len() < RECORD_LINES {
            record.push(line);
        }
    }

    if !record.is_empty() {
        store_record(&mut set, &record);
    }

    Ok(set)
}
