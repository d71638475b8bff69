use super::gpst;
use crate::prelude::{Epoch, SV};

/// One RINEX Navigation record: values in [crate::ephemeris::NAV_SCHEMA] order
#[derive(Debug, Clone)]
pub struct NavRecord {
    pub sv: SV,
    /// (y, m, d, hh, mm, ss) GPST
    pub date: (i32, u8, u8, u8, u8, u8),
    pub values: [f64; 28],
}

impl NavRecord {
    /// Typical GPS vehicle
    pub fn gps(sv: SV, date: (i32, u8, u8, u8, u8, u8)) -> Self {
        Self {
            sv,
            date,
            values: [
                -4.656612873077E-10,
                -1.136868377216E-12,
                0.0,
                49.0,
                -1.20E1,
                4.5E-9,
                1.2,
                -6.4E-7,
                1.0E-2,
                8.1E-6,
                5.1536E3,
                0.0,
                1.1E-7,
                0.1,
                -2.2E-8,
                0.96,
                2.2E2,
                -1.57,
                -7.8E-9,
                2.1E-10,
                1.0,
                2243.0,
                0.0,
                2.0,
                0.0,
                -1.1E-8,
                49.0,
                5.1E2,
            ],
        }
    }

    pub fn epoch(&self) -> Epoch {
        let (y, m, d, hh, mm, ss) = self.date;
        gpst(y, m, d, hh, mm, ss)
    }

    fn format(&self, fortran: bool) -> String {
        let (y, m, d, hh, mm, ss) = self.date;
        let mut slots = vec![format!(
            "{} {:04} {:02} {:02} {:02} {:02} {:02}",
            self.sv, y, m, d, hh, mm, ss
        )];
        for value in self.values.iter() {
            let mut field = format!("{:19.12E}", value);
            if fortran {
                field = field.replace('E', "D");
            }
            slots.push(field);
        }
        let mut lines = Vec::new();
        for (index, chunk) in slots.chunks(4).enumerate() {
            let mut line = if index == 0 {
                String::new()
            } else {
                String::from("    ")
            };
            for slot in chunk {
                line.push_str(slot);
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

/*
 * Generates RINEX Navigation content.
 * `fortran` selects D exponents.
 */
pub fn rinex_navigation(records: &[NavRecord], fortran: bool) -> String {
    let mut content = String::new();
    content.push_str(
        "     3.04           N: GNSS NAV DATA    M: MIXED            RINEX VERSION / TYPE\n",
    );
    content.push_str(
        "gnss-planning                           20230101 000000 UTC PGM / RUN BY / DATE\n",
    );
    content.push_str(
        "                                                            END OF HEADER\n",
    );
    for record in records {
        content.push_str(&record.format(fortran));
        content.push('\n');
    }
    content
}

/*
 * 24 vehicles GPS like constellation: 6 planes, 4 slots each,
 * referenced to 2023-01-01T00:00:00 GPST
 */
pub fn constellation() -> Vec<NavRecord> {
    let mut records = Vec::with_capacity(24);
    for plane in 0..6_u16 {
        for slot in 0..4_u16 {
            let prn = plane * 4 + slot + 1;
            let mut record = NavRecord::gps(
                SV::new(crate::prelude::Constellation::GPS, prn),
                (2023, 1, 1, 0, 0, 0),
            );
            // M0, Omega0
            record.values[6] = (f64::from(slot) * 90.0 + f64::from(plane) * 15.0).to_radians();
            record.values[13] = (f64::from(plane) * 60.0).to_radians();
            records.push(record);
        }
    }
    records
}
