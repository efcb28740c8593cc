//! Reading entity and its log record form
//!
//! A [`Reading`] is immutable once constructed: it is serialized once into
//! the append-only log and never mutated or deleted individually. Its `id`
//! survives deep sleep in retained memory and increases by exactly one per
//! successfully logged cycle.

use core::fmt::Write as _;

use crate::constants::RECORD_CAPACITY;
use crate::time::{DateStamp, TimeStamp};

/// One timestamped temperature measurement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Reading {
    /// Monotonically increasing id, retained across sleep cycles.
    pub id: u32,
    /// Calendar date at sample time.
    pub date: DateStamp,
    /// Clock time at sample time.
    pub time: TimeStamp,
    /// Temperature in Celsius.
    pub celsius: f32,
}

impl Reading {
    /// Serialize into one CRLF-terminated log record line.
    ///
    /// Format: `<id>,<date>,<time>,<celsius>` with the temperature at two
    /// decimals, matching the header written by the log store. Returns
    /// `None` only if the fields exceed the record capacity.
    pub fn record(&self) -> Option<heapless::String<RECORD_CAPACITY>> {
        let mut line = heapless::String::new();
        write!(
            line,
            "{},{},{},{:.2}\r\n",
            self.id, self.date, self.time, self.celsius
        )
        .ok()?;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(date: &str, time: &str) -> (DateStamp, TimeStamp) {
        let mut d = DateStamp::new();
        let mut t = TimeStamp::new();
        d.push_str(date).unwrap();
        t.push_str(time).unwrap();
        (d, t)
    }

    #[test]
    fn record_matches_log_format() {
        let (date, time) = stamp("2018-05-28", "16:00:13");
        let reading = Reading {
            id: 7,
            date,
            time,
            celsius: 21.5,
        };
        assert_eq!(
            reading.record().unwrap().as_str(),
            "7,2018-05-28,16:00:13,21.50\r\n"
        );
    }

    #[test]
    fn record_keeps_sign_and_rounding() {
        let (date, time) = stamp("2023-01-02", "03:04:05");
        let reading = Reading {
            id: 4_000_000_000,
            date,
            time,
            celsius: -9.876,
        };
        assert_eq!(
            reading.record().unwrap().as_str(),
            "4000000000,2023-01-02,03:04:05,-9.88\r\n"
        );
    }
}
