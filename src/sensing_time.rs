//! Sensing time parsing and formatting
//!
//! Landsat products record the scene acquisition time as an ISO-like
//! string, `YYYY-MM-DDTHH:MM:SS` with an optional fractional part. Only
//! the clock portion is of interest, rendered as `HHMMSS`.

use std::fmt;
use std::str::FromStr;
use chrono::{NaiveDateTime, Timelike};
use log::debug;

use crate::errors::{RasterError, RasterResult};

/// Name of the metadata attribute holding the acquisition time
pub const SENSING_TIME_KEY: &str = "SENSING_TIME";

/// Pattern the truncated timestamp must match
pub const SENSING_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Acquisition time of a scene, to whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SensingTime(NaiveDateTime);

impl SensingTime {
    /// Parses a raw attribute value
    ///
    /// Everything from the first `.` on is dropped before parsing, so
    /// fractional seconds are ignored rather than rounded.
    pub fn parse(value: &str) -> RasterResult<Self> {
        let truncated = truncate_fraction(value);
        debug!("Parsing sensing time '{}' (raw '{}')", truncated, value);

        NaiveDateTime::parse_from_str(truncated, SENSING_TIME_FORMAT)
            .map(SensingTime)
            .map_err(|e| RasterError::MalformedTimestamp(value.to_string(), e))
    }

    /// Hour, minute and second, each zero-padded to two digits
    pub fn hhmmss(&self) -> String {
        format!("{:02}{:02}{:02}", self.0.hour(), self.0.minute(), self.0.second())
    }

    /// The parsed date and time
    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl FromStr for SensingTime {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensingTime::parse(s)
    }
}

impl fmt::Display for SensingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SENSING_TIME_FORMAT))
    }
}

/// Cuts the value at the first `.`
fn truncate_fraction(value: &str) -> &str {
    value.split('.').next().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_fraction_is_discarded() {
        let time = SensingTime::parse("2021-03-15T07:05:09.123456").unwrap();
        assert_eq!(time.hhmmss(), "070509");
        assert_eq!(time.datetime().day(), 15);
    }

    #[test]
    fn test_whole_seconds_and_midnight() {
        assert_eq!(SensingTime::parse("2021-03-15T23:59:00").unwrap().hhmmss(), "235900");
        assert_eq!(SensingTime::parse("2021-01-01T00:00:00.0").unwrap().hhmmss(), "000000");
        assert_eq!(SensingTime::parse("2021-01-01T00:00:00.").unwrap().hhmmss(), "000000");
    }

    #[test]
    fn test_fraction_is_not_rounded() {
        let time: SensingTime = "2020-12-31T10:20:30.999999".parse().unwrap();
        assert_eq!(time.hhmmss(), "102030");
        assert_eq!(time.to_string(), "2020-12-31T10:20:30");
    }

    #[test]
    fn test_malformed_values() {
        for value in [
            "2021-03-15 07:05:09",
            "2021-03-15",
            "07:05:09",
            "2021-03-15T07:05:09Z",
            "2021-13-15T07:05:09",
            "2021-03-15T25:05:09",
            "",
        ] {
            match SensingTime::parse(value) {
                Err(RasterError::MalformedTimestamp(raw, _)) => assert_eq!(raw, value),
                other => panic!("{:?} parsed as {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_dot_in_date_truncates_early() {
        // The cut happens at the first dot wherever it is
        assert!(SensingTime::parse("2021.03.15T07:05:09").is_err());
    }
}
