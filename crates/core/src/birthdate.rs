//! Birthdate parsing and formatting (`DD-MM-YYYY`).
//!
//! The wire sentinel `"NA"` means "unknown" and maps to `None`. Everything
//! else must be a real calendar date; `31-02-2020` is rejected.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::{Birthdate, NOT_AVAILABLE};

/// `strftime`-style format for birthdates on the wire.
pub const BIRTHDATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a `DD-MM-YYYY` string. Returns `None` for anything that is not a
/// valid calendar date.
pub fn parse_birthdate(raw: &str) -> Option<Birthdate> {
    NaiveDate::parse_from_str(raw.trim(), BIRTHDATE_FORMAT).ok()
}

/// Format a birthdate for the wire.
pub fn format_birthdate(date: &Birthdate) -> String {
    date.format(BIRTHDATE_FORMAT).to_string()
}

/// Interpret a client-supplied birthdate field.
///
/// - `None` or `"NA"` -> `Ok(None)` (unknown)
/// - a valid `DD-MM-YYYY` date -> `Ok(Some(date))`
/// - anything else -> validation error
pub fn parse_supplied_birthdate(raw: Option<&str>) -> Result<Option<Birthdate>, CoreError> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim() == NOT_AVAILABLE => Ok(None),
        Some(value) => parse_birthdate(value).map(Some).ok_or_else(|| {
            CoreError::Validation(format!("Invalid birthdate '{value}', expected DD-MM-YYYY"))
        }),
    }
}

/// Range bounds for pet listing (`?birthdateGT=&birthdateLT=`).
///
/// Bounds that fail to parse are dropped, so an unparsable filter value
/// behaves as if it were not supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BirthdateRange {
    pub after: Option<Birthdate>,
    pub before: Option<Birthdate>,
}

impl BirthdateRange {
    pub fn from_params(gt: Option<&str>, lt: Option<&str>) -> Self {
        Self {
            after: gt.and_then(parse_birthdate),
            before: lt.and_then(parse_birthdate),
        }
    }

    /// True when no bound is active.
    pub fn is_unbounded(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }

    /// Whether a pet with `birthdate` passes the active bounds.
    ///
    /// Unknown dates never pass a bounded range.
    pub fn admits(&self, birthdate: Option<&Birthdate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = birthdate else {
            return false;
        };
        self.after.map_or(true, |after| *date > after)
            && self.before.map_or(true, |before| *date < before)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(s: &str) -> Birthdate {
        parse_birthdate(s).unwrap()
    }

    #[test]
    fn parses_valid_dates() {
        assert_eq!(date("15-08-2019"), NaiveDate::from_ymd_opt(2019, 8, 15).unwrap());
        assert_eq!(format_birthdate(&date("01-02-2020")), "01-02-2020");
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert!(parse_birthdate("31-02-2020").is_none());
        assert!(parse_birthdate("2020-02-01").is_none());
        assert!(parse_birthdate("yesterday").is_none());
    }

    #[test]
    fn supplied_na_means_unknown() {
        assert_matches!(parse_supplied_birthdate(None), Ok(None));
        assert_matches!(parse_supplied_birthdate(Some("NA")), Ok(None));
        assert_matches!(parse_supplied_birthdate(Some("31-02-2020")), Err(CoreError::Validation(_)));
        assert_matches!(parse_supplied_birthdate(Some("29-02-2020")), Ok(Some(_)));
    }

    #[test]
    fn range_is_strict_and_excludes_unknown() {
        let range = BirthdateRange::from_params(Some("01-01-2020"), None);
        assert!(range.admits(Some(&date("02-01-2020"))));
        assert!(!range.admits(Some(&date("01-01-2020"))));
        assert!(!range.admits(None));

        let both = BirthdateRange::from_params(Some("01-01-2020"), Some("01-01-2021"));
        assert!(both.admits(Some(&date("15-06-2020"))));
        assert!(!both.admits(Some(&date("15-06-2021"))));
    }

    #[test]
    fn unparsable_bounds_are_ignored() {
        let range = BirthdateRange::from_params(Some("not-a-date"), Some(""));
        assert!(range.is_unbounded());
        assert!(range.admits(None));
    }
}
