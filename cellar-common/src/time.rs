//! Calendar date utilities

use chrono::{Local, NaiveDate};

use crate::{Error, Result};

/// Today's date in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an ISO 8601 calendar date (YYYY-MM-DD)
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidInput(format!("Invalid date '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_is_recent() {
        assert!(today() > NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2024-03-09").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(date.to_string(), "2024-03-09");
    }

    #[test]
    fn test_parse_iso_date_trims_whitespace() {
        assert!(parse_iso_date(" 2024-12-31 ").is_ok());
    }

    #[test]
    fn test_parse_iso_date_rejects_garbage() {
        assert!(matches!(parse_iso_date("31/12/2024"), Err(Error::InvalidInput(_))));
        assert!(parse_iso_date("2024-02-30").is_err());
    }
}
