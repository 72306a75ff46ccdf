//! Weekday convention
//!
//! One numbering, used everywhere: 0 = Sunday … 6 = Saturday, per
//! chrono's `num_days_from_sunday()`. The store persists the same
//! numbering in its `registered_weekday` column, so the Rust side and
//! the SQL predicate can never disagree.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{DomainError, DomainResult};

/// Lowercase day names indexed by weekday number.
pub const DAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Name for a weekday index. Callers must pass a validated index.
pub fn day_name(index: u8) -> &'static str {
    DAY_NAMES[index as usize]
}

/// Weekday bucket of a registration timestamp, derived in UTC.
pub fn weekday_index(ts: &DateTime<Utc>) -> u8 {
    ts.weekday().num_days_from_sunday() as u8
}

/// Parse the comma-separated `week_number` parameter into weekday
/// indices. Duplicates collapse (first occurrence wins the position);
/// non-numeric tokens or indices outside [0, 6] are validation errors,
/// never silently-empty buckets.
pub fn parse_week_numbers(raw: &str) -> DomainResult<Vec<u8>> {
    let mut days: Vec<u8> = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        let day: u8 = token.parse().map_err(|_| {
            DomainError::Validation(format!("invalid week_number value '{}'", token))
        })?;
        if day > 6 {
            return Err(DomainError::Validation(format!(
                "week_number {} out of range [0, 6]",
                day
            )));
        }
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn derives_sunday_as_zero() {
        // 2024-01-07 was a Sunday, 2024-01-08 a Monday
        let sunday = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();
        let monday = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2024, 1, 13, 23, 59, 59).unwrap();
        assert_eq!(weekday_index(&sunday), 0);
        assert_eq!(weekday_index(&monday), 1);
        assert_eq!(weekday_index(&saturday), 6);
    }

    #[test]
    fn parses_comma_separated_days() {
        assert_eq!(parse_week_numbers("0,1,6").unwrap(), vec![0, 1, 6]);
        assert_eq!(parse_week_numbers(" 3 , 2 ").unwrap(), vec![3, 2]);
    }

    #[test]
    fn duplicates_collapse_to_one_bucket() {
        assert_eq!(parse_week_numbers("1,1,0,1").unwrap(), vec![1, 0]);
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(parse_week_numbers("7").is_err());
        assert!(parse_week_numbers("-1").is_err());
        assert!(parse_week_numbers("0,abc").is_err());
        assert!(parse_week_numbers("").is_err());
    }

    #[test]
    fn day_names_cover_the_week() {
        assert_eq!(day_name(0), "sunday");
        assert_eq!(day_name(6), "saturday");
        assert_eq!(DAY_NAMES.len(), 7);
    }
}
