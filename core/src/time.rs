//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into ISO 8601 with up to six fractional digits and an
/// explicit UTC offset.
///
/// Trailing zeros of the fraction are dropped, and so is the decimal point
/// when nothing is left of it:
///
/// - `2011-03-01T15:39:10.260762+00:00`
/// - `2011-03-01T15:39:10.26+00:00`
/// - `2011-03-01T15:39:10+00:00`
pub fn format_iso8601_micros(t: DateTime) -> String {
    let s = t.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{s}+00:00")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn time_with_micros(micros: i64) -> DateTime {
        Utc.with_ymd_and_hms(2011, 3, 1, 15, 39, 10).unwrap()
            + chrono::TimeDelta::microseconds(micros)
    }

    #[test_case(260_762, "2011-03-01T15:39:10.260762+00:00"; "full micros")]
    #[test_case(260_000, "2011-03-01T15:39:10.26+00:00"; "trailing zeros")]
    #[test_case(1, "2011-03-01T15:39:10.000001+00:00"; "leading zeros kept")]
    #[test_case(0, "2011-03-01T15:39:10+00:00"; "whole second")]
    fn test_format_iso8601_micros(micros: i64, expected: &str) {
        assert_eq!(format_iso8601_micros(time_with_micros(micros)), expected);
    }

    #[test]
    fn test_format_iso8601_micros_keeps_seconds_zero() {
        let t = Utc.with_ymd_and_hms(2022, 3, 13, 7, 20, 0).unwrap();
        assert_eq!(format_iso8601_micros(t), "2022-03-13T07:20:00+00:00");
    }
}
