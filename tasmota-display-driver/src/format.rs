//! Fixed-width renderings of telemetry values for the display.

use chrono::{DateTime, FixedOffset, NaiveDateTime, ParseError, Timelike};
use chrono_tz::Tz;

/// Zone every timestamp on the display is shown in.
pub const DISPLAY_TIMEZONE: Tz = chrono_tz::Australia::Brisbane;

/// Dollars, with thousands shown as `k` and sub-dollar values shown in cents.
pub fn format_currency(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("${:.2}k", value / 1000.0)
    } else if value.abs() >= 1.0 {
        format!("${:.2}", value)
    } else {
        format!("{:.2}c", value * 100.0)
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_power(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{:.1}kW", value / 1000.0)
    } else {
        format!("{:.1}W", value)
    }
}

/// Converts an ISO-8601 timestamp into `timezone` and renders it as
/// `YYYY-MM-DD HH:MM:SS[.ffffff]+HH:MM`. Timestamps without an offset are
/// taken as UTC.
pub fn format_timestamp(iso: &str, timezone: Tz) -> Result<String, ParseError> {
    let local = parse_timestamp(iso)?.with_timezone(&timezone);

    let pattern = if local.nanosecond() / 1_000 % 1_000_000 != 0 {
        "%Y-%m-%d %H:%M:%S%.6f%:z"
    } else {
        "%Y-%m-%d %H:%M:%S%:z"
    };
    Ok(local.format(pattern).to_string())
}

fn parse_timestamp(iso: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let iso = iso.trim();
    DateTime::parse_from_rfc3339(iso)
        .or_else(|_| DateTime::parse_from_str(iso, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .or_else(|_| DateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f%:z"))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%d %H:%M:%S%.f"))
                .map(|naive| naive.and_utc().fixed_offset())
        })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1500.0), "$1.50k");
        assert_eq!(format_currency(-2500.0), "$-2.50k");
        assert_eq!(format_currency(42.5), "$42.50");
        assert_eq!(format_currency(1.0), "$1.00");
        assert_eq!(format_currency(-1.5), "$-1.50");
        assert_eq!(format_currency(0.3), "30.00c");
        assert_eq!(format_currency(-0.3), "-30.00c");
        assert_eq!(format_currency(0.0), "0.00c");
    }

    #[test]
    fn test_format_power() {
        assert_eq!(format_power(2500.0), "2.5kW");
        assert_eq!(format_power(-1200.0), "-1.2kW");
        assert_eq!(format_power(1000.0), "1.0kW");
        assert_eq!(format_power(850.0), "850.0W");
        assert_eq!(format_power(-850.0), "-850.0W");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(87.65), "87.7%");
        assert_eq!(format_percentage(100.0), "100.0%");
    }

    #[test]
    fn test_format_is_deterministic() {
        for value in [-1234.5, -0.25, 0.0, 0.999, 1.0, 999.99, 1000.0, 98765.4] {
            assert_eq!(format_currency(value), format_currency(value));
            assert_eq!(format_power(value), format_power(value));
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-05-01T04:30:00Z", DISPLAY_TIMEZONE).unwrap(),
            "2024-05-01 14:30:00+10:00"
        );
        assert_eq!(
            format_timestamp("2024-05-01T20:15:30+02:00", DISPLAY_TIMEZONE).unwrap(),
            "2024-05-02 04:15:30+10:00"
        );
        assert_eq!(
            format_timestamp("2024-05-01 04:30:00.250000+00:00", DISPLAY_TIMEZONE).unwrap(),
            "2024-05-01 14:30:00.250000+10:00"
        );
    }

    #[test]
    fn test_format_timestamp_during_historic_dst() {
        // Queensland ran daylight saving from 1989 to 1992
        assert_eq!(
            format_timestamp("1990-01-15T00:00:00+00:00", DISPLAY_TIMEZONE).unwrap(),
            "1990-01-15 11:00:00+11:00"
        );
    }

    #[test]
    fn test_format_naive_timestamp_as_utc() {
        assert_eq!(
            format_timestamp("2024-12-31T23:00:00", DISPLAY_TIMEZONE).unwrap(),
            "2025-01-01 09:00:00+10:00"
        );
    }

    #[test]
    fn test_format_invalid_timestamp() {
        assert!(format_timestamp("yesterday", DISPLAY_TIMEZONE).is_err());
    }
}
