//! UTC offset formatting.

/// Format an offset in seconds east of UTC as `UTC±HH:MM`.
///
/// Leftover seconds below a full minute are dropped; zero is rendered as
/// `UTC+00:00`.
pub fn format_utc_offset(offset_seconds: i64) -> String {
    let sign = if offset_seconds >= 0 { '+' } else { '-' };
    let magnitude = offset_seconds.unsigned_abs();
    let hours = magnitude / 3600;
    let minutes = (magnitude % 3600) / 60;

    format!("UTC{}{:02}:{:02}", sign, hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_offset_is_positive() {
        assert_eq!(format_utc_offset(0), "UTC+00:00");
    }

    #[test]
    fn whole_hour_offsets() {
        assert_eq!(format_utc_offset(-18000), "UTC-05:00");
        assert_eq!(format_utc_offset(-28800), "UTC-08:00");
        assert_eq!(format_utc_offset(3600), "UTC+01:00");
        assert_eq!(format_utc_offset(50400), "UTC+14:00");
    }

    #[test]
    fn fractional_hour_offsets() {
        assert_eq!(format_utc_offset(19800), "UTC+05:30");
        assert_eq!(format_utc_offset(20700), "UTC+05:45");
        assert_eq!(format_utc_offset(-12600), "UTC-03:30");
    }

    #[test]
    fn sub_minute_remainder_is_truncated() {
        assert_eq!(format_utc_offset(3599), "UTC+00:59");
        assert_eq!(format_utc_offset(-59), "UTC-00:00");
    }
}
