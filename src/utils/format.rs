//! Display formatting for duration fields and readouts

use crate::state::timer_state::split_millis;

/// Text a duration field shows once it loses focus.
///
/// Single nonzero digits get a leading zero; the stored value is unchanged.
pub fn pad_on_blur(value: u64) -> String {
    if value != 0 && value < 10 {
        format!("{:02}", value)
    } else {
        value.to_string()
    }
}

/// Format milliseconds as "HH:MM:SS"
pub fn format_hms(millis: u64) -> String {
    let (h, m, s) = split_millis(millis);
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Progress fraction as a whole percentage
pub fn format_percent(progress: f32) -> String {
    format!("{}%", (progress * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_on_blur() {
        assert_eq!(pad_on_blur(0), "0");
        assert_eq!(pad_on_blur(5), "05");
        assert_eq!(pad_on_blur(9), "09");
        assert_eq!(pad_on_blur(10), "10");
        assert_eq!(pad_on_blur(59), "59");
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(61_000), "00:01:01");
        assert_eq!(format_hms(3_661_000), "01:01:01");
        assert_eq!(format_hms(23 * 3_600_000 + 59 * 60_000 + 59_000), "23:59:59");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(0.2), "20%");
        assert_eq!(format_percent(1.0), "100%");
    }
}
