//! Duration field input validation

use std::{fmt, str::FromStr};

/// Inclusive range a duration field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub min: u64,
    pub max: u64,
}

impl TimeRange {
    pub const HOURS: TimeRange = TimeRange { min: 0, max: 23 };
    pub const MINUTES: TimeRange = TimeRange { min: 0, max: 59 };
    pub const SECONDS: TimeRange = TimeRange { min: 0, max: 59 };

    pub fn contains(&self, value: u64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn contains_signed(&self, value: i64) -> bool {
        u64::try_from(value).is_ok_and(|v| self.contains(v))
    }
}

/// One of the three editable duration fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

impl TimeField {
    pub const ALL: [TimeField; 3] = [TimeField::Hours, TimeField::Minutes, TimeField::Seconds];

    pub fn range(&self) -> TimeRange {
        match self {
            TimeField::Hours => TimeRange::HOURS,
            TimeField::Minutes => TimeRange::MINUTES,
            TimeField::Seconds => TimeRange::SECONDS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimeField::Hours => "hours",
            TimeField::Minutes => "minutes",
            TimeField::Seconds => "seconds",
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" => Ok(TimeField::Hours),
            "minutes" => Ok(TimeField::Minutes),
            "seconds" => Ok(TimeField::Seconds),
            other => Err(format!("Unknown time field: {}", other)),
        }
    }
}

/// Validate raw text typed into a duration field.
///
/// Returns the value to store, or `None` when the field must keep its
/// previous value. Text that is not an integer at all (including an
/// emptied field) counts as 0. Out-of-range text containing zeros gets a
/// second chance with every '0' removed, which catches a keypad-typed
/// digit appended to a displayed "0".
pub fn validate_time_input(text: &str, range: TimeRange) -> Option<u64> {
    let Ok(number) = text.parse::<i32>() else {
        return Some(0);
    };

    if range.contains_signed(number.into()) {
        return u64::try_from(number).ok();
    }

    if text.contains('0') {
        let stripped: String = text.chars().filter(|c| *c != '0').collect();
        if let Ok(number) = stripped.parse::<i64>() {
            if range.contains_signed(number) {
                return u64::try_from(number).ok();
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_accepted_directly() {
        assert_eq!(validate_time_input("5", TimeRange::SECONDS), Some(5));
        assert_eq!(validate_time_input("005", TimeRange::SECONDS), Some(5));
        assert_eq!(validate_time_input("23", TimeRange::HOURS), Some(23));
        assert_eq!(validate_time_input("0", TimeRange::HOURS), Some(0));
        assert_eq!(validate_time_input("07", TimeRange::HOURS), Some(7));
    }

    #[test]
    fn test_unparsable_counts_as_zero() {
        assert_eq!(validate_time_input("", TimeRange::MINUTES), Some(0));
        assert_eq!(validate_time_input("0a", TimeRange::HOURS), Some(0));
        assert_eq!(validate_time_input("1.5", TimeRange::MINUTES), Some(0));
        // Overflows i32, so it is not a number either
        assert_eq!(validate_time_input("99999999999", TimeRange::MINUTES), Some(0));
    }

    #[test]
    fn test_zero_stripping_second_chance() {
        // "5" on screen, user types 0 after it on a keypad
        assert_eq!(validate_time_input("50", TimeRange::HOURS), Some(5));
        assert_eq!(validate_time_input("60", TimeRange::SECONDS), Some(6));
        assert_eq!(validate_time_input("100", TimeRange::HOURS), Some(1));
        assert_eq!(validate_time_input("205", TimeRange::MINUTES), Some(25));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(validate_time_input("24", TimeRange::HOURS), None);
        assert_eq!(validate_time_input("75", TimeRange::MINUTES), None);
        assert_eq!(validate_time_input("-5", TimeRange::SECONDS), None);
        // Stripping zeros still leaves it out of range
        assert_eq!(validate_time_input("-10", TimeRange::SECONDS), None);
        assert_eq!(validate_time_input("909", TimeRange::MINUTES), None);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in TimeField::ALL {
            assert_eq!(field.name().parse::<TimeField>(), Ok(field));
        }
        assert!("days".parse::<TimeField>().is_err());
        assert_eq!(TimeField::Hours.range(), TimeRange::HOURS);
    }
}
