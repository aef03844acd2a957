use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendered in place of a duration that cannot be computed.
pub const UNKNOWN_DURATION: &str = "unknown";

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// A millisecond span split into calendar units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Breakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Smallest unit rendered by [`format_duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MinimumUnit {
    #[default]
    Minute,
    Second,
}

impl FromStr for MinimumUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minute" | "minutes" | "m" => Ok(MinimumUnit::Minute),
            "second" | "seconds" | "s" => Ok(MinimumUnit::Second),
            other => Err(ConfigError::UnknownUnit(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for MinimumUnit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for MinimumUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimumUnit::Minute => write!(f, "minute"),
            MinimumUnit::Second => write!(f, "second"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub minimum_unit: MinimumUnit,
    /// Appended after a space, e.g. an "(ongoing)" marker for open intervals.
    pub suffix: Option<String>,
}

impl FormatOptions {
    pub fn new(minimum_unit: MinimumUnit) -> Self {
        Self {
            minimum_unit,
            suffix: None,
        }
    }

    pub fn with_suffix(mut self, suffix: Option<&str>) -> Self {
        self.suffix = suffix.map(str::to_string);
        self
    }
}

/// Splits `ms` into days, hours, minutes and whole seconds.
///
/// Returns `None` for negative spans.
pub fn breakdown(ms: i64) -> Option<Breakdown> {
    if ms < 0 {
        return None;
    }
    Some(Breakdown {
        days: ms / MS_PER_DAY,
        hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
        minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
        seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
    })
}

/// Renders `ms` as `1d 2h 30m` (or `1d 2h 30m 15s` with [`MinimumUnit::Second`]).
///
/// Zero-valued units are dropped, but the minimum unit is always shown when
/// nothing larger applies, so a 20 second span renders as `0m`. Negative
/// spans render as [`UNKNOWN_DURATION`].
pub fn format_duration(ms: i64, options: &FormatOptions) -> String {
    let Some(parts) = breakdown(ms) else {
        return UNKNOWN_DURATION.to_string();
    };

    let mut units = vec![(parts.days, "d"), (parts.hours, "h"), (parts.minutes, "m")];
    if options.minimum_unit == MinimumUnit::Second {
        units.push((parts.seconds, "s"));
    }

    let mut rendered: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();

    if rendered.is_empty() {
        if let Some((value, unit)) = units.last() {
            rendered.push(format!("{}{}", value, unit));
        }
    }

    let mut text = rendered.join(" ");
    if let Some(suffix) = options.suffix.as_deref().filter(|s| !s.trim().is_empty()) {
        text.push(' ');
        text.push_str(suffix.trim());
    }
    text
}

/// Floating-point entry point for spans computed outside this crate.
///
/// NaN, infinite and negative values render as [`UNKNOWN_DURATION`].
pub fn format_duration_f64(ms: f64, options: &FormatOptions) -> String {
    if !ms.is_finite() || ms < 0.0 {
        return UNKNOWN_DURATION.to_string();
    }
    format_duration(ms.trunc() as i64, options)
}

/// Hours with two decimals, as used in exports and summaries.
pub fn millis_to_hours(ms: i64) -> f64 {
    (ms as f64 / MS_PER_HOUR as f64 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes() -> FormatOptions {
        FormatOptions::default()
    }

    fn seconds() -> FormatOptions {
        FormatOptions::new(MinimumUnit::Second)
    }

    #[test]
    fn test_breakdown_splits_calendar_units() {
        let ms = 2 * MS_PER_DAY + 3 * MS_PER_HOUR + 4 * MS_PER_MINUTE + 5 * MS_PER_SECOND + 999;
        assert_eq!(
            breakdown(ms),
            Some(Breakdown {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5,
            })
        );
    }

    #[test]
    fn test_breakdown_rejects_negative() {
        assert_eq!(breakdown(-1), None);
    }

    #[test]
    fn test_format_duration_hours_and_mins() {
        assert_eq!(format_duration(90 * MS_PER_MINUTE, &minutes()), "1h 30m");
    }

    #[test]
    fn test_format_duration_omits_zero_units() {
        assert_eq!(format_duration(MS_PER_DAY + 5 * MS_PER_MINUTE, &minutes()), "1d 5m");
        assert_eq!(format_duration(MS_PER_HOUR, &minutes()), "1h");
    }

    #[test]
    fn test_format_duration_sub_minute_shows_zero_minutes() {
        assert_eq!(format_duration(45 * MS_PER_SECOND, &minutes()), "0m");
        assert_eq!(format_duration(0, &minutes()), "0m");
    }

    #[test]
    fn test_format_duration_seconds_unit() {
        assert_eq!(format_duration(45 * MS_PER_SECOND, &seconds()), "45s");
        assert_eq!(format_duration(999, &seconds()), "0s");
        assert_eq!(
            format_duration(MS_PER_HOUR + 15 * MS_PER_SECOND, &seconds()),
            "1h 15s"
        );
    }

    #[test]
    fn test_format_duration_suffix() {
        let options = minutes().with_suffix(Some("(ongoing)"));
        assert_eq!(format_duration(3 * MS_PER_HOUR, &options), "3h (ongoing)");

        let blank = minutes().with_suffix(Some("  "));
        assert_eq!(format_duration(3 * MS_PER_HOUR, &blank), "3h");
    }

    #[test]
    fn test_format_duration_negative_is_unknown() {
        let options = minutes().with_suffix(Some("(ongoing)"));
        assert_eq!(format_duration(-5, &options), UNKNOWN_DURATION);
    }

    #[test]
    fn test_format_duration_f64_invalid_inputs() {
        assert_eq!(format_duration_f64(f64::NAN, &minutes()), UNKNOWN_DURATION);
        assert_eq!(format_duration_f64(f64::INFINITY, &minutes()), UNKNOWN_DURATION);
        assert_eq!(format_duration_f64(-1.0, &minutes()), UNKNOWN_DURATION);
        assert_eq!(format_duration_f64(61_500.7, &seconds()), "1m 1s");
    }

    #[test]
    fn test_millis_to_hours_rounds_to_two_decimals() {
        assert_eq!(millis_to_hours(90 * MS_PER_MINUTE), 1.5);
        assert_eq!(millis_to_hours(MS_PER_HOUR / 3), 0.33);
    }

    #[test]
    fn test_minimum_unit_from_str() {
        assert_eq!("Second".parse::<MinimumUnit>(), Ok(MinimumUnit::Second));
        assert_eq!("minute".parse::<MinimumUnit>(), Ok(MinimumUnit::Minute));
        assert_eq!(
            "hour".parse::<MinimumUnit>(),
            Err(ConfigError::UnknownUnit("hour".to_string()))
        );
    }
}
