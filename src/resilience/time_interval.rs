//! # Time Interval Configuration
//!
//! A `(interval, unit)` pair as it appears in configuration files, converted
//! to a [`Duration`] once when a retry policy is resolved.
//!
//! Two configuration shapes are accepted:
//!
//! ```yaml
//! retry_interval: { interval: 5, unit: seconds }
//! retry_interval: "5s"
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Unit attached to a [`TimeInterval`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Milliseconds,
    #[default]
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Milliseconds in one unit
    pub const fn millis_per_unit(&self) -> u64 {
        match self {
            Self::Milliseconds => 1,
            Self::Seconds => 1_000,
            Self::Minutes => 60_000,
            Self::Hours => 3_600_000,
            Self::Days => 86_400_000,
        }
    }

    /// Short suffix used by the string shorthand
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Milliseconds => write!(f, "milliseconds"),
            Self::Seconds => write!(f, "seconds"),
            Self::Minutes => write!(f, "minutes"),
            Self::Hours => write!(f, "hours"),
            Self::Days => write!(f, "days"),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ms" | "millis" | "milliseconds" => Ok(Self::Milliseconds),
            "s" | "sec" | "secs" | "seconds" => Ok(Self::Seconds),
            "m" | "min" | "mins" | "minutes" => Ok(Self::Minutes),
            "h" | "hr" | "hrs" | "hours" => Ok(Self::Hours),
            "d" | "day" | "days" => Ok(Self::Days),
            other => Err(format!("Invalid time unit: {other}")),
        }
    }
}

/// Configured amount of time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeInterval {
    pub interval: u64,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub const fn new(interval: u64, unit: TimeUnit) -> Self {
        Self { interval, unit }
    }

    pub const fn milliseconds(interval: u64) -> Self {
        Self::new(interval, TimeUnit::Milliseconds)
    }

    pub const fn seconds(interval: u64) -> Self {
        Self::new(interval, TimeUnit::Seconds)
    }

    pub const fn minutes(interval: u64) -> Self {
        Self::new(interval, TimeUnit::Minutes)
    }

    /// Total milliseconds, or `None` if the product overflows `u64`
    pub fn checked_millis(&self) -> Option<u64> {
        self.interval.checked_mul(self.unit.millis_per_unit())
    }

    /// Convert to a [`Duration`], saturating at `u64::MAX` milliseconds
    pub fn to_duration(&self) -> Duration {
        Duration::from_millis(self.checked_millis().unwrap_or(u64::MAX))
    }
}

impl From<Duration> for TimeInterval {
    fn from(duration: Duration) -> Self {
        Self::milliseconds(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}

impl From<TimeInterval> for Duration {
    fn from(interval: TimeInterval) -> Self {
        interval.to_duration()
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.interval, self.unit.suffix())
    }
}

impl FromStr for TimeInterval {
    type Err = String;

    /// Parses `"500ms"`, `"2s"`, `"5 minutes"`; a bare number is seconds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, unit) = trimmed.split_at(split);

        let interval = digits
            .parse::<u64>()
            .map_err(|_| format!("Invalid time interval: {s}"))?;
        let unit = if unit.trim().is_empty() {
            TimeUnit::default()
        } else {
            unit.parse()?
        };

        Ok(Self::new(interval, unit))
    }
}

impl<'de> Deserialize<'de> for TimeInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Shorthand(String),
            Millis(u64),
            Full {
                interval: u64,
                #[serde(default)]
                unit: TimeUnit,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Shorthand(text) => text.parse().map_err(D::Error::custom),
            Repr::Millis(millis) => Ok(Self::milliseconds(millis)),
            Repr::Full { interval, unit } => Ok(Self::new(interval, unit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert_eq!(TimeInterval::milliseconds(250).to_duration(), Duration::from_millis(250));
        assert_eq!(TimeInterval::seconds(2).to_duration(), Duration::from_secs(2));
        assert_eq!(TimeInterval::minutes(3).to_duration(), Duration::from_secs(180));
        assert_eq!(
            TimeInterval::new(1, TimeUnit::Days).to_duration(),
            Duration::from_secs(86_400)
        );
    }

    #[test]
    fn test_overflow_saturates() {
        let huge = TimeInterval::new(u64::MAX, TimeUnit::Days);
        assert!(huge.checked_millis().is_none());
        assert_eq!(huge.to_duration(), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_shorthand_parsing() {
        assert_eq!("500ms".parse::<TimeInterval>().unwrap(), TimeInterval::milliseconds(500));
        assert_eq!("2s".parse::<TimeInterval>().unwrap(), TimeInterval::seconds(2));
        assert_eq!("5 minutes".parse::<TimeInterval>().unwrap(), TimeInterval::minutes(5));
        assert_eq!("7".parse::<TimeInterval>().unwrap(), TimeInterval::seconds(7));
        assert!("fast".parse::<TimeInterval>().is_err());
        assert!("10 fortnights".parse::<TimeInterval>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_shorthand() {
        let interval = TimeInterval::minutes(4);
        assert_eq!(interval.to_string(), "4m");
        assert_eq!(interval.to_string().parse::<TimeInterval>().unwrap(), interval);
    }

    #[test]
    fn test_deserialize_all_shapes() {
        let full: TimeInterval =
            serde_json::from_str(r#"{"interval": 5, "unit": "seconds"}"#).unwrap();
        assert_eq!(full, TimeInterval::seconds(5));

        let default_unit: TimeInterval = serde_json::from_str(r#"{"interval": 5}"#).unwrap();
        assert_eq!(default_unit, TimeInterval::seconds(5));

        let shorthand: TimeInterval = serde_json::from_str(r#""750ms""#).unwrap();
        assert_eq!(shorthand, TimeInterval::milliseconds(750));

        let bare: TimeInterval = serde_json::from_str("1500").unwrap();
        assert_eq!(bare, TimeInterval::milliseconds(1500));
    }
}
