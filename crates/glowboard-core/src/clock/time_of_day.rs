use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_DAY: u32 = 24 * 60 * SECS_PER_MINUTE;

/// A local time of day with no date component.
///
/// Stored as seconds since midnight. Schedule boundaries always land on a
/// whole minute; clock samples may carry seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Seconds are wrapped into a single day.
    pub fn from_secs(secs: u32) -> Self {
        Self(secs % SECS_PER_DAY)
    }

    /// Returns `None` when `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        Self::from_hms(hour, minute, 0)
    }

    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self((hour * 60 + minute) * SECS_PER_MINUTE + second))
    }

    pub fn secs(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 3600
    }

    pub fn minute(self) -> u32 {
        (self.0 / SECS_PER_MINUTE) % 60
    }

    pub fn second(self) -> u32 {
        self.0 % SECS_PER_MINUTE
    }

    /// Subtract whole minutes, stopping at midnight.
    pub fn saturating_sub_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_sub(minutes.saturating_mul(SECS_PER_MINUTE)))
    }

    /// `HH:MM:SS`, for clock displays.
    pub fn format_hms(self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
    }

    /// Parse a schedule boundary in `HH:MM` form.
    ///
    /// The hour may be written with one or two digits, the minute always
    /// with two. Seconds are not accepted here.
    pub fn parse_hm(value: &str) -> Result<Self, String> {
        let (hour, minute) = value
            .split_once(':')
            .ok_or_else(|| "expected HH:MM".to_string())?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err("expected HH:MM".into());
        }
        let hour = parse_digits(hour)?;
        let minute = parse_digits(minute)?;
        Self::from_hm(hour, minute)
            .ok_or_else(|| format!("{hour:02}:{minute:02} is out of range"))
    }
}

fn parse_digits(part: &str) -> Result<u32, String> {
    if !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("'{part}' is not numeric"));
    }
    part.parse::<u32>().map_err(|e| e.to_string())
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Accepts `HH:MM` and `HH:MM:SS`.
impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.rsplit_once(':') {
            Some((hm, sec)) if hm.contains(':') => {
                if sec.len() != 2 {
                    return Err("expected HH:MM:SS".into());
                }
                let base = Self::parse_hm(hm)?;
                let sec = parse_digits(sec)?;
                if sec > 59 {
                    return Err(format!("second {sec} is out of range"));
                }
                Ok(Self(base.0 + sec))
            }
            _ => Self::parse_hm(s),
        }
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        if value.second() == 0 {
            value.to_string()
        } else {
            value.format_hms()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zero_padded_times() {
        let t = TimeOfDay::parse_hm("09:30").unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.secs(), 9 * 3600 + 30 * 60);
        assert_eq!(t.to_string(), "09:30");
    }

    #[test]
    fn accepts_single_digit_hour() {
        assert_eq!(
            TimeOfDay::parse_hm("7:05").unwrap(),
            TimeOfDay::from_hm(7, 5).unwrap()
        );
    }

    #[test]
    fn rejects_bad_times() {
        for bad in ["", "9", "24:00", "12:60", "ab:cd", "12:5", "123:00", "-1:00", "12:00:00"] {
            assert!(TimeOfDay::parse_hm(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn from_str_accepts_seconds() {
        let t: TimeOfDay = "13:05:42".parse().unwrap();
        assert_eq!(t.format_hms(), "13:05:42");
        assert_eq!(t.to_string(), "13:05");
        assert!("13:05:60".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn saturating_sub_stops_at_midnight() {
        let t = TimeOfDay::from_hm(0, 3).unwrap();
        assert_eq!(t.saturating_sub_minutes(5), TimeOfDay::MIDNIGHT);
        let t = TimeOfDay::from_hm(13, 10).unwrap();
        assert_eq!(t.saturating_sub_minutes(5), TimeOfDay::from_hm(13, 5).unwrap());
    }

    #[test]
    fn serializes_as_string() {
        let t = TimeOfDay::from_hm(10, 0).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"10:00\"");
        let back: TimeOfDay = serde_json::from_str("\"10:00:15\"").unwrap();
        assert_eq!(back.second(), 15);
    }
}
