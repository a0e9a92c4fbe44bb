use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reminder preferences, persisted as `{ "enabled": bool, "time": "HH:MM" | null }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub time: Option<NotificationTime>,
}

impl NotificationSettings {
    /// The time an alarm should fire at, if these settings call for one.
    pub fn trigger_time(&self) -> Option<NotificationTime> {
        if self.enabled {
            self.time
        } else {
            None
        }
    }
}

/// A wall-clock time of day, 24-hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationTime {
    hour: u8,
    minute: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTime {
    #[error("expected a time formatted as HH:MM, got '{0}'")]
    Format(String),
    #[error("hour must be between 0 and 23, got {0}")]
    Hour(u32),
    #[error("minute must be between 0 and 59, got {0}")]
    Minute(u32),
}

impl NotificationTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, InvalidTime> {
        if hour > 23 {
            return Err(InvalidTime::Hour(hour));
        }
        if minute > 59 {
            return Err(InvalidTime::Minute(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }
}

impl FromStr for NotificationTime {
    type Err = InvalidTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || InvalidTime::Format(s.to_owned());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(format_error)?;
        let parse = |part: &str| {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format_error());
            }
            part.parse::<u32>().map_err(|_| format_error())
        };
        Self::new(parse(hour)?, parse(minute)?)
    }
}

impl TryFrom<String> for NotificationTime {
    type Error = InvalidTime;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NotificationTime> for String {
    fn from(time: NotificationTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for NotificationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_pads() {
        let time: NotificationTime = "7:05".parse().unwrap();
        assert_eq!((time.hour(), time.minute()), (7, 5));
        assert_eq!(time.to_string(), "07:05");
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert_eq!("24:00".parse::<NotificationTime>(), Err(InvalidTime::Hour(24)));
        assert_eq!("23:60".parse::<NotificationTime>(), Err(InvalidTime::Minute(60)));
        assert!(matches!("0705".parse::<NotificationTime>(), Err(InvalidTime::Format(_))));
        assert!(matches!("-1:05".parse::<NotificationTime>(), Err(InvalidTime::Format(_))));
    }

    #[test]
    fn settings_serialize_with_string_time() {
        let settings = NotificationSettings {
            enabled: true,
            time: Some(NotificationTime::new(7, 5).unwrap()),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"enabled":true,"time":"07:05"}"#);

        let default: NotificationSettings =
            serde_json::from_str(r#"{"enabled":false,"time":null}"#).unwrap();
        assert_eq!(default, NotificationSettings::default());
    }

    #[test]
    fn enabled_without_time_has_no_trigger() {
        let settings = NotificationSettings { enabled: true, time: None };
        assert_eq!(settings.trigger_time(), None);
    }
}
