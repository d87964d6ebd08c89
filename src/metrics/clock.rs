use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MetricsError;

const DEGREES_PER_HOUR: f64 = 30.0;
const MINUTES_PER_DIAL: i64 = 12 * 60;

/// Resultant vectors shorter than this are treated as cancelled out.
const ZERO_RESULTANT: f64 = 1e-9;

/// A spin-direction reading on a 12-hour clock face, e.g. `1:30`.
///
/// 12:00 points straight up (90°) and the hand moves clockwise, 30° per hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, MetricsError> {
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(MetricsError::InvalidClock(format!("{}:{:02}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since 12:00, in `0..720`.
    pub fn minutes_since_twelve(&self) -> i32 {
        i32::from(self.hour % 12) * 60 + i32::from(self.minute)
    }

    /// Maps the clock reading onto a standard angle: 12:00 is 90°, 3:00 is 0°.
    pub fn to_degrees(&self) -> f64 {
        let hours = f64::from(self.hour % 12) + f64::from(self.minute) / 60.0;
        90.0 - hours * DEGREES_PER_HOUR
    }

    /// Inverse of [`ClockTime::to_degrees`]. Any angle is accepted and folded
    /// onto the dial; minutes are rounded to the nearest whole minute.
    pub fn from_degrees(degrees: f64) -> Self {
        let hours = (90.0 - degrees) / DEGREES_PER_HOUR;
        let total_minutes = ((hours * 60.0).round() as i64).rem_euclid(MINUTES_PER_DIAL);

        let hour = (total_minutes / 60) as u8;
        Self {
            hour: if hour == 0 { 12 } else { hour },
            minute: (total_minutes % 60) as u8,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MetricsError::InvalidClock(s.to_string());

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if minute.is_empty() || minute.len() > 2 {
            return Err(invalid());
        }

        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        ClockTime::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = MetricsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Circular mean of clock readings.
///
/// Each sample becomes a unit vector, the vectors are averaged and the
/// resultant angle is mapped back onto the dial. Returns `None` for an empty
/// input. When the samples cancel out (e.g. 12:00 and 6:00) there is no
/// meaningful direction, so the first sample is returned.
pub fn circular_mean_clock(samples: &[ClockTime]) -> Option<ClockTime> {
    let first = samples.first()?;

    let (sin_sum, cos_sum) = samples.iter().fold((0.0_f64, 0.0_f64), |(sin, cos), sample| {
        let radians = sample.to_degrees().to_radians();
        (sin + radians.sin(), cos + radians.cos())
    });

    let count = samples.len() as f64;
    let (sin_mean, cos_mean) = (sin_sum / count, cos_sum / count);

    if sin_mean.hypot(cos_mean) < ZERO_RESULTANT {
        return Some(*first);
    }

    Some(ClockTime::from_degrees(sin_mean.atan2(cos_mean).to_degrees()))
}
