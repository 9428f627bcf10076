//! Decides whether it is currently night at the queried location.

use chrono::{DateTime, Local, Timelike, Utc};

const SECONDS_PER_DAY: i64 = 86_400;
const DAY_START_HOUR: u32 = 6;
const NIGHT_START_HOUR: u32 = 18;

/// Best available information about the location's solar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSignal {
    Absent,
    /// Unix seconds.
    SunTimes { sunrise: i64, sunset: i64 },
    /// Seconds east of UTC.
    TimezoneOffset(i32),
}

impl LocationSignal {
    /// Pick the strongest signal: sun times when both are known, then the
    /// timezone offset, then nothing.
    pub fn from_parts(sunrise: Option<i64>, sunset: Option<i64>, offset: Option<i32>) -> Self {
        match (sunrise, sunset, offset) {
            (Some(sunrise), Some(sunset), _) => LocationSignal::SunTimes { sunrise, sunset },
            (_, _, Some(offset)) => LocationSignal::TimezoneOffset(offset),
            _ => LocationSignal::Absent,
        }
    }
}

/// Evaluate [`is_night_at`] against the system clock.
pub fn is_night(signal: &LocationSignal) -> bool {
    is_night_at(signal, Utc::now(), Local::now().hour())
}

/// `caller_local_hour` is only consulted when the signal is absent.
pub fn is_night_at(signal: &LocationSignal, now: DateTime<Utc>, caller_local_hour: u32) -> bool {
    match *signal {
        LocationSignal::SunTimes { sunrise, sunset } => {
            let ts = now.timestamp();
            ts < sunrise || ts > sunset
        }
        LocationSignal::TimezoneOffset(offset) => {
            let local_secs = (now.timestamp() + i64::from(offset)).rem_euclid(SECONDS_PER_DAY);
            is_night_hour((local_secs / 3600) as u32)
        }
        LocationSignal::Absent => is_night_hour(caller_local_hour),
    }
}

fn is_night_hour(hour: u32) -> bool {
    !(DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour)
}
