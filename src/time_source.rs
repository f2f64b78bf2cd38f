//! Wall-clock time and the hand geometry derived from it.

use std::{cell::Cell, fmt::Write};

use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};

/// strftime pattern of the digital readout.
pub const DIGITAL_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Source of the current time.
///
/// The shell asks for the time once per tick; tests and snapshot rendering
/// substitute a [`FixedClock`].
pub trait TimeSource {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Time zone label the source reports in.
    fn timezone(&self) -> &str {
        "local"
    }
}

/// The host's local clock.
#[derive(Debug, Clone)]
pub struct SystemClock {
    timezone: String,
}

impl SystemClock {
    /// Creates a system clock. Any label other than "local" is recorded but
    /// the host's local time is still reported.
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            timezone: timezone.into(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new("local")
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timezone(&self) -> &str {
        &self.timezone
    }
}

/// A clock frozen at a given time, optionally stepping forward on each read.
#[derive(Debug)]
pub struct FixedClock {
    time: Cell<NaiveDateTime>,
    step: TimeDelta,
}

impl FixedClock {
    /// Creates a clock that always reports `time`.
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            time: Cell::new(time),
            step: TimeDelta::zero(),
        }
    }

    /// Makes every read advance the clock by `step` afterwards.
    pub fn stepping(mut self, step: TimeDelta) -> Self {
        self.step = step;
        self
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> NaiveDateTime {
        let current = self.time.get();
        self.time.set(current + self.step);
        current
    }
}

/// Formats `time` with a strftime `pattern`.
///
/// # Errors
/// Returns `fmt::Error` when the pattern contains an unsupported specifier.
pub fn format_time(time: &NaiveDateTime, pattern: &str) -> Result<String, std::fmt::Error> {
    let mut formatted = String::new();
    write!(formatted, "{}", time.format(pattern))?;
    Ok(formatted)
}

/// Positions shown by the three hands, on a 12-hour dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Hour, 0-11
    pub hour: u32,
    /// Minute, 0-59
    pub minute: u32,
    /// Second, 0-59
    pub second: u32,
}

impl ClockReading {
    /// Creates a reading, folding the hour onto the 12-hour dial and
    /// wrapping minutes and seconds.
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: hour % 12,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// Reads the hands off a timestamp.
    pub fn from_time(time: &impl Timelike) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
    }

    /// Hand angles for this reading.
    pub fn angles(&self) -> HandAngles {
        HandAngles::from_reading(*self)
    }
}

/// Hand angles in degrees, clockwise from 12 o'clock, in `[0, 360)`.
///
/// The minute and hour hands interpolate linearly so they sweep instead of
/// jumping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    /// Hour hand angle
    pub hour: f64,
    /// Minute hand angle
    pub minute: f64,
    /// Second hand angle
    pub second: f64,
}

impl HandAngles {
    /// Computes the angles for a reading.
    pub fn from_reading(reading: ClockReading) -> Self {
        let hour = f64::from(reading.hour % 12);
        let minute = f64::from(reading.minute);
        let second = f64::from(reading.second);

        Self {
            hour: (hour * 30.0 + minute * 0.5).rem_euclid(360.0),
            minute: (minute * 6.0 + second / 10.0).rem_euclid(360.0),
            second: (second * 6.0).rem_euclid(360.0),
        }
    }
}

/// Converts a hand angle to a canvas direction in degrees, counter-clockwise
/// from the positive x axis.
pub fn canvas_direction(hand_angle: f64) -> f64 {
    90.0 - hand_angle
}
