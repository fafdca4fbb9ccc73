//! Calendar angle mapping
//!
//! The sky turns once per tropical year relative to the calendar. A date is
//! mapped to a rotation of the wheel by linearising the year onto a full
//! turn, measured from the spring equinox of 2014. Only the phase within the
//! year matters, so the ring reads correctly for any year.

use chrono::{NaiveDate, NaiveDateTime};

use crate::geometry::UNIT_REV;

/// Julian day of the Unix epoch, 1970-01-01T00:00:00
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_YEAR: f64 = 365.25;

/// Julian day of the reference epoch, the March equinox of 2014 at 16:55 UTC
pub const EQUINOX_2014_JD: f64 = 2_456_737.204_861_111;

/// Julian day number (with fraction) of a UTC date and time
pub fn julian_day(datetime: &NaiveDateTime) -> f64 {
    let utc = datetime.and_utc();
    let seconds = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Rotation of the sky about the visible pole, relative to the 2014 spring
/// equinox, in radians. Unsigned; see [`CalendarAngle`] for the sense.
pub fn theta_2014(datetime: &NaiveDateTime) -> f64 {
    (julian_day(datetime) - EQUINOX_2014_JD) / DAYS_PER_YEAR * UNIT_REV
}

/// Maps calendar dates to signed rotation angles on the date scale.
///
/// The sign is -1 for northern observers and +1 for southern ones so that
/// the ring always runs in the conventional direction for the hemisphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarAngle {
    sign: f64,
}

impl CalendarAngle {
    pub fn new(southern: bool) -> Self {
        Self {
            sign: if southern { 1.0 } else { -1.0 },
        }
    }

    pub fn sign(&self) -> f64 {
        self.sign
    }

    pub fn date_angle(&self, datetime: &NaiveDateTime) -> f64 {
        self.sign * theta_2014(datetime)
    }

    /// Angle of a day of the month in the reference year 2014, at `hour`:00.
    /// Returns `None` for a date that does not exist.
    pub fn day_angle(&self, month: u32, day: u32, hour: u32) -> Option<f64> {
        let datetime = NaiveDate::from_ymd_opt(2014, month, day)?.and_hms_opt(hour, 0, 0)?;
        Some(self.date_angle(&datetime))
    }
}
