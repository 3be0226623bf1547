//! Device clock values.
//!
//! The device keeps its clock as seven two-digit decimal fields, written and
//! read back as BCD bytes. Unlike every other endpoint nothing here is hex.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::consts::CLOCK_PACKET_LEN;
use crate::params::ParameterError;

/// A calendar timestamp in the device's field layout.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct ClockValue {
    second: u8,
    minute: u8,
    hour: u8,
    day: u8,
    weekday: u8,
    month: u8,
    year: u8,
}

impl ClockValue {
    /// Builds a clock value, checking every field against its calendar range.
    ///
    /// `weekday` counts from Sunday = 0; `year` is the two-digit year.
    pub fn new(
        second: u8,
        minute: u8,
        hour: u8,
        day: u8,
        weekday: u8,
        month: u8,
        year: u8,
    ) -> Result<Self, ParameterError> {
        let check = |ok: bool, field: &'static str| {
            if ok {
                Ok(())
            } else {
                Err(ParameterError::Clock(field))
            }
        };
        check(second < 60, "second")?;
        check(minute < 60, "minute")?;
        check(hour < 24, "hour")?;
        check((1..=31).contains(&day), "day")?;
        check(weekday < 7, "weekday")?;
        check((1..=12).contains(&month), "month")?;
        check(year < 100, "year")?;
        Ok(Self {
            second,
            minute,
            hour,
            day,
            weekday,
            month,
            year,
        })
    }

    /// Seconds, `0..=59`.
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Minutes, `0..=59`.
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Hours, `0..=23`.
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Day of the month, `1..=31`.
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Day of the week, Sunday = 0.
    pub const fn weekday(&self) -> u8 {
        self.weekday
    }

    /// Month, `1..=12`.
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Two-digit year.
    pub const fn year(&self) -> u8 {
        self.year
    }

    /// Decodes a clock read-back: seven BCD bytes in packet field order.
    ///
    /// Returns `None` when the length is wrong, a nibble is not a decimal
    /// digit, or a field is out of range.
    pub fn from_wire(bytes: &[u8]) -> Option<Self> {
        if bytes.len() * 2 != CLOCK_PACKET_LEN {
            return None;
        }
        let mut fields = [0u8; 7];
        for (field, &byte) in fields.iter_mut().zip(bytes) {
            let (hi, lo) = (byte >> 4, byte & 0x0f);
            if hi > 9 || lo > 9 {
                return None;
            }
            *field = hi * 10 + lo;
        }
        let [second, minute, hour, day, weekday, month, year] = fields;
        Self::new(second, minute, hour, day, weekday, month, year).ok()
    }

    /// Shifts the timestamp by a whole number of hours, rolling the date over
    /// as needed.
    pub fn shift_hours(&self, hours: i32) -> Result<Self, ParameterError> {
        let shifted = self
            .to_datetime()?
            .checked_add_signed(TimeDelta::hours(i64::from(hours)))
            .ok_or(ParameterError::Clock("hour"))?;
        Self::try_from(shifted)
    }

    fn to_datetime(self) -> Result<NaiveDateTime, ParameterError> {
        NaiveDate::from_ymd_opt(2000 + i32::from(self.year), u32::from(self.month), u32::from(self.day))
            .ok_or(ParameterError::Clock("day"))?
            .and_hms_opt(u32::from(self.hour), u32::from(self.minute), u32::from(self.second))
            .ok_or(ParameterError::Clock("hour"))
    }
}

impl TryFrom<NaiveDateTime> for ClockValue {
    type Error = ParameterError;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        let year = u8::try_from(value.year().rem_euclid(100)).map_err(|_| ParameterError::Clock("year"))?;
        // Leap seconds report 60; the device has no slot for them.
        let second = value.second().min(59) as u8;
        Self::new(
            second,
            value.minute() as u8,
            value.hour() as u8,
            value.day() as u8,
            value.weekday().num_days_from_sunday() as u8,
            value.month() as u8,
            year,
        )
    }
}

/// A source of the current local wall-clock time.
pub trait WallClock {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;
}

impl<F> WallClock for F
where
    F: Fn() -> NaiveDateTime,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}

/// Reads the host's local time through `chrono`.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

#[cfg(feature = "std")]
impl WallClock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_field_ranges() {
        assert!(ClockValue::new(59, 59, 23, 31, 6, 12, 99).is_ok());
        assert_eq!(ClockValue::new(60, 0, 0, 1, 0, 1, 0), Err(ParameterError::Clock("second")));
        assert_eq!(ClockValue::new(0, 0, 24, 1, 0, 1, 0), Err(ParameterError::Clock("hour")));
        assert_eq!(ClockValue::new(0, 0, 0, 0, 0, 1, 0), Err(ParameterError::Clock("day")));
        assert_eq!(ClockValue::new(0, 0, 0, 1, 7, 1, 0), Err(ParameterError::Clock("weekday")));
        assert_eq!(ClockValue::new(0, 0, 0, 1, 0, 13, 0), Err(ParameterError::Clock("month")));
    }

    #[test]
    fn test_from_datetime() {
        let value = ClockValue::try_from(at(2024, 3, 5, 14, 7, 9)).unwrap();
        assert_eq!(value, ClockValue::new(9, 7, 14, 5, 2, 3, 24).unwrap());
    }

    #[test]
    fn test_sunday_is_zero() {
        let value = ClockValue::try_from(at(2024, 3, 3, 0, 0, 0)).unwrap();
        assert_eq!(value.weekday(), 0);
    }

    #[test]
    fn test_shift_rolls_date_forward() {
        let value = ClockValue::try_from(at(2023, 12, 31, 22, 30, 0)).unwrap();
        let shifted = value.shift_hours(3).unwrap();
        assert_eq!(shifted, ClockValue::try_from(at(2024, 1, 1, 1, 30, 0)).unwrap());
    }

    #[test]
    fn test_shift_rolls_date_backward() {
        let value = ClockValue::try_from(at(2024, 3, 1, 0, 15, 0)).unwrap();
        let shifted = value.shift_hours(-1).unwrap();
        // 2024 is a leap year.
        assert_eq!(shifted.day(), 29);
        assert_eq!(shifted.month(), 2);
        assert_eq!(shifted.hour(), 23);
        assert_eq!(shifted.weekday(), 4);
    }

    #[test]
    fn test_shift_rejects_impossible_date() {
        let value = ClockValue::new(0, 0, 0, 31, 0, 2, 24).unwrap();
        assert_eq!(value.shift_hours(1), Err(ParameterError::Clock("day")));
    }

    #[test]
    fn test_from_wire() {
        let value = ClockValue::from_wire(&[0x09, 0x07, 0x14, 0x05, 0x02, 0x03, 0x24]).unwrap();
        assert_eq!(value, ClockValue::new(9, 7, 14, 5, 2, 3, 24).unwrap());
        assert_eq!(ClockValue::from_wire(&[0x09, 0x07]), None);
        assert_eq!(ClockValue::from_wire(&[0x0a, 0x07, 0x14, 0x05, 0x02, 0x03, 0x24]), None);
    }

    #[test]
    fn test_closure_wall_clock() {
        let clock = || at(2024, 3, 5, 14, 7, 9);
        assert_eq!(clock.now(), at(2024, 3, 5, 14, 7, 9));
    }
}
