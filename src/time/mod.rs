//! Time module for ephemeris and event calculations
//!
//! A [`Time`] is a civil (UTC) Julian date plus the local time zone used to
//! decide where a "local day" begins. Dynamical time for the ephemeris engine
//! is derived on demand through the Delta-T model, and sidereal time through
//! the IAU 1982 GMST expression.
//!
//! Times may be infinite: the event solvers use `+inf` for "never sets / after
//! the search window" and `-inf` for "never rises / before the search window",
//! so every arithmetic operation and comparison here stays well defined for
//! infinite values.

use crate::constants::{
    DAY_S, DEG2RAD, GMST_DEG_PER_DAY, J2000, JULIAN_CENTURY, UNIX_EPOCH_JD,
};
use crate::coordinates::mod_2pi;
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Time out of range: {0}")]
    OutOfRange(String),

    #[error("Calendar error: {0}")]
    CalendarError(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// An instant in civil time with an attached local time zone
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Time {
    /// Julian date in UTC (approximately UT1)
    jd: f64,
    /// Local time zone in hours east of Greenwich
    zone: f64,
}

impl Time {
    /// Create a time from a UTC Julian date and a zone in hours east of UTC
    pub fn from_jd(jd: f64, zone: f64) -> Self {
        Time { jd, zone }
    }

    /// Create a time from a Gregorian calendar date and time in UTC
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
        zone: f64,
    ) -> Self {
        let day_fraction =
            day as f64 + (hour as f64 + minute as f64 / 60.0 + second / 3600.0) / 24.0;
        Time {
            jd: julian_date(year, month, day_fraction),
            zone,
        }
    }

    /// A time infinitely far in the future
    pub fn infinity() -> Self {
        Time {
            jd: f64::INFINITY,
            zone: 0.0,
        }
    }

    /// A time infinitely far in the past
    pub fn neg_infinity() -> Self {
        Time {
            jd: f64::NEG_INFINITY,
            zone: 0.0,
        }
    }

    /// UTC Julian date
    pub fn jd(&self) -> f64 {
        self.jd
    }

    /// Local time zone in hours east of UTC
    pub fn zone(&self) -> f64 {
        self.zone
    }

    /// Same instant with a different local time zone
    pub fn with_zone(self, zone: f64) -> Self {
        Time { zone, ..self }
    }

    /// Whether this is one of the `+inf` / `-inf` sentinel times
    pub fn is_infinite(&self) -> bool {
        self.jd.is_infinite()
    }

    /// Delta-T (TT - UT) in seconds at this time
    pub fn delta_t(&self) -> f64 {
        delta_t(self.jd)
    }

    /// Julian Ephemeris Date (dynamical time)
    pub fn jed(&self) -> f64 {
        self.jd + self.delta_t() / DAY_S
    }

    /// Greenwich mean sidereal time in radians
    pub fn greenwich_sidereal_time(&self) -> f64 {
        let d = self.jd - J2000;
        let t = d / JULIAN_CENTURY;
        let gmst = 280.460_618_37 + GMST_DEG_PER_DAY * d + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0;
        mod_2pi(gmst * DEG2RAD)
    }

    /// Local mean sidereal time in radians at an east longitude in radians
    pub fn local_sidereal_time(&self, longitude: f64) -> f64 {
        mod_2pi(self.greenwich_sidereal_time() + longitude)
    }

    /// The most recent local midnight at or before this time
    pub fn local_midnight(&self) -> Time {
        let offset = self.zone / 24.0;
        let local = self.jd + offset;
        let midnight = (local - 0.5).floor() + 0.5;
        Time {
            jd: midnight - offset,
            zone: self.zone,
        }
    }

    /// Convert to a UTC datetime
    pub fn utc_datetime(&self) -> Result<DateTime<Utc>> {
        if !self.jd.is_finite() {
            return Err(TimeError::OutOfRange(format!("jd = {}", self.jd)));
        }

        let millis = ((self.jd - UNIX_EPOCH_JD) * DAY_S * 1000.0).round();
        DateTime::<Utc>::from_timestamp_millis(millis as i64)
            .ok_or_else(|| TimeError::OutOfRange(format!("jd = {}", self.jd)))
    }

    /// Convert to a datetime in the local time zone
    pub fn local_datetime(&self) -> Result<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt((self.zone * 3600.0).round() as i32)
            .ok_or_else(|| TimeError::CalendarError(format!("zone = {}", self.zone)))?;
        Ok(self.utc_datetime()?.with_timezone(&offset))
    }
}

/// Julian date of a Gregorian calendar date, with the day carrying the fraction
pub fn julian_date(year: i32, month: u32, day: f64) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Delta-T (TT - UT) in seconds for a UTC Julian date
///
/// Polynomial approximations by Espenak and Meeus, piecewise by era.
pub fn delta_t(jd: f64) -> f64 {
    let year = 2000.0 + (jd - J2000) / 365.25;

    if year < -500.0 {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    } else if year < 500.0 {
        let t = year / 100.0;
        10583.6 - 1014.41 * t + 33.78311 * t * t - 5.952053 * t.powi(3) - 0.1798452 * t.powi(4)
            + 0.022174192 * t.powi(5)
            + 0.0090316521 * t.powi(6)
    } else if year < 1600.0 {
        let t = (year - 1000.0) / 100.0;
        1574.2 - 556.01 * t + 71.23472 * t * t + 0.319781 * t.powi(3)
            - 0.8503463 * t.powi(4)
            - 0.005050998 * t.powi(5)
            + 0.0083572073 * t.powi(6)
    } else if year < 1700.0 {
        let t = year - 1600.0;
        120.0 - 0.9808 * t - 0.01532 * t * t + t.powi(3) / 7129.0
    } else if year < 1800.0 {
        let t = year - 1700.0;
        8.83 + 0.1603 * t - 0.0059285 * t * t + 0.00013336 * t.powi(3) - t.powi(4) / 1174000.0
    } else if year < 1860.0 {
        let t = year - 1800.0;
        13.72 - 0.332447 * t + 0.0068612 * t * t + 0.0041116 * t.powi(3)
            - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7)
    } else if year < 1900.0 {
        let t = year - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t * t + 0.01680668 * t.powi(3) - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233174.0
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t * t + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t * t + 0.0020936 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t * t / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t * t / 260.0 - t.powi(3) / 718.0
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t * t
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else if year < 2150.0 {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - year)
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.jd == f64::INFINITY {
            return write!(f, "+inf");
        }
        if self.jd == f64::NEG_INFINITY {
            return write!(f, "-inf");
        }

        match self.local_datetime() {
            Ok(dt) => write!(
                f,
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02} {}",
                dt.year(),
                dt.month(),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second(),
                dt.offset()
            ),
            Err(_) => write!(f, "<Time jd={:.6}>", self.jd),
        }
    }
}

// Addition and subtraction operations for Time, in days

impl Add<f64> for Time {
    type Output = Time;

    fn add(self, days: f64) -> Self::Output {
        Time {
            jd: self.jd + days,
            zone: self.zone,
        }
    }
}

impl Sub<f64> for Time {
    type Output = Time;

    fn sub(self, days: f64) -> Self::Output {
        Time {
            jd: self.jd - days,
            zone: self.zone,
        }
    }
}

impl Sub<Time> for Time {
    type Output = f64;

    fn sub(self, other: Time) -> Self::Output {
        self.jd - other.jd
    }
}

// The zone only affects presentation; two times are equal when they name the same instant
impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.jd == other.jd
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.jd.partial_cmp(&other.jd)
    }
}

// Allow conversion from DateTime<Utc> to Time
impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        Time {
            jd: dt.timestamp_millis() as f64 / (DAY_S * 1000.0) + UNIX_EPOCH_JD,
            zone: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn test_julian_date() {
        // J2000.0 is 2000-01-01T12:00:00
        let time = Time::from_calendar(2000, 1, 1, 12, 0, 0.0, 0.0);
        assert_relative_eq!(time.jd(), J2000, epsilon = 1e-9);

        // Meeus, Astronomical Algorithms, example 7.a
        assert_relative_eq!(julian_date(1957, 10, 4.81), 2_436_116.31, epsilon = 1e-9);
    }

    #[test]
    fn test_from_datetime_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2020, 3, 20, 3, 50, 0).unwrap();
        let time: Time = dt.into();
        assert_relative_eq!(
            time.jd(),
            Time::from_calendar(2020, 3, 20, 3, 50, 0.0, 0.0).jd(),
            epsilon = 1e-9
        );
        assert_eq!(time.utc_datetime().unwrap(), dt);
    }

    #[test]
    fn test_infinite_times() {
        let never = Time::infinity();
        assert!(never.is_infinite());
        assert!(never.utc_datetime().is_err());
        assert!(never > Time::from_jd(J2000, 0.0));
        assert!(Time::neg_infinity() < Time::from_jd(J2000, 0.0));
        assert!((never + 1.0).is_infinite());
        assert_eq!(format!("{}", Time::neg_infinity()), "-inf");
    }

    #[test]
    fn test_equality_ignores_zone() {
        let utc = Time::from_jd(J2000 + 0.25, 0.0);
        let tokyo = Time::from_jd(J2000 + 0.25, 9.0);
        assert_eq!(utc, tokyo);
        assert_eq!(utc.partial_cmp(&tokyo), Some(std::cmp::Ordering::Equal));
        assert!(utc <= tokyo && utc >= tokyo);

        assert_ne!(utc, tokyo + 1.0 / DAY_S);
        assert_eq!(Time::infinity().with_zone(-4.0), Time::infinity());
        assert_ne!(Time::infinity(), Time::neg_infinity());
    }

    #[test]
    fn test_time_math() {
        let t1 = Time::from_jd(J2000, 0.0);
        let t2 = t1 + 1.5;
        assert_relative_eq!(t2.jd(), J2000 + 1.5, epsilon = 1e-10);
        assert_relative_eq!(t2 - t1, 1.5, epsilon = 1e-10);
        assert_relative_eq!((t2 - 0.5).jd(), J2000 + 1.0, epsilon = 1e-10);
    }

    #[rstest]
    #[case(0.0, 0.0, 2_451_544.5)]
    #[case(-5.0, 0.0, 2_451_544.5 + 5.0 / 24.0)]
    #[case(10.0, 0.0, 2_451_544.5 - 10.0 / 24.0)]
    #[case(0.0, 0.49, 2_451_544.5)]
    #[case(0.0, 0.51, 2_451_545.5)]
    fn test_local_midnight(#[case] zone: f64, #[case] utc_offset_days: f64, #[case] expected: f64) {
        // Noon UTC on 2000-01-01, shifted a little
        let time = Time::from_jd(J2000 + utc_offset_days, zone);
        let midnight = time.local_midnight();
        assert_relative_eq!(midnight.jd(), expected, epsilon = 1e-9);
        assert!(midnight <= time);
        assert!(time - midnight < 1.0);
        assert_eq!(midnight.zone(), zone);
    }

    #[test]
    fn test_sidereal_time() {
        // Meeus example 12.a: 1987 April 10, 0h UT, GMST = 13h10m46.3668s
        let time = Time::from_calendar(1987, 4, 10, 0, 0, 0.0, 0.0);
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * 15.0 * DEG2RAD;
        assert_relative_eq!(time.greenwich_sidereal_time(), expected, epsilon = 1e-7);

        let lst = time.local_sidereal_time(90.0 * DEG2RAD);
        assert_relative_eq!(lst, mod_2pi(expected + 90.0 * DEG2RAD), epsilon = 1e-7);
    }

    #[test]
    fn test_delta_t_approximation() {
        assert_relative_eq!(delta_t(J2000), 63.86, epsilon = 0.1);

        let jd_2020 = J2000 + 20.0 * 365.25;
        let expected = 62.92 + 0.32217 * 20.0 + 0.005589 * 400.0;
        assert_relative_eq!(delta_t(jd_2020), expected, epsilon = 1e-6);

        let time = Time::from_jd(jd_2020, 0.0);
        assert_relative_eq!(time.jed() - time.jd(), expected / DAY_S, epsilon = 1e-10);

        assert!(delta_t(julian_date(1800, 1, 1.0)) > 0.0);
    }
}
