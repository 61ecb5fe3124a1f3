//! Two-line element sets and SGP4 propagation
//!
//! A thin wrapper over the `sgp4` crate: the element set is parsed and its
//! propagator constants initialized once, then the satellite can be evaluated
//! at any UTC Julian date. States come back in the TEME frame of date in
//! kilometers and kilometers per second, relative to the Earth's center.

use crate::constants::{DAY_MIN, DAY_S, J2000};
use crate::{AlmanacError, Result};
use chrono::NaiveDate;
use nalgebra::Vector3;
use std::fmt;
use std::sync::Arc;

/// A parsed TLE, ready to propagate
#[derive(Clone)]
pub struct Tle {
    name: Option<String>,
    norad_id: u64,
    /// Element set epoch as a UTC Julian date
    epoch_jd: f64,
    constants: Arc<sgp4::Constants>,
}

impl Tle {
    /// Parse the two data lines of a TLE, with an optional object name
    pub fn parse(name: Option<&str>, line1: &str, line2: &str) -> Result<Self> {
        let elements = sgp4::Elements::from_tle(
            name.map(|n| n.trim().to_string()),
            line1.trim_end().as_bytes(),
            line2.trim_end().as_bytes(),
        )
        .map_err(|e| AlmanacError::InvalidTle(format!("{:?}", e)))?;

        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| AlmanacError::InvalidTle(format!("{:?}", e)))?;

        let j2000 = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .ok_or_else(|| AlmanacError::InvalidTle("J2000 epoch".to_string()))?;
        let since_j2000 = elements.datetime.signed_duration_since(j2000);
        let epoch_jd = J2000 + since_j2000.num_milliseconds() as f64 / (DAY_S * 1000.0);

        Ok(Tle {
            name: elements.object_name.clone(),
            norad_id: elements.norad_id,
            epoch_jd,
            constants: Arc::new(constants),
        })
    }

    /// Parse a three-line block: name line followed by the two data lines
    pub fn parse_lines(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        match lines.as_slice() {
            [l1, l2] => Self::parse(None, l1, l2),
            [name, l1, l2] => Self::parse(Some(name.trim_start_matches("0 ")), l1, l2),
            _ => Err(AlmanacError::InvalidTle(format!(
                "expected 2 or 3 lines, got {}",
                lines.len()
            ))),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// NORAD catalog number
    pub fn norad_id(&self) -> u64 {
        self.norad_id
    }

    /// Element set epoch as a UTC Julian date
    pub fn epoch_jd(&self) -> f64 {
        self.epoch_jd
    }

    /// Geocentric TEME position (km) and velocity (km/s) at a UTC Julian date
    pub fn to_position_velocity(&self, jd: f64) -> Result<(Vector3<f64>, Vector3<f64>)> {
        let minutes = (jd - self.epoch_jd) * DAY_MIN;
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(|e| AlmanacError::Propagation(format!("{:?}", e)))?;

        Ok((
            Vector3::from(prediction.position),
            Vector3::from(prediction.velocity),
        ))
    }
}

impl fmt::Debug for Tle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tle")
            .field("name", &self.name)
            .field("norad_id", &self.norad_id)
            .field("epoch_jd", &self.epoch_jd)
            .finish_non_exhaustive()
    }
}
