//! # Spherical Coordinate Module
//!
//! Spherical coordinates are the natural way to report positions on the sky:
//! right ascension / declination in the equatorial frame, azimuth / altitude
//! in the horizon frame. All computation happens on rectangular
//! `nalgebra::Vector3` values; this module converts between the two.
//!
//! ## Convention
//!
//! - `lon` is measured counter-clockwise from the +X axis toward +Y, normalized
//!   to [0, 2π). In the horizon frame +X points north and +Y points east, so
//!   `lon` is an azimuth measured from north through east.
//! - `lat` is measured from the XY plane toward +Z, in [-π/2, π/2].
//! - `rad` is the distance from the origin; 1.0 for a unit vector.
//!
//! ## Examples
//!
//! ```rust
//! use starfield_almanac::coordinates::Spherical;
//! use nalgebra::Vector3;
//!
//! let pole = Spherical::from_vector(&Vector3::new(0.0, 0.0, 2.0));
//! assert!((pole.lat - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
//! assert_eq!(pole.rad, 2.0);
//! ```

use crate::constants::{RAD2DEG, TAU};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A point in a spherical coordinate system (RA/Dec, Az/Alt, ecliptic lon/lat)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spherical {
    /// Longitude coordinate in radians, [0, 2π)
    pub lon: f64,
    /// Latitude coordinate in radians, [-π/2, π/2]
    pub lat: f64,
    /// Radial distance in arbitrary units
    pub rad: f64,
}

impl Spherical {
    /// Creates a spherical coordinate, normalizing the longitude to [0, 2π)
    pub fn new(lon: f64, lat: f64, rad: f64) -> Self {
        Spherical {
            lon: mod_2pi(lon),
            lat,
            rad,
        }
    }

    /// Creates a unit-radius spherical coordinate from angles in degrees
    pub fn from_degrees(lon_deg: f64, lat_deg: f64) -> Self {
        Self::new(lon_deg.to_radians(), lat_deg.to_radians(), 1.0)
    }

    /// Converts a rectangular vector to spherical coordinates
    ///
    /// The zero vector maps to `(0, 0, 0)`; a vector along the Z axis gets
    /// longitude 0.
    pub fn from_vector(v: &Vector3<f64>) -> Self {
        let rad = v.norm();
        if rad == 0.0 {
            return Spherical {
                lon: 0.0,
                lat: 0.0,
                rad: 0.0,
            };
        }

        let lon = if v.x == 0.0 && v.y == 0.0 {
            0.0
        } else {
            mod_2pi(v.y.atan2(v.x))
        };
        let lat = (v.z / rad).clamp(-1.0, 1.0).asin();

        Spherical { lon, lat, rad }
    }

    /// Converts to a rectangular vector with the same radius
    pub fn to_vector(&self) -> Vector3<f64> {
        let cos_lat = self.lat.cos();
        Vector3::new(
            self.rad * cos_lat * self.lon.cos(),
            self.rad * cos_lat * self.lon.sin(),
            self.rad * self.lat.sin(),
        )
    }

    /// Longitude in degrees
    pub fn lon_degrees(&self) -> f64 {
        self.lon * RAD2DEG
    }

    /// Latitude in degrees
    pub fn lat_degrees(&self) -> f64 {
        self.lat * RAD2DEG
    }

    /// Angular separation from another spherical coordinate, in radians
    pub fn angular_separation(&self, other: &Spherical) -> f64 {
        angular_separation(&self.to_vector(), &other.to_vector())
    }
}

/// Angle between two vectors in radians, in [0, π]
///
/// Uses the atan2 form, which stays accurate for nearly parallel and nearly
/// opposite vectors where the arccos of the dot product loses precision.
pub fn angular_separation(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Reduces an angle to [0, 2π)
pub fn mod_2pi(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

/// Reduces an angle to (-π, π]
pub fn mod_pi(angle: f64) -> f64 {
    let reduced = mod_2pi(angle);
    if reduced > PI {
        reduced - TAU
    } else {
        reduced
    }
}
