//! Visual magnitude models
//!
//! Empirical brightness formulas for each kind of body. Inputs are the
//! phase angle in radians, the heliocentric distance `r` and the observer
//! distance `delta` in AU (kilometers for artificial satellites). A result of
//! `f64::INFINITY` means the magnitude is undefined for that geometry or
//! because the body's photometric parameters are missing.

use crate::constants::{DEG2RAD, RAD2DEG};
use crate::planetlib::Planet;
use lazy_static::lazy_static;
use nalgebra::Vector3;

/// Slope parameter used when a moon has none of its own
pub const DEFAULT_SLOPE: f64 = 0.15;

/// Photometric parameters of Earth's Moon in the H-G system
pub const LUNA_H: f64 = 0.21;
pub const LUNA_G: f64 = 0.25;

lazy_static! {
    /// Saturn's north pole in the fundamental frame
    static ref SATURN_POLE: Vector3<f64> = {
        let (ra, dec) = (40.589 * DEG2RAD, 83.537 * DEG2RAD);
        Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
    };
}

/// Fraction of the visible disk that is lit, from the phase angle
pub fn illumination(phase: f64) -> f64 {
    (1.0 + phase.cos()) / 2.0
}

/// Apparent magnitude of the Sun at `delta` AU
pub fn sun(delta: f64) -> f64 {
    -26.72 + 5.0 * delta.log10()
}

/// Apparent magnitude of a major planet
///
/// `direction` is the apparent unit direction in the fundamental frame; only
/// Saturn uses it, to find the tilt of its rings.
pub fn planet(planet: Planet, phase: f64, r: f64, delta: f64, direction: &Vector3<f64>) -> f64 {
    let b = phase * RAD2DEG;
    let d = 5.0 * (r * delta).log10();

    match planet {
        Planet::Sun => sun(delta),
        Planet::Mercury => -0.42 + d + 0.0380 * b - 0.000273 * b * b + 0.000002 * b * b * b,
        Planet::Venus => -4.40 + d + 0.0009 * b + 0.000239 * b * b - 0.00000065 * b * b * b,
        Planet::Earth => -3.86 + d,
        Planet::Mars => -1.52 + d + 0.016 * b,
        Planet::Jupiter => -9.40 + d + 0.005 * b,
        Planet::Saturn => {
            let ring = saturn_ring_inclination(direction);
            -8.88 + d + 0.044 * b - 2.60 * ring.abs() + 1.25 * ring * ring
        }
        Planet::Uranus => -7.19 + d + 0.0028 * b,
        Planet::Neptune => -6.87 + d,
        Planet::Pluto => -1.01 + d + 0.041 * b,
    }
}

/// Angle of the line of sight above Saturn's ring plane, in radians
pub fn saturn_ring_inclination(direction: &Vector3<f64>) -> f64 {
    let cos = direction.normalize().dot(&SATURN_POLE).clamp(-1.0, 1.0);
    std::f64::consts::FRAC_PI_2 - cos.acos()
}

/// Asteroid magnitude in the IAU H-G system
pub fn asteroid(h: f64, g: f64, phase: f64, r: f64, delta: f64) -> f64 {
    let tan_half = (phase / 2.0).tan().abs();
    let phi1 = (-3.33 * tan_half.powf(0.63)).exp();
    let phi2 = (-1.87 * tan_half.powf(1.22)).exp();
    let integral = (1.0 - g) * phi1 + g * phi2;

    if !h.is_finite() || integral.is_nan() || integral <= 0.0 {
        return f64::INFINITY;
    }

    h + 5.0 * (r * delta).log10() - 2.5 * integral.log10()
}

/// Magnitude of a natural satellite
///
/// Luna uses fixed H-G parameters; other moons use their own, with the
/// slope defaulting to [`DEFAULT_SLOPE`] when it is not known.
pub fn moon(id: u32, h: f64, g: f64, phase: f64, r: f64, delta: f64) -> f64 {
    if id == crate::ephemeris::LUNA_ID {
        return asteroid(LUNA_H, LUNA_G, phase, r, delta);
    }

    let g = if g.is_finite() { g } else { DEFAULT_SLOPE };
    asteroid(h, g, phase, r, delta)
}

/// Comet total magnitude from absolute magnitude H and slope K
pub fn comet(h: f64, k: f64, r: f64, delta: f64) -> f64 {
    let m = h + 5.0 * delta.log10() + 2.5 * k * r.log10();
    if m.is_nan() {
        f64::INFINITY
    } else {
        m
    }
}

/// Artificial satellite magnitude
///
/// `std_mag` is the magnitude at 1000 km range and half illumination;
/// `delta_km` is the range in kilometers. Undefined at a phase of 180 degrees.
pub fn satellite(std_mag: f64, phase: f64, delta_km: f64) -> f64 {
    if phase >= std::f64::consts::PI || !std_mag.is_finite() {
        return f64::INFINITY;
    }

    std_mag - 15.75 + 2.5 * (delta_km * delta_km / illumination(phase)).log10()
}
