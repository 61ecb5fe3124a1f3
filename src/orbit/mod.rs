//! Keplerian orbits
//!
//! An [`Orbit`] is a set of osculating conic elements referred to the J2000
//! ecliptic (or, for moons, to the same axes centered on the primary).
//! Elliptic, parabolic and hyperbolic orbits are all supported; the element
//! set uses perihelion distance rather than semi-major axis so that all three
//! share one representation.

mod planets;

use crate::constants::TAU;
use crate::coordinates::mod_pi;
use crate::planetlib::State;
use crate::{AlmanacError, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

const KEPLER_TOLERANCE: f64 = 1e-14;
const KEPLER_MAX_ITERATIONS: usize = 50;
/// Eccentricities this close to 1 are solved as parabolas
const PARABOLIC_BAND: f64 = 1e-9;

/// Conic orbital elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    /// Epoch of the elements, Julian Ephemeris Date
    pub t: f64,
    /// Periapse distance in AU
    pub q: f64,
    /// Eccentricity
    pub e: f64,
    /// Inclination in radians
    pub i: f64,
    /// Argument of periapse in radians
    pub w: f64,
    /// Longitude of ascending node in radians
    pub n: f64,
    /// Mean anomaly at epoch in radians
    pub m: f64,
    /// Mean motion in radians per day
    pub mm: f64,
}

impl Orbit {
    /// Create an orbit, rejecting elements that cannot describe a conic
    #[allow(clippy::too_many_arguments)]
    pub fn new(t: f64, q: f64, e: f64, i: f64, w: f64, n: f64, m: f64, mm: f64) -> Result<Self> {
        let values = [t, q, e, i, w, n, m, mm];
        if values.iter().any(|x| !x.is_finite()) {
            return Err(AlmanacError::InvalidOrbit(format!(
                "non-finite element in {:?}",
                values
            )));
        }
        if q <= 0.0 || e < 0.0 {
            return Err(AlmanacError::InvalidOrbit(format!("q = {}, e = {}", q, e)));
        }

        Ok(Orbit {
            t,
            q,
            e,
            i,
            w,
            n,
            m,
            mm,
        })
    }

    /// Create an elliptic orbit from its semi-major axis
    #[allow(clippy::too_many_arguments)]
    pub fn from_semi_major_axis(
        t: f64,
        a: f64,
        e: f64,
        i: f64,
        w: f64,
        n: f64,
        m: f64,
        mm: f64,
    ) -> Result<Self> {
        if e >= 1.0 {
            return Err(AlmanacError::InvalidOrbit(format!(
                "semi-major axis given for e = {}",
                e
            )));
        }
        Self::new(t, a * (1.0 - e), e, i, w, n, m, mm)
    }

    /// Semi-major axis in AU; negative for hyperbolas, infinite for parabolas
    pub fn semi_major_axis(&self) -> f64 {
        self.q / (1.0 - self.e)
    }

    /// Orbital period in days, infinite for open orbits
    pub fn period(&self) -> f64 {
        if self.e < 1.0 {
            TAU / self.mm
        } else {
            f64::INFINITY
        }
    }

    /// Position and velocity at a Julian Ephemeris Date
    ///
    /// Returned in AU and AU/day on the axes the elements are referred to.
    pub fn to_position_velocity(&self, jed: f64) -> State {
        let ma = self.m + self.mm * (jed - self.t);

        // Position and velocity in the orbital plane, +X toward periapse
        let (x, y, vx, vy) = if (self.e - 1.0).abs() < PARABOLIC_BAND {
            self.parabolic(ma)
        } else if self.e < 1.0 {
            self.elliptic(ma)
        } else {
            self.hyperbolic(ma)
        };

        let (p, q) = self.orientation();
        State::new(p * x + q * y, p * vx + q * vy)
    }

    fn elliptic(&self, ma: f64) -> (f64, f64, f64, f64) {
        let e = self.e;
        let a = self.semi_major_axis();
        let ma = mod_pi(ma);

        let mut ea = if e < 0.8 { ma } else { ma.signum() * std::f64::consts::PI };
        for _ in 0..KEPLER_MAX_ITERATIONS {
            let delta = (ea - e * ea.sin() - ma) / (1.0 - e * ea.cos());
            ea -= delta;
            if delta.abs() < KEPLER_TOLERANCE {
                break;
            }
        }

        let (s, c) = ea.sin_cos();
        let b = a * (1.0 - e * e).sqrt();
        let ea_dot = self.mm / (1.0 - e * c);

        (a * (c - e), b * s, -a * s * ea_dot, b * c * ea_dot)
    }

    fn hyperbolic(&self, ma: f64) -> (f64, f64, f64, f64) {
        let e = self.e;
        let a = -self.semi_major_axis();

        let mut ha = (ma / e).asinh();
        for _ in 0..KEPLER_MAX_ITERATIONS {
            let delta = (e * ha.sinh() - ha - ma) / (e * ha.cosh() - 1.0);
            ha -= delta;
            if delta.abs() < KEPLER_TOLERANCE * ha.abs().max(1.0) {
                break;
            }
        }

        let (s, c) = (ha.sinh(), ha.cosh());
        let b = a * (e * e - 1.0).sqrt();
        let ha_dot = self.mm / (e * c - 1.0);

        (a * (e - c), b * s, -a * s * ha_dot, b * c * ha_dot)
    }

    fn parabolic(&self, ma: f64) -> (f64, f64, f64, f64) {
        // Barker's equation s + s^3/3 = M, with s = tan(v/2)
        let w = 1.5 * ma;
        let y = (w + (w * w + 1.0).sqrt()).cbrt();
        let s = y - 1.0 / y;

        let q = self.q;
        let s_dot = self.mm / (1.0 + s * s);

        (q * (1.0 - s * s), 2.0 * q * s, -2.0 * q * s * s_dot, 2.0 * q * s_dot)
    }

    /// Unit vectors toward periapse and 90 degrees ahead of it, on the reference axes
    fn orientation(&self) -> (Vector3<f64>, Vector3<f64>) {
        let (sw, cw) = self.w.sin_cos();
        let (sn, cn) = self.n.sin_cos();
        let (si, ci) = self.i.sin_cos();

        let p = Vector3::new(cw * cn - sw * sn * ci, cw * sn + sw * cn * ci, sw * si);
        let q = Vector3::new(-sw * cn - cw * sn * ci, -sw * sn + cw * cn * ci, cw * si);
        (p, q)
    }
}
