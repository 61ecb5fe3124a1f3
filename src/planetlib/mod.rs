//! Major bodies of the solar system and the tabulated ephemeris interface

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Enum representing the Sun and the major planets, numbered 0..=9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Sun = 0,
    Mercury = 1,
    Venus = 2,
    Earth = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
    Uranus = 7,
    Neptune = 8,
    Pluto = 9,
}

impl Planet {
    /// All bodies in catalog order
    pub const ALL: [Planet; 10] = [
        Planet::Sun,
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Earth => "Earth",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }

    /// Catalog number, 0 for the Sun through 9 for Pluto
    pub fn id(&self) -> usize {
        *self as usize
    }

    /// Look up a body by catalog number
    pub fn from_id(id: usize) -> Option<Planet> {
        Planet::ALL.get(id).copied()
    }
}

/// Heliocentric state of a body at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    /// Position in AU
    pub position: Vector3<f64>,
    /// Velocity in AU/day
    pub velocity: Vector3<f64>,
}

impl State {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self { position, velocity }
    }

    /// The origin, at rest
    pub fn zero() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }

    /// Sentinel for a state that has not been, or could not be, computed
    pub fn undefined() -> Self {
        Self::new(
            Vector3::repeat(f64::INFINITY),
            Vector3::repeat(f64::INFINITY),
        )
    }

    /// Whether every component is finite
    pub fn is_defined(&self) -> bool {
        self.position.iter().all(|x| x.is_finite()) && self.velocity.iter().all(|x| x.is_finite())
    }
}

/// Bodies a tabulated ephemeris can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Planet(Planet),
    /// Earth's Moon
    Luna,
}

/// A high-precision tabulated ephemeris, such as a JPL DE series file
///
/// Implementations return heliocentric states in AU and AU/day in the
/// fundamental (J2000 equatorial) frame, or `None` when the body or the date
/// is not covered. When `want_velocity` is false the velocity may be left zero.
pub trait TabulatedEphemeris: Send + Sync {
    fn lookup(&self, target: Target, jed: f64, want_velocity: bool) -> Option<State>;
}
