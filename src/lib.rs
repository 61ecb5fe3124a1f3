//! Starfield almanac: solar system ephemerides and horizon events
//!
//! This crate computes, for the Sun, planets, moons, asteroids, comets and
//! artificial satellites, heliocentric positions and velocities, apparent
//! directions and distances from an observer on Earth, and visual
//! magnitudes. On top of that it finds rising, transit and setting times for
//! a local day and scans for satellite overhead passes.
//!
//! ```no_run
//! use starfield_almanac::almanac::day_pass;
//! use starfield_almanac::constants::HORIZON_SUN_MOON;
//! use starfield_almanac::{Body, Location, Observer, Planet, Time};
//!
//! let now = Time::from_calendar(2020, 3, 20, 0, 0, 0.0, 0.0);
//! let mut observer = Observer::new(Location::from_degrees(0.0, 51.48, 0.0), now);
//! let mut sun = Body::planet(Planet::Sun);
//! let pass = day_pass(now, &mut observer, &mut sun, HORIZON_SUN_MOON);
//! println!("sunrise {} sunset {}", pass.rising.time, pass.setting.time);
//! ```

use thiserror::Error;

pub mod almanac;
pub mod celestial;
pub mod constants;
pub mod coordinates;
pub mod ephemeris;
pub mod framelib;
pub mod magnitude;
pub mod observer;
pub mod orbit;
pub mod planetlib;
pub mod time;
pub mod tle;

// Re-export commonly used types
pub use almanac::{Event, Pass, PassEvent};
pub use celestial::{Body, BodyKind};
pub use ephemeris::Ephemeris;
pub use observer::{Location, Observer};
pub use orbit::Orbit;
pub use planetlib::{Planet, State, TabulatedEphemeris};
pub use time::Time;
pub use tle::Tle;

/// Main error type for the almanac library
#[derive(Debug, Error)]
pub enum AlmanacError {
    #[error("Invalid TLE: {0}")]
    InvalidTle(String),

    #[error("Propagation error: {0}")]
    Propagation(String),

    #[error("Invalid orbit: {0}")]
    InvalidOrbit(String),

    #[error("Time error: {0}")]
    Time(#[from] time::TimeError),
}

/// Result type for almanac operations
pub type Result<T> = std::result::Result<T, AlmanacError>;
