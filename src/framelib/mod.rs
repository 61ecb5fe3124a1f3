//! Reference frames and the rotations between them
//!
//! The fundamental frame is the J2000 mean equator and equinox; every
//! heliocentric position and velocity in this crate is expressed in it.
//! The other frames depend on the observer's time and place and are reached
//! through [`crate::observer::Observer::transform`].

pub mod rotations;

use serde::{Deserialize, Serialize};

/// The reference frames an observer can transform between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frame {
    /// J2000 mean equator and equinox
    Fundamental,
    /// Mean equator and equinox of the observer's date
    Equatorial,
    /// J2000 ecliptic and equinox
    Ecliptic,
    /// Local horizon: north, east, zenith
    Horizon,
}
