//! Coordinate primitives shared by the ephemeris and event code
//!
//! Rectangular vectors are plain `nalgebra::Vector3<f64>`; this module adds the
//! spherical view of them and the angle reductions used throughout the crate.

pub mod spherical;

pub use spherical::{angular_separation, mod_2pi, mod_pi, Spherical};
