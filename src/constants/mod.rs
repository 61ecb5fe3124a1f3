//! Constants module for astronomical calculations

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// Minutes in a day
pub const DAY_MIN: f64 = 1_440.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Days in a Julian century
pub const JULIAN_CENTURY: f64 = 36_525.0;
/// Unix epoch (1970-01-01T00:00:00Z) as Julian date
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Sidereal days elapsed per solar day
pub const SIDEREAL_PER_SOLAR_DAY: f64 = GMST_DEG_PER_DAY / 360.0;
/// Rate of Greenwich mean sidereal time in degrees per solar day
pub const GMST_DEG_PER_DAY: f64 = 360.985_647_366_29;

// Angles
/// Arcseconds to radians conversion factor
pub const ASEC2RAD: f64 = 4.848_136_811_095_36e-6;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Physics
/// Speed of light in km/s
pub const C_KMS: f64 = 299_792.458;
/// Speed of light in AU/day
pub const C_AUDAY: f64 = C_KMS * DAY_S / AU_KM;
/// Gaussian gravitational constant (radians per day)
pub const GAUSS_K: f64 = 0.017_202_098_95;

// Earth constants
/// WGS84 equatorial radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6_378.137;
/// WGS84 flattening
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257_223_563;
/// Obliquity of the ecliptic at J2000 in arcseconds (IAU 1976)
pub const OBLIQUITY_J2000_ASEC: f64 = 84_381.448;

// Standard horizon altitudes
/// Rise/set altitude for point sources, accounting for refraction (-34')
pub const HORIZON_POINT: f64 = -34.0 / 60.0 * DEG2RAD;
/// Rise/set altitude for the Sun and Moon: refraction plus semi-diameter (-50')
pub const HORIZON_SUN_MOON: f64 = -50.0 / 60.0 * DEG2RAD;
/// Civil twilight altitude
pub const TWILIGHT_CIVIL: f64 = -6.0 * DEG2RAD;
/// Nautical twilight altitude
pub const TWILIGHT_NAUTICAL: f64 = -12.0 * DEG2RAD;
/// Astronomical twilight altitude
pub const TWILIGHT_ASTRONOMICAL: f64 = -18.0 * DEG2RAD;
