//! Rotation matrices between the reference frames used by the ephemeris engine
//!
//! Every matrix here rotates column vectors: `m * v` expresses `v`, given in
//! the source frame, in the target frame. All of them are orthonormal, so the
//! transpose is the inverse.

use crate::constants::{ASEC2RAD, J2000, JULIAN_CENTURY, OBLIQUITY_J2000_ASEC};
use lazy_static::lazy_static;
use nalgebra::{Matrix3, Vector3};

lazy_static! {
    /// J2000 ecliptic to J2000 equatorial (fundamental) frame
    pub static ref ECLIPTIC_TO_FUNDAMENTAL: Matrix3<f64> =
        ecliptic_matrix(obliquity(J2000));
}

/// Mean obliquity of the ecliptic in radians (IAU 1976)
pub fn obliquity(jed: f64) -> f64 {
    let t = (jed - J2000) / JULIAN_CENTURY;
    (OBLIQUITY_J2000_ASEC - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t) * ASEC2RAD
}

/// Rotation from an ecliptic frame to the equatorial frame of the same epoch
pub fn ecliptic_matrix(obliquity: f64) -> Matrix3<f64> {
    let (s, c) = obliquity.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, c, -s, //
        0.0, s, c,
    )
}

/// Precession from the J2000 mean equator to the mean equator of date (IAU 1976)
pub fn precession_matrix(jed: f64) -> Matrix3<f64> {
    let t = (jed - J2000) / JULIAN_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;

    let zeta = (2306.2181 * t + 0.30188 * t2 + 0.017998 * t3) * ASEC2RAD;
    let z = (2306.2181 * t + 1.09468 * t2 + 0.018203 * t3) * ASEC2RAD;
    let theta = (2004.3109 * t - 0.42665 * t2 - 0.041833 * t3) * ASEC2RAD;

    let (sz, cz) = zeta.sin_cos();
    let (s_z, c_z) = z.sin_cos();
    let (st, ct) = theta.sin_cos();

    Matrix3::new(
        cz * ct * c_z - sz * s_z,
        -sz * ct * c_z - cz * s_z,
        -st * c_z,
        cz * ct * s_z + sz * c_z,
        -sz * ct * s_z + cz * c_z,
        -st * s_z,
        cz * st,
        -sz * st,
        ct,
    )
}

/// Rotation from the equatorial frame of date to the local horizon frame
///
/// The horizon frame has +X toward the north point, +Y toward the east point
/// and +Z toward the zenith, so spherical longitude is azimuth measured from
/// north through east and latitude is altitude.
pub fn horizon_matrix(local_sidereal_time: f64, latitude: f64) -> Matrix3<f64> {
    let (sl, cl) = local_sidereal_time.sin_cos();
    let (sp, cp) = latitude.sin_cos();

    // Equator of date rotated so +X lies on the local meridian
    let meridian = Matrix3::new(
        cl, sl, 0.0, //
        -sl, cl, 0.0, //
        0.0, 0.0, 1.0,
    );

    // Rows are the north, east and zenith directions in the meridian frame
    let horizon = Matrix3::new(
        -sp, 0.0, cp, //
        0.0, 1.0, 0.0, //
        cp, 0.0, sp,
    );

    horizon * meridian
}

/// Geocentric rectangular position of a geodetic site in kilometers
///
/// The result is Earth-fixed: +X toward longitude 0 on the equator, +Z toward
/// the north pole. `height` is meters above the WGS84 ellipsoid.
pub fn geodetic_to_geocentric(longitude: f64, latitude: f64, height: f64) -> Vector3<f64> {
    use crate::constants::{EARTH_FLATTENING, EARTH_RADIUS_KM};

    let e2 = EARTH_FLATTENING * (2.0 - EARTH_FLATTENING);
    let (sp, cp) = latitude.sin_cos();
    let (sl, cl) = longitude.sin_cos();
    let n = EARTH_RADIUS_KM / (1.0 - e2 * sp * sp).sqrt();
    let h = height / 1000.0;

    Vector3::new(
        (n + h) * cp * cl,
        (n + h) * cp * sl,
        (n * (1.0 - e2) + h) * sp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEG2RAD;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_obliquity_j2000() {
        assert_relative_eq!(obliquity(J2000) / DEG2RAD, 23.439_291, epsilon = 1e-6);
    }

    #[test]
    fn test_ecliptic_pole_maps_to_equatorial() {
        // The north ecliptic pole lies at RA 18h, Dec 90 - obliquity
        let pole = *ECLIPTIC_TO_FUNDAMENTAL * Vector3::new(0.0, 0.0, 1.0);
        let eps = obliquity(J2000);
        assert_relative_eq!(pole.x, 0.0, epsilon = 1e-15);
        assert_relative_eq!(pole.y, -eps.sin(), epsilon = 1e-15);
        assert_relative_eq!(pole.z, eps.cos(), epsilon = 1e-15);
    }

    #[test]
    fn test_precession_is_identity_at_j2000_and_orthonormal() {
        let p = precession_matrix(J2000);
        assert_relative_eq!(p, Matrix3::identity(), epsilon = 1e-15);

        let p = precession_matrix(J2000 + 50.0 * 365.25);
        assert_relative_eq!(p * p.transpose(), Matrix3::identity(), epsilon = 1e-14);

        // The equinox moves about 50.3 arcseconds per year in RA
        let equinox = p * Vector3::new(1.0, 0.0, 0.0);
        let ra = equinox.y.atan2(equinox.x) / ASEC2RAD;
        assert!((ra - 50.0 * 46.1).abs() < 50.0, "ra drift = {}", ra);
    }

    #[test]
    fn test_horizon_matrix_zenith_and_north() {
        let lat = 40.0 * DEG2RAD;
        let lst = 1.3;
        let m = horizon_matrix(lst, lat);

        // A star on the meridian at declination = latitude is at the zenith
        let zenith_star = Vector3::new(lat.cos() * lst.cos(), lat.cos() * lst.sin(), lat.sin());
        let hor = m * zenith_star;
        assert_relative_eq!(hor.z, 1.0, epsilon = 1e-14);

        // The celestial pole is due north at altitude = latitude
        let hor = m * Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(hor.z.asin(), lat, epsilon = 1e-14);
        assert_relative_eq!(hor.y, 0.0, epsilon = 1e-14);
        assert!(hor.x > 0.0);

        // A star one quarter turn west of the meridian on the equator sets due west
        let west = Vector3::new((lst - FRAC_PI_2).cos(), (lst - FRAC_PI_2).sin(), 0.0);
        let hor = m * west;
        assert_relative_eq!(hor.z, 0.0, epsilon = 1e-14);
        assert_relative_eq!(hor.y, -1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_geodetic_radius() {
        let equator = geodetic_to_geocentric(0.0, 0.0, 0.0);
        assert_relative_eq!(equator.norm(), 6378.137, epsilon = 1e-9);

        let pole = geodetic_to_geocentric(0.0, FRAC_PI_2, 0.0);
        assert_relative_eq!(pole.z, 6356.752, epsilon = 1e-3);
    }
}
