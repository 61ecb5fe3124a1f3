//! The observer: a place on Earth, a current time, and everything derived from them
//!
//! The observer owns the position-velocity engine (and with it the engine's
//! caches), so every computation made on behalf of one observer shares one
//! set of memoized states and nothing is shared between observers.

use crate::constants::{AU_KM, C_AUDAY, DEG2RAD, SIDEREAL_PER_SOLAR_DAY, TAU};
use crate::coordinates::Spherical;
use crate::ephemeris::Ephemeris;
use crate::framelib::rotations::{
    geodetic_to_geocentric, horizon_matrix, precession_matrix, ECLIPTIC_TO_FUNDAMENTAL,
};
use crate::framelib::Frame;
use crate::planetlib::Planet;
use crate::time::Time;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Geodetic site on the WGS84 ellipsoid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// East longitude in radians
    pub longitude: f64,
    /// Geodetic latitude in radians
    pub latitude: f64,
    /// Height above the ellipsoid in meters
    #[serde(default)]
    pub height: f64,
}

impl Location {
    pub fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Location {
            longitude,
            latitude,
            height,
        }
    }

    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Self::new(longitude * DEG2RAD, latitude * DEG2RAD, height)
    }
}

/// Observer context for ephemeris and event computations
#[derive(Debug, Clone)]
pub struct Observer {
    time: Time,
    location: Location,
    engine: Ephemeris,

    // Derived from time and location by `set_time`
    jed: f64,
    lst: f64,
    precession: Matrix3<f64>,
    horizon: Matrix3<f64>,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
}

impl Observer {
    /// Observer using the Keplerian fallback engine
    pub fn new(location: Location, time: Time) -> Self {
        Self::with_ephemeris(location, time, Ephemeris::new())
    }

    pub fn with_ephemeris(location: Location, time: Time, engine: Ephemeris) -> Self {
        let mut observer = Observer {
            time,
            location,
            engine,
            jed: 0.0,
            lst: 0.0,
            precession: Matrix3::identity(),
            horizon: Matrix3::identity(),
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
        };
        observer.set_time(time);
        observer
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Julian Ephemeris Date of the current time
    pub fn jed(&self) -> f64 {
        self.jed
    }

    /// Local mean sidereal time in radians
    pub fn local_sidereal_time(&self) -> f64 {
        self.lst
    }

    /// Heliocentric position in AU, fundamental frame
    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    /// Heliocentric velocity in AU/day, fundamental frame
    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    pub fn engine(&self) -> &Ephemeris {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Ephemeris {
        &mut self.engine
    }

    /// Move the observer to a new site, keeping the current time
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
        self.set_time(self.time);
    }

    /// Set the current time and rebuild every time-dependent quantity
    pub fn set_time(&mut self, time: Time) {
        self.time = time;
        self.jed = time.jed();
        self.lst = time.local_sidereal_time(self.location.longitude);
        self.precession = precession_matrix(self.jed);
        self.horizon = horizon_matrix(self.lst, self.location.latitude);

        let earth = self.engine.planet_position_velocity(Planet::Earth, self.jed);

        // Site in the equator of date, then into the fundamental frame
        let gmst = time.greenwich_sidereal_time();
        let (s, c) = gmst.sin_cos();
        let spin = Matrix3::new(
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        );
        let site = spin
            * geodetic_to_geocentric(
                self.location.longitude,
                self.location.latitude,
                self.location.height,
            )
            / AU_KM;
        let omega = Vector3::new(0.0, 0.0, TAU * SIDEREAL_PER_SOLAR_DAY);
        let site_velocity = omega.cross(&site);

        let to_fundamental = self.precession.transpose();
        self.position = earth.position + to_fundamental * site;
        self.velocity = earth.velocity + to_fundamental * site_velocity;
    }

    /// Rotation from the fundamental frame into `frame`
    fn fundamental_to(&self, frame: Frame) -> Matrix3<f64> {
        match frame {
            Frame::Fundamental => Matrix3::identity(),
            Frame::Equatorial => self.precession,
            Frame::Ecliptic => ECLIPTIC_TO_FUNDAMENTAL.transpose(),
            Frame::Horizon => self.horizon * self.precession,
        }
    }

    /// Express a vector given in one frame in another
    pub fn transform(&self, from: Frame, to: Frame, v: &Vector3<f64>) -> Vector3<f64> {
        if from == to {
            return *v;
        }
        self.fundamental_to(to) * self.fundamental_to(from).transpose() * v
    }

    /// Apply annual and diurnal aberration to a unit direction
    pub fn add_aberration(&self, direction: &Vector3<f64>) -> Vector3<f64> {
        (direction + self.velocity / C_AUDAY).normalize()
    }

    /// Azimuth (from north through east) and altitude of a fundamental-frame direction
    pub fn horizon_coords(&self, direction: &Vector3<f64>) -> Spherical {
        Spherical::from_vector(&self.transform(Frame::Fundamental, Frame::Horizon, direction))
    }

    /// Right ascension and declination of date of a fundamental-frame direction
    pub fn equatorial_coords(&self, direction: &Vector3<f64>) -> Spherical {
        Spherical::from_vector(&self.transform(Frame::Fundamental, Frame::Equatorial, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EARTH_RADIUS_KM, J2000};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn greenwich_observer() -> Observer {
        let location = Location::from_degrees(0.0, 51.48, 0.0);
        Observer::new(location, Time::from_calendar(2020, 3, 20, 12, 0, 0.0, 0.0))
    }

    #[test]
    fn test_observer_near_earth() {
        let observer = greenwich_observer();
        let earth = observer
            .engine()
            .planet_position_velocity(Planet::Earth, observer.jed());
        let offset_km = (observer.position() - earth.position).norm() * AU_KM;
        assert!(offset_km < EARTH_RADIUS_KM + 1.0 && offset_km > 6300.0);

        // Rotation adds a few hundred m/s on top of the orbital velocity
        let extra_kms = (observer.velocity() - earth.velocity).norm() * AU_KM / 86_400.0;
        assert!(extra_kms > 0.2 && extra_kms < 0.35, "extra = {}", extra_kms);
    }

    #[test]
    fn test_transform_roundtrip() {
        let observer = greenwich_observer();
        let mut rng = StdRng::seed_from_u64(42);
        let frames = [Frame::Fundamental, Frame::Equatorial, Frame::Ecliptic, Frame::Horizon];

        for _ in 0..50 {
            let v = Vector3::<f64>::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let from = frames[rng.gen_range(0..4usize)];
            let to = frames[rng.gen_range(0..4usize)];
            let there = observer.transform(from, to, &v);
            assert_relative_eq!(there.norm(), v.norm(), epsilon = 1e-12);
            let back = observer.transform(to, from, &there);
            assert_relative_eq!(back, v, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_celestial_pole_altitude_is_latitude() {
        let observer = greenwich_observer();
        let pole = observer.transform(Frame::Equatorial, Frame::Fundamental, &Vector3::z());
        let hor = observer.horizon_coords(&pole);
        assert_relative_eq!(hor.lat, observer.location().latitude, epsilon = 1e-12);
        // Due north
        assert!(hor.lon < 1e-9 || hor.lon > TAU - 1e-9);
    }

    #[test]
    fn test_aberration_is_small() {
        let observer = greenwich_observer();
        let direction = Vector3::new(0.0, 0.0, 1.0);
        let apparent = observer.add_aberration(&direction);
        assert_relative_eq!(apparent.norm(), 1.0, epsilon = 1e-15);
        let shift = crate::coordinates::angular_separation(&direction, &apparent);
        // Annual aberration is at most about 20.5 arcseconds
        assert!(shift < 21.0 * crate::constants::ASEC2RAD);
    }

    #[test]
    fn test_set_time_rebuilds_state() {
        let mut observer = greenwich_observer();
        let before = observer.position();
        observer.set_time(Time::from_jd(J2000, 0.0));
        assert_relative_eq!(observer.jed(), Time::from_jd(J2000, 0.0).jed());
        assert!((observer.position() - before).norm() > 0.1);
    }
}
