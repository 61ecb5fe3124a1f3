//! Position-velocity engine
//!
//! Produces heliocentric position and velocity, in AU and AU/day in the
//! fundamental frame, for every kind of body the crate knows about. Each body
//! kind is dispatched to its own source: a tabulated ephemeris when one is
//! attached, Keplerian mean elements otherwise, the body's own orbit for
//! minor planets and moons, and SGP4 for artificial satellites.
//!
//! All evaluations are retarded by a light-time offset: the state returned is
//! the one at `jed - light_time`.

mod cache;

pub use cache::{PrimaryCache, SatelliteFrame, SatelliteFrameCache};

use crate::celestial::BodyKind;
use crate::constants::{AU_KM, DAY_S};
use crate::framelib::rotations::{precession_matrix, ECLIPTIC_TO_FUNDAMENTAL};
use crate::orbit::Orbit;
use crate::planetlib::{Planet, State, TabulatedEphemeris, Target};
use crate::tle::Tle;
use log::debug;
use std::fmt;
use std::sync::Arc;

/// Catalog number of Earth's Moon
pub const LUNA_ID: u32 = 301;

/// The position-velocity engine and its memoization caches
///
/// An engine is owned by an [`crate::observer::Observer`]; the caches are
/// plain values so separate observers never share mutable state.
#[derive(Clone, Default)]
pub struct Ephemeris {
    tabulated: Option<Arc<dyn TabulatedEphemeris>>,
    primaries: PrimaryCache,
    satellite_frame: SatelliteFrameCache,
}

impl Ephemeris {
    /// An engine using Keplerian mean elements for the major planets
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that prefers a tabulated source for the Sun, planets and Luna
    pub fn with_tabulated(tabulated: Arc<dyn TabulatedEphemeris>) -> Self {
        Ephemeris {
            tabulated: Some(tabulated),
            ..Self::default()
        }
    }

    pub fn tabulated(&self) -> Option<&Arc<dyn TabulatedEphemeris>> {
        self.tabulated.as_ref()
    }

    /// Forget every memoized state
    pub fn invalidate_caches(&mut self) {
        self.primaries.invalidate();
        self.satellite_frame.invalidate();
    }

    /// Heliocentric state of a body at `jed - light_time`
    pub fn position_velocity(&mut self, kind: &BodyKind, jed: f64, light_time: f64) -> State {
        let t = jed - light_time;

        match kind {
            BodyKind::Sun => self.planet_position_velocity(Planet::Sun, t),
            BodyKind::Planet(planet) => self.planet_position_velocity(*planet, t),
            BodyKind::Asteroid { orbit, .. } | BodyKind::Comet { orbit, .. } => {
                ecliptic_orbit_state(orbit, t)
            }
            BodyKind::Moon { id, orbit, .. } => self.moon_position_velocity(*id, orbit, jed, light_time),
            BodyKind::Satellite { tle, .. } => self.satellite_position_velocity(tle, jed, light_time),
        }
    }

    /// Heliocentric state of the Sun or a major planet at a Julian Ephemeris Date
    pub fn planet_position_velocity(&self, planet: Planet, jed: f64) -> State {
        planet_state(self.tabulated.as_deref(), planet, jed)
    }

    fn moon_position_velocity(&mut self, id: u32, orbit: &Orbit, jed: f64, light_time: f64) -> State {
        if id == LUNA_ID {
            if let Some(state) = self
                .tabulated
                .as_deref()
                .and_then(|source| source.lookup(Target::Luna, jed - light_time, true))
            {
                return state;
            }
        }

        let relative = ecliptic_orbit_state(orbit, jed - light_time);

        let primary = Planet::from_id((id / 100) as usize).unwrap_or(Planet::Sun);
        let tabulated = self.tabulated.as_deref();
        let primary_state = self
            .primaries
            .get_or_compute(primary, jed, || planet_state(tabulated, primary, jed));

        State::new(
            relative.position + primary_state.position - primary_state.velocity * light_time,
            relative.velocity + primary_state.velocity,
        )
    }

    fn satellite_position_velocity(&mut self, tle: &Tle, jed: f64, light_time: f64) -> State {
        let tabulated = self.tabulated.as_deref();
        let frame = self.satellite_frame.get_or_compute(jed, || SatelliteFrame {
            earth: planet_state(tabulated, Planet::Earth, jed),
            to_fundamental: precession_matrix(jed).transpose(),
            delta_t: crate::time::delta_t(jed) / DAY_S,
        });

        let civil = jed - frame.delta_t - light_time;
        let (position_km, velocity_kms) = match tle.to_position_velocity(civil) {
            Ok(state) => state,
            Err(err) => {
                debug!("propagation of satellite {} failed: {}", tle.norad_id(), err);
                return State::undefined();
            }
        };

        let position = frame.to_fundamental * (position_km / AU_KM);
        let velocity = frame.to_fundamental * (velocity_kms * (DAY_S / AU_KM));

        State::new(
            position + frame.earth.position - frame.earth.velocity * light_time,
            velocity + frame.earth.velocity,
        )
    }
}

impl fmt::Debug for Ephemeris {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ephemeris")
            .field("tabulated", &self.tabulated.is_some())
            .field("primaries", &self.primaries)
            .field("satellite_frame", &self.satellite_frame)
            .finish()
    }
}

fn planet_state(tabulated: Option<&dyn TabulatedEphemeris>, planet: Planet, jed: f64) -> State {
    if let Some(state) = tabulated.and_then(|source| source.lookup(Target::Planet(planet), jed, true)) {
        return state;
    }

    match Orbit::planet(planet, jed) {
        Some(orbit) => ecliptic_orbit_state(&orbit, jed),
        None => State::zero(),
    }
}

/// Evaluate an orbit given on J2000 ecliptic axes and rotate it into the fundamental frame
fn ecliptic_orbit_state(orbit: &Orbit, jed: f64) -> State {
    let state = orbit.to_position_velocity(jed);
    State::new(
        *ECLIPTIC_TO_FUNDAMENTAL * state.position,
        *ECLIPTIC_TO_FUNDAMENTAL * state.velocity,
    )
}
