//! Solar system bodies and their apparent ephemeris
//!
//! A [`Body`] pairs a closed set of body kinds with the mutable ephemeris
//! state computed for it by [`Body::compute_ephemeris`]. That state is a cache
//! of the most recent evaluation and is overwritten on every call.

use crate::constants::{AU_KM, C_AUDAY};
use crate::magnitude;
use crate::observer::Observer;
use crate::orbit::Orbit;
use crate::planetlib::{Planet, State};
use crate::tle::Tle;
use nalgebra::Vector3;

/// The kinds of solar system body, each carrying only what it needs
#[derive(Debug, Clone)]
pub enum BodyKind {
    Sun,
    /// Mercury through Pluto
    Planet(Planet),
    /// Natural satellite; the orbit is relative to the primary planet `id / 100`
    Moon { id: u32, orbit: Orbit, h: f64, g: f64 },
    Asteroid { orbit: Orbit, h: f64, g: f64 },
    Comet { orbit: Orbit, h: f64, k: f64 },
    /// Artificial Earth satellite with its standard magnitude
    Satellite { tle: Tle, std_mag: f64 },
}

/// A body with its most recently computed ephemeris
#[derive(Debug, Clone)]
pub struct Body {
    name: Option<String>,
    kind: BodyKind,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    direction: Vector3<f64>,
    distance: f64,
    magnitude: f64,
    phase: f64,
}

impl Body {
    pub fn new(kind: BodyKind) -> Self {
        let undefined = State::undefined();
        Body {
            name: None,
            kind,
            position: undefined.position,
            velocity: undefined.velocity,
            direction: Vector3::x(),
            distance: f64::INFINITY,
            magnitude: f64::INFINITY,
            phase: f64::INFINITY,
        }
    }

    pub fn sun() -> Self {
        Self::new(BodyKind::Sun).with_name("Sun")
    }

    /// A major planet; `Planet::Sun` gives the Sun
    pub fn planet(planet: Planet) -> Self {
        let kind = match planet {
            Planet::Sun => BodyKind::Sun,
            other => BodyKind::Planet(other),
        };
        Self::new(kind).with_name(planet.name())
    }

    pub fn moon(id: u32, orbit: Orbit, h: f64, g: f64) -> Self {
        Self::new(BodyKind::Moon { id, orbit, h, g })
    }

    pub fn asteroid(orbit: Orbit, h: f64, g: f64) -> Self {
        Self::new(BodyKind::Asteroid { orbit, h, g })
    }

    pub fn comet(orbit: Orbit, h: f64, k: f64) -> Self {
        Self::new(BodyKind::Comet { orbit, h, k })
    }

    /// An artificial satellite, named after its element set when it has a name
    pub fn satellite(tle: Tle, std_mag: f64) -> Self {
        let name = tle.name().map(str::to_string);
        Body {
            name,
            ..Self::new(BodyKind::Satellite { tle, std_mag })
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    /// Heliocentric position in AU, fundamental frame, antedated for light time
    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    /// Heliocentric velocity in AU/day, fundamental frame
    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    /// Apparent unit direction from the observer, fundamental frame
    pub fn direction(&self) -> Vector3<f64> {
        self.direction
    }

    /// Geometric distance from the observer in AU
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn distance_km(&self) -> f64 {
        self.distance * AU_KM
    }

    /// Visual magnitude, infinite when undefined
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Sun-body-observer angle in radians
    pub fn phase_angle(&self) -> f64 {
        self.phase
    }

    /// Illuminated fraction of the visible disk
    pub fn illumination(&self) -> f64 {
        magnitude::illumination(self.phase)
    }

    /// Compute position, apparent direction, distance and magnitude for the observer's current time
    ///
    /// The light time is applied once: a first evaluation gives the distance,
    /// the second is antedated by the corresponding light travel time.
    pub fn compute_ephemeris(&mut self, observer: &mut Observer) {
        let jed = observer.jed();
        let origin = observer.position();
        let engine = observer.engine_mut();

        let first = engine.position_velocity(&self.kind, jed, 0.0);
        let light_time = (first.position - origin).norm() / C_AUDAY;
        let state = engine.position_velocity(&self.kind, jed, light_time);

        self.position = state.position;
        self.velocity = state.velocity;

        let offset = state.position - origin;
        let distance = offset.norm();
        if !state.is_defined() || distance == 0.0 {
            self.distance = if state.is_defined() { 0.0 } else { f64::INFINITY };
            self.magnitude = f64::INFINITY;
            self.phase = f64::INFINITY;
            return;
        }

        self.distance = distance;
        self.direction = observer.add_aberration(&(offset / distance));
        self.phase = phase_angle(&self.position, &self.direction);
        self.magnitude = self.compute_magnitude();
    }

    /// Visual magnitude from the current ephemeris state
    pub fn compute_magnitude(&self) -> f64 {
        let r = self.position.norm();
        let delta = self.distance;
        let phase = self.phase;

        match &self.kind {
            BodyKind::Sun => magnitude::sun(delta),
            BodyKind::Planet(planet) => magnitude::planet(*planet, phase, r, delta, &self.direction),
            BodyKind::Moon { id, h, g, .. } => magnitude::moon(*id, *h, *g, phase, r, delta),
            BodyKind::Asteroid { h, g, .. } => magnitude::asteroid(*h, *g, phase, r, delta),
            BodyKind::Comet { h, k, .. } => magnitude::comet(*h, *k, r, delta),
            BodyKind::Satellite { std_mag, .. } => {
                magnitude::satellite(*std_mag, phase, self.distance_km())
            }
        }
    }
}

/// Angle between a heliocentric position and the apparent direction, in radians
///
/// Zero for a body at the origin, which is only ever the Sun.
pub fn phase_angle(position: &Vector3<f64>, direction: &Vector3<f64>) -> f64 {
    let r = position.norm();
    if r == 0.0 {
        return 0.0;
    }
    (position.dot(direction) / r).clamp(-1.0, 1.0).acos()
}
