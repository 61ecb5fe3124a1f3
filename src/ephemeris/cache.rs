//! Time-keyed memoization for the position-velocity engine

use crate::planetlib::{Planet, State};
use nalgebra::Matrix3;

/// Number of possible primaries: the Sun and the nine planets
const PRIMARY_SLOTS: usize = 10;

/// Heliocentric states of moon primaries, one slot per planet
///
/// A slot remembers the Julian Ephemeris Date it was computed for and is
/// recomputed whenever a different date is asked for.
#[derive(Debug, Clone, Default)]
pub struct PrimaryCache {
    slots: [Option<(f64, State)>; PRIMARY_SLOTS],
}

impl PrimaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached state of `primary` at `jed`, computing it on a miss
    pub fn get_or_compute<F>(&mut self, primary: Planet, jed: f64, compute: F) -> State
    where
        F: FnOnce() -> State,
    {
        let slot = primary.id();
        if let Some((key, state)) = self.slots[slot] {
            if key == jed {
                return state;
            }
        }

        let state = compute();
        self.slots[slot] = Some((jed, state));
        state
    }

    pub fn invalidate(&mut self) {
        self.slots = [None; PRIMARY_SLOTS];
    }
}

/// Everything a satellite evaluation needs that depends only on the date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatelliteFrame {
    /// Earth's heliocentric state
    pub earth: State,
    /// Equator of date to fundamental frame
    pub to_fundamental: Matrix3<f64>,
    /// Dynamical minus civil time, in days
    pub delta_t: f64,
}

/// Single-entry cache of the satellite frame, keyed by Julian Ephemeris Date
#[derive(Debug, Clone, Default)]
pub struct SatelliteFrameCache {
    entry: Option<(f64, SatelliteFrame)>,
}

impl SatelliteFrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute<F>(&mut self, jed: f64, compute: F) -> SatelliteFrame
    where
        F: FnOnce() -> SatelliteFrame,
    {
        match self.entry {
            Some((key, frame)) if key == jed => frame,
            _ => {
                let frame = compute();
                self.entry = Some((jed, frame));
                frame
            }
        }
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_primary_slot_keyed_by_time() {
        let mut cache = PrimaryCache::new();
        let mut computed = 0;
        let mut lookup = |cache: &mut PrimaryCache, jed: f64| {
            cache.get_or_compute(Planet::Jupiter, jed, || {
                computed += 1;
                State::new(Vector3::new(jed, 0.0, 0.0), Vector3::zeros())
            })
        };

        assert_eq!(lookup(&mut cache, 1.0).position.x, 1.0);
        assert_eq!(lookup(&mut cache, 1.0).position.x, 1.0);
        assert_eq!(lookup(&mut cache, 2.0).position.x, 2.0);
        cache.invalidate();
        lookup(&mut cache, 2.0);
        drop(lookup);
        assert_eq!(computed, 3);
    }

    #[test]
    fn test_primary_slots_are_independent() {
        let mut cache = PrimaryCache::new();
        let mars = cache.get_or_compute(Planet::Mars, 5.0, State::zero);
        let saturn = cache.get_or_compute(Planet::Saturn, 5.0, State::undefined);
        assert!(mars.is_defined());
        assert!(!saturn.is_defined());
        // Mars survives the Saturn insert
        let again = cache.get_or_compute(Planet::Mars, 5.0, State::undefined);
        assert!(again.is_defined());
    }

    #[test]
    fn test_satellite_frame_single_entry() {
        let mut cache = SatelliteFrameCache::new();
        let frame = |dt: f64| SatelliteFrame {
            earth: State::zero(),
            to_fundamental: Matrix3::identity(),
            delta_t: dt,
        };

        assert_eq!(cache.get_or_compute(10.0, || frame(1.0)).delta_t, 1.0);
        assert_eq!(cache.get_or_compute(10.0, || frame(2.0)).delta_t, 1.0);
        assert_eq!(cache.get_or_compute(11.0, || frame(3.0)).delta_t, 3.0);
        assert_eq!(cache.get_or_compute(10.0, || frame(4.0)).delta_t, 4.0);
    }
}
