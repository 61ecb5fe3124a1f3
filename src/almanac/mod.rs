//! Rising, transit and setting
//!
//! The solvers here work in three layers. [`rise_transit_set`] is a
//! closed-form estimate from a fixed right ascension and declination, good
//! for stars. [`rise_transit_set_search`] iterates it while recomputing the
//! body's ephemeris at each new guess, for bodies that move during the day.
//! [`rise_transit_set_search_day`] pins the result to one local calendar day.
//! [`day_pass`] collects all three events for a day without disturbing the
//! observer.
//!
//! Events that do not happen are reported with infinite times: `+inf` when a
//! body never sets (or the event falls after the window) and `-inf` when it
//! never rises (or the event falls before the window). These sentinels stay
//! ordinarily comparable, so callers can test them with `<`, `>` and
//! [`Time::is_infinite`].
//!
//! Satellites, which rise and set several times a day, are handled separately
//! by [`find_satellite_passes`].

mod satellite;

pub use satellite::{find_satellite_passes, find_satellite_passes_with, PassSearchOptions};

use crate::celestial::Body;
use crate::constants::{DAY_S, SIDEREAL_PER_SOLAR_DAY, TAU};
use crate::coordinates::mod_pi;
use crate::observer::Observer;
use crate::time::Time;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Which horizon event to solve for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    Rise = -1,
    Transit = 0,
    Set = 1,
}

impl Event {
    /// -1 for rising, 0 for transit, +1 for setting
    pub fn sign(&self) -> f64 {
        *self as i32 as f64
    }
}

/// Time and horizon position of one event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassEvent {
    pub time: Time,
    /// Radians from north through east
    pub azimuth: f64,
    /// Radians above the horizon
    pub altitude: f64,
}

impl PassEvent {
    /// An event that did not occur; `time` is one of the infinite sentinels
    pub fn never(time: Time) -> Self {
        PassEvent {
            time,
            azimuth: f64::INFINITY,
            altitude: f64::INFINITY,
        }
    }

    pub fn occurred(&self) -> bool {
        !self.time.is_infinite()
    }
}

/// Rising, transit (or peak) and setting of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    pub rising: PassEvent,
    pub transit: PassEvent,
    pub setting: PassEvent,
}

/// Tunables for the iterative event search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Upper bound on ephemeris recomputations per search
    pub max_iterations: usize,
    /// Successive guesses closer than this, in days, have converged
    pub tolerance_days: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_iterations: 10,
            tolerance_days: 1.0 / DAY_S,
        }
    }
}

impl SearchOptions {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance_days(mut self, tolerance_days: f64) -> Self {
        self.tolerance_days = tolerance_days;
        self
    }
}

/// Scoped override of an observer's time
///
/// Searches move the observer through time freely while the scope is alive.
/// When it is dropped, on every exit path, the observer gets its original
/// time back and the body's ephemeris is recomputed for it.
pub struct TimeScope<'a> {
    observer: &'a mut Observer,
    body: &'a mut Body,
    saved: Time,
}

impl<'a> TimeScope<'a> {
    pub fn new(observer: &'a mut Observer, body: &'a mut Body) -> Self {
        let saved = observer.time();
        TimeScope {
            observer,
            body,
            saved,
        }
    }

    /// The time that will be restored
    pub fn saved_time(&self) -> Time {
        self.saved
    }

    pub fn parts(&mut self) -> (&mut Observer, &mut Body) {
        (&mut *self.observer, &mut *self.body)
    }
}

impl Drop for TimeScope<'_> {
    fn drop(&mut self) {
        self.observer.set_time(self.saved);
        self.body.compute_ephemeris(self.observer);
    }
}

/// Hour angle at which a body of declination `dec` reaches altitude `alt` at latitude `lat`
///
/// Returns 0 when the body never gets that high and pi when it never gets
/// that low. All angles in radians.
pub fn semi_diurnal_arc(lat: f64, dec: f64, alt: f64) -> f64 {
    let cos_ha = (alt.sin() - dec.sin() * lat.sin()) / (dec.cos() * lat.cos());

    if cos_ha >= 1.0 {
        0.0
    } else if cos_ha <= -1.0 {
        PI
    } else {
        cos_ha.acos()
    }
}

/// Closed-form time of an event nearest to `time`, for fixed equatorial coordinates
///
/// `ra` and `dec` must be referred to the equator of date. The result lies
/// within half a day of `time`, or is `+inf` when the body never sets and
/// `-inf` when it never rises. Use -34' for point sources, -50' for the Sun and
/// Moon, and -6, -12 or -18 degrees for twilight.
pub fn rise_transit_set(
    time: Time,
    ra: f64,
    dec: f64,
    event: Event,
    lon: f64,
    lat: f64,
    alt: f64,
) -> Time {
    let ha = semi_diurnal_arc(lat, dec, alt);

    if ha == PI && event != Event::Transit {
        return Time::infinity().with_zone(time.zone());
    }
    if ha == 0.0 {
        return Time::neg_infinity().with_zone(time.zone());
    }

    let lst = time.local_sidereal_time(lon);
    let theta = mod_pi(ra - lst + event.sign() * ha);

    time + theta / TAU / SIDEREAL_PER_SOLAR_DAY
}

/// Closed-form event time using the body's current apparent direction
pub fn rise_transit_set_for(
    time: Time,
    observer: &Observer,
    body: &Body,
    event: Event,
    alt: f64,
) -> Time {
    let equatorial = observer.equatorial_coords(&body.direction());
    let location = observer.location();
    rise_transit_set(
        time,
        equatorial.lon,
        equatorial.lat,
        event,
        location.longitude,
        location.latitude,
        alt,
    )
}

/// Iteratively refine the event time nearest to `time`
///
/// The observer and body are left at the last evaluated time, close to the
/// returned one. Callers that need them restored should use a [`TimeScope`].
pub fn rise_transit_set_search(
    time: Time,
    observer: &mut Observer,
    body: &mut Body,
    event: Event,
    alt: f64,
) -> Time {
    rise_transit_set_search_with(time, observer, body, event, alt, &SearchOptions::default())
}

pub fn rise_transit_set_search_with(
    time: Time,
    observer: &mut Observer,
    body: &mut Body,
    event: Event,
    alt: f64,
    options: &SearchOptions,
) -> Time {
    let mut guess = time;

    for iteration in 0..options.max_iterations.max(1) {
        let last = guess;
        observer.set_time(last);
        body.compute_ephemeris(observer);
        guess = rise_transit_set_for(last, observer, body, event, alt);

        trace!("{:?} search iteration {}: {} -> {}", event, iteration, last, guess);

        if guess.is_infinite() || (guess - last).abs() <= options.tolerance_days {
            return guess;
        }
    }

    debug!(
        "{:?} search for {} stopped after {} iterations at {}",
        event,
        body.name().unwrap_or("body"),
        options.max_iterations,
        guess
    );
    guess
}

/// Time of an event during the local day containing `day`
///
/// The result is always in `[midnight, midnight + 1 day)` or infinite: `-inf`
/// for a rise that does not happen that day, `+inf` for a transit or set.
pub fn rise_transit_set_search_day(
    day: Time,
    observer: &mut Observer,
    body: &mut Body,
    event: Event,
    alt: f64,
) -> Time {
    rise_transit_set_search_day_with(day, observer, body, event, alt, &SearchOptions::default())
}

pub fn rise_transit_set_search_day_with(
    day: Time,
    observer: &mut Observer,
    body: &mut Body,
    event: Event,
    alt: f64,
    options: &SearchOptions,
) -> Time {
    let start = day.local_midnight();
    let end = start + 1.0;

    let mut time = rise_transit_set_search_with(start + 0.5, observer, body, event, alt, options);

    // The nearest root may belong to a neighboring day
    if time >= end {
        debug!("{:?} at {} is after {}, retrying from the previous day", event, time, end);
        time = rise_transit_set_search_with(start - 0.5, observer, body, event, alt, options);
    } else if time < start {
        debug!("{:?} at {} is before {}, retrying from the next day", event, time, start);
        time = rise_transit_set_search_with(end + 0.5, observer, body, event, alt, options);
    }

    if time >= end || time < start {
        return match event {
            Event::Rise => Time::neg_infinity().with_zone(day.zone()),
            _ => Time::infinity().with_zone(day.zone()),
        };
    }

    time
}

/// Rising, transit and setting of a body on the local day containing `day`
///
/// Transit is searched with a zero horizon altitude. The observer's time and
/// the body's ephemeris are restored before returning.
pub fn day_pass(day: Time, observer: &mut Observer, body: &mut Body, alt: f64) -> Pass {
    day_pass_with(day, observer, body, alt, &SearchOptions::default())
}

pub fn day_pass_with(
    day: Time,
    observer: &mut Observer,
    body: &mut Body,
    alt: f64,
    options: &SearchOptions,
) -> Pass {
    let mut scope = TimeScope::new(observer, body);
    let (observer, body) = scope.parts();

    let rising = day_event(day, observer, body, Event::Rise, alt, options);
    let transit = day_event(day, observer, body, Event::Transit, 0.0, options);
    let setting = day_event(day, observer, body, Event::Set, alt, options);

    Pass {
        rising,
        transit,
        setting,
    }
}

fn day_event(
    day: Time,
    observer: &mut Observer,
    body: &mut Body,
    event: Event,
    alt: f64,
    options: &SearchOptions,
) -> PassEvent {
    let time = rise_transit_set_search_day_with(day, observer, body, event, alt, options);
    if time.is_infinite() {
        return PassEvent::never(time);
    }

    // The search leaves the body at the converged time
    let horizon = observer.horizon_coords(&body.direction());
    PassEvent {
        time,
        azimuth: horizon.lon,
        altitude: horizon.lat,
    }
}
