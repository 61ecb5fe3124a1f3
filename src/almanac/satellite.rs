//! Overhead passes of artificial satellites
//!
//! Satellites can rise and set many times a day, so instead of solving for
//! events the finder sweeps forward in time and watches the altitude cross a
//! threshold. Steps are coarse while the satellite is well below the horizon
//! and fine near it.

use super::{Pass, PassEvent, TimeScope};
use crate::celestial::Body;
use crate::constants::{DAY_MIN, DAY_S, DEG2RAD};
use crate::observer::Observer;
use crate::time::Time;
use log::debug;
use serde::{Deserialize, Serialize};

/// Tunables for the pass sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassSearchOptions {
    /// Step while the satellite is low, in days
    pub coarse_step_days: f64,
    /// Step near and above the horizon, in days
    pub fine_step_days: f64,
    /// Altitude in radians above which the fine step is used
    pub fine_step_altitude: f64,
}

impl Default for PassSearchOptions {
    fn default() -> Self {
        PassSearchOptions {
            coarse_step_days: 1.0 / DAY_MIN,
            fine_step_days: 1.0 / DAY_S,
            fine_step_altitude: -1.0 * DEG2RAD,
        }
    }
}

impl PassSearchOptions {
    pub fn with_coarse_step_days(mut self, days: f64) -> Self {
        self.coarse_step_days = days;
        self
    }

    pub fn with_fine_step_days(mut self, days: f64) -> Self {
        self.fine_step_days = days;
        self
    }

    pub fn with_fine_step_altitude(mut self, altitude: f64) -> Self {
        self.fine_step_altitude = altitude;
        self
    }
}

/// A pass that has risen but not yet set
struct OpenPass {
    rising: PassEvent,
    peak: PassEvent,
}

/// Find every pass of `satellite` above `min_altitude` between `start` and `stop`
///
/// Passes are returned in chronological order. One still under way at `stop`
/// is not reported. The observer and satellite are restored to the observer's
/// original time. A `start` or `stop` that is not finite yields no passes.
///
/// The first sample triggers no crossing, but if it is already above
/// `min_altitude` it opens a pass so that the pass in progress is not lost.
/// That pass is reported with a rising event that did not occur: its time is
/// `-inf` and its azimuth and altitude are `+inf`, so it does not satisfy
/// `altitude > min_altitude` like a real rising does. Skip passes whose
/// `rising.occurred()` is false to keep only complete ones.
pub fn find_satellite_passes(
    observer: &mut Observer,
    satellite: &mut Body,
    start: Time,
    stop: Time,
    min_altitude: f64,
) -> Vec<Pass> {
    find_satellite_passes_with(
        observer,
        satellite,
        start,
        stop,
        min_altitude,
        &PassSearchOptions::default(),
    )
}

pub fn find_satellite_passes_with(
    observer: &mut Observer,
    satellite: &mut Body,
    start: Time,
    stop: Time,
    min_altitude: f64,
    options: &PassSearchOptions,
) -> Vec<Pass> {
    let steps = [options.coarse_step_days, options.fine_step_days];
    if steps.iter().any(|step| !step.is_finite() || *step <= 0.0) {
        debug!("pass search needs positive steps, got {:?}", steps);
        return Vec::new();
    }
    if !start.jd().is_finite() || !stop.jd().is_finite() {
        debug!("pass search needs a finite window, got {} .. {}", start, stop);
        return Vec::new();
    }

    let mut scope = TimeScope::new(observer, satellite);
    let (observer, satellite) = scope.parts();

    let mut passes = Vec::new();
    let mut open: Option<OpenPass> = None;
    let mut previous: Option<f64> = None;
    let mut time = start;

    while time <= stop {
        observer.set_time(time);
        satellite.compute_ephemeris(observer);

        let sample = if satellite.distance().is_finite() {
            let horizon = observer.horizon_coords(&satellite.direction());
            PassEvent {
                time,
                azimuth: horizon.lon,
                altitude: horizon.lat,
            }
        } else {
            // Could not be propagated; treat as far below the horizon
            PassEvent {
                time,
                azimuth: 0.0,
                altitude: f64::NEG_INFINITY,
            }
        };
        let altitude = sample.altitude;

        match previous {
            // The first sample only seeds the previous altitude
            None => {
                if altitude > min_altitude {
                    open = Some(OpenPass {
                        rising: PassEvent::never(Time::neg_infinity().with_zone(start.zone())),
                        peak: sample,
                    });
                }
            }
            Some(previous) => {
                if previous <= min_altitude && altitude > min_altitude {
                    open = Some(OpenPass {
                        rising: sample,
                        peak: sample,
                    });
                }

                if let Some(pass) = open.as_mut() {
                    if altitude > pass.peak.altitude {
                        pass.peak = sample;
                    }
                }

                if previous > min_altitude && altitude <= min_altitude {
                    if let Some(pass) = open.take() {
                        debug!(
                            "pass of {} from {} to {}, peak {:.1} deg at {}",
                            satellite.name().unwrap_or("satellite"),
                            pass.rising.time,
                            time,
                            pass.peak.altitude / DEG2RAD,
                            pass.peak.time
                        );
                        passes.push(Pass {
                            rising: pass.rising,
                            transit: pass.peak,
                            setting: sample,
                        });
                    }
                }
            }
        }

        previous = Some(altitude);
        let step = if altitude > options.fine_step_altitude {
            options.fine_step_days
        } else {
            options.coarse_step_days
        };
        let next = time + step;
        if next <= time {
            debug!("pass search step {} days is lost at {}", step, time);
            break;
        }
        time = next;
    }

    passes
}
