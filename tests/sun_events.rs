//! Rising, transit and setting of solar system bodies over whole days

use approx::assert_relative_eq;
use rstest::rstest;
use starfield_almanac::almanac::{
    day_pass, rise_transit_set_search, rise_transit_set_search_day, Event,
};
use starfield_almanac::constants::{
    DEG2RAD, HORIZON_POINT, HORIZON_SUN_MOON, TWILIGHT_ASTRONOMICAL, TWILIGHT_CIVIL,
    TWILIGHT_NAUTICAL,
};
use starfield_almanac::{Body, Location, Observer, Planet, Time};

fn hours_after(time: Time, start: Time) -> f64 {
    (time - start) * 24.0
}

#[test]
fn test_equinox_sun_at_null_island() {
    let day = Time::from_calendar(2020, 3, 20, 0, 0, 0.0, 0.0);
    let mut observer = Observer::new(Location::from_degrees(0.0, 0.0, 0.0), day);
    let mut sun = Body::planet(Planet::Sun);

    let pass = day_pass(day, &mut observer, &mut sun, HORIZON_SUN_MOON);
    let midnight = day.local_midnight();

    // Within a quarter hour; the equation of time is about 7 minutes in March
    let rise = hours_after(pass.rising.time, midnight);
    let transit = hours_after(pass.transit.time, midnight);
    let set = hours_after(pass.setting.time, midnight);
    assert!((rise - 6.0).abs() < 0.25, "sunrise at {} h", rise);
    assert!((transit - 12.0).abs() < 0.25, "transit at {} h", transit);
    assert!((set - 18.0).abs() < 0.25, "sunset at {} h", set);

    // Rises due east, sets due west, passes nearly overhead
    assert_relative_eq!(pass.rising.azimuth, 90.0 * DEG2RAD, epsilon = 1.5 * DEG2RAD);
    assert_relative_eq!(pass.setting.azimuth, 270.0 * DEG2RAD, epsilon = 1.5 * DEG2RAD);
    assert!(pass.transit.altitude > 88.0 * DEG2RAD);

    // Event altitudes are the requested horizon, within the one second tolerance
    assert_relative_eq!(pass.rising.altitude, HORIZON_SUN_MOON, epsilon = 0.02 * DEG2RAD);
    assert_relative_eq!(pass.setting.altitude, HORIZON_SUN_MOON, epsilon = 0.02 * DEG2RAD);
}

#[test]
fn test_twilight_precedes_sunrise() {
    let day = Time::from_calendar(2021, 4, 15, 12, 0, 0.0, 1.0);
    let mut observer = Observer::new(Location::from_degrees(13.4, 52.5, 34.0), day);
    let mut sun = Body::planet(Planet::Sun);

    let dawns: Vec<Time> = [TWILIGHT_ASTRONOMICAL, TWILIGHT_NAUTICAL, TWILIGHT_CIVIL, HORIZON_SUN_MOON]
        .iter()
        .map(|&horizon| rise_transit_set_search_day(day, &mut observer, &mut sun, Event::Rise, horizon))
        .collect();
    for pair in dawns.windows(2) {
        assert!(pair[0] < pair[1], "{} not before {}", pair[0], pair[1]);
    }

    // Civil dawn is roughly half an hour before sunrise in spring at this latitude
    let gap_min = (dawns[3] - dawns[2]) * 1440.0;
    assert!(gap_min > 25.0 && gap_min < 50.0, "civil twilight {} min", gap_min);
}

#[test]
fn test_day_pass_restores_observer_and_is_idempotent() {
    let now = Time::from_calendar(2021, 6, 1, 20, 30, 0.0, -7.0);
    let mut observer = Observer::new(Location::from_degrees(-122.4, 37.8, 16.0), now);
    let mut mars = Body::planet(Planet::Mars);
    mars.compute_ephemeris(&mut observer);
    let direction = mars.direction();

    let first = day_pass(now, &mut observer, &mut mars, HORIZON_POINT);
    assert_eq!(observer.time(), now);
    assert_eq!(mars.direction(), direction);

    let second = day_pass(now, &mut observer, &mut mars, HORIZON_POINT);
    assert_eq!(observer.time(), now);
    assert_eq!(first, second);

    assert!(first.rising.time < first.transit.time);
}

#[test]
fn test_midnight_sun() {
    let day = Time::from_calendar(2020, 6, 21, 12, 0, 0.0, 1.0);
    let mut observer = Observer::new(Location::from_degrees(15.6, 78.2, 0.0), day);
    let mut sun = Body::planet(Planet::Sun);

    let pass = day_pass(day, &mut observer, &mut sun, HORIZON_SUN_MOON);
    assert_eq!(pass.rising.time, Time::neg_infinity());
    assert_eq!(pass.setting.time, Time::infinity());
    assert_eq!(pass.rising.time.zone(), 1.0);
    assert_eq!(pass.setting.time.zone(), 1.0);
    assert!(pass.rising.azimuth.is_infinite() && pass.setting.altitude.is_infinite());

    // It still culminates
    assert!(pass.transit.occurred());
    let alt = pass.transit.altitude / DEG2RAD;
    assert!((alt - (90.0 - 78.2 + 23.44)).abs() < 0.5, "noon altitude {}", alt);
}

#[test]
fn test_polar_night() {
    let day = Time::from_calendar(2020, 12, 21, 12, 0, 0.0, 1.0);
    let mut observer = Observer::new(Location::from_degrees(15.6, 78.2, 0.0), day);
    let mut sun = Body::planet(Planet::Sun);

    let pass = day_pass(day, &mut observer, &mut sun, HORIZON_SUN_MOON);
    assert!(pass.rising.time.jd() == f64::NEG_INFINITY);
    assert!(pass.transit.time.jd() == f64::INFINITY);
    assert!(pass.setting.time.jd() == f64::INFINITY);
}

#[rstest]
#[case(Planet::Sun, -122.4, 37.8, -7.0)]
#[case(Planet::Venus, 151.2, -33.9, 10.0)]
#[case(Planet::Jupiter, 2.35, 48.86, 1.0)]
#[case(Planet::Saturn, -0.1, 64.0, 0.0)]
fn test_day_search_stays_inside_the_day(
    #[case] planet: Planet,
    #[case] lon: f64,
    #[case] lat: f64,
    #[case] zone: f64,
) {
    let mut observer = Observer::new(
        Location::from_degrees(lon, lat, 0.0),
        Time::from_calendar(2021, 1, 1, 0, 0, 0.0, zone),
    );
    let mut body = Body::planet(planet);

    for day_offset in (0..365).step_by(29) {
        let day = Time::from_calendar(2021, 1, 1, 12, 0, 0.0, zone) + day_offset as f64;
        let start = day.local_midnight();
        let end = start + 1.0;

        for event in [Event::Rise, Event::Transit, Event::Set] {
            let time = rise_transit_set_search_day(day, &mut observer, &mut body, event, HORIZON_POINT);
            assert!(
                time.is_infinite() || (time >= start && time < end),
                "{:?} of {} at {} outside {} .. {}",
                event,
                planet.name(),
                time,
                start,
                end
            );
        }
    }
}

#[test]
fn test_search_converges_to_horizon() {
    let guess = Time::from_calendar(2021, 9, 10, 0, 0, 0.0, 0.0);
    let mut observer = Observer::new(Location::from_degrees(-3.7, 40.4, 650.0), guess);
    let mut venus = Body::planet(Planet::Venus);

    let set = rise_transit_set_search(guess, &mut observer, &mut venus, Event::Set, HORIZON_POINT);
    assert!(!set.is_infinite());
    assert!((set - guess).abs() <= 0.5 + 1e-3);

    // The observer was left at the converged time; Venus sits on the horizon
    observer.set_time(set);
    venus.compute_ephemeris(&mut observer);
    let altitude = observer.horizon_coords(&venus.direction()).lat;
    assert_relative_eq!(altitude, HORIZON_POINT, epsilon = 0.01 * DEG2RAD);
}
