//! Mean orbital elements of the major planets
//!
//! Keplerian elements and rates from Standish, "Keplerian Elements for
//! Approximate Positions of the Major Planets" (JPL), valid 1800-2050 AD and
//! referred to the J2000 ecliptic and equinox.

use super::Orbit;
use crate::constants::{DEG2RAD, J2000, JULIAN_CENTURY};
use crate::planetlib::Planet;

/// Elements at J2000 followed by their rates per Julian century
///
/// Columns: a (AU), e, I (deg), L (deg), long. peri. (deg), long. node (deg)
struct MeanElements {
    at_epoch: [f64; 6],
    per_century: [f64; 6],
}

const MERCURY: MeanElements = MeanElements {
    at_epoch: [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593],
    per_century: [0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
};

const VENUS: MeanElements = MeanElements {
    at_epoch: [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255],
    per_century: [0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
};

// Earth-Moon barycenter
const EARTH: MeanElements = MeanElements {
    at_epoch: [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
    per_century: [0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
};

const MARS: MeanElements = MeanElements {
    at_epoch: [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891],
    per_century: [0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
};

const JUPITER: MeanElements = MeanElements {
    at_epoch: [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909],
    per_century: [-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106],
};

const SATURN: MeanElements = MeanElements {
    at_epoch: [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448],
    per_century: [-0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794],
};

const URANUS: MeanElements = MeanElements {
    at_epoch: [19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503],
    per_century: [-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589],
};

const NEPTUNE: MeanElements = MeanElements {
    at_epoch: [30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574],
    per_century: [0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.00508664],
};

const PLUTO: MeanElements = MeanElements {
    at_epoch: [39.48211675, 0.24882730, 17.14001206, 238.92903833, 224.06891629, 110.30393684],
    per_century: [-0.00031596, 0.00005170, 0.00004818, 145.20780515, -0.04062942, -0.01183482],
};

impl Orbit {
    /// Heliocentric mean orbit of a major planet at a Julian Ephemeris Date
    ///
    /// The elements are osculated at `jed` itself, so evaluating the orbit
    /// near `jed` gives the planet's approximate ecliptic position. Returns
    /// `None` for the Sun.
    pub fn planet(planet: Planet, jed: f64) -> Option<Orbit> {
        let table = match planet {
            Planet::Sun => return None,
            Planet::Mercury => &MERCURY,
            Planet::Venus => &VENUS,
            Planet::Earth => &EARTH,
            Planet::Mars => &MARS,
            Planet::Jupiter => &JUPITER,
            Planet::Saturn => &SATURN,
            Planet::Uranus => &URANUS,
            Planet::Neptune => &NEPTUNE,
            Planet::Pluto => &PLUTO,
        };

        let t = (jed - J2000) / JULIAN_CENTURY;
        let mut el = [0.0; 6];
        for (k, value) in el.iter_mut().enumerate() {
            *value = table.at_epoch[k] + table.per_century[k] * t;
        }
        let [a, e, incl, mean_long, peri_long, node] = el;

        Some(Orbit {
            t: jed,
            q: a * (1.0 - e),
            e,
            i: incl * DEG2RAD,
            w: (peri_long - node) * DEG2RAD,
            n: node * DEG2RAD,
            m: (mean_long - peri_long) * DEG2RAD,
            mm: table.per_century[3] / JULIAN_CENTURY * DEG2RAD,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sun_has_no_orbit() {
        assert!(Orbit::planet(Planet::Sun, J2000).is_none());
    }

    #[test]
    fn test_planet_distances() {
        let expected = [
            (Planet::Mercury, 0.31, 0.47),
            (Planet::Venus, 0.71, 0.73),
            (Planet::Earth, 0.98, 1.02),
            (Planet::Mars, 1.38, 1.67),
            (Planet::Jupiter, 4.9, 5.5),
            (Planet::Saturn, 9.0, 10.1),
            (Planet::Uranus, 18.2, 20.1),
            (Planet::Neptune, 29.7, 30.4),
            (Planet::Pluto, 29.6, 49.4),
        ];

        for (planet, low, high) in expected {
            let orbit = Orbit::planet(planet, J2000 + 7300.0).unwrap();
            let r = orbit.to_position_velocity(orbit.t).position.norm();
            assert!(r > low && r < high, "{} at {} AU", planet.name(), r);
        }
    }

    #[test]
    fn test_earth_year() {
        let orbit = Orbit::planet(Planet::Earth, J2000).unwrap();
        assert_relative_eq!(orbit.period(), 365.25, epsilon = 0.1);
        // Earth is near perihelion in early January
        let r = orbit.to_position_velocity(J2000).position.norm();
        assert!(r < 0.985, "r = {}", r);
    }
}
