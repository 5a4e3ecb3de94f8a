//! Zones ("polygons") represent the geographical areas between which electricity is transmitted.
use crate::id::{define_id_getter, define_id_type};
use crate::units::Distance;
use indexmap::IndexMap;
use serde::Deserialize;

define_id_type! {ZoneID}

/// A map of [`Zone`]s, keyed by zone ID
pub type ZoneMap = IndexMap<ZoneID, Zone>;

/// Mean radius of the Earth, in km
const EARTH_RADIUS: Distance = Distance(6371.0);

/// Represents a zone with an ID, a longer description and the location of its centroid.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Zone {
    /// A unique identifier for a zone (e.g. "NSW1").
    pub id: ZoneID,
    /// A text description of the zone (e.g. "New South Wales (north)").
    pub description: String,
    /// Latitude of the zone's centroid in degrees
    pub latitude: f64,
    /// Longitude of the zone's centroid in degrees
    pub longitude: f64,
}
define_id_getter! {Zone, ZoneID}

impl Zone {
    /// The great-circle distance between the centroids of two zones.
    ///
    /// Uses the haversine formula on a spherical Earth.
    pub fn distance_to(&self, other: &Zone) -> Distance {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Distance(EARTH_RADIUS.value() * c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn zone(id: &str, latitude: f64, longitude: f64) -> Zone {
        Zone {
            id: id.into(),
            description: String::new(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_distance_to_self() {
        let sydney = zone("SYD", -33.8688, 151.2093);
        assert_eq!(sydney.distance_to(&sydney), Distance(0.0));
    }

    #[test]
    fn test_distance_to() {
        let sydney = zone("SYD", -33.8688, 151.2093);
        let melbourne = zone("MEL", -37.8136, 144.9631);

        // Roughly 714 km as the crow flies
        let distance = sydney.distance_to(&melbourne);
        assert!((distance.value() - 714.0).abs() < 5.0);

        // Should be symmetric
        assert_approx_eq!(Distance, melbourne.distance_to(&sydney), distance);
    }

    #[test]
    fn test_distance_quarter_meridian() {
        let equator = zone("EQ", 0.0, 0.0);
        let pole = zone("NP", 90.0, 0.0);
        let expected = Distance(EARTH_RADIUS.value() * std::f64::consts::FRAC_PI_2);
        assert_approx_eq!(Distance, equator.distance_to(&pole), expected, epsilon = 1e-6);
    }
}
