//! Fixtures for tests
use crate::zone::{Zone, ZoneID, ZoneMap};
use indexmap::IndexSet;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn zone_ids() -> IndexSet<ZoneID> {
    ["A".into(), "B".into(), "C".into()].into_iter().collect()
}

#[fixture]
pub fn zones(zone_ids: IndexSet<ZoneID>) -> ZoneMap {
    let centroids = [(-27.47, 153.03), (-33.87, 151.21), (-37.81, 144.96)];
    zone_ids
        .into_iter()
        .zip(centroids)
        .map(|(id, (latitude, longitude))| {
            let zone = Zone {
                id: id.clone(),
                description: format!("Zone {id}"),
                latitude,
                longitude,
            };
            (id, zone)
        })
        .collect()
}
