//! The distance table between zones.
//!
//! Distances are either derived from the centroids of the zones or supplied directly by the user
//! (see [`crate::input::distance`]). Either way, they are fixed once the model has been loaded.
use crate::units::Distance;
use crate::zone::{ZoneID, ZoneMap};
use anyhow::{Result, ensure};
use float_cmp::approx_eq;
use indexmap::IndexSet;
use ndarray::Array2;

/// A square, symmetric matrix of distances between zones.
///
/// Row and column `i` both correspond to the `i`th zone ID.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    zone_ids: IndexSet<ZoneID>,
    values: Array2<Distance>,
}

impl DistanceMatrix {
    /// Create a new [`DistanceMatrix`], checking that the values are valid.
    ///
    /// # Arguments
    ///
    /// * `zone_ids` - The IDs of the zones, in matrix order
    /// * `values` - Distances between each pair of zones
    pub fn new(zone_ids: IndexSet<ZoneID>, values: Array2<Distance>) -> Result<Self> {
        check_distances(&zone_ids, &values)?;

        Ok(Self { zone_ids, values })
    }

    /// Calculate distances between the centroids of the given zones
    pub fn from_zones(zones: &ZoneMap) -> Self {
        let zone_list: Vec<_> = zones.values().collect();
        let values = Array2::from_shape_fn((zone_list.len(), zone_list.len()), |(i, j)| {
            if i == j {
                Distance(0.0)
            } else {
                zone_list[i].distance_to(zone_list[j])
            }
        });

        Self {
            zone_ids: zones.keys().cloned().collect(),
            values,
        }
    }

    /// The IDs of the zones, in the same order as the rows and columns of the matrix
    pub fn zone_ids(&self) -> &IndexSet<ZoneID> {
        &self.zone_ids
    }

    /// The distances as a matrix
    pub fn values(&self) -> &Array2<Distance> {
        &self.values
    }

    /// The number of zones
    pub fn num_zones(&self) -> usize {
        self.zone_ids.len()
    }
}

/// Check that the distances are a valid square, symmetric matrix with a zero diagonal
fn check_distances(zone_ids: &IndexSet<ZoneID>, values: &Array2<Distance>) -> Result<()> {
    let (rows, cols) = values.dim();
    ensure!(rows == cols, "Distance matrix must be square (got {rows}x{cols})");
    ensure!(
        rows == zone_ids.len(),
        "Distance matrix has {rows} rows but there are {} zones",
        zone_ids.len()
    );

    for ((i, j), &distance) in values.indexed_iter() {
        let (from, to) = (&zone_ids[i], &zone_ids[j]);
        ensure!(
            distance.is_finite() && distance >= Distance(0.0),
            "Distance between {from} and {to} must be a finite, non-negative number"
        );
        if i == j {
            ensure!(
                distance == Distance(0.0),
                "Distance from zone {from} to itself must be zero"
            );
        } else if i < j {
            ensure!(
                approx_eq!(Distance, distance, values[[j, i]]),
                "Distances between {from} and {to} differ depending on direction"
            );
        }
    }

    Ok(())
}
