//! Code for reading a user-supplied distance table.
//!
//! If no table is provided, distances are calculated from the centroids of zones instead.
use super::{input_err_msg, read_csv_optional};
use crate::distance::DistanceMatrix;
use crate::id::IDCollection;
use crate::units::Distance;
use crate::zone::ZoneMap;
use anyhow::{Context, Result, bail, ensure};
use log::info;
use ndarray::Array2;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const DISTANCES_FILE_NAME: &str = "distances.csv";

/// Represents a row of the distances CSV file
#[derive(Debug, Deserialize, PartialEq)]
struct DistanceRaw {
    from: String,
    to: String,
    distance: Distance,
}

/// Read the distance table from the model directory, if present.
///
/// Each row gives the distance between a pair of zones. The distance in the opposite direction is
/// the same, so it only needs to be given once, though it may be repeated.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
/// * `zones` - All zones in the model
///
/// # Returns
///
/// The distances, `None` if there is no distance table or an error if it is invalid.
pub fn read_distances(model_dir: &Path, zones: &ZoneMap) -> Result<Option<DistanceMatrix>> {
    let file_path = model_dir.join(DISTANCES_FILE_NAME);
    if !file_path.is_file() {
        return Ok(None);
    }

    info!("Reading distances between zones from {}", file_path.display());
    let rows: Vec<DistanceRaw> = read_csv_optional(&file_path)?;
    let distances = read_distances_from_iter(rows.into_iter(), zones)
        .with_context(|| input_err_msg(&file_path))?;

    Ok(Some(distances))
}

fn read_distances_from_iter<I>(iter: I, zones: &ZoneMap) -> Result<DistanceMatrix>
where
    I: Iterator<Item = DistanceRaw>,
{
    let n = zones.len();
    let mut values: Array2<Option<Distance>> = Array2::from_elem((n, n), None);
    let mut explicit = HashSet::new();
    for row in iter {
        let i = zones.get_index_by_str(&row.from)?;
        let j = zones.get_index_by_str(&row.to)?;
        ensure!(
            i != j,
            "Cannot specify a distance from zone {} to itself",
            row.from
        );
        ensure!(
            explicit.insert((i, j)),
            "Distance from {} to {} specified more than once",
            row.from,
            row.to
        );

        values[[i, j]] = Some(row.distance);
        if !explicit.contains(&(j, i)) {
            values[[j, i]] = Some(row.distance);
        }
    }

    let zone_ids = zones.keys().cloned().collect();
    let mut distances = Array2::from_elem((n, n), Distance(0.0));
    for ((i, j), value) in values.indexed_iter() {
        match value {
            Some(distance) => distances[[i, j]] = *distance,
            None if i == j => {}
            None => bail!(
                "Missing distance between zones {} and {}",
                zones[i].id,
                zones[j].id
            ),
        }
    }

    DistanceMatrix::new(zone_ids, distances)
}
