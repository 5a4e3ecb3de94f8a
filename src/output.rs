//! The module responsible for writing output data to disk.
use crate::distance::DistanceMatrix;
use crate::units::{Capacity, Distance, Money};
use crate::zone::ZoneID;
use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub mod metadata;

/// The root folder in which model-specific output folders will be created
pub const OUTPUT_DIRECTORY_ROOT: &str = "transmission_results";

/// The output file name for transmission costs
const TRANSMISSION_COSTS_FILE_NAME: &str = "transmission_costs.csv";

/// Get the default output directory for the model specified at `model_dir`
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // Get the model name from the dir path. This ends up being convoluted because we need to check
    // for all possible errors. Ugh.
    let model_dir = model_dir
        .canonicalize() // canonicalise in case the user has specified "."
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    // Construct path
    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create a new output directory for the model, optionally overwriting existing data.
///
/// # Arguments
///
/// * `output_dir` - The output directory to create/overwrite
/// * `allow_overwrite` - Whether to delete and recreate the folder if it is non-empty
///
/// # Returns
///
/// True if the output dir contained existing data that was deleted, false if not, or an error.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    // If the folder already exists, then delete it
    let overwrite = if let Ok(mut it) = fs::read_dir(output_dir) {
        if it.next().is_none() {
            // Folder exists and is empty: nothing to do
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. \
            Please delete the folder or pass the --overwrite command-line option."
        );

        fs::remove_dir_all(output_dir).context("Could not delete folder")?;
        true
    } else {
        false
    };

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Represents a row in the transmission costs CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct TransmissionCostRow {
    from: ZoneID,
    to: ZoneID,
    capacity: Capacity,
    distance: Distance,
    cost: Money,
}

/// An object for writing the results of the transmission cost calculation to file
pub struct DataWriter {
    costs_writer: csv::Writer<File>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    pub fn create(output_path: &Path) -> Result<Self> {
        let file_path = output_path.join(TRANSMISSION_COSTS_FILE_NAME);
        let costs_writer = csv::Writer::from_path(&file_path)
            .with_context(|| format!("Could not create {}", file_path.display()))?;

        Ok(Self { costs_writer })
    }

    /// Write the cost of each route to file, along with its capacity and distance.
    ///
    /// There is one row for each ordered pair of zones, including routes from a zone to itself.
    pub fn write_costs(
        &mut self,
        distances: &DistanceMatrix,
        capacities: &Array2<Capacity>,
        costs: &Array2<Money>,
    ) -> Result<()> {
        let zone_ids = distances.zone_ids();
        for (i, j) in (0..zone_ids.len()).cartesian_product(0..zone_ids.len()) {
            let row = TransmissionCostRow {
                from: zone_ids[i].clone(),
                to: zone_ids[j].clone(),
                capacity: capacities[[i, j]],
                distance: distances.values()[[i, j]],
                cost: costs[[i, j]],
            };
            self.costs_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.costs_writer.flush()?;

        Ok(())
    }
}
