//! Code for reading zone-related information from CSV files.
use super::{input_err_msg, read_csv_id_file};
use crate::zone::{Zone, ZoneMap};
use anyhow::{Context, Result, ensure};
use std::path::Path;

const ZONES_FILE_NAME: &str = "zones.csv";

/// Reads zones from a CSV file.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// A map of zones keyed by zone ID, in the order in which they appear in the file, or an error.
pub fn read_zones(model_dir: &Path) -> Result<ZoneMap> {
    let file_path = model_dir.join(ZONES_FILE_NAME);
    let zones = read_csv_id_file(&file_path)?;
    for zone in zones.values() {
        validate_zone(zone).with_context(|| input_err_msg(&file_path))?;
    }

    Ok(zones)
}

/// Check that the centroid of the zone is a valid location
fn validate_zone(zone: &Zone) -> Result<()> {
    ensure!(
        (-90.0..=90.0).contains(&zone.latitude),
        "Latitude for zone {} must be between -90 and 90",
        zone.id
    );
    ensure!(
        (-180.0..=180.0).contains(&zone.longitude),
        "Longitude for zone {} must be between -180 and 180",
        zone.id
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;

    /// Create an example zones file in dir_path
    fn create_zones_file(dir_path: &Path, contents: &str) {
        let file_path = dir_path.join(ZONES_FILE_NAME);
        let mut file = File::create(file_path).unwrap();
        writeln!(file, "{contents}").unwrap();
    }

    #[test]
    fn test_read_zones() {
        let dir = tempdir().unwrap();
        create_zones_file(
            dir.path(),
            "id,description,latitude,longitude
NQ,North Queensland,-19.26,146.82
SA,South Australia,-34.93,138.60
TAS,Tasmania,-42.88,147.33",
        );
        let zones = read_zones(dir.path()).unwrap();
        assert_eq!(
            zones,
            ZoneMap::from([
                (
                    "NQ".into(),
                    Zone {
                        id: "NQ".into(),
                        description: "North Queensland".to_string(),
                        latitude: -19.26,
                        longitude: 146.82,
                    }
                ),
                (
                    "SA".into(),
                    Zone {
                        id: "SA".into(),
                        description: "South Australia".to_string(),
                        latitude: -34.93,
                        longitude: 138.60,
                    }
                ),
                (
                    "TAS".into(),
                    Zone {
                        id: "TAS".into(),
                        description: "Tasmania".to_string(),
                        latitude: -42.88,
                        longitude: 147.33,
                    }
                ),
            ])
        );
    }

    #[test]
    fn test_read_zones_bad_latitude() {
        let dir = tempdir().unwrap();
        create_zones_file(
            dir.path(),
            "id,description,latitude,longitude
NQ,North Queensland,-119.26,146.82",
        );
        let err = read_zones(dir.path()).unwrap_err();
        assert_eq!(
            err.chain().nth(1).unwrap().to_string(),
            "Latitude for zone NQ must be between -90 and 90"
        );
    }

    #[test]
    fn test_read_zones_empty() {
        let dir = tempdir().unwrap();
        create_zones_file(dir.path(), "id,description,latitude,longitude");
        assert!(read_zones(dir.path()).is_err());
    }
}
