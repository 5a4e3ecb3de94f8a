//! Code for reading transmission capacities between zones.
use super::{input_err_msg, read_csv};
use crate::id::IDCollection;
use crate::units::Capacity;
use crate::zone::ZoneID;
use anyhow::{Context, Result, ensure};
use indexmap::IndexSet;
use ndarray::Array2;
use serde::Deserialize;
use std::path::Path;

const CAPACITIES_FILE_NAME: &str = "capacities.csv";

/// Represents a row of the capacities CSV file
#[derive(Debug, Deserialize, PartialEq)]
struct CapacityRaw {
    from: String,
    to: String,
    capacity: Capacity,
}

/// Read the planned transmission capacity for each route from the model directory.
///
/// Routes not listed in the file have zero capacity. Capacities are for a particular direction, so
/// the capacity from A to B is independent of the capacity from B to A.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
/// * `zone_ids` - The IDs of all zones, in matrix order
///
/// # Returns
///
/// A matrix of capacities with a row and column for each zone or an error.
pub fn read_capacities(
    model_dir: &Path,
    zone_ids: &IndexSet<ZoneID>,
) -> Result<Array2<Capacity>> {
    let file_path = model_dir.join(CAPACITIES_FILE_NAME);
    let rows: Vec<CapacityRaw> = read_csv(&file_path)?;
    read_capacities_from_iter(rows.into_iter(), zone_ids)
        .with_context(|| input_err_msg(&file_path))
}

fn read_capacities_from_iter<I>(
    iter: I,
    zone_ids: &IndexSet<ZoneID>,
) -> Result<Array2<Capacity>>
where
    I: Iterator<Item = CapacityRaw>,
{
    let n = zone_ids.len();
    let mut capacities: Array2<Option<Capacity>> = Array2::from_elem((n, n), None);
    for row in iter {
        ensure!(
            row.capacity.is_finite() && row.capacity >= Capacity(0.0),
            "Capacity from {} to {} must be a finite, non-negative number",
            row.from,
            row.to
        );

        let i = zone_ids.get_index_by_str(&row.from)?;
        let j = zone_ids.get_index_by_str(&row.to)?;
        let entry = &mut capacities[[i, j]];
        ensure!(
            entry.is_none(),
            "Capacity from {} to {} specified more than once",
            row.from,
            row.to
        );
        *entry = Some(row.capacity);
    }

    Ok(capacities.mapv(|capacity| capacity.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, zone_ids};
    use ndarray::array;
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn row(from: &str, to: &str, capacity: f64) -> CapacityRaw {
        CapacityRaw {
            from: from.into(),
            to: to.into(),
            capacity: Capacity(capacity),
        }
    }

    #[rstest]
    fn test_read_capacities_from_iter(zone_ids: IndexSet<ZoneID>) {
        let rows = [row("A", "B", 100.0), row("B", "A", 50.0), row("C", "B", 25.0)];
        let capacities = read_capacities_from_iter(rows.into_iter(), &zone_ids).unwrap();
        assert_eq!(
            capacities,
            array![
                [Capacity(0.0), Capacity(100.0), Capacity(0.0)],
                [Capacity(50.0), Capacity(0.0), Capacity(0.0)],
                [Capacity(0.0), Capacity(25.0), Capacity(0.0)]
            ]
        );
    }

    #[rstest]
    #[case(row("A", "D", 1.0), "Unknown ID D found")]
    #[case(
        row("A", "B", -1.0),
        "Capacity from A to B must be a finite, non-negative number"
    )]
    #[case(
        row("A", "B", f64::INFINITY),
        "Capacity from A to B must be a finite, non-negative number"
    )]
    #[case(row("A", "B", 2.0), "Capacity from A to B specified more than once")]
    fn test_read_capacities_from_iter_invalid(
        zone_ids: IndexSet<ZoneID>,
        #[case] bad_row: CapacityRaw,
        #[case] msg: &str,
    ) {
        let rows = [row("A", "B", 1.0), bad_row];
        assert_error!(read_capacities_from_iter(rows.into_iter(), &zone_ids), msg);
    }

    #[rstest]
    fn test_read_capacities(zone_ids: IndexSet<ZoneID>) {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(CAPACITIES_FILE_NAME)).unwrap();
            writeln!(file, "from,to,capacity\nA,C,400\nC,A,400").unwrap();
        }
        let capacities = read_capacities(dir.path(), &zone_ids).unwrap();
        assert_eq!(capacities[[0, 2]], Capacity(400.0));
        assert_eq!(capacities[[2, 0]], Capacity(400.0));
        assert_eq!(capacities[[1, 1]], Capacity(0.0));
    }

    #[rstest]
    fn test_read_capacities_missing_file(zone_ids: IndexSet<ZoneID>) {
        let dir = tempdir().unwrap();
        assert!(read_capacities(dir.path(), &zone_ids).is_err());
    }
}
