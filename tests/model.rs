//! Integration tests for loading the example models.
use float_cmp::assert_approx_eq;
use std::path::{Path, PathBuf};
use transmission::input::capacity::read_capacities;
use transmission::input::load_model;
use transmission::units::{Capacity, Distance, Money};

/// Get the path to an example model.
fn get_model_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

/// Load the example model with coordinates only
#[test]
fn test_load_simple() {
    let model = load_model(get_model_dir("simple")).unwrap();
    assert_eq!(model.zones.len(), 4);
    assert_eq!(model.distances.num_zones(), 4);

    // Great-circle distances are symmetric
    let distances = model.distances.values();
    assert_eq!(distances[[0, 1]], distances[[1, 0]]);
    assert_eq!(distances[[2, 2]], Distance(0.0));
}

/// Check calculated costs for the example model with explicit distances
#[test]
fn test_explicit_distances_costs() {
    let model_dir = get_model_dir("explicit_distances");
    let model = load_model(&model_dir).unwrap();
    let capacities = read_capacities(&model_dir, model.distances.zone_ids()).unwrap();

    // north to south is unconnected
    assert_eq!(capacities[[0, 2]], Capacity(0.0));

    let cost_model = model.transmission_cost_model().unwrap();
    let costs = cost_model.cost_matrix(&capacities).unwrap();
    assert_eq!(costs[[0, 2]], Money(0.0));

    let expected = Money(2.5 * 500.0 * 350.0 / cost_model.annuity_factor().0);
    assert_approx_eq!(Money, costs[[0, 1]], expected);

    // Distances are given once, but capacities are directional
    assert_approx_eq!(
        Money,
        costs[[2, 1]],
        Money(2.5 * 250.0 * 420.0 / cost_model.annuity_factor().0)
    );
}
