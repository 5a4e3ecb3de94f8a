//! The model represents the static input data provided by the user.
use crate::distance::DistanceMatrix;
use crate::transmission::TransmissionCostModel;
use crate::zone::ZoneMap;
use anyhow::Result;

pub mod parameters;
pub use parameters::ModelParameters;

/// Model definition
pub struct Model {
    /// Parameters from the model TOML file
    pub parameters: ModelParameters,
    /// Zones between which transmission costs are calculated
    pub zones: ZoneMap,
    /// Distances between zones
    pub distances: DistanceMatrix,
}

impl Model {
    /// Create the [`TransmissionCostModel`] described by the model parameters
    pub fn transmission_cost_model(&self) -> Result<TransmissionCostModel> {
        TransmissionCostModel::new(
            self.parameters.cost_function.into_fn(),
            self.parameters.discount_rate,
            self.parameters.lifetime,
            self.distances.values().clone(),
        )
    }
}
