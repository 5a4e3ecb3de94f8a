//! Transmission costs between zones.
//!
//! The annualised cost of a transmission route is its capital cost (a cost per unit capacity per
//! unit distance, which may depend on the capacity being built) multiplied by the capacity and
//! the length of the route, divided by the annuity factor for the asset.
use crate::finance::annuity_factor;
use crate::units::{Capacity, Dimensionless, Distance, Money, MoneyPerCapacityPerDistance, Year};
use anyhow::{Result, bail, ensure};
use log::debug;
use ndarray::{Array2, Zip};
use std::fmt;

/// The lifetime of transmission assets, if not otherwise specified
pub const DEFAULT_LIFETIME: Year = Year(50.0);

/// A function giving the cost of transmission per unit capacity per unit distance for a route with
/// the given capacity
pub type CostFn = dyn Fn(Capacity) -> MoneyPerCapacityPerDistance + Send + Sync;

/// Calculates the cost of transmission between each pair of zones.
///
/// Once created, the model is immutable, so it can safely be shared between threads.
pub struct TransmissionCostModel {
    costfn: Box<CostFn>,
    annuity_factor: Dimensionless,
    distances: Array2<Distance>,
}

impl TransmissionCostModel {
    /// Create a new [`TransmissionCostModel`].
    ///
    /// # Arguments
    ///
    /// * `costfn` - Cost per unit capacity per unit distance, as a function of capacity
    /// * `discount_rate` - Discount rate for annualising costs
    /// * `lifetime` - Lifetime of transmission assets (usually [`DEFAULT_LIFETIME`])
    /// * `distances` - Square matrix of distances between zones
    ///
    /// # Returns
    ///
    /// The new model or an error if the distances are not a square matrix or the annuity factor
    /// for `lifetime` and `discount_rate` is not a positive number.
    pub fn new<F>(
        costfn: F,
        discount_rate: Dimensionless,
        lifetime: Year,
        distances: Array2<Distance>,
    ) -> Result<Self>
    where
        F: Fn(Capacity) -> MoneyPerCapacityPerDistance + Send + Sync + 'static,
    {
        let (rows, cols) = distances.dim();
        ensure!(rows == cols, "Distance matrix must be square (got {rows}x{cols})");

        let annuity_factor = annuity_factor(lifetime, discount_rate);
        ensure!(
            annuity_factor.is_finite() && annuity_factor > Dimensionless(0.0),
            "Annuity factor must be a positive number (lifetime: {lifetime}, discount rate: \
            {discount_rate}, annuity factor: {annuity_factor})"
        );
        debug!("Annuity factor for transmission assets: {annuity_factor}");

        Ok(Self {
            costfn: Box::new(costfn),
            annuity_factor,
            distances,
        })
    }

    /// The annuity factor used to annualise costs
    pub fn annuity_factor(&self) -> Dimensionless {
        self.annuity_factor
    }

    /// The distances between zones
    pub fn distances(&self) -> &Array2<Distance> {
        &self.distances
    }

    /// The number of zones
    pub fn num_zones(&self) -> usize {
        self.distances.nrows()
    }

    /// Calculate the annualised cost of transmission between each pair of zones.
    ///
    /// The cost for the route from zone `i` to zone `j` is:
    ///
    /// `costfn(capacity[i, j]) * capacity[i, j] * distance[i, j] / annuity_factor`
    ///
    /// # Arguments
    ///
    /// * `capacities` - The transmission capacity for each route. Must have the same shape as
    ///   the distance matrix.
    ///
    /// # Returns
    ///
    /// A new matrix with the cost for each route or an error if the shape of `capacities` is
    /// wrong or the cost function does not give a finite value for one of the capacities.
    pub fn cost_matrix(&self, capacities: &Array2<Capacity>) -> Result<Array2<Money>> {
        ensure!(
            capacities.dim() == self.distances.dim(),
            "Capacity matrix has shape {:?}, but distance matrix has shape {:?}",
            capacities.dim(),
            self.distances.dim()
        );

        // Cost per unit capacity per unit distance for each route
        let costs_per_unit = capacities.map(|&capacity| (self.costfn)(capacity));
        if let Some(((i, j), cost)) = costs_per_unit
            .indexed_iter()
            .find(|(_, cost)| !cost.is_finite())
        {
            bail!(
                "Cost function gave invalid value {cost} for capacity {} at ({i}, {j})",
                capacities[[i, j]]
            );
        }

        Ok(
            Zip::from(&costs_per_unit)
                .and(capacities)
                .and(&self.distances)
                .map_collect(|&cost, &capacity, &distance| {
                    cost * capacity * distance / self.annuity_factor
                }),
        )
    }
}

impl fmt::Debug for TransmissionCostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransmissionCostModel")
            .field("annuity_factor", &self.annuity_factor)
            .field("distances", &self.distances)
            .finish_non_exhaustive()
    }
}
