//! Cost functions for transmission, read from the model file.
use crate::units::{Capacity, MoneyPerCapacityPerDistance};
use anyhow::{Result, ensure};
use serde::Deserialize;

/// How the cost per unit capacity per unit distance of transmission depends on capacity
#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum CostFunction {
    /// The same cost regardless of capacity
    Constant {
        /// Cost per unit capacity per unit distance
        cost: MoneyPerCapacityPerDistance,
    },
    /// A cost which changes linearly with capacity, i.e. `slope * capacity + intercept`
    Linear {
        /// Change in cost per unit capacity
        slope: f64,
        /// Cost at zero capacity
        #[serde(default)]
        intercept: MoneyPerCapacityPerDistance,
    },
}

impl CostFunction {
    /// Check that the parameters of the cost function are valid
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Constant { cost } => {
                ensure!(cost.is_finite(), "Transmission cost must be a finite number");
            }
            Self::Linear { slope, intercept } => {
                ensure!(
                    slope.is_finite() && intercept.is_finite(),
                    "Slope and intercept of transmission cost must be finite numbers"
                );
            }
        }

        Ok(())
    }

    /// Evaluate the cost function for the given capacity
    pub fn evaluate(&self, capacity: Capacity) -> MoneyPerCapacityPerDistance {
        match *self {
            Self::Constant { cost } => cost,
            Self::Linear { slope, intercept } => {
                MoneyPerCapacityPerDistance(slope * capacity.value()) + intercept
            }
        }
    }

    /// Convert into a closure which can be used by a
    /// [`TransmissionCostModel`](crate::transmission::TransmissionCostModel)
    pub fn into_fn(self) -> impl Fn(Capacity) -> MoneyPerCapacityPerDistance + Send + Sync {
        move |capacity| self.evaluate(capacity)
    }
}
