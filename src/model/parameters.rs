//! Defines the `ModelParameters` struct, which represents the contents of `model.toml`.
use crate::cost_function::CostFunction;
use crate::input::{input_err_msg, read_toml};
use crate::transmission::DEFAULT_LIFETIME;
use crate::units::{Dimensionless, Year};
use anyhow::{Context, Result, ensure};
use log::warn;
use serde::Deserialize;
use std::path::Path;

const MODEL_PARAMETERS_FILE_NAME: &str = "model.toml";

/// Discount rates above this are probably a mistake (e.g. a percentage instead of a fraction)
const SUSPICIOUS_DISCOUNT_RATE: Dimensionless = Dimensionless(1.0);

fn default_lifetime() -> Year {
    DEFAULT_LIFETIME
}

/// Represents the contents of the entire model file.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelParameters {
    /// Discount rate used to annualise transmission costs, as a fraction
    pub discount_rate: Dimensionless,
    /// Lifetime of transmission assets in years
    #[serde(default = "default_lifetime")]
    pub lifetime: Year,
    /// Cost of transmission per unit capacity per unit distance
    pub cost_function: CostFunction,
}

/// Check that the `discount_rate` parameter is valid
fn check_discount_rate(value: Dimensionless) -> Result<()> {
    ensure!(
        value.is_finite() && value >= Dimensionless(0.0),
        "discount_rate must be a finite number greater than or equal to zero"
    );

    if value > SUSPICIOUS_DISCOUNT_RATE {
        warn!(
            "discount_rate is {value}, which is very high. The discount rate should be given as \
            a fraction, not a percentage."
        );
    }

    Ok(())
}

/// Check that the `lifetime` parameter is valid
fn check_lifetime(value: Year) -> Result<()> {
    ensure!(
        value.is_finite() && value > Year(0.0),
        "lifetime must be a finite number greater than zero"
    );

    Ok(())
}

impl ModelParameters {
    /// Read a model file from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    ///
    /// # Returns
    ///
    /// The model file contents as a [`ModelParameters`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<ModelParameters> {
        let file_path = model_dir.as_ref().join(MODEL_PARAMETERS_FILE_NAME);
        let model_params: ModelParameters = read_toml(&file_path)?;

        model_params
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(model_params)
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        check_discount_rate(self.discount_rate)?;
        check_lifetime(self.lifetime)?;
        self.cost_function
            .validate()
            .context("Invalid value for cost_function")?;

        Ok(())
    }
}
