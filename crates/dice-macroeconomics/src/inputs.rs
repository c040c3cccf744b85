//! Exogenous inputs
//!
//! Series supplied by the climate damage and abatement collaborators, plus an
//! optional per-year savings policy.

use crate::parameters::{invalid, is_valid_saving_rate, MacroEconomicsParameters};
use dice_core::errors::DiceResult;
use dice_core::timeseries::{ExogenousSeries, FloatValue, YearAxis};
use serde::{Deserialize, Serialize};

pub const VAR_ABATECOST: &str = "abatecost";
pub const VAR_DAMAGE_FRAC_OUTPUT: &str = "damage_frac_output";

/// Exogenous series consumed by [`MacroEconomics::compute`](crate::MacroEconomics::compute)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExogenousInputs {
    /// Cost of emissions abatement (trillions USD)
    pub abatecost: ExogenousSeries,
    /// Fraction of gross output lost to climate damage
    pub damage_frac_output: ExogenousSeries,
    /// Per-year savings rate overriding the scalar parameter.
    ///
    /// Years without a value fall back to the scalar.
    #[serde(default)]
    pub saving_rate: Option<ExogenousSeries>,
}

impl ExogenousInputs {
    pub fn new(abatecost: ExogenousSeries, damage_frac_output: ExogenousSeries) -> Self {
        Self {
            abatecost,
            damage_frac_output,
            saving_rate: None,
        }
    }

    /// Constant abatement cost and damage fraction for every year of `axis`
    pub fn constant(axis: &YearAxis, abatecost: FloatValue, damage_frac_output: FloatValue) -> Self {
        Self::new(
            ExogenousSeries::constant(axis, abatecost),
            ExogenousSeries::constant(axis, damage_frac_output),
        )
    }

    pub fn with_saving_rate(mut self, saving_rate: ExogenousSeries) -> Self {
        self.saving_rate = Some(saving_rate);
        self
    }

    /// Align every series onto `axis`.
    ///
    /// Per-year savings rates must lie within [0, 1] like the scalar parameter.
    pub(crate) fn resolve(
        &self,
        axis: &YearAxis,
        parameters: &MacroEconomicsParameters,
    ) -> DiceResult<ResolvedInputs> {
        let policy = parameters.missing_data;
        let abatecost = self.abatecost.resolve(axis, VAR_ABATECOST, policy)?;
        let damage_frac_output =
            self.damage_frac_output
                .resolve(axis, VAR_DAMAGE_FRAC_OUTPUT, policy)?;

        let saving_rate = match &self.saving_rate {
            Some(series) => series
                .reindex(axis)
                .into_iter()
                .zip(axis.years())
                .map(|(value, year)| match value {
                    Some(rate) if !is_valid_saving_rate(rate) => Err(invalid(
                        "saving_rate",
                        &format!("{} in year {} must lie within [0, 1]", rate, year),
                    )),
                    Some(rate) => Ok(rate),
                    None => Ok(parameters.saving_rate),
                })
                .collect::<DiceResult<Vec<_>>>()?,
            None => vec![parameters.saving_rate; axis.len()],
        };

        Ok(ResolvedInputs {
            abatecost,
            damage_frac_output,
            saving_rate,
        })
    }
}

/// Exogenous values aligned with the period index of a year axis
#[derive(Debug, Clone)]
pub(crate) struct ResolvedInputs {
    pub abatecost: Vec<FloatValue>,
    pub damage_frac_output: Vec<FloatValue>,
    pub saving_rate: Vec<FloatValue>,
}
