//! Macroeconomics parameters
//!
//! Scalar constants and initial conditions for the DICE economic recurrence.

use dice_core::errors::{DiceError, DiceResult};
use dice_core::timeseries::{FloatValue, MissingDataPolicy, Year, YearAxis};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for the macroeconomic recurrence.
///
/// Monetary quantities are in trillions of 2005 USD and population in millions.
///
/// # Default Values
///
/// Defaults follow the DICE-2013R calibration on a 5-year step from 2015.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroEconomicsParameters {
    // Time axis
    /// First simulated year.
    /// Default: 2015
    pub year_start: Year,

    /// Last simulated year.
    /// Default: 2100
    pub year_end: Year,

    /// Years per period.
    /// Default: 5
    pub time_step: Year,

    // Initial conditions
    /// Total factor productivity in the first year.
    /// Default: 5.115
    pub productivity_start: FloatValue,

    /// Gross output in the first year (trillions USD).
    /// Default: 105.1
    pub init_gross_output: FloatValue,

    /// Capital stock in the first year (trillions USD).
    /// Default: 223.0
    pub capital_start: FloatValue,

    /// Population in the first year (millions).
    /// Default: 7403.0
    pub pop_start: FloatValue,

    /// Productivity growth rate in the first year (per period).
    /// Default: 0.076
    pub productivity_gr_start: FloatValue,

    // Production
    /// Capital elasticity in the Cobb-Douglas production function ($\gamma$).
    /// Default: 0.3
    pub output_elasticity: FloatValue,

    /// Asymptotic population (millions).
    /// Default: 11500.0
    pub popasym: FloatValue,

    /// Rate of convergence towards the asymptotic population.
    /// Default: 0.134
    pub population_growth: FloatValue,

    /// Decline rate of productivity growth (per 5 years).
    /// Default: 0.005
    pub decline_rate_tfp: FloatValue,

    /// Annual capital depreciation rate ($\delta$).
    /// Default: 0.1
    pub depreciation_capital: FloatValue,

    // Preferences
    /// Initial pure rate of social time preference ($\rho$).
    /// Default: 0.015
    pub init_rate_time_pref: FloatValue,

    /// Elasticity of marginal utility of consumption ($\eta$).
    /// Default: 1.45
    pub conso_elasticity: FloatValue,

    /// Savings rate, broadcast to every year unless a per-year policy is supplied.
    /// Default: 0.2
    pub saving_rate: FloatValue,

    // Lower bounds
    /// Floor applied to capital (trillions USD).
    /// Default: 1.0
    pub lo_capital: FloatValue,

    /// Floor applied to consumption and per-capita consumption.
    /// Default: 2.0
    pub lo_conso: FloatValue,

    /// Per-capita consumption floor (thousands USD).
    ///
    /// Carried for compatibility with existing configurations. Per-capita
    /// consumption is floored with `lo_conso`.
    /// Default: 0.01
    pub lo_per_capita_conso: FloatValue,

    // Damages
    /// Fraction of climate damage applied to productivity rather than output.
    /// Default: 0.3
    pub frac_damage_prod: FloatValue,

    /// Whether climate damage degrades productivity directly.
    /// Default: false
    pub damage_to_productivity: bool,

    /// Treatment of model years missing from the exogenous series.
    /// Default: error
    pub missing_data: MissingDataPolicy,
}

impl Default for MacroEconomicsParameters {
    fn default() -> Self {
        Self {
            year_start: 2015,
            year_end: 2100,
            time_step: 5,

            productivity_start: 5.115,
            init_gross_output: 105.1,
            capital_start: 223.0,
            pop_start: 7403.0,
            productivity_gr_start: 0.076,

            output_elasticity: 0.3,
            popasym: 11500.0,
            population_growth: 0.134,
            decline_rate_tfp: 0.005,
            depreciation_capital: 0.1,

            init_rate_time_pref: 0.015,
            conso_elasticity: 1.45,
            saving_rate: 0.2,

            lo_capital: 1.0,
            lo_conso: 2.0,
            lo_per_capita_conso: 0.01,

            frac_damage_prod: 0.3,
            damage_to_productivity: false,
            missing_data: MissingDataPolicy::Error,
        }
    }
}

impl MacroEconomicsParameters {
    /// Parse parameters from a TOML document.
    ///
    /// Keys that are not present take their default value.
    pub fn from_toml_str(content: &str) -> DiceResult<Self> {
        toml::from_str(content).map_err(|e| DiceError::Config(e.to_string()))
    }

    /// Read parameters from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> DiceResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DiceError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// The year axis described by `year_start`, `year_end` and `time_step`
    pub fn axis(&self) -> DiceResult<YearAxis> {
        YearAxis::new(self.year_start, self.year_end, self.time_step)
    }

    /// Check the parameters describe a runnable configuration.
    ///
    /// Only configuration mistakes are rejected here. Values that make the
    /// economics degenerate (e.g. a productivity growth rate of one) are allowed
    /// and surface as zeroed values in the trajectory.
    pub fn validate(&self) -> DiceResult<()> {
        self.axis()?;

        let constants = [
            ("productivity_start", self.productivity_start),
            ("init_gross_output", self.init_gross_output),
            ("capital_start", self.capital_start),
            ("pop_start", self.pop_start),
            ("productivity_gr_start", self.productivity_gr_start),
            ("output_elasticity", self.output_elasticity),
            ("popasym", self.popasym),
            ("population_growth", self.population_growth),
            ("decline_rate_tfp", self.decline_rate_tfp),
            ("depreciation_capital", self.depreciation_capital),
            ("init_rate_time_pref", self.init_rate_time_pref),
            ("conso_elasticity", self.conso_elasticity),
            ("saving_rate", self.saving_rate),
            ("lo_capital", self.lo_capital),
            ("lo_conso", self.lo_conso),
            ("lo_per_capita_conso", self.lo_per_capita_conso),
            ("frac_damage_prod", self.frac_damage_prod),
        ];
        if let Some((name, _)) = constants.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(name, "must be finite"));
        }

        if !is_valid_saving_rate(self.saving_rate) {
            return Err(invalid("saving_rate", "must lie within [0, 1]"));
        }
        for (name, value) in [
            ("lo_capital", self.lo_capital),
            ("lo_conso", self.lo_conso),
            ("lo_per_capita_conso", self.lo_per_capita_conso),
        ] {
            if value < 0.0 {
                return Err(invalid(name, "lower bounds must not be negative"));
            }
        }

        Ok(())
    }
}

/// Savings rates are fractions of net output; NaN is rejected
pub(crate) fn is_valid_saving_rate(value: FloatValue) -> bool {
    (0.0..=1.0).contains(&value)
}

pub(crate) fn invalid(name: &str, reason: &str) -> DiceError {
    DiceError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
