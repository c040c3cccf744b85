//! Macroeconomics engine
//!
//! Advances the economy period by period over the year axis.
//!
//! # Phases
//!
//! A run is split into three strictly ordered phases:
//!
//! 1. **Seed**: the first period takes population, productivity, its growth rate,
//!    capital and gross output from the initial conditions. Output net of damage,
//!    net output, investment, consumption and per-capita consumption are then
//!    computed, followed by capital for the second period.
//! 2. **Forward**: every later period computes population, productivity growth
//!    rate, productivity, gross output, output net of damage, net output,
//!    investment, consumption, per-capita consumption and finally the next
//!    period's capital.
//! 3. **Interest rate**: a second pass over all periods, since the interest rate
//!    of a period needs the consumption of the next one.
//!
//! Capital and the interest rate of the terminal period have no next period and
//! are not computed by their own equations. Once the passes are complete every
//! non-finite value is replaced with zero.

use super::equations;
use crate::inputs::{ExogenousInputs, ResolvedInputs};
use crate::parameters::MacroEconomicsParameters;
use dice_core::errors::{DiceError, DiceResult};
use dice_core::timeseries::{FloatValue, YearAxis};
use dice_core::trajectory::Trajectory;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// DICE macroeconomic model.
///
/// The engine holds only validated parameters. Each call to
/// [`MacroEconomics::compute`] builds a fresh [`Trajectory`], so separate runs
/// never share state and can be executed concurrently.
///
/// Serializes as its parameters; deserialization validates them through
/// [`MacroEconomics::from_parameters`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "MacroEconomicsParameters",
    into = "MacroEconomicsParameters"
)]
pub struct MacroEconomics {
    parameters: MacroEconomicsParameters,
    axis: YearAxis,
}

impl TryFrom<MacroEconomicsParameters> for MacroEconomics {
    type Error = DiceError;

    fn try_from(parameters: MacroEconomicsParameters) -> DiceResult<Self> {
        Self::from_parameters(parameters)
    }
}

impl From<MacroEconomics> for MacroEconomicsParameters {
    fn from(model: MacroEconomics) -> Self {
        model.parameters
    }
}

impl MacroEconomics {
    /// Create a new engine, rejecting invalid configurations.
    pub fn from_parameters(parameters: MacroEconomicsParameters) -> DiceResult<Self> {
        parameters.validate()?;
        let axis = parameters.axis()?;
        Ok(Self { parameters, axis })
    }

    pub fn parameters(&self) -> &MacroEconomicsParameters {
        &self.parameters
    }

    pub fn axis(&self) -> &YearAxis {
        &self.axis
    }

    /// Run the model over the full year axis.
    ///
    /// Fails only if the exogenous inputs cannot be aligned with the axis.
    pub fn compute(&self, inputs: &ExogenousInputs) -> DiceResult<Trajectory> {
        let inputs = inputs.resolve(&self.axis, &self.parameters)?;
        debug!(
            "Computing macroeconomics for {} periods ({}-{})",
            self.axis.len(),
            self.axis.year_start(),
            self.axis.last_year()
        );

        let mut trajectory = self.initialise(&inputs);
        self.seed_phase(&mut trajectory, &inputs);
        self.forward_phase(&mut trajectory, &inputs);
        self.interest_rate_phase(&mut trajectory);

        let replaced = trajectory.sanitize();
        if let Some((year, field)) = replaced.first() {
            warn!(
                "Replaced {} non-finite values with zero (first: {} in {})",
                replaced.len(),
                field,
                year
            );
        }
        debug!("Macroeconomics complete");

        Ok(trajectory)
    }

    /// Create the table and fill in the initial conditions
    fn initialise(&self, inputs: &ResolvedInputs) -> Trajectory {
        let p = &self.parameters;
        let mut trajectory = Trajectory::new(self.axis, &inputs.saving_rate);

        let first = &mut trajectory[0];
        first.gross_output = p.init_gross_output;
        first.population = p.pop_start;
        first.capital = p.capital_start;
        first.productivity = p.productivity_start;
        first.productivity_gr = p.productivity_gr_start;

        trajectory
    }

    fn seed_phase(&self, trajectory: &mut Trajectory, inputs: &ResolvedInputs) {
        self.compute_output_net_of_damage(trajectory, inputs, 0);
        self.compute_net_output(trajectory, inputs, 0);
        self.compute_investment(trajectory, 0);
        self.compute_consumption(trajectory, 0);
        self.compute_consumption_pc(trajectory, 0);
        self.compute_capital(trajectory, 0);
    }

    fn forward_phase(&self, trajectory: &mut Trajectory, inputs: &ResolvedInputs) {
        for index in 1..trajectory.len() {
            self.compute_population(trajectory, index);
            self.compute_productivity_growth_rate(trajectory, index);
            self.compute_productivity(trajectory, inputs, index);

            self.compute_gross_output(trajectory, index);
            self.compute_output_net_of_damage(trajectory, inputs, index);
            self.compute_net_output(trajectory, inputs, index);
            self.compute_investment(trajectory, index);
            self.compute_consumption(trajectory, index);
            self.compute_consumption_pc(trajectory, index);
            self.compute_capital(trajectory, index);
        }
    }

    fn interest_rate_phase(&self, trajectory: &mut Trajectory) {
        for index in 0..trajectory.len() {
            self.compute_interest_rate(trajectory, index);
        }
    }

    fn time_step(&self) -> FloatValue {
        self.axis.time_step() as FloatValue
    }

    fn compute_population(&self, trajectory: &mut Trajectory, index: usize) {
        let previous = trajectory[index - 1].population;
        trajectory[index].population = equations::population(
            previous,
            self.parameters.popasym,
            self.parameters.population_growth,
        );
    }

    fn compute_productivity_growth_rate(&self, trajectory: &mut Trajectory, index: usize) {
        let period = (index + 1) as FloatValue;
        trajectory[index].productivity_gr = equations::productivity_growth_rate(
            self.parameters.productivity_gr_start,
            self.parameters.decline_rate_tfp,
            period,
        );
    }

    fn compute_productivity(
        &self,
        trajectory: &mut Trajectory,
        inputs: &ResolvedInputs,
        index: usize,
    ) {
        let previous = trajectory[index - 1];
        trajectory[index].productivity = equations::productivity(
            previous.productivity,
            previous.productivity_gr,
            inputs.damage_frac_output[index],
            self.parameters.frac_damage_prod,
            self.parameters.damage_to_productivity,
        );
    }

    fn compute_gross_output(&self, trajectory: &mut Trajectory, index: usize) {
        let record = &mut trajectory[index];
        record.gross_output = equations::gross_output(
            record.productivity,
            record.capital,
            record.population,
            self.parameters.output_elasticity,
        );
    }

    fn compute_output_net_of_damage(
        &self,
        trajectory: &mut Trajectory,
        inputs: &ResolvedInputs,
        index: usize,
    ) {
        let record = &mut trajectory[index];
        record.output_net_of_d = equations::output_net_of_damage(
            record.gross_output,
            inputs.damage_frac_output[index],
            self.parameters.frac_damage_prod,
            self.parameters.damage_to_productivity,
        );
    }

    fn compute_net_output(
        &self,
        trajectory: &mut Trajectory,
        inputs: &ResolvedInputs,
        index: usize,
    ) {
        let record = &mut trajectory[index];
        record.net_output = equations::net_output(record.output_net_of_d, inputs.abatecost[index]);
    }

    fn compute_investment(&self, trajectory: &mut Trajectory, index: usize) {
        let record = &mut trajectory[index];
        record.investment = equations::investment(record.saving_rate, record.net_output);
    }

    fn compute_consumption(&self, trajectory: &mut Trajectory, index: usize) {
        let record = &mut trajectory[index];
        record.consumption =
            equations::consumption(record.net_output, record.investment, self.parameters.lo_conso);
    }

    fn compute_consumption_pc(&self, trajectory: &mut Trajectory, index: usize) {
        let record = &mut trajectory[index];
        record.pc_consumption = equations::per_capita_consumption(
            record.consumption,
            record.population,
            self.parameters.lo_conso,
        );
    }

    /// Writes capital into the next period; a no-op for the terminal period.
    fn compute_capital(&self, trajectory: &mut Trajectory, index: usize) {
        if index >= trajectory.last_index() {
            return;
        }
        let record = &trajectory[index];
        let capital = equations::next_capital(
            record.capital,
            record.investment,
            self.parameters.depreciation_capital,
            self.time_step(),
            self.parameters.lo_capital,
        );
        trajectory[index + 1].capital = capital;
    }

    /// Reads consumption from the next period; a no-op for the terminal period.
    fn compute_interest_rate(&self, trajectory: &mut Trajectory, index: usize) {
        if index >= trajectory.last_index() {
            return;
        }
        let next_consumption = trajectory[index + 1].consumption;
        let record = &mut trajectory[index];
        record.interest_rate = equations::interest_rate(
            record.consumption,
            next_consumption,
            self.parameters.init_rate_time_pref,
            self.parameters.conso_elasticity,
            self.time_step(),
        );
    }
}
