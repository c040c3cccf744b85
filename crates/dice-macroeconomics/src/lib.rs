//! DICE macroeconomics
//!
//! Computes the time evolution of population, productivity, capital, output,
//! consumption and the interest rate under exogenous climate damage and
//! abatement cost.
//!
//! # Module Organisation
//!
//! - `parameters`: scalar constants and initial conditions
//! - `inputs`: exogenous series supplied by other models
//! - `model`: the per-year equations and the engine that drives them

pub mod inputs;
pub mod model;
pub mod parameters;

pub use inputs::ExogenousInputs;
pub use model::MacroEconomics;
pub use parameters::MacroEconomicsParameters;
