//! Model parameters
//!
//! Parameter structures with defaults matching the DICE-2013 calibration.

mod macroeconomics;

pub use macroeconomics::MacroEconomicsParameters;
pub(crate) use macroeconomics::{invalid, is_valid_saving_rate};
