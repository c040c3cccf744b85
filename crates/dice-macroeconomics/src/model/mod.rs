//! The macroeconomic recurrence
//!
//! - `equations`: pure per-year equations
//! - `MacroEconomics`: the engine that seeds a trajectory and drives the equations
//!   across the year axis

pub mod equations;
mod macroeconomics;

pub use macroeconomics::MacroEconomics;
