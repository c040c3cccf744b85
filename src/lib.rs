//! DICE macroeconomics
//!
//! Re-exports the core trajectory types and the macroeconomic model so that
//! downstream code can depend on a single crate.
//!
//! ```
//! use dice::{ExogenousInputs, MacroEconomics, MacroEconomicsParameters};
//!
//! let model = MacroEconomics::from_parameters(MacroEconomicsParameters::default())?;
//! let inputs = ExogenousInputs::constant(model.axis(), 0.0, 0.0);
//! let trajectory = model.compute(&inputs)?;
//!
//! assert_eq!(trajectory.len(), 18);
//! assert_eq!(trajectory.get(2100).map(|r| r.year), Some(2100));
//! # Ok::<(), dice::DiceError>(())
//! ```

pub use dice_core;
pub use dice_macroeconomics;

pub use dice_core::errors::{DiceError, DiceResult};
pub use dice_core::timeseries::{ExogenousSeries, MissingDataPolicy, Year, YearAxis};
pub use dice_core::trajectory::{Field, Trajectory, YearRecord};
pub use dice_macroeconomics::{ExogenousInputs, MacroEconomics, MacroEconomicsParameters};
