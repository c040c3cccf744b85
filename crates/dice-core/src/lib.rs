pub mod errors;
pub mod timeseries;
pub mod trajectory;
