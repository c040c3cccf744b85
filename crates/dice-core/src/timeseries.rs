//! Year axes and exogenous series
//!
//! The model runs on a regular axis of calendar years. Collaborators supply
//! exogenous data as a mapping from year to value which may not line up with
//! that axis, so it is re-indexed before a run.

use crate::errors::{DiceError, DiceResult};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type FloatValue = f64;
pub type Year = i64;

/// Largest number of periods a [`YearAxis`] may hold
pub const MAX_PERIODS: usize = 100_000;

/// A regular axis of calendar years.
///
/// The axis starts at `year_start` and holds
/// `round((year_end - year_start) / time_step) + 1` periods, with the ratio rounded
/// half-up. Periods are addressed by index; the calendar year of period `i`
/// is `year_start + i * time_step`.
///
/// Every year on the axis is representable as a [`Year`] and the axis holds at
/// most [`MAX_PERIODS`] periods. Deserialization goes through the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "YearAxisFields")]
pub struct YearAxis {
    year_start: Year,
    time_step: Year,
    len: usize,
}

#[derive(Deserialize)]
struct YearAxisFields {
    year_start: Year,
    time_step: Year,
    len: usize,
}

impl TryFrom<YearAxisFields> for YearAxis {
    type Error = DiceError;

    fn try_from(fields: YearAxisFields) -> DiceResult<Self> {
        YearAxis::from_periods(fields.year_start, fields.time_step, fields.len)
    }
}

impl YearAxis {
    /// Create an axis spanning `year_start` to `year_end`.
    ///
    /// Returns an error if `time_step <= 0`, if `year_end <= year_start`, or if
    /// the range does not fit on an axis of at most [`MAX_PERIODS`] periods.
    pub fn new(year_start: Year, year_end: Year, time_step: Year) -> DiceResult<Self> {
        if time_step <= 0 {
            return Err(DiceError::InvalidTimeStep(time_step));
        }
        let range_error = DiceError::InvalidTimeRange {
            year_start,
            year_end,
        };
        if year_end <= year_start {
            return Err(range_error);
        }
        let span = year_end
            .checked_sub(year_start)
            .ok_or_else(|| range_error.clone())?;

        // Round half-up in integer arithmetic
        let mut periods = span / time_step;
        let remainder = span % time_step;
        if remainder >= time_step - remainder {
            periods += 1;
        }
        let len = usize::try_from(periods)
            .ok()
            .and_then(|p| p.checked_add(1))
            .ok_or_else(|| range_error.clone())?;

        Self::from_periods(year_start, time_step, len).map_err(|_| range_error)
    }

    /// Create an axis of `len` periods starting at `year_start`.
    pub fn from_periods(year_start: Year, time_step: Year, len: usize) -> DiceResult<Self> {
        if time_step <= 0 {
            return Err(DiceError::InvalidTimeStep(time_step));
        }
        if len == 0 || len > MAX_PERIODS {
            return Err(DiceError::InvalidPeriodCount(len));
        }
        // len <= MAX_PERIODS so the cast is lossless
        let last_year = ((len - 1) as Year)
            .checked_mul(time_step)
            .and_then(|offset| year_start.checked_add(offset));
        if last_year.is_none() {
            return Err(DiceError::InvalidPeriodCount(len));
        }

        Ok(Self {
            year_start,
            time_step,
            len,
        })
    }

    pub fn year_start(&self) -> Year {
        self.year_start
    }

    pub fn time_step(&self) -> Year {
        self.time_step
    }

    /// Number of periods on the axis
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Calendar year of the final period
    pub fn last_year(&self) -> Year {
        self.year_start + (self.len as Year - 1) * self.time_step
    }

    /// Calendar year of period `index`, if it is on the axis
    pub fn at(&self, index: usize) -> Option<Year> {
        (index < self.len).then(|| self.year_start + index as Year * self.time_step)
    }

    /// Period index of `year`, if `year` falls exactly on the axis
    pub fn index_of(&self, year: Year) -> Option<usize> {
        let offset = year.checked_sub(self.year_start)?;
        if offset < 0 || offset % self.time_step != 0 {
            return None;
        }
        let index = usize::try_from(offset / self.time_step).ok()?;
        (index < self.len).then_some(index)
    }

    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        (0..self.len).map(move |i| self.year_start + i as Year * self.time_step)
    }
}

/// How to treat axis years for which an exogenous series has no value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataPolicy {
    /// Reject the run with [`DiceError::MissingExogenousData`]
    #[default]
    Error,
    /// Fill the gap with NaN and let it propagate through the recurrence.
    ///
    /// Affected values end up zeroed by the final sanitization.
    Propagate,
}

/// An exogenous input indexed by calendar year.
///
/// This is a partial function: years that were never supplied are reported as
/// `None` rather than silently defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExogenousSeries {
    values: BTreeMap<Year, FloatValue>,
}

impl ExogenousSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// A series holding `value` for every year on `axis`
    pub fn constant(axis: &YearAxis, value: FloatValue) -> Self {
        axis.years().map(|year| (year, value)).collect()
    }

    /// Build a series from parallel slices of years and values.
    ///
    /// # Panics
    /// Panics if the slices have different lengths.
    pub fn from_values(years: &[Year], values: &[FloatValue]) -> Self {
        assert_eq!(
            years.len(),
            values.len(),
            "years and values must have the same length"
        );
        years.iter().copied().zip(values.iter().copied()).collect()
    }

    pub fn insert(&mut self, year: Year, value: FloatValue) -> Option<FloatValue> {
        self.values.insert(year, value)
    }

    pub fn get(&self, year: Year) -> Option<FloatValue> {
        self.values.get(&year).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Year, FloatValue)> + '_ {
        self.values.iter().map(|(year, value)| (*year, *value))
    }

    /// Align the series onto `axis`.
    ///
    /// Values for years outside the axis are dropped and axis years without a value
    /// are `None`.
    pub fn reindex(&self, axis: &YearAxis) -> Vec<Option<FloatValue>> {
        axis.years().map(|year| self.get(year)).collect()
    }

    /// Align the series onto `axis`, resolving gaps with `policy`.
    ///
    /// `name` is only used for diagnostics.
    pub fn resolve(
        &self,
        axis: &YearAxis,
        name: &str,
        policy: MissingDataPolicy,
    ) -> DiceResult<Vec<FloatValue>> {
        let aligned = self.reindex(axis);
        let missing = aligned.iter().filter(|v| v.is_none()).count();
        if missing == 0 {
            return Ok(aligned.into_iter().flatten().collect());
        }

        match policy {
            MissingDataPolicy::Error => {
                let year = axis
                    .years()
                    .zip(&aligned)
                    .find(|(_, value)| value.is_none())
                    .map(|(year, _)| year)
                    .unwrap_or(axis.year_start());
                Err(DiceError::MissingExogenousData {
                    variable: name.to_string(),
                    year,
                })
            }
            MissingDataPolicy::Propagate => {
                warn!(
                    "{} of {} years of `{}` are missing; filling with NaN",
                    missing,
                    axis.len(),
                    name
                );
                Ok(aligned
                    .into_iter()
                    .map(|v| v.unwrap_or(FloatValue::NAN))
                    .collect())
            }
        }
    }
}

impl FromIterator<(Year, FloatValue)> for ExogenousSeries {
    fn from_iter<T: IntoIterator<Item = (Year, FloatValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
