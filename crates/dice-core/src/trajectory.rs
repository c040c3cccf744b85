//! Year-indexed state table
//!
//! A [`Trajectory`] holds one [`YearRecord`] per period of a [`YearAxis`].
//! Records are created with only their year and saving rate filled in; every
//! other quantity is NaN until the model writes it.

use crate::errors::{DiceError, DiceResult};
use crate::timeseries::{FloatValue, Year, YearAxis};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Economic state for a single period.
///
/// Monetary quantities are in trillions of USD, population in millions and
/// per-capita consumption in thousands of USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: Year,
    pub saving_rate: FloatValue,
    pub gross_output: FloatValue,
    pub output_net_of_d: FloatValue,
    pub net_output: FloatValue,
    pub population: FloatValue,
    pub productivity: FloatValue,
    pub productivity_gr: FloatValue,
    pub consumption: FloatValue,
    pub pc_consumption: FloatValue,
    pub capital: FloatValue,
    pub investment: FloatValue,
    pub interest_rate: FloatValue,
}

impl YearRecord {
    /// A record with every computed quantity unset (NaN)
    pub fn new(year: Year, saving_rate: FloatValue) -> Self {
        Self {
            year,
            saving_rate,
            gross_output: FloatValue::NAN,
            output_net_of_d: FloatValue::NAN,
            net_output: FloatValue::NAN,
            population: FloatValue::NAN,
            productivity: FloatValue::NAN,
            productivity_gr: FloatValue::NAN,
            consumption: FloatValue::NAN,
            pc_consumption: FloatValue::NAN,
            capital: FloatValue::NAN,
            investment: FloatValue::NAN,
            interest_rate: FloatValue::NAN,
        }
    }

    pub fn get(&self, field: Field) -> FloatValue {
        match field {
            Field::SavingRate => self.saving_rate,
            Field::GrossOutput => self.gross_output,
            Field::OutputNetOfDamage => self.output_net_of_d,
            Field::NetOutput => self.net_output,
            Field::Population => self.population,
            Field::Productivity => self.productivity,
            Field::ProductivityGrowthRate => self.productivity_gr,
            Field::Consumption => self.consumption,
            Field::PerCapitaConsumption => self.pc_consumption,
            Field::Capital => self.capital,
            Field::Investment => self.investment,
            Field::InterestRate => self.interest_rate,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut FloatValue {
        match field {
            Field::SavingRate => &mut self.saving_rate,
            Field::GrossOutput => &mut self.gross_output,
            Field::OutputNetOfDamage => &mut self.output_net_of_d,
            Field::NetOutput => &mut self.net_output,
            Field::Population => &mut self.population,
            Field::Productivity => &mut self.productivity,
            Field::ProductivityGrowthRate => &mut self.productivity_gr,
            Field::Consumption => &mut self.consumption,
            Field::PerCapitaConsumption => &mut self.pc_consumption,
            Field::Capital => &mut self.capital,
            Field::Investment => &mut self.investment,
            Field::InterestRate => &mut self.interest_rate,
        }
    }
}

/// The floating-point columns of a [`YearRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SavingRate,
    GrossOutput,
    OutputNetOfDamage,
    NetOutput,
    Population,
    Productivity,
    ProductivityGrowthRate,
    Consumption,
    PerCapitaConsumption,
    Capital,
    Investment,
    InterestRate,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::SavingRate,
        Field::GrossOutput,
        Field::OutputNetOfDamage,
        Field::NetOutput,
        Field::Population,
        Field::Productivity,
        Field::ProductivityGrowthRate,
        Field::Consumption,
        Field::PerCapitaConsumption,
        Field::Capital,
        Field::Investment,
        Field::InterestRate,
    ];

    /// Column name used by downstream consumers
    pub fn name(&self) -> &'static str {
        match self {
            Field::SavingRate => "saving_rate",
            Field::GrossOutput => "gross_output",
            Field::OutputNetOfDamage => "output_net_of_d",
            Field::NetOutput => "net_output",
            Field::Population => "population",
            Field::Productivity => "productivity",
            Field::ProductivityGrowthRate => "productivity_gr",
            Field::Consumption => "consumption",
            Field::PerCapitaConsumption => "pc_consumption",
            Field::Capital => "capital",
            Field::Investment => "investment",
            Field::InterestRate => "interest_rate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The ordered sequence of [`YearRecord`]s produced by one model run.
///
/// Records are indexed by period number, not calendar year; use [`Trajectory::get`]
/// to look up a record by year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrajectoryFields")]
pub struct Trajectory {
    axis: YearAxis,
    records: Vec<YearRecord>,
    /// Number of computed values that sanitization replaced with zero
    replaced_values: usize,
}

#[derive(Deserialize)]
struct TrajectoryFields {
    axis: YearAxis,
    records: Vec<YearRecord>,
    replaced_values: usize,
}

impl TryFrom<TrajectoryFields> for Trajectory {
    type Error = DiceError;

    /// Records must line up one-to-one with the years of the axis
    fn try_from(fields: TrajectoryFields) -> DiceResult<Self> {
        let aligned = fields.records.len() == fields.axis.len()
            && fields
                .axis
                .years()
                .zip(&fields.records)
                .all(|(year, record)| record.year == year);
        if !aligned {
            return Err(DiceError::InvalidParameter {
                name: "records".to_string(),
                reason: "record years do not match the year axis".to_string(),
            });
        }

        Ok(Self {
            axis: fields.axis,
            records: fields.records,
            replaced_values: fields.replaced_values,
        })
    }
}

impl Trajectory {
    /// Create a table with one record per period of `axis`.
    ///
    /// # Panics
    /// Panics if `saving_rates` does not have one value per period.
    pub fn new(axis: YearAxis, saving_rates: &[FloatValue]) -> Self {
        assert_eq!(
            saving_rates.len(),
            axis.len(),
            "one saving rate is required per period"
        );
        let records = axis
            .years()
            .zip(saving_rates)
            .map(|(year, saving_rate)| YearRecord::new(year, *saving_rate))
            .collect();

        Self {
            axis,
            records,
            replaced_values: 0,
        }
    }

    pub fn axis(&self) -> &YearAxis {
        &self.axis
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the terminal period
    pub fn last_index(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<&YearRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&YearRecord> {
        self.records.last()
    }

    /// Look up the record for a calendar year
    pub fn get(&self, year: Year) -> Option<&YearRecord> {
        self.axis.index_of(year).map(|i| &self.records[i])
    }

    pub fn record(&self, index: usize) -> Option<&YearRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    pub fn years(&self) -> Array1<Year> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// Extract a single column across all periods
    pub fn column(&self, field: Field) -> Array1<FloatValue> {
        self.records.iter().map(|r| r.get(field)).collect()
    }

    /// Number of computed values that were non-finite and replaced by zero
    /// during [`Trajectory::sanitize`].
    pub fn replaced_values(&self) -> usize {
        self.replaced_values
    }

    /// Replace every non-finite value with zero.
    ///
    /// The terminal interest rate has no next period to be computed from, so it is
    /// zeroed without being counted. Any other replacement is counted and the
    /// locations are returned so that callers can report them.
    pub fn sanitize(&mut self) -> Vec<(Year, Field)> {
        let last = self.last_index();
        let mut replaced = Vec::new();

        for (index, record) in self.records.iter_mut().enumerate() {
            for field in Field::ALL {
                let value = record.get_mut(field);
                if value.is_finite() {
                    continue;
                }
                *value = 0.0;
                if !(index == last && field == Field::InterestRate) {
                    replaced.push((record.year, field));
                }
            }
        }

        self.replaced_values += replaced.len();
        replaced
    }
}

impl Index<usize> for Trajectory {
    type Output = YearRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl IndexMut<usize> for Trajectory {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.records[index]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a YearRecord;
    type IntoIter = std::slice::Iter<'a, YearRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
