//! Behavioural tests for the macroeconomic recurrence.
//!
//! These run the full engine and check properties that must hold for every
//! trajectory: lower bounds, boundary periods, determinism and the economics of
//! simple scenarios.

use approx::assert_relative_eq;
use dice_core::errors::DiceError;
use dice_core::timeseries::{ExogenousSeries, MissingDataPolicy};
use dice_core::trajectory::{Field, Trajectory};
use dice_macroeconomics::model::equations;
use dice_macroeconomics::{ExogenousInputs, MacroEconomics, MacroEconomicsParameters};

fn run(parameters: MacroEconomicsParameters, abatecost: f64, damage: f64) -> Trajectory {
    let model = MacroEconomics::from_parameters(parameters).unwrap();
    let inputs = ExogenousInputs::constant(model.axis(), abatecost, damage);
    model.compute(&inputs).unwrap()
}

/// Damage rising quadratically over the run, as a damage model would supply
fn rising_damage(model: &MacroEconomics) -> ExogenousInputs {
    let axis = model.axis();
    let damage = axis
        .years()
        .enumerate()
        .map(|(i, year)| (year, 0.0025 * (i as f64).powi(2) / axis.len() as f64))
        .collect();
    let abatecost = axis
        .years()
        .enumerate()
        .map(|(i, year)| (year, 0.05 * i as f64))
        .collect();
    ExogenousInputs::new(abatecost, damage)
}

mod bounds {
    use super::*;

    fn assert_floors(trajectory: &Trajectory, parameters: &MacroEconomicsParameters) {
        for record in trajectory {
            assert!(
                record.capital >= parameters.lo_capital,
                "capital {} below floor in {}",
                record.capital,
                record.year
            );
            assert!(
                record.consumption >= parameters.lo_conso,
                "consumption {} below floor in {}",
                record.consumption,
                record.year
            );
            assert!(
                record.pc_consumption >= parameters.lo_conso,
                "pc_consumption {} below floor in {}",
                record.pc_consumption,
                record.year
            );
        }
    }

    #[test]
    fn test_floors_hold_for_default_calibration() {
        let parameters = MacroEconomicsParameters::default();
        let model = MacroEconomics::from_parameters(parameters.clone()).unwrap();
        let trajectory = model.compute(&rising_damage(&model)).unwrap();

        assert_floors(&trajectory, &parameters);
    }

    #[test]
    fn test_floors_hold_when_abatement_exceeds_output() {
        let parameters = MacroEconomicsParameters::default();
        let trajectory = run(parameters.clone(), 500.0, 0.0);

        assert_floors(&trajectory, &parameters);
        // Net output is negative, so consumption and capital sit on their floors
        assert_eq!(trajectory[0].consumption, parameters.lo_conso);
        assert_eq!(trajectory[1].capital, parameters.lo_capital);
    }

    #[test]
    fn test_floors_hold_with_damage_to_productivity() {
        let parameters = MacroEconomicsParameters {
            damage_to_productivity: true,
            saving_rate: 0.9,
            ..Default::default()
        };
        let trajectory = run(parameters.clone(), 20.0, 0.3);

        assert_floors(&trajectory, &parameters);
    }
}

mod boundaries {
    use super::*;

    #[test]
    fn test_trajectory_length() {
        let trajectory = run(MacroEconomicsParameters::default(), 0.0, 0.0);
        assert_eq!(trajectory.len(), 18);

        let trajectory = run(
            MacroEconomicsParameters {
                year_start: 2020,
                year_end: 2100,
                time_step: 1,
                ..Default::default()
            },
            0.0,
            0.0,
        );
        assert_eq!(trajectory.len(), 81);

        let trajectory = run(
            MacroEconomicsParameters {
                year_start: 2020,
                year_end: 2022,
                time_step: 4,
                ..Default::default()
            },
            0.0,
            0.0,
        );
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.years().to_vec(), vec![2020, 2024]);
    }

    #[test]
    fn test_terminal_period_is_not_extended() {
        let parameters = MacroEconomicsParameters::default();
        let trajectory = run(parameters.clone(), 0.0, 0.0);
        let n = trajectory.len();

        // Terminal capital only comes from the previous period
        let previous = &trajectory[n - 2];
        let expected = equations::next_capital(
            previous.capital,
            previous.investment,
            parameters.depreciation_capital,
            parameters.time_step as f64,
            parameters.lo_capital,
        );
        assert_eq!(trajectory[n - 1].capital, expected);
        assert!(trajectory.get(2105).is_none());

        // Terminal interest rate is never computed
        assert_eq!(trajectory[n - 1].interest_rate, 0.0);
        assert!(trajectory[n - 2].interest_rate != 0.0);
        assert_eq!(trajectory.replaced_values(), 0);
    }

    #[test]
    fn test_zero_damage_and_abatement_leave_output_untouched() {
        let trajectory = run(
            MacroEconomicsParameters {
                year_start: 2020,
                year_end: 2021,
                time_step: 1,
                damage_to_productivity: false,
                ..Default::default()
            },
            0.0,
            0.0,
        );
        let first = trajectory.get(2020).unwrap();

        assert_eq!(first.output_net_of_d, first.gross_output);
        assert_eq!(first.net_output, first.gross_output);
    }
}

mod reproducibility {
    use super::*;

    #[test]
    fn test_identical_runs_are_bit_identical() {
        let model = MacroEconomics::from_parameters(MacroEconomicsParameters::default()).unwrap();
        let inputs = rising_damage(&model);

        let first = model.compute(&inputs).unwrap();
        let second = model.compute(&inputs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reruns_do_not_retain_previous_values() {
        let model = MacroEconomics::from_parameters(MacroEconomicsParameters::default()).unwrap();
        let damaged = rising_damage(&model);
        let clean = ExogenousInputs::constant(model.axis(), 0.0, 0.0);

        model.compute(&damaged).unwrap();
        let rerun = model.compute(&clean).unwrap();

        let fresh = MacroEconomics::from_parameters(MacroEconomicsParameters::default())
            .unwrap()
            .compute(&clean)
            .unwrap();
        assert_eq!(rerun, fresh);
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn test_no_saving_means_consumption_is_net_output() {
        let trajectory = run(
            MacroEconomicsParameters {
                saving_rate: 0.0,
                ..Default::default()
            },
            0.0,
            0.0,
        );

        for record in &trajectory {
            assert_eq!(record.investment, 0.0);
            assert_eq!(record.consumption, record.net_output);
        }
    }

    #[test]
    fn test_no_damage_means_gross_equals_net_output() {
        let trajectory = run(MacroEconomicsParameters::default(), 0.0, 0.0);

        assert_eq!(
            trajectory.column(Field::GrossOutput),
            trajectory.column(Field::NetOutput)
        );
    }

    #[test]
    fn test_population_converges_to_asymptote() {
        let parameters = MacroEconomicsParameters {
            year_start: 2015,
            year_end: 3000,
            time_step: 5,
            ..Default::default()
        };
        let trajectory = run(parameters.clone(), 0.0, 0.0);

        let population = trajectory.last().unwrap().population;
        assert_relative_eq!(population, parameters.popasym, max_relative = 1e-6);

        // Approached from below without overshooting
        let column = trajectory.column(Field::Population);
        assert!(column
            .iter()
            .all(|p| *p <= parameters.popasym * (1.0 + 1e-12)));
        assert!(column[1] > column[0]);
    }

    #[test]
    fn test_damage_to_productivity_lowers_productivity() {
        let uncoupled = run(MacroEconomicsParameters::default(), 0.0, 0.1);
        let coupled = run(
            MacroEconomicsParameters {
                damage_to_productivity: true,
                ..Default::default()
            },
            0.0,
            0.1,
        );

        assert_eq!(coupled[0].productivity, uncoupled[0].productivity);
        assert_relative_eq!(
            coupled[1].productivity,
            0.97 * uncoupled[1].productivity,
            max_relative = 1e-12
        );
        // Part of the damage is moved off output
        assert!(coupled[0].output_net_of_d > uncoupled[0].output_net_of_d);
    }

    #[test]
    fn test_time_varying_saving_rate() {
        let model = MacroEconomics::from_parameters(MacroEconomicsParameters::default()).unwrap();
        let policy: ExogenousSeries = model
            .axis()
            .years()
            .enumerate()
            .map(|(i, year)| (year, 0.2 + 0.01 * i as f64))
            .collect();
        let inputs = ExogenousInputs::constant(model.axis(), 0.0, 0.0).with_saving_rate(policy);
        let trajectory = model.compute(&inputs).unwrap();

        for (i, record) in trajectory.iter().enumerate() {
            assert_relative_eq!(record.saving_rate, 0.2 + 0.01 * i as f64);
            assert_relative_eq!(record.investment, record.saving_rate * record.net_output);
        }
    }
}

mod validation {
    use super::*;

    #[test]
    fn test_saving_rate_policy_must_be_a_fraction() {
        let model = MacroEconomics::from_parameters(MacroEconomicsParameters::default()).unwrap();
        let inputs = ExogenousInputs::constant(model.axis(), 0.0, 0.0)
            .with_saving_rate(ExogenousSeries::constant(model.axis(), 1.5));

        assert!(matches!(
            model.compute(&inputs),
            Err(DiceError::InvalidParameter { name, .. }) if name == "saving_rate"
        ));
    }

    #[test]
    fn test_year_range_must_fit_the_axis() {
        let result = MacroEconomics::from_parameters(MacroEconomicsParameters {
            year_start: i64::MIN,
            year_end: i64::MAX,
            time_step: 1,
            ..Default::default()
        });

        assert!(matches!(result, Err(DiceError::InvalidTimeRange { .. })));
    }
}

mod degeneracy {
    use super::*;

    fn all_finite(trajectory: &Trajectory) -> bool {
        trajectory
            .iter()
            .all(|r| Field::ALL.iter().all(|f| r.get(*f).is_finite()))
    }

    #[test]
    fn test_unit_productivity_growth_is_zeroed_not_rejected() {
        let trajectory = run(
            MacroEconomicsParameters {
                productivity_gr_start: 1.0,
                ..Default::default()
            },
            0.0,
            0.0,
        );

        assert!(all_finite(&trajectory));
        assert!(trajectory.replaced_values() > 0);
        assert_eq!(trajectory[1].productivity, 0.0);
        // The seed period is unaffected
        assert!(trajectory[0].consumption > 0.0);
    }

    #[test]
    fn test_missing_exogenous_year_is_an_error_by_default() {
        let model = MacroEconomics::from_parameters(MacroEconomicsParameters::default()).unwrap();
        let mut damage = ExogenousSeries::constant(model.axis(), 0.0);
        let mut abatecost = ExogenousSeries::new();
        for (year, _) in damage.iter().filter(|(year, _)| *year != 2050) {
            abatecost.insert(year, 0.0);
        }
        damage.insert(2200, 1.0);

        let err = model
            .compute(&ExogenousInputs::new(abatecost, damage))
            .unwrap_err();
        assert_eq!(
            err,
            DiceError::MissingExogenousData {
                variable: "abatecost".to_string(),
                year: 2050
            }
        );
    }

    #[test]
    fn test_missing_exogenous_year_can_propagate() {
        let model = MacroEconomics::from_parameters(MacroEconomicsParameters {
            missing_data: MissingDataPolicy::Propagate,
            ..Default::default()
        })
        .unwrap();
        let damage: ExogenousSeries = ExogenousSeries::constant(model.axis(), 0.0)
            .iter()
            .filter(|(year, _)| *year != 2050)
            .collect();
        let abatecost = ExogenousSeries::constant(model.axis(), 0.0);

        let trajectory = model
            .compute(&ExogenousInputs::new(abatecost, damage))
            .unwrap();

        assert!(all_finite(&trajectory));
        assert!(trajectory.replaced_values() > 0);
        let hit = trajectory.get(2050).unwrap();
        assert_eq!(hit.output_net_of_d, 0.0);
        assert_eq!(hit.net_output, 0.0);
        // Years before the gap are computed normally
        let before = trajectory.get(2045).unwrap();
        assert_eq!(before.net_output, before.gross_output);
    }
}
