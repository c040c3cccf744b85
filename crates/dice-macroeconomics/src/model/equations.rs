//! Per-year equations of the DICE economic recurrence
//!
//! Each function evaluates one quantity for one period from values that are
//! already known. None of them reject degenerate inputs: a division by zero or a
//! non-finite power is returned as-is and cleaned up once the run is complete.

use dice_core::timeseries::FloatValue;

/// Scaling of the productivity decline exponent, calibrated on 5-year periods.
///
/// Applied regardless of the actual time step.
pub const TFP_DECLINE_PERIOD: FloatValue = 5.0;

/// Raise `value` to at least `lower`.
///
/// NaN is passed through so that it is still caught by sanitization.
pub fn floor_at(value: FloatValue, lower: FloatValue) -> FloatValue {
    if value < lower {
        lower
    } else {
        value
    }
}

/// Population converging towards its asymptote.
///
/// $$L(t) = L(t-1) \left(\frac{L_{max}}{L(t-1)}\right)^{g}$$
pub fn population(
    previous: FloatValue,
    popasym: FloatValue,
    population_growth: FloatValue,
) -> FloatValue {
    previous * (popasym / previous).powf(population_growth)
}

/// Growth rate of total factor productivity.
///
/// $$A_g(t) = A_g(0) \exp(-5 \Delta_a (t - 1))$$
///
/// `period` is the 1-based number of the period since the start of the run.
pub fn productivity_growth_rate(
    productivity_gr_start: FloatValue,
    decline_rate_tfp: FloatValue,
    period: FloatValue,
) -> FloatValue {
    productivity_gr_start * (-decline_rate_tfp * TFP_DECLINE_PERIOD * (period - 1.0)).exp()
}

/// Total factor productivity.
///
/// $$A(t) = \frac{A(t-1)}{1 - A_g(t-1)}$$
///
/// When damage is coupled to productivity the result is further scaled by
/// $1 - f_{prod} \Omega(t)$ where $\Omega$ is the damage fraction.
pub fn productivity(
    previous: FloatValue,
    previous_growth_rate: FloatValue,
    damage_frac_output: FloatValue,
    frac_damage_prod: FloatValue,
    damage_to_productivity: bool,
) -> FloatValue {
    let undamaged = previous / (1.0 - previous_growth_rate);
    if damage_to_productivity {
        (1.0 - frac_damage_prod * damage_frac_output) * undamaged
    } else {
        undamaged
    }
}

/// Capital at the start of the next period, floored at `lo_capital`.
///
/// $$K(t+1) = K(t) (1 - \delta)^{\Delta t} + \Delta t \, I(t)$$
pub fn next_capital(
    capital: FloatValue,
    investment: FloatValue,
    depreciation_capital: FloatValue,
    time_step: FloatValue,
    lo_capital: FloatValue,
) -> FloatValue {
    let capital = capital * (1.0 - depreciation_capital).powf(time_step) + time_step * investment;
    floor_at(capital, lo_capital)
}

/// $$I(t) = s(t) Y_{net}(t)$$
pub fn investment(saving_rate: FloatValue, net_output: FloatValue) -> FloatValue {
    saving_rate * net_output
}

/// Cobb-Douglas gross output.
///
/// $$Y(t) = A(t) K(t)^{\gamma} \left(\frac{L(t)}{1000}\right)^{1 - \gamma}$$
///
/// Population is given in millions and rescaled to billions.
pub fn gross_output(
    productivity: FloatValue,
    capital: FloatValue,
    population: FloatValue,
    output_elasticity: FloatValue,
) -> FloatValue {
    productivity
        * capital.powf(output_elasticity)
        * (population / 1000.0).powf(1.0 - output_elasticity)
}

/// Output after climate damage.
///
/// Without productivity coupling the whole damage fraction hits output:
/// $Y_d = Y (1 - \Omega)$. With coupling, the share already applied to
/// productivity is taken out:
///
/// $$Y_d = Y \frac{1 - \Omega}{1 - f_{prod} \Omega}$$
pub fn output_net_of_damage(
    gross_output: FloatValue,
    damage_frac_output: FloatValue,
    frac_damage_prod: FloatValue,
    damage_to_productivity: bool,
) -> FloatValue {
    if damage_to_productivity {
        let damage =
            1.0 - (1.0 - damage_frac_output) / (1.0 - frac_damage_prod * damage_frac_output);
        (1.0 - damage) * gross_output
    } else {
        gross_output * (1.0 - damage_frac_output)
    }
}

/// $$Y_{net}(t) = Y_d(t) - \Lambda(t)$$
pub fn net_output(output_net_of_d: FloatValue, abatecost: FloatValue) -> FloatValue {
    output_net_of_d - abatecost
}

/// $$C(t) = Y_{net}(t) - I(t)$$ floored at `lo_conso`
pub fn consumption(
    net_output: FloatValue,
    investment: FloatValue,
    lo_conso: FloatValue,
) -> FloatValue {
    floor_at(net_output - investment, lo_conso)
}

/// Per-capita consumption in thousands of USD, floored at `lo_conso`.
///
/// $$c(t) = 1000 \frac{C(t)}{L(t)}$$
pub fn per_capita_consumption(
    consumption: FloatValue,
    population: FloatValue,
    lo_conso: FloatValue,
) -> FloatValue {
    floor_at(consumption / population * 1000.0, lo_conso)
}

/// Consumption interest rate from the Ramsey rule.
///
/// $$r(t) = (1 + \rho) \left(\frac{C(t+1)}{C(t)}\right)^{\eta / \Delta t} - 1$$
pub fn interest_rate(
    consumption: FloatValue,
    next_consumption: FloatValue,
    init_rate_time_pref: FloatValue,
    conso_elasticity: FloatValue,
    time_step: FloatValue,
) -> FloatValue {
    (1.0 + init_rate_time_pref) * (next_consumption / consumption).powf(conso_elasticity / time_step)
        - 1.0
}
