//! Contract-value and hiring-cost projections for full-time interim work.
//!
//! These figures are gross: no tax is taken off. A full-time interim month is
//! 5 days a week over 4.33 weeks.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use tracing::warn;

use crate::calculations::common::{non_negative, ratio, round_half_up};
use crate::models::clamp_day_rate;

pub const DAYS_PER_WEEK: Decimal = dec!(5);
pub const WEEKS_PER_MONTH: Decimal = dec!(4.33);

/// Multiplier on a permanent salary covering employer NI, benefits and
/// overhead.
pub const PERMANENT_ON_COST: Decimal = dec!(1.35);

/// Permanent salaries above this are capped.
pub const MAX_PERMANENT_SALARY: Decimal = dec!(1000000000);

pub const MIN_CONTRACT_MONTHS: u32 = 1;
pub const MAX_CONTRACT_MONTHS: u32 = 24;

fn clamp_months(months: u32) -> u32 {
    months.clamp(MIN_CONTRACT_MONTHS, MAX_CONTRACT_MONTHS)
}

fn clamp_salary(salary: Decimal) -> Decimal {
    if salary > MAX_PERMANENT_SALARY {
        warn!(
            salary = %salary,
            max = %MAX_PERMANENT_SALARY,
            "permanent salary above maximum; clamping"
        );
        MAX_PERMANENT_SALARY
    } else {
        non_negative(salary)
    }
}

fn monthly_value(day_rate: Decimal) -> Decimal {
    day_rate * DAYS_PER_WEEK * WEEKS_PER_MONTH
}

/// Gross earnings of a full-time interim assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractProjection {
    pub day_rate: Decimal,
    /// Contract length, clamped to 1..=24 months.
    pub months: u32,
    pub monthly: Decimal,
    pub total: Decimal,
}

impl ContractProjection {
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ir35_core::calculations::ContractProjection;
    ///
    /// let projection = ContractProjection::new(dec!(1500), 6);
    ///
    /// assert_eq!(projection.monthly, dec!(32475.00));
    /// assert_eq!(projection.total, dec!(194850.00));
    /// ```
    pub fn new(
        day_rate: Decimal,
        months: u32,
    ) -> Self {
        let day_rate = clamp_day_rate(day_rate);
        let months = clamp_months(months);
        let monthly = monthly_value(day_rate);

        Self {
            day_rate,
            months,
            monthly: round_half_up(monthly),
            total: round_half_up(monthly * Decimal::from(months)),
        }
    }
}

/// Cost of an interim hire against a permanent hire over the same period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiringCostComparison {
    pub months: u32,
    /// Permanent salary plus on-costs, pro rata for the period.
    pub permanent_cost: Decimal,
    pub interim_cost: Decimal,
    /// Interim minus permanent; negative when the interim is cheaper.
    pub difference: Decimal,
    /// Difference as a whole percentage of the permanent cost.
    pub percent: Decimal,
}

impl HiringCostComparison {
    pub fn new(
        day_rate: Decimal,
        permanent_salary: Decimal,
        months: u32,
    ) -> Self {
        let day_rate = clamp_day_rate(day_rate);
        let months = clamp_months(months);
        let period = Decimal::from(months);

        let permanent = clamp_salary(permanent_salary) * PERMANENT_ON_COST * period / dec!(12);
        let interim = monthly_value(day_rate) * period;

        let permanent_cost = round_half_up(permanent);
        let difference = round_half_up(interim - permanent);

        Self {
            months,
            permanent_cost,
            interim_cost: round_half_up(interim),
            difference,
            percent: round_percent(ratio(difference, permanent_cost) * dec!(100)),
        }
    }

    /// True when the interim costs more than the permanent hire.
    pub fn is_premium(&self) -> bool {
        self.difference > Decimal::ZERO
    }
}

/// Whole-number rounding with halves going up, so -2.5 becomes -2.
fn round_percent(value: Decimal) -> Decimal {
    (value + dec!(0.5)).floor()
}
