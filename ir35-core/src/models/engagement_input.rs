use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tracing::warn;

use rust_decimal_macros::dec;

use super::ir35_status::{EngagementVehicle, Ir35Status};

/// Working days assumed per year when none is given (about 44 weeks, allowing
/// for gaps between assignments).
pub const DEFAULT_DAYS_PER_YEAR: u32 = 220;

/// Upper bound on working days per year (52 weeks of 5 days).
pub const MAX_DAYS_PER_YEAR: u32 = 260;

/// Highest day rate the calculator accepts. Larger rates are capped so every
/// figure derived from them stays inside `Decimal`'s range.
pub const MAX_DAY_RATE: Decimal = dec!(1000000);

/// Clamps a day rate into `0..=MAX_DAY_RATE`, logging when it had to.
pub(crate) fn clamp_day_rate(day_rate: Decimal) -> Decimal {
    if day_rate < Decimal::ZERO {
        warn!(day_rate = %day_rate, "negative day rate; treating as zero");
        Decimal::ZERO
    } else if day_rate > MAX_DAY_RATE {
        warn!(day_rate = %day_rate, max = %MAX_DAY_RATE, "day rate above maximum; clamping");
        MAX_DAY_RATE
    } else {
        day_rate
    }
}

/// The parameters a user supplies to the earnings calculator.
///
/// Fields are public so callers can build the struct directly; the
/// calculator always works on [`EngagementInput::sanitized`], so out-of-range
/// values never reach the tax logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementInput {
    /// Daily charge-out rate in GBP.
    pub day_rate: Decimal,
    pub days_per_year: u32,
    pub ir35_status: Ir35Status,
}

impl EngagementInput {
    /// Creates an input with the default of 220 working days.
    pub fn new(
        day_rate: Decimal,
        ir35_status: Ir35Status,
    ) -> Self {
        Self {
            day_rate,
            days_per_year: DEFAULT_DAYS_PER_YEAR,
            ir35_status,
        }
    }

    pub fn with_days_per_year(
        mut self,
        days_per_year: u32,
    ) -> Self {
        self.days_per_year = days_per_year;
        self
    }

    /// Builds an input from loosely-typed UI values.
    ///
    /// Non-finite or negative day rates become zero, rates above
    /// [`MAX_DAY_RATE`] are capped and the day count is clamped into
    /// `0..=260`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use ir35_core::{EngagementInput, Ir35Status};
    ///
    /// let input = EngagementInput::from_raw(f64::NAN, 400, Ir35Status::Inside);
    ///
    /// assert_eq!(input.day_rate, Decimal::ZERO);
    /// assert_eq!(input.days_per_year, 260);
    /// ```
    pub fn from_raw(
        day_rate: f64,
        days_per_year: i64,
        ir35_status: Ir35Status,
    ) -> Self {
        let day_rate = Decimal::from_f64(day_rate).unwrap_or_else(|| {
            warn!(day_rate, "day rate is not a finite number; treating as zero");
            Decimal::ZERO
        });
        let days_per_year = u32::try_from(days_per_year.clamp(0, i64::from(MAX_DAYS_PER_YEAR)))
            .unwrap_or(DEFAULT_DAYS_PER_YEAR);

        Self {
            day_rate,
            days_per_year,
            ir35_status,
        }
        .sanitized()
    }

    pub fn engagement_vehicle(&self) -> EngagementVehicle {
        self.ir35_status.vehicle()
    }

    /// Returns a copy with every field clamped into its valid domain.
    ///
    /// - negative day rates become zero and rates above [`MAX_DAY_RATE`]
    ///   are capped; sub-penny rates are kept as given
    /// - days per year are capped at [`MAX_DAYS_PER_YEAR`]
    pub fn sanitized(&self) -> Self {
        let day_rate = clamp_day_rate(self.day_rate);

        let days_per_year = if self.days_per_year > MAX_DAYS_PER_YEAR {
            warn!(
                days_per_year = self.days_per_year,
                max = MAX_DAYS_PER_YEAR,
                "days per year above maximum; clamping"
            );
            MAX_DAYS_PER_YEAR
        } else {
            self.days_per_year
        };

        Self {
            day_rate,
            days_per_year,
            ir35_status: self.ir35_status,
        }
    }
}
