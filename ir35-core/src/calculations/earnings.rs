//! Earnings breakdown assembly.
//!
//! Takes an [`EngagementInput`], runs the scenario model that matches its IR35
//! status and turns the unrounded charges into an [`EarningsBreakdown`].
//!
//! # Rounding
//!
//! | Figure | Rule |
//! |--------|------|
//! | Each deduction | Half-up to pence |
//! | Net annual | Gross minus the rounded deductions, minimum 0 |
//! | Net monthly / daily | Net annual ÷ 12 / ÷ days, half-up to pence |
//! | Rates | Four decimal places, 0 when gross is 0 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ir35_core::{EngagementInput, Ir35Status, compute_earnings};
//!
//! let input = EngagementInput::new(dec!(1500), Ir35Status::Outside);
//! let breakdown = compute_earnings(&input);
//!
//! assert_eq!(breakdown.gross_annual, dec!(330000));
//! assert_eq!(breakdown.net_annual, dec!(165423.44));
//! assert_eq!(breakdown.take_home_rate, dec!(0.5013));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::{non_negative, ratio, round_half_up, round_rate};
use crate::calculations::scenarios::{
    EngagementModel, LimitedCompanyScenario, ScenarioCharge, UmbrellaScenario,
};
use crate::models::{
    BandCharge, Deduction, EarningsBreakdown, EngagementInput, Ir35Comparison, Ir35Status,
    ScenarioAssumptions, TaxYearRates, UK_2025_26,
};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Computes earnings against the UK 2025/26 rates and default assumptions.
///
/// Never fails: out-of-range input is clamped before any tax is worked out.
pub fn compute_earnings(input: &EngagementInput) -> EarningsBreakdown {
    let assumptions = ScenarioAssumptions::default();
    EarningsCalculator::new(&UK_2025_26, &assumptions).compute(input)
}

/// Earnings calculator bound to one set of rates and assumptions.
#[derive(Debug, Clone)]
pub struct EarningsCalculator<'a> {
    rates: &'a TaxYearRates,
    assumptions: &'a ScenarioAssumptions,
}

impl<'a> EarningsCalculator<'a> {
    pub fn new(
        rates: &'a TaxYearRates,
        assumptions: &'a ScenarioAssumptions,
    ) -> Self {
        Self { rates, assumptions }
    }

    pub fn rates(&self) -> &TaxYearRates {
        self.rates
    }

    /// Produces the breakdown for one engagement.
    pub fn compute(
        &self,
        input: &EngagementInput,
    ) -> EarningsBreakdown {
        let input = input.sanitized();
        let gross_annual = input.day_rate * Decimal::from(input.days_per_year);

        let charges = match input.ir35_status {
            Ir35Status::Outside => {
                LimitedCompanyScenario::new(self.rates, &self.assumptions.limited_company)
                    .charges(gross_annual)
            }
            Ir35Status::Inside => UmbrellaScenario::new(self.rates, &self.assumptions.umbrella)
                .charges(gross_annual),
        };

        let deductions: Vec<Deduction> = charges.into_iter().map(round_charge).collect();
        let total_deductions: Decimal = deductions.iter().map(|d| d.amount).sum();
        let net_annual = non_negative(gross_annual - total_deductions);

        debug!(
            status = input.ir35_status.as_str(),
            gross = %gross_annual,
            deductions = %total_deductions,
            net = %net_annual,
            "earnings computed"
        );

        EarningsBreakdown {
            ir35_status: input.ir35_status,
            engagement_vehicle: input.engagement_vehicle(),
            tax_year: self.rates.tax_year.clone(),
            day_rate: input.day_rate,
            days_per_year: input.days_per_year,
            gross_annual,
            deductions,
            net_annual,
            net_monthly: round_half_up(net_annual / MONTHS_PER_YEAR),
            net_daily: round_half_up(ratio(net_annual, Decimal::from(input.days_per_year))),
            take_home_rate: round_rate(ratio(net_annual, gross_annual)),
            effective_tax_rate: round_rate(ratio(total_deductions, gross_annual)),
        }
    }

    /// Runs both IR35 scenarios for the same day rate and working days.
    pub fn compare(
        &self,
        day_rate: Decimal,
        days_per_year: u32,
    ) -> Ir35Comparison {
        let inside = EngagementInput::new(day_rate, Ir35Status::Inside)
            .with_days_per_year(days_per_year);
        let outside = EngagementInput::new(day_rate, Ir35Status::Outside)
            .with_days_per_year(days_per_year);

        Ir35Comparison {
            inside: self.compute(&inside),
            outside: self.compute(&outside),
        }
    }
}

fn round_charge(charge: ScenarioCharge) -> Deduction {
    Deduction {
        kind: charge.kind,
        amount: round_half_up(charge.amount),
        bands: charge
            .bands
            .into_iter()
            .map(|band| BandCharge {
                taxable: round_half_up(band.taxable),
                tax: round_half_up(band.tax),
                ..band
            })
            .collect(),
    }
}
