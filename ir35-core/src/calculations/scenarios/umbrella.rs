//! Inside IR35: earnings paid through an umbrella company's PAYE payroll.
//!
//! The contract value has to fund the umbrella's margin, the employer's NI and
//! the apprenticeship levy as well as the worker's gross pay. Pay is found by
//! grossing up what is left after the margin, so that
//! `pay + employer NI(pay) + levy(pay) == gross - margin`.

use rust_decimal::Decimal;
use tracing::debug;

use super::{EngagementModel, ScenarioCharge};
use crate::calculations::bands::{BandedTax, apply_bands, gross_up};
use crate::calculations::common::non_negative;
use crate::models::{DeductionKind, EngagementVehicle, TaxYearRates, UmbrellaAssumptions};

/// Every intermediate figure of the umbrella model, unrounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UmbrellaResult {
    pub gross: Decimal,
    pub margin: Decimal,
    /// Taxable pay the worker receives through payroll.
    pub gross_pay: Decimal,
    pub employer_ni: BandedTax,
    pub apprenticeship_levy: Decimal,
    pub income_tax: BandedTax,
    pub employee_ni: BandedTax,
}

impl UmbrellaResult {
    pub fn take_home(&self) -> Decimal {
        self.gross_pay - self.income_tax.total - self.employee_ni.total
    }

    pub fn into_charges(self) -> Vec<ScenarioCharge> {
        vec![
            ScenarioCharge::flat(DeductionKind::UmbrellaMargin, self.margin),
            ScenarioCharge::banded(DeductionKind::EmployerNi, self.employer_ni),
            ScenarioCharge::flat(DeductionKind::ApprenticeshipLevy, self.apprenticeship_levy),
            ScenarioCharge::banded(DeductionKind::IncomeTax, self.income_tax),
            ScenarioCharge::banded(DeductionKind::EmployeeNi, self.employee_ni),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct UmbrellaScenario<'a> {
    rates: &'a TaxYearRates,
    assumptions: &'a UmbrellaAssumptions,
}

impl<'a> UmbrellaScenario<'a> {
    pub fn new(
        rates: &'a TaxYearRates,
        assumptions: &'a UmbrellaAssumptions,
    ) -> Self {
        Self { rates, assumptions }
    }

    pub fn calculate(
        &self,
        gross: Decimal,
    ) -> UmbrellaResult {
        let gross = non_negative(gross);
        let levy_rate = self.rates.apprenticeship_levy_rate;

        let margin = non_negative(self.assumptions.annual_margin).min(gross);
        let gross_pay = gross_up(&self.rates.employer_ni, levy_rate, gross - margin);

        let employer_ni = apply_bands(&self.rates.employer_ni, gross_pay);
        let apprenticeship_levy = gross_pay * levy_rate;
        let income_tax = apply_bands(&self.rates.income_tax, gross_pay);
        let employee_ni = apply_bands(&self.rates.employee_ni, gross_pay);

        debug!(
            gross = %gross,
            margin = %margin,
            gross_pay = %gross_pay,
            "umbrella model calculated"
        );

        UmbrellaResult {
            gross,
            margin,
            gross_pay,
            employer_ni,
            apprenticeship_levy,
            income_tax,
            employee_ni,
        }
    }
}

impl EngagementModel for UmbrellaScenario<'_> {
    fn vehicle(&self) -> EngagementVehicle {
        EngagementVehicle::UmbrellaInsideIr35
    }

    fn charges(
        &self,
        gross: Decimal,
    ) -> Vec<ScenarioCharge> {
        self.calculate(gross).into_charges()
    }
}
