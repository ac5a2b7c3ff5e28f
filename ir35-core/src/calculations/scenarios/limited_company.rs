//! Outside IR35: earnings taken through a limited company.
//!
//! # Deduction stack
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Business expenses come off the contract value (capped at gross) |
//! | 2    | Director's salary is paid, capped at what the company can fund |
//! | 3    | Employer NI on the salary |
//! | 4    | Corporation tax on the remaining profit |
//! | 5    | All post-tax profit is paid out as dividends |
//! | 6    | Personal allowance withdrawn on salary plus dividends over £100,000 |
//! | 7    | Income tax and employee NI on the salary |
//! | 8    | Dividend tax on dividends stacked above the salary |
//!
//! Dividends sit on top of the salary in the bands. The dividend allowance
//! zero-rates the first taxable slice but still uses up band space, so it
//! pushes the rest of the dividends up the bands.
//!
//! Salary and dividends share one personal allowance. Once their total passes
//! the taper threshold, both tables are rebuilt with the withdrawn allowance
//! taken off the lower thresholds.

use rust_decimal::Decimal;
use tracing::debug;

use super::{EngagementModel, ScenarioCharge};
use crate::calculations::bands::{BandedTax, apply_bands, apply_bands_stacked, gross_up};
use crate::calculations::common::non_negative;
use crate::models::{
    BandTable, DeductionKind, EngagementVehicle, LimitedCompanyAssumptions, TaxYearRates,
};

/// Every intermediate figure of the limited company model, unrounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitedCompanyResult {
    pub gross: Decimal,
    pub expenses: Decimal,
    pub director_salary: Decimal,
    pub employer_ni: BandedTax,
    /// Profit before corporation tax.
    pub profit: Decimal,
    pub corporation_tax: BandedTax,
    pub dividends: Decimal,
    /// Personal allowance lost to the taper on salary plus dividends.
    pub allowance_withdrawn: Decimal,
    pub income_tax: BandedTax,
    pub employee_ni: BandedTax,
    pub dividend_tax: BandedTax,
}

impl LimitedCompanyResult {
    /// Salary and dividends after personal taxes.
    pub fn take_home(&self) -> Decimal {
        self.director_salary - self.income_tax.total - self.employee_ni.total + self.dividends
            - self.dividend_tax.total
    }

    pub fn into_charges(self) -> Vec<ScenarioCharge> {
        vec![
            ScenarioCharge::flat(DeductionKind::BusinessExpenses, self.expenses),
            ScenarioCharge::banded(DeductionKind::EmployerNi, self.employer_ni),
            ScenarioCharge::banded(DeductionKind::CorporationTax, self.corporation_tax),
            ScenarioCharge::banded(DeductionKind::IncomeTax, self.income_tax),
            ScenarioCharge::banded(DeductionKind::EmployeeNi, self.employee_ni),
            ScenarioCharge::banded(DeductionKind::DividendTax, self.dividend_tax),
        ]
    }
}

/// Calculator for the outside IR35 limited company model.
#[derive(Debug, Clone)]
pub struct LimitedCompanyScenario<'a> {
    rates: &'a TaxYearRates,
    assumptions: &'a LimitedCompanyAssumptions,
}

impl<'a> LimitedCompanyScenario<'a> {
    pub fn new(
        rates: &'a TaxYearRates,
        assumptions: &'a LimitedCompanyAssumptions,
    ) -> Self {
        Self { rates, assumptions }
    }

    /// Runs the full deduction stack for a gross annual contract value.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ir35_core::calculations::LimitedCompanyScenario;
    /// use ir35_core::{LimitedCompanyAssumptions, TaxYearRates};
    ///
    /// let rates = TaxYearRates::uk_2025_26();
    /// let assumptions = LimitedCompanyAssumptions::default();
    /// let result = LimitedCompanyScenario::new(&rates, &assumptions).calculate(dec!(330000));
    ///
    /// assert_eq!(result.profit, dec!(313794.50));
    /// assert_eq!(result.corporation_tax.total, dec!(78448.625));
    /// ```
    pub fn calculate(
        &self,
        gross: Decimal,
    ) -> LimitedCompanyResult {
        let gross = non_negative(gross);

        let expenses = self.expenses(gross);
        let available = gross - expenses;

        let director_salary = self.director_salary(available);
        let employer_ni = apply_bands(&self.rates.employer_ni, director_salary);

        let profit = non_negative(available - director_salary - employer_ni.total);
        let corporation_tax = apply_bands(&self.rates.corporation_tax, profit);
        let dividends = non_negative(profit - corporation_tax.total);

        let allowance_withdrawn = self.rates.allowance_reduction(director_salary + dividends);
        let taper_from = self.rates.allowance_taper_threshold;
        let income_table = self
            .rates
            .income_tax
            .with_allowance_withdrawn(allowance_withdrawn, taper_from);
        let dividend_table = self
            .rates
            .dividend_tax
            .with_allowance_withdrawn(allowance_withdrawn, taper_from);

        let income_tax = apply_bands(&income_table, director_salary);
        let employee_ni = apply_bands(&self.rates.employee_ni, director_salary);
        let dividend_tax = self.dividend_tax(&dividend_table, director_salary, dividends);

        debug!(
            gross = %gross,
            director_salary = %director_salary,
            profit = %profit,
            dividends = %dividends,
            allowance_withdrawn = %allowance_withdrawn,
            "limited company model calculated"
        );

        LimitedCompanyResult {
            gross,
            expenses,
            director_salary,
            employer_ni,
            profit,
            corporation_tax,
            dividends,
            allowance_withdrawn,
            income_tax,
            employee_ni,
            dividend_tax,
        }
    }

    /// Flat expense allowance, never more than the contract value.
    fn expenses(
        &self,
        gross: Decimal,
    ) -> Decimal {
        non_negative(self.assumptions.annual_expenses).min(gross)
    }

    /// Assumed salary, reduced when the company cannot fund it plus employer NI.
    fn director_salary(
        &self,
        available: Decimal,
    ) -> Decimal {
        let affordable = gross_up(&self.rates.employer_ni, Decimal::ZERO, available);
        non_negative(self.assumptions.director_salary).min(affordable)
    }

    /// Dividend tax with the allowance taking the first taxable slice above
    /// salary.
    fn dividend_tax(
        &self,
        table: &BandTable,
        salary: Decimal,
        dividends: Decimal,
    ) -> BandedTax {
        let stacked = apply_bands_stacked(table, salary, dividends);
        let mut allowance = non_negative(self.rates.dividend_allowance);
        let mut result = BandedTax::zero();

        for mut charge in stacked.charges {
            if charge.rate > Decimal::ZERO && allowance > Decimal::ZERO {
                let relief = allowance.min(charge.taxable);
                charge.taxable -= relief;
                charge.tax = charge.taxable * charge.rate;
                allowance -= relief;
            }
            result.total += charge.tax;
            result.charges.push(charge);
        }

        result
    }
}

impl EngagementModel for LimitedCompanyScenario<'_> {
    fn vehicle(&self) -> EngagementVehicle {
        EngagementVehicle::LimitedCompanyOutsideIr35
    }

    fn charges(
        &self,
        gross: Decimal,
    ) -> Vec<ScenarioCharge> {
        self.calculate(gross).into_charges()
    }
}
