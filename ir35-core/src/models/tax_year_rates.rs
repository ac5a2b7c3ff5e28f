//! Versioned UK reference data for the earnings calculator.
//!
//! Every rate and threshold the calculator uses lives here, so a new tax
//! year is a new [`TaxYearRates`] value rather than a change to the
//! calculation code.
//!
//! # UK 2025/26
//!
//! | Table           | Bands |
//! |-----------------|-------|
//! | Income tax      | 0% to £12,570; 20% to £50,270; 40% to £100,000; 60% to £125,140 (personal allowance taper); 45% above |
//! | Dividend tax    | Same thresholds at 0%, 8.75%, 33.75%, 50.625% (taper), 39.35% |
//! | Employee NI     | 0% to £12,570; 8% to £50,270; 2% above |
//! | Employer NI     | 0% to £5,000; 15% above |
//! | Corporation tax | 19% to £50,000; 26.5% to £250,000 (marginal relief); 25% above |
//!
//! The dividend allowance is £500 and the apprenticeship levy is 0.5% of pay.
//!
//! The 60% and 50.625% bands price in the loss of £1 of personal allowance
//! for every £2 of income above £100,000. That holds for one income stream
//! taxed on its own. When salary and dividends share the allowance, the
//! withdrawal is worked out from their total instead; see
//! [`TaxYearRates::allowance_reduction`].

use std::fmt;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tax_band::{BandTable, BandTableError, TaxBand};

/// Shared, read-only UK 2025/26 rates.
pub static UK_2025_26: LazyLock<TaxYearRates> = LazyLock::new(TaxYearRates::uk_2025_26);

/// Identifies one of the band tables inside [`TaxYearRates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateTable {
    IncomeTax,
    DividendTax,
    EmployeeNi,
    EmployerNi,
    CorporationTax,
}

impl RateTable {
    pub const ALL: [RateTable; 5] = [
        Self::IncomeTax,
        Self::DividendTax,
        Self::EmployeeNi,
        Self::EmployerNi,
        Self::CorporationTax,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncomeTax => "income_tax",
            Self::DividendTax => "dividend_tax",
            Self::EmployeeNi => "employee_ni",
            Self::EmployerNi => "employer_ni",
            Self::CorporationTax => "corporation_tax",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income_tax" => Some(Self::IncomeTax),
            "dividend_tax" => Some(Self::DividendTax),
            "employee_ni" => Some(Self::EmployeeNi),
            "employer_ni" => Some(Self::EmployerNi),
            "corporation_tax" => Some(Self::CorporationTax),
            _ => None,
        }
    }
}

impl fmt::Display for RateTable {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors reported by [`TaxYearRates::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatesError {
    #[error("{table} table is invalid: {source}")]
    InvalidTable {
        table: RateTable,
        #[source]
        source: BandTableError,
    },

    #[error("dividend allowance must be non-negative, got {0}")]
    InvalidDividendAllowance(Decimal),

    #[error("apprenticeship levy rate must be between 0 and 1, got {0}")]
    InvalidApprenticeshipLevy(Decimal),

    #[error("allowance taper needs a non-negative threshold and a rate between 0 and 1")]
    InvalidAllowanceTaper,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearRates {
    /// Human-readable tax year label, e.g. `"2025/26"`.
    pub tax_year: String,
    pub income_tax: BandTable,
    /// Thresholds mirror `income_tax`; dividends are stacked on top of
    /// other income when the table is applied.
    pub dividend_tax: BandTable,
    /// Dividends covered by the allowance use band space but are taxed at 0%.
    pub dividend_allowance: Decimal,
    pub employee_ni: BandTable,
    pub employer_ni: BandTable,
    pub corporation_tax: BandTable,
    /// Flat rate on gross pay charged alongside employer NI.
    pub apprenticeship_levy_rate: Decimal,
    /// Total income above which the personal allowance is withdrawn.
    pub allowance_taper_threshold: Decimal,
    /// Allowance lost per pound of income above the threshold.
    pub allowance_taper_rate: Decimal,
}

impl TaxYearRates {
    /// UK rates for the 2025/26 tax year (6 April 2025 to 5 April 2026).
    pub fn uk_2025_26() -> Self {
        Self {
            tax_year: "2025/26".to_string(),
            income_tax: BandTable::new(vec![
                TaxBand::bounded(dec!(0), dec!(12570), dec!(0)),
                TaxBand::bounded(dec!(12570), dec!(50270), dec!(0.20)),
                TaxBand::bounded(dec!(50270), dec!(100000), dec!(0.40)),
                TaxBand::bounded(dec!(100000), dec!(125140), dec!(0.60)),
                TaxBand::unbounded(dec!(125140), dec!(0.45)),
            ]),
            dividend_tax: BandTable::new(vec![
                TaxBand::bounded(dec!(0), dec!(12570), dec!(0)),
                TaxBand::bounded(dec!(12570), dec!(50270), dec!(0.0875)),
                TaxBand::bounded(dec!(50270), dec!(100000), dec!(0.3375)),
                TaxBand::bounded(dec!(100000), dec!(125140), dec!(0.50625)),
                TaxBand::unbounded(dec!(125140), dec!(0.3935)),
            ]),
            dividend_allowance: dec!(500),
            employee_ni: BandTable::new(vec![
                TaxBand::bounded(dec!(0), dec!(12570), dec!(0)),
                TaxBand::bounded(dec!(12570), dec!(50270), dec!(0.08)),
                TaxBand::unbounded(dec!(50270), dec!(0.02)),
            ]),
            employer_ni: BandTable::new(vec![
                TaxBand::bounded(dec!(0), dec!(5000), dec!(0)),
                TaxBand::unbounded(dec!(5000), dec!(0.15)),
            ]),
            corporation_tax: BandTable::new(vec![
                TaxBand::bounded(dec!(0), dec!(50000), dec!(0.19)),
                TaxBand::bounded(dec!(50000), dec!(250000), dec!(0.265)),
                TaxBand::unbounded(dec!(250000), dec!(0.25)),
            ]),
            apprenticeship_levy_rate: dec!(0.005),
            allowance_taper_threshold: dec!(100000),
            allowance_taper_rate: dec!(0.5),
        }
    }

    /// Width of the zero-rate first income tax band, or zero if there is none.
    pub fn personal_allowance(&self) -> Decimal {
        match self.income_tax.bands().first() {
            Some(band) if band.rate.is_zero() => band.width().unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        }
    }

    /// How much personal allowance is lost at `total_income`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ir35_core::TaxYearRates;
    ///
    /// let rates = TaxYearRates::uk_2025_26();
    ///
    /// assert_eq!(rates.allowance_reduction(dec!(90000)), dec!(0));
    /// assert_eq!(rates.allowance_reduction(dec!(110000)), dec!(5000));
    /// assert_eq!(rates.allowance_reduction(dec!(300000)), dec!(12570));
    /// ```
    pub fn allowance_reduction(
        &self,
        total_income: Decimal,
    ) -> Decimal {
        let excess = (total_income - self.allowance_taper_threshold).max(Decimal::ZERO);
        let withdrawn = excess
            .checked_mul(self.allowance_taper_rate)
            .unwrap_or(Decimal::MAX);
        withdrawn.min(self.personal_allowance())
    }

    pub fn table(
        &self,
        which: RateTable,
    ) -> &BandTable {
        match which {
            RateTable::IncomeTax => &self.income_tax,
            RateTable::DividendTax => &self.dividend_tax,
            RateTable::EmployeeNi => &self.employee_ni,
            RateTable::EmployerNi => &self.employer_ni,
            RateTable::CorporationTax => &self.corporation_tax,
        }
    }

    /// Replaces one band table, leaving the rest untouched.
    pub fn set_table(
        &mut self,
        which: RateTable,
        table: BandTable,
    ) {
        match which {
            RateTable::IncomeTax => self.income_tax = table,
            RateTable::DividendTax => self.dividend_tax = table,
            RateTable::EmployeeNi => self.employee_ni = table,
            RateTable::EmployerNi => self.employer_ni = table,
            RateTable::CorporationTax => self.corporation_tax = table,
        }
    }

    /// Validates every band table and the scalar rates.
    ///
    /// # Errors
    ///
    /// Returns the first [`RatesError`] found, naming the offending table.
    pub fn validate(&self) -> Result<(), RatesError> {
        for which in RateTable::ALL {
            self.table(which)
                .validate()
                .map_err(|source| RatesError::InvalidTable {
                    table: which,
                    source,
                })?;
        }
        if self.dividend_allowance < Decimal::ZERO {
            return Err(RatesError::InvalidDividendAllowance(
                self.dividend_allowance,
            ));
        }
        if self.apprenticeship_levy_rate < Decimal::ZERO
            || self.apprenticeship_levy_rate > Decimal::ONE
        {
            return Err(RatesError::InvalidApprenticeshipLevy(
                self.apprenticeship_levy_rate,
            ));
        }
        if self.allowance_taper_threshold < Decimal::ZERO
            || self.allowance_taper_rate < Decimal::ZERO
            || self.allowance_taper_rate > Decimal::ONE
        {
            return Err(RatesError::InvalidAllowanceTaper);
        }
        Ok(())
    }
}

impl Default for TaxYearRates {
    fn default() -> Self {
        Self::uk_2025_26()
    }
}
