use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ir35_status::{EngagementVehicle, Ir35Status};

/// The kinds of deduction that can appear in a breakdown.
///
/// Variants are listed in the order they come off the contract value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeductionKind {
    UmbrellaMargin,
    BusinessExpenses,
    EmployerNi,
    ApprenticeshipLevy,
    CorporationTax,
    IncomeTax,
    EmployeeNi,
    DividendTax,
}

impl DeductionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::UmbrellaMargin => "Umbrella margin",
            Self::BusinessExpenses => "Business expenses & accountancy",
            Self::EmployerNi => "Employer's NI",
            Self::ApprenticeshipLevy => "Apprenticeship levy",
            Self::CorporationTax => "Corporation tax",
            Self::IncomeTax => "Income tax (PAYE)",
            Self::EmployeeNi => "Employee NI",
            Self::DividendTax => "Dividend tax",
        }
    }
}

/// Tax charged within one band of a progressive table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCharge {
    pub from: Decimal,
    pub to: Option<Decimal>,
    pub rate: Decimal,
    /// Income falling inside this band.
    pub taxable: Decimal,
    pub tax: Decimal,
}

/// A named amount taken off the contract value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub kind: DeductionKind,
    pub amount: Decimal,
    /// Per-band detail for banded taxes; empty for flat charges.
    pub bands: Vec<BandCharge>,
}

impl Deduction {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Computed earnings for one IR35 scenario.
///
/// All monetary values are rounded to pence. `net_annual` is derived from the
/// rounded deductions, so `gross_annual == net_annual + total_deductions()`
/// whenever the deductions do not exceed gross.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    pub ir35_status: Ir35Status,
    pub engagement_vehicle: EngagementVehicle,
    /// Label of the [`TaxYearRates`](super::TaxYearRates) used.
    pub tax_year: String,
    /// Day rate after clamping.
    pub day_rate: Decimal,
    /// Days per year after clamping.
    pub days_per_year: u32,
    pub gross_annual: Decimal,
    pub deductions: Vec<Deduction>,
    pub net_annual: Decimal,
    pub net_monthly: Decimal,
    pub net_daily: Decimal,
    /// `net_annual / gross_annual`, zero when gross is zero.
    pub take_home_rate: Decimal,
    /// Total deductions over gross, zero when gross is zero.
    pub effective_tax_rate: Decimal,
}

impl EarningsBreakdown {
    pub fn total_deductions(&self) -> Decimal {
        self.deductions.iter().map(|d| d.amount).sum()
    }

    pub fn deduction(
        &self,
        kind: DeductionKind,
    ) -> Option<&Deduction> {
        self.deductions.iter().find(|d| d.kind == kind)
    }

    /// Amount of the given deduction, zero when it does not apply.
    pub fn deduction_amount(
        &self,
        kind: DeductionKind,
    ) -> Decimal {
        self.deduction(kind)
            .map(|d| d.amount)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Inside and outside IR35 breakdowns for the same day rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ir35Comparison {
    pub inside: EarningsBreakdown,
    pub outside: EarningsBreakdown,
}

impl Ir35Comparison {
    /// Outside net minus inside net; positive when outside IR35 pays more.
    pub fn differential(&self) -> Decimal {
        self.outside.net_annual - self.inside.net_annual
    }

    /// The status with the higher take-home pay (outside on a tie).
    pub fn better_status(&self) -> Ir35Status {
        if self.inside.net_annual > self.outside.net_annual {
            Ir35Status::Inside
        } else {
            Ir35Status::Outside
        }
    }
}
