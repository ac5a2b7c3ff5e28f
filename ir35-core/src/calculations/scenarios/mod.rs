//! The two ways an interim engagement can be paid.
//!
//! Each model turns a gross annual contract value into the ordered list of
//! charges that come off it. Amounts are unrounded; the earnings calculator
//! rounds them when it builds the breakdown.

mod limited_company;
mod umbrella;

pub use limited_company::{LimitedCompanyResult, LimitedCompanyScenario};
pub use umbrella::{UmbrellaResult, UmbrellaScenario};

use rust_decimal::Decimal;

use crate::calculations::bands::BandedTax;
use crate::models::{BandCharge, DeductionKind, EngagementVehicle};

/// An unrounded charge against the contract value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioCharge {
    pub kind: DeductionKind,
    pub amount: Decimal,
    pub bands: Vec<BandCharge>,
}

impl ScenarioCharge {
    pub fn flat(
        kind: DeductionKind,
        amount: Decimal,
    ) -> Self {
        Self {
            kind,
            amount,
            bands: Vec::new(),
        }
    }

    pub fn banded(
        kind: DeductionKind,
        tax: BandedTax,
    ) -> Self {
        Self {
            kind,
            amount: tax.total,
            bands: tax.charges,
        }
    }
}

/// A deduction model for one engagement vehicle.
pub trait EngagementModel {
    fn vehicle(&self) -> EngagementVehicle;

    /// Charges taken off `gross`, in the order they apply.
    fn charges(
        &self,
        gross: Decimal,
    ) -> Vec<ScenarioCharge>;
}
