//! Earnings calculations for interim engagements.
//!
//! [`bands`] holds the progressive-banding routines shared by every tax
//! table, [`scenarios`] models the two ways an engagement can be paid, and
//! [`earnings`] assembles the rounded [`EarningsBreakdown`](crate::EarningsBreakdown).
//! [`contract`] covers the simpler contract-value and hiring-cost projections.

pub mod bands;
pub mod common;
pub mod contract;
pub mod earnings;
pub mod scenarios;

pub use bands::{BandedTax, apply_bands, apply_bands_stacked, gross_up};
pub use contract::{ContractProjection, HiringCostComparison};
pub use earnings::{EarningsCalculator, compute_earnings};
pub use scenarios::{
    EngagementModel, LimitedCompanyResult, LimitedCompanyScenario, ScenarioCharge,
    UmbrellaResult, UmbrellaScenario,
};
