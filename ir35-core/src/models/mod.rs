mod assumptions;
mod earnings_breakdown;
mod engagement_input;
mod ir35_status;
mod role_profile;
mod tax_band;
mod tax_year_rates;

pub use assumptions::{LimitedCompanyAssumptions, ScenarioAssumptions, UmbrellaAssumptions};
pub use earnings_breakdown::{
    BandCharge, Deduction, DeductionKind, EarningsBreakdown, Ir35Comparison,
};
pub(crate) use engagement_input::clamp_day_rate;
pub use engagement_input::{DEFAULT_DAYS_PER_YEAR, EngagementInput, MAX_DAY_RATE, MAX_DAYS_PER_YEAR};
pub use ir35_status::{EngagementVehicle, Ir35Status};
pub use role_profile::{RoleCode, RoleProfile};
pub use tax_band::{BandTable, BandTableError, TaxBand};
pub use tax_year_rates::{RateTable, RatesError, TaxYearRates, UK_2025_26};
