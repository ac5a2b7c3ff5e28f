//! Engagement-structure assumptions that are not statutory rates.
//!
//! These are the knobs the outside/inside IR35 models need beyond the
//! [`TaxYearRates`](super::TaxYearRates) tables. All fields deserialize with
//! defaults so a config file only has to name what it overrides.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitedCompanyAssumptions {
    /// Flat annual allowance for accountancy, insurance and running costs.
    pub annual_expenses: Decimal,
    /// Director's salary paid before profits are extracted as dividends.
    pub director_salary: Decimal,
}

impl Default for LimitedCompanyAssumptions {
    fn default() -> Self {
        Self {
            annual_expenses: dec!(2500),
            director_salary: dec!(12570),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UmbrellaAssumptions {
    /// Umbrella company's annual service margin.
    pub annual_margin: Decimal,
}

impl Default for UmbrellaAssumptions {
    fn default() -> Self {
        Self {
            annual_margin: dec!(1100),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioAssumptions {
    pub limited_company: LimitedCompanyAssumptions,
    pub umbrella: UmbrellaAssumptions,
}
