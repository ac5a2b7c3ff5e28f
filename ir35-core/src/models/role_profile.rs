use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::engagement_input::EngagementInput;
use super::ir35_status::Ir35Status;

/// Executive roles with UK interim market defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleCode {
    Cmo,
    Cfo,
    Cto,
    Coo,
    Ciso,
    Chro,
    Cpo,
}

impl RoleCode {
    pub const ALL: [RoleCode; 7] = [
        Self::Cmo,
        Self::Cfo,
        Self::Cto,
        Self::Coo,
        Self::Ciso,
        Self::Chro,
        Self::Cpo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cmo => "cmo",
            Self::Cfo => "cfo",
            Self::Cto => "cto",
            Self::Coo => "coo",
            Self::Ciso => "ciso",
            Self::Chro => "chro",
            Self::Cpo => "cpo",
        }
    }

    /// Case-insensitive parse of the role code, e.g. `"CFO"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cmo" => Some(Self::Cmo),
            "cfo" => Some(Self::Cfo),
            "cto" => Some(Self::Cto),
            "coo" => Some(Self::Coo),
            "ciso" => Some(Self::Ciso),
            "chro" => Some(Self::Chro),
            "cpo" => Some(Self::Cpo),
            _ => None,
        }
    }
}

/// Day-rate and salary benchmarks for an interim role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleProfile {
    pub code: RoleCode,
    pub label: &'static str,
    pub avg_day_rate: Decimal,
    pub min_day_rate: Decimal,
    pub max_day_rate: Decimal,
    /// Average base salary of the equivalent permanent role.
    pub avg_salary: Decimal,
}

impl RoleProfile {
    pub fn for_code(code: RoleCode) -> Self {
        let (label, avg, min, max, salary) = match code {
            RoleCode::Cmo => ("CMO", 1500, 1200, 2200, 130_000),
            RoleCode::Cfo => ("CFO", 1600, 1300, 2400, 145_000),
            RoleCode::Cto => ("CTO", 1700, 1400, 2500, 155_000),
            RoleCode::Coo => ("COO", 1500, 1200, 2300, 140_000),
            RoleCode::Ciso => ("CISO", 1650, 1300, 2400, 150_000),
            RoleCode::Chro => ("CHRO", 1400, 1200, 2000, 125_000),
            RoleCode::Cpo => ("CPO", 1550, 1300, 2200, 145_000),
        };

        Self {
            code,
            label,
            avg_day_rate: Decimal::from(avg),
            min_day_rate: Decimal::from(min),
            max_day_rate: Decimal::from(max),
            avg_salary: Decimal::from(salary),
        }
    }

    /// Looks up a profile by code string, falling back to CMO when the code
    /// is not recognised.
    pub fn for_code_or_default(code: &str) -> Self {
        Self::for_code(RoleCode::parse(code).unwrap_or(RoleCode::Cmo))
    }

    pub fn all() -> Vec<Self> {
        RoleCode::ALL.into_iter().map(Self::for_code).collect()
    }

    /// Pins a day rate into this role's benchmark range.
    pub fn clamp_day_rate(
        &self,
        day_rate: Decimal,
    ) -> Decimal {
        day_rate.clamp(self.min_day_rate, self.max_day_rate)
    }

    /// An engagement at the role's average day rate and default working days.
    pub fn engagement(
        &self,
        ir35_status: Ir35Status,
    ) -> EngagementInput {
        EngagementInput::new(self.avg_day_rate, ir35_status)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cfo_profile_matches_market_defaults() {
        let cfo = RoleProfile::for_code(RoleCode::Cfo);

        assert_eq!(cfo.label, "CFO");
        assert_eq!(cfo.avg_day_rate, dec!(1600));
        assert_eq!(cfo.min_day_rate, dec!(1300));
        assert_eq!(cfo.max_day_rate, dec!(2400));
        assert_eq!(cfo.avg_salary, dec!(145000));
    }

    #[test]
    fn unknown_code_falls_back_to_cmo() {
        assert_eq!(RoleProfile::for_code_or_default("cxo").code, RoleCode::Cmo);
        assert_eq!(RoleProfile::for_code_or_default("CTO").code, RoleCode::Cto);
    }

    #[test]
    fn all_profiles_have_average_inside_range() {
        let profiles = RoleProfile::all();

        assert_eq!(profiles.len(), 7);
        for profile in profiles {
            assert!(profile.min_day_rate <= profile.avg_day_rate, "{}", profile.label);
            assert!(profile.avg_day_rate <= profile.max_day_rate, "{}", profile.label);
        }
    }

    #[test]
    fn clamp_day_rate_pins_to_range() {
        let chro = RoleProfile::for_code(RoleCode::Chro);

        assert_eq!(chro.clamp_day_rate(dec!(900)), dec!(1200));
        assert_eq!(chro.clamp_day_rate(dec!(1750)), dec!(1750));
        assert_eq!(chro.clamp_day_rate(dec!(5000)), dec!(2000));
    }

    #[test]
    fn engagement_uses_average_rate() {
        let input = RoleProfile::for_code(RoleCode::Cto).engagement(Ir35Status::Inside);

        assert_eq!(input.day_rate, dec!(1700));
        assert_eq!(input.days_per_year, 220);
        assert_eq!(input.ir35_status, Ir35Status::Inside);
    }
}
