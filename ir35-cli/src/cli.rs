use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ir35_core::Ir35Status;

/// Which IR35 scenarios to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Inside,
    Outside,
    /// Both scenarios side by side.
    Compare,
}

impl StatusArg {
    /// The single status to compute, or `None` when comparing.
    pub fn single(&self) -> Option<Ir35Status> {
        match self {
            Self::Inside => Some(Ir35Status::Inside),
            Self::Outside => Some(Ir35Status::Outside),
            Self::Compare => None,
        }
    }
}

/// Take-home pay calculator for UK interim executives.
///
/// Works out annual, monthly and daily take-home pay for a day rate, inside
/// IR35 (umbrella PAYE) or outside IR35 (limited company), using UK 2025/26
/// rates unless a rates file says otherwise.
#[derive(Debug, Parser)]
#[command(name = "ir35-calc", version, about)]
pub struct Cli {
    /// TOML config file with engagement defaults and assumptions.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Interim role code (cmo, cfo, cto, coo, ciso, chro, cpo).
    #[arg(long)]
    pub role: Option<String>,

    /// Day rate in GBP. Commas and a leading £ are accepted.
    #[arg(long)]
    pub day_rate: Option<String>,

    /// Working days per year (0 to 260).
    #[arg(long, allow_negative_numbers = true)]
    pub days: Option<i64>,

    #[arg(long, value_enum, default_value_t = StatusArg::Compare)]
    pub status: StatusArg,

    /// Pin the day rate into the role's market range.
    #[arg(long, default_value_t = false)]
    pub clamp_to_role: bool,

    /// CSV file of replacement band tables.
    #[arg(long)]
    pub rates: Option<PathBuf>,

    /// Contract length in months (1 to 24) for the contract projection.
    #[arg(long)]
    pub contract_months: Option<u32>,

    /// Permanent base salary to compare hiring costs against.
    #[arg(long)]
    pub permanent_salary: Option<String>,

    /// CSV file of engagements to summarise instead of a single calculation.
    #[arg(long)]
    pub batch: Option<PathBuf>,

    /// Print the role benchmarks and exit.
    #[arg(long, default_value_t = false)]
    pub list_roles: bool,

    /// Log level or filter directive (overrides RUST_LOG).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_to_comparison() {
        let cli = Cli::try_parse_from(["ir35-calc"]).unwrap();

        assert_eq!(cli.status, StatusArg::Compare);
        assert_eq!(cli.status.single(), None);
        assert!(cli.day_rate.is_none());
        assert!(!cli.list_roles);
    }

    #[test]
    fn parses_engagement_flags() {
        let cli = Cli::try_parse_from([
            "ir35-calc",
            "--role",
            "cfo",
            "--day-rate",
            "1,650",
            "--days",
            "200",
            "--status",
            "inside",
            "--contract-months",
            "9",
        ])
        .unwrap();

        assert_eq!(cli.role.as_deref(), Some("cfo"));
        assert_eq!(cli.day_rate.as_deref(), Some("1,650"));
        assert_eq!(cli.days, Some(200));
        assert_eq!(cli.status.single(), Some(Ir35Status::Inside));
        assert_eq!(cli.contract_months, Some(9));
    }

    #[test]
    fn negative_days_are_accepted_for_clamping() {
        let cli = Cli::try_parse_from(["ir35-calc", "--days", "-5"]).unwrap();

        assert_eq!(cli.days, Some(-5));
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Cli::try_parse_from(["ir35-calc", "--status", "both"]).is_err());
    }
}
