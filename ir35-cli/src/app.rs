//! Resolves command-line flags and config into one run of the calculator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ir35_core::calculations::{ContractProjection, HiringCostComparison};
use ir35_core::{
    DEFAULT_DAYS_PER_YEAR, EarningsCalculator, EngagementInput, RoleCode, RoleProfile,
    ScenarioAssumptions, TaxYearRates, UK_2025_26,
};
use ir35_data::RatesLoader;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info, warn};

use crate::cli::{Cli, StatusArg};
use crate::config::AppConfig;
use crate::utils::{format_gbp, parse_decimal_or_zero};
use crate::{csv_loader, report};

/// Day rate used when neither flags, config nor a role supply one.
pub const DEFAULT_DAY_RATE: Decimal = dec!(1500);

/// Everything one invocation needs, after precedence has been applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub role: Option<RoleProfile>,
    pub day_rate: Decimal,
    pub days_per_year: u32,
    pub status: StatusArg,
    pub rates: TaxYearRates,
    pub assumptions: ScenarioAssumptions,
    pub contract_months: Option<u32>,
    pub permanent_salary: Option<Decimal>,
    pub batch: Option<PathBuf>,
}

impl Settings {
    /// Flags win over the config file; the config file wins over role and
    /// built-in defaults.
    pub fn resolve(
        cli: &Cli,
        config: &AppConfig,
    ) -> Result<Self> {
        let role = cli
            .role
            .as_deref()
            .or(config.engagement.role.as_deref())
            .map(resolve_role);

        let mut day_rate = match (&cli.day_rate, config.engagement.day_rate, &role) {
            (Some(raw), _, _) => parse_decimal_or_zero(raw),
            (None, Some(rate), _) => rate,
            (None, None, Some(profile)) => profile.avg_day_rate,
            (None, None, None) => DEFAULT_DAY_RATE,
        };
        if let Some(profile) = role.as_ref().filter(|_| cli.clamp_to_role) {
            day_rate = profile.clamp_day_rate(day_rate);
        }

        let days_per_year = match cli.days {
            Some(days) => clamp_days(days),
            None => config
                .engagement
                .days_per_year
                .unwrap_or(DEFAULT_DAYS_PER_YEAR),
        };

        let rates = match cli.rates.as_ref().or(config.rates_file.as_ref()) {
            Some(path) => {
                let rates = RatesLoader::load_path(path, &UK_2025_26)
                    .with_context(|| format!("Failed to load rates: {}", path.display()))?;
                info!(path = %path.display(), tax_year = %rates.tax_year, "loaded rates file");
                rates
            }
            None => UK_2025_26.clone(),
        };

        let permanent_salary = cli
            .permanent_salary
            .as_deref()
            .map(parse_decimal_or_zero)
            .or_else(|| role.as_ref().map(|profile| profile.avg_salary));

        let settings = Self {
            role,
            day_rate,
            days_per_year,
            status: cli.status,
            rates,
            assumptions: config.assumptions(),
            contract_months: cli.contract_months,
            permanent_salary,
            batch: cli.batch.clone(),
        };
        debug!(
            day_rate = %settings.day_rate,
            days_per_year = settings.days_per_year,
            status = ?settings.status,
            "settings resolved"
        );

        Ok(settings)
    }
}

fn resolve_role(code: &str) -> RoleProfile {
    match RoleCode::parse(code) {
        Some(code) => RoleProfile::for_code(code),
        None => {
            warn!(role = code, "unknown role; using CMO benchmarks");
            RoleProfile::for_code_or_default(code)
        }
    }
}

/// Negative day counts become zero; the calculator caps the top end.
fn clamp_days(days: i64) -> u32 {
    if days < 0 {
        warn!(days, "negative days per year; treating as zero");
    }
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// Runs the calculator and returns the rendered report.
pub fn run(settings: &Settings) -> Result<String> {
    let calculator = EarningsCalculator::new(&settings.rates, &settings.assumptions);

    if let Some(path) = &settings.batch {
        let engagements = csv_loader::load_from_file(path)
            .with_context(|| format!("Failed to load batch: {}", path.display()))?;
        info!(count = engagements.len(), "loaded batch engagements");

        let results: Vec<_> = engagements
            .into_iter()
            .map(|engagement| {
                let breakdown = calculator.compute(&engagement.input);
                (engagement, breakdown)
            })
            .collect();
        return Ok(report::render_batch(&results));
    }

    let mut out = String::new();

    if let Some(profile) = &settings.role {
        out.push_str(&format!(
            "{} benchmarks: {} to {} a day, permanent salary {}\n\n",
            profile.label,
            format_gbp(profile.min_day_rate),
            format_gbp(profile.max_day_rate),
            format_gbp(profile.avg_salary)
        ));
    }

    match settings.status.single() {
        Some(status) => {
            let input = EngagementInput::new(settings.day_rate, status)
                .with_days_per_year(settings.days_per_year);
            out.push_str(&report::render_breakdown(&calculator.compute(&input)));
        }
        None => {
            let comparison = calculator.compare(settings.day_rate, settings.days_per_year);
            out.push_str(&report::render_comparison(&comparison));
        }
    }

    if let Some(months) = settings.contract_months {
        let projection = ContractProjection::new(settings.day_rate, months);
        out.push('\n');
        out.push_str(&report::render_projection(&projection));

        if let Some(salary) = settings.permanent_salary {
            let hiring = HiringCostComparison::new(settings.day_rate, salary, months);
            out.push('\n');
            out.push_str(&report::render_hiring_cost(&hiring));
        }
    }

    Ok(out)
}
