//! Plain-text rendering of calculator results for the terminal.

use ir35_core::calculations::{ContractProjection, HiringCostComparison};
use ir35_core::{EarningsBreakdown, Ir35Comparison, RoleProfile};

use crate::csv_loader::BatchEngagement;
use crate::utils::{format_gbp, format_percent};

const LABEL_WIDTH: usize = 34;
const VALUE_WIDTH: usize = 16;

fn row(
    label: &str,
    value: &str,
) -> String {
    format!(
        "{:<label_width$}{:>value_width$}",
        label,
        value,
        label_width = LABEL_WIDTH,
        value_width = VALUE_WIDTH
    )
}

pub fn render_breakdown(breakdown: &EarningsBreakdown) -> String {
    let mut lines = vec![
        format!(
            "{}: {} ({})",
            breakdown.ir35_status.label(),
            breakdown.engagement_vehicle.label(),
            breakdown.tax_year
        ),
        format!(
            "{} a day for {} days",
            format_gbp(breakdown.day_rate),
            breakdown.days_per_year
        ),
        row("Gross annual", &format_gbp(breakdown.gross_annual)),
    ];

    for deduction in &breakdown.deductions {
        lines.push(row(
            &format!("  {}", deduction.label()),
            &format_gbp(-deduction.amount),
        ));
    }

    lines.extend([
        row("Net annual", &format_gbp(breakdown.net_annual)),
        row("Net monthly", &format_gbp(breakdown.net_monthly)),
        row("Net daily", &format_gbp(breakdown.net_daily)),
        row("Take-home rate", &format_percent(breakdown.take_home_rate)),
        row(
            "Effective tax rate",
            &format_percent(breakdown.effective_tax_rate),
        ),
    ]);

    lines.join("\n") + "\n"
}

pub fn render_comparison(comparison: &Ir35Comparison) -> String {
    let differential = comparison.differential();
    let summary = if differential.is_zero() {
        "Inside and outside IR35 take home the same".to_string()
    } else {
        format!(
            "{} takes home {} more a year",
            comparison.better_status().label(),
            format_gbp(differential.abs())
        )
    };

    format!(
        "{}\n{}\n{}\n",
        render_breakdown(&comparison.outside),
        render_breakdown(&comparison.inside),
        summary
    )
}

pub fn render_projection(projection: &ContractProjection) -> String {
    [
        format!(
            "Full-time contract: {} months at {} a day",
            projection.months,
            format_gbp(projection.day_rate)
        ),
        row("Monthly (gross)", &format_gbp(projection.monthly)),
        row("Contract total (gross)", &format_gbp(projection.total)),
    ]
    .join("\n")
        + "\n"
}

pub fn render_hiring_cost(comparison: &HiringCostComparison) -> String {
    let verdict = if comparison.is_premium() {
        format!("Interim premium of {}%", comparison.percent)
    } else {
        format!("Interim saving of {}%", -comparison.percent)
    };

    [
        format!("Hiring cost over {} months", comparison.months),
        row("Permanent (with on-costs)", &format_gbp(comparison.permanent_cost)),
        row("Interim", &format_gbp(comparison.interim_cost)),
        row("Difference", &format_gbp(comparison.difference)),
        verdict,
    ]
    .join("\n")
        + "\n"
}

pub fn render_roles(profiles: &[RoleProfile]) -> String {
    let mut lines = vec![format!(
        "{:<6}{:>12}{:>12}{:>12}{:>16}",
        "Role", "Min/day", "Avg/day", "Max/day", "Perm salary"
    )];

    for profile in profiles {
        lines.push(format!(
            "{:<6}{:>12}{:>12}{:>12}{:>16}",
            profile.label,
            format_gbp(profile.min_day_rate),
            format_gbp(profile.avg_day_rate),
            format_gbp(profile.max_day_rate),
            format_gbp(profile.avg_salary)
        ));
    }

    lines.join("\n") + "\n"
}

/// One line per engagement: label, status, gross, net and take-home rate.
pub fn render_batch(results: &[(BatchEngagement, EarningsBreakdown)]) -> String {
    let mut lines = vec![format!(
        "{:<24}{:<14}{:>16}{:>16}{:>10}",
        "Engagement", "Status", "Gross", "Net", "Take-home"
    )];

    for (engagement, breakdown) in results {
        lines.push(format!(
            "{:<24}{:<14}{:>16}{:>16}{:>10}",
            engagement.label,
            breakdown.ir35_status.label(),
            format_gbp(breakdown.gross_annual),
            format_gbp(breakdown.net_annual),
            format_percent(breakdown.take_home_rate)
        ));
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use ir35_core::{EngagementInput, Ir35Status, RoleCode, compute_earnings};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn breakdown_lists_deductions_and_net() {
        let breakdown = compute_earnings(&EngagementInput::new(dec!(1500), Ir35Status::Outside));

        let text = render_breakdown(&breakdown);

        assert!(text.starts_with("Outside IR35: Limited company (2025/26)"));
        assert!(text.contains("Corporation tax"));
        assert!(text.contains("-£78,448.63"));
        assert!(text.contains("£165,423.44"));
        assert!(text.contains("50.13%"));
        assert!(!text.contains("Umbrella margin"));
    }

    #[test]
    fn comparison_names_the_better_status() {
        let breakdown = compute_earnings(&EngagementInput::new(dec!(1500), Ir35Status::Inside));
        let comparison = Ir35Comparison {
            outside: compute_earnings(&EngagementInput::new(dec!(1500), Ir35Status::Outside)),
            inside: breakdown,
        };

        let text = render_comparison(&comparison);

        assert!(text.contains("Outside IR35 takes home £2,369.08 more a year"));
    }

    #[test]
    fn hiring_cost_reports_saving() {
        let comparison = HiringCostComparison::new(dec!(500), dec!(150000), 6);

        let text = render_hiring_cost(&comparison);

        assert!(text.contains("Interim saving of 36%"));
        assert!(text.contains("-£36,300.00"));
    }

    #[test]
    fn projection_shows_total() {
        let text = render_projection(&ContractProjection::new(dec!(1500), 6));

        assert!(text.contains("6 months at £1,500.00 a day"));
        assert!(text.contains("£194,850.00"));
    }

    #[test]
    fn roles_table_has_a_row_per_role() {
        let text = render_roles(&RoleProfile::all());

        assert_eq!(text.lines().count(), RoleCode::ALL.len() + 1);
        assert!(text.contains("CISO"));
    }
}
