//! Progressive banding shared by every tax table.
//!
//! Income tax, dividend tax, both sides of National Insurance and
//! corporation tax are all charged by walking a [`BandTable`] from the bottom
//! up. [`apply_bands`] does that walk; [`gross_up`] inverts it when an amount
//! has to cover its own banded charge, as with employer NI coming out of an
//! umbrella company's contract income.
//!
//! Neither function rounds. Rounding happens once, when the breakdown is
//! assembled.

use rust_decimal::Decimal;

use crate::calculations::common::non_negative;
use crate::models::{BandCharge, BandTable};

/// Result of running an amount through a band table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandedTax {
    pub total: Decimal,
    /// One entry per band the income reached, lowest band first.
    pub charges: Vec<BandCharge>,
}

impl BandedTax {
    pub fn zero() -> Self {
        Self {
            total: Decimal::ZERO,
            charges: Vec::new(),
        }
    }
}

/// Applies a progressive table to `income`.
///
/// Bands are taken in ascending order; each band taxes
/// `min(remaining, width)` at its rate, and the unbounded top band takes
/// whatever is left. Negative income is treated as zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir35_core::TaxYearRates;
/// use ir35_core::calculations::apply_bands;
///
/// let rates = TaxYearRates::uk_2025_26();
///
/// // £37,700 of basic-rate income at 20%
/// let tax = apply_bands(&rates.income_tax, dec!(50270));
///
/// assert_eq!(tax.total, dec!(7540));
/// assert_eq!(tax.charges.len(), 2);
/// ```
pub fn apply_bands(
    table: &BandTable,
    income: Decimal,
) -> BandedTax {
    let mut remaining = non_negative(income);
    let mut result = BandedTax::zero();

    for band in table.bands() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let taxable = match band.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let tax = taxable * band.rate;

        result.total += tax;
        result.charges.push(BandCharge {
            from: band.from,
            to: band.to,
            rate: band.rate,
            taxable,
            tax,
        });
        remaining -= taxable;
    }

    result
}

/// Applies a progressive table to `amount` of income stacked on top of
/// `base` income that has already used the lower bands.
///
/// This is how dividends are taxed: they sit above salary, so they start in
/// whichever band the salary left off.
pub fn apply_bands_stacked(
    table: &BandTable,
    base: Decimal,
    amount: Decimal,
) -> BandedTax {
    let lower = non_negative(base);
    let upper = lower + non_negative(amount);
    let mut result = BandedTax::zero();

    for band in table.bands() {
        if band.from >= upper {
            break;
        }

        let start = lower.max(band.from);
        let end = band.to.map_or(upper, |to| upper.min(to));
        if end <= start {
            continue;
        }

        let taxable = end - start;
        let tax = taxable * band.rate;

        result.total += tax;
        result.charges.push(BandCharge {
            from: band.from,
            to: band.to,
            rate: band.rate,
            taxable,
            tax,
        });
    }

    result
}

/// Finds the pay `p` such that `p + banded(p) + flat_rate * p == total_cost`.
///
/// The cost function is piecewise linear and strictly increasing, so the
/// solution is found by locating the band whose cost range contains
/// `total_cost` and solving within it. A non-positive cost yields zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir35_core::TaxYearRates;
/// use ir35_core::calculations::gross_up;
///
/// let rates = TaxYearRates::uk_2025_26();
///
/// // Below the secondary threshold there is no employer NI to fund.
/// assert_eq!(gross_up(&rates.employer_ni, dec!(0), dec!(4000)), dec!(4000));
/// ```
pub fn gross_up(
    table: &BandTable,
    flat_rate: Decimal,
    total_cost: Decimal,
) -> Decimal {
    let target = non_negative(total_cost);
    if target.is_zero() {
        return Decimal::ZERO;
    }

    let mut cost_at_start = Decimal::ZERO;

    for band in table.bands() {
        let slope = Decimal::ONE + band.rate + flat_rate;
        match band.width() {
            Some(width) => {
                // A band too wide to cost out always contains the target.
                let Some(cost_at_end) = width
                    .checked_mul(slope)
                    .and_then(|span| span.checked_add(cost_at_start))
                else {
                    return band.from + (target - cost_at_start) / slope;
                };
                if target <= cost_at_end {
                    return band.from + (target - cost_at_start) / slope;
                }
                cost_at_start = cost_at_end;
            }
            None => return band.from + (target - cost_at_start) / slope,
        }
    }

    // Only reachable for a table without an unbounded top band: pay above
    // the last band carries the flat rate alone.
    let covered = table
        .bands()
        .last()
        .and_then(|band| band.to)
        .unwrap_or(Decimal::ZERO);
    covered + (target - cost_at_start) / (Decimal::ONE + flat_rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;
    use crate::models::{TaxBand, TaxYearRates};

    fn rates() -> TaxYearRates {
        TaxYearRates::uk_2025_26()
    }

    // =========================================================================
    // apply_bands tests
    // =========================================================================

    #[test]
    fn apply_bands_zero_income_has_no_charges() {
        let result = apply_bands(&rates().income_tax, dec!(0));

        assert_eq!(result, BandedTax::zero());
    }

    #[test]
    fn apply_bands_negative_income_is_zero() {
        let result = apply_bands(&rates().income_tax, dec!(-5000));

        assert_eq!(result.total, dec!(0));
    }

    #[test]
    fn apply_bands_below_personal_allowance_is_untaxed() {
        let result = apply_bands(&rates().income_tax, dec!(12000));

        assert_eq!(result.total, dec!(0));
        assert_eq!(result.charges.len(), 1);
        assert_eq!(result.charges[0].taxable, dec!(12000));
    }

    #[test]
    fn apply_bands_spans_multiple_bands() {
        let result = apply_bands(&rates().employee_ni, dec!(60000));

        // 37,700 × 8% + 9,730 × 2%
        assert_eq!(result.total, dec!(3210.60));
        assert_eq!(result.charges.len(), 3);
        assert_eq!(result.charges[1].tax, dec!(3016.00));
        assert_eq!(result.charges[2].taxable, dec!(9730));
    }

    #[test]
    fn apply_bands_handles_personal_allowance_taper() {
        let result = apply_bands(&rates().income_tax, dec!(125140));

        // 7,540 + 19,892 + 15,084
        assert_eq!(result.total, dec!(42516));
    }

    #[test]
    fn apply_bands_top_band_is_unbounded() {
        let result = apply_bands(&rates().income_tax, dec!(200000));

        // 42,516 + 74,860 × 45%
        assert_eq!(result.total, dec!(76203));
        let top = result.charges.last().unwrap();
        assert_eq!(top.to, None);
        assert_eq!(top.taxable, dec!(74860));
    }

    #[test]
    fn apply_bands_models_corporation_tax_marginal_relief() {
        let table = rates().corporation_tax;

        assert_eq!(apply_bands(&table, dec!(50000)).total, dec!(9500));
        assert_eq!(apply_bands(&table, dec!(250000)).total, dec!(62500));
        assert_eq!(apply_bands(&table, dec!(400000)).total, dec!(100000));
    }

    #[test]
    fn apply_bands_is_continuous_at_thresholds() {
        let table = rates().income_tax;

        for band in table.bands() {
            let Some(upper) = band.to else { continue };
            let at = apply_bands(&table, upper).total;
            let below = apply_bands(&table, upper - dec!(1)).total;
            let above = apply_bands(&table, upper + dec!(1)).total;

            assert_eq!(at - below, band.rate, "below {upper}");
            let next_rate = table
                .bands()
                .iter()
                .find(|b| b.from == upper)
                .map(|b| b.rate)
                .unwrap();
            assert_eq!(above - at, next_rate, "above {upper}");
        }
    }

    #[test]
    fn apply_bands_at_threshold_equals_sum_of_full_bands() {
        let table = rates().employee_ni;
        let expected: Decimal = table.bands()[..2]
            .iter()
            .map(|b| b.width().unwrap() * b.rate)
            .sum();

        assert_eq!(apply_bands(&table, dec!(50270)).total, expected);
    }

    // =========================================================================
    // apply_bands_stacked tests
    // =========================================================================

    #[test]
    fn apply_bands_stacked_on_zero_base_matches_apply_bands() {
        let table = rates().dividend_tax;

        for amount in [dec!(0), dec!(9000), dec!(80000), dec!(400000)] {
            assert_eq!(
                apply_bands_stacked(&table, dec!(0), amount),
                apply_bands(&table, amount)
            );
        }
    }

    #[test]
    fn apply_bands_stacked_starts_where_base_ends() {
        let table = rates().dividend_tax;

        let result = apply_bands_stacked(&table, dec!(13070), dec!(2573.545));

        assert_eq!(result.charges.len(), 1);
        assert_eq!(result.charges[0].rate, dec!(0.0875));
        assert_eq!(result.total, dec!(225.18518750));
    }

    #[test]
    fn apply_bands_stacked_equals_difference_of_totals() {
        let table = rates().dividend_tax;
        let base = dec!(12570);
        let amount = dec!(235345.875);

        let stacked = apply_bands_stacked(&table, base, amount).total;
        let difference =
            apply_bands(&table, base + amount).total - apply_bands(&table, base).total;

        assert_eq!(stacked, difference);
    }

    // =========================================================================
    // gross_up tests
    // =========================================================================

    #[test]
    fn gross_up_zero_cost_is_zero() {
        assert_eq!(gross_up(&rates().employer_ni, dec!(0.005), dec!(0)), dec!(0));
        assert_eq!(gross_up(&rates().employer_ni, dec!(0.005), dec!(-10)), dec!(0));
    }

    #[test]
    fn gross_up_within_first_band_only_carries_flat_rate() {
        let pay = gross_up(&rates().employer_ni, dec!(0.005), dec!(4020));

        assert_eq!(pay, dec!(4000));
    }

    #[test]
    fn gross_up_solves_umbrella_pay() {
        let table = rates().employer_ni;
        let pay = gross_up(&table, dec!(0.005), dec!(328900));

        assert_eq!(round_half_up(pay), dec!(285411.26));

        let cost = pay + apply_bands(&table, pay).total + pay * dec!(0.005);
        assert_eq!(round_half_up(cost), dec!(328900.00));
    }

    #[test]
    fn gross_up_lands_exactly_on_threshold() {
        let pay = gross_up(&rates().employer_ni, dec!(0), dec!(5000));

        assert_eq!(pay, dec!(5000));
    }

    #[test]
    fn gross_up_inverts_income_tax_table() {
        let table = rates().income_tax;

        for pay in [dec!(10000), dec!(60000), dec!(110000), dec!(300000)] {
            let cost = pay + apply_bands(&table, pay).total;
            let solved = gross_up(&table, dec!(0), cost);

            assert_eq!(round_half_up(solved), pay);
        }
    }

    #[test]
    fn gross_up_handles_band_wider_than_decimal_can_cost() {
        let table = BandTable::new(vec![
            TaxBand::bounded(dec!(0), Decimal::MAX, dec!(0.5)),
            TaxBand::unbounded(Decimal::MAX, dec!(0.5)),
        ]);

        assert_eq!(gross_up(&table, dec!(0), dec!(1500)), dec!(1000));
    }

    #[test]
    fn gross_up_without_unbounded_band_uses_flat_rate_above_table() {
        let table = BandTable::new(vec![TaxBand::bounded(dec!(0), dec!(1000), dec!(0))]);

        assert_eq!(gross_up(&table, dec!(0), dec!(1500)), dec!(1500));
    }
}
