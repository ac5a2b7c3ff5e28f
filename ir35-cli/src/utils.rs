use ir35_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace, removes commas
/// (thousands separator) and a leading pound sign.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('£')
        .unwrap_or(trimmed)
        .replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and a leading
/// `£`. Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses user input the way the calculator treats it: anything that is not
/// a number counts as zero.
pub fn parse_decimal_or_zero(s: &str) -> Decimal {
    parse_decimal(s).unwrap_or_else(|error| {
        warn!(%error, "treating invalid amount as zero");
        Decimal::ZERO
    })
}

/// Formats an amount as pounds with thousands separators, e.g. `£1,234.50`.
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, pence) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}£{}.{pence}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a ratio such as `0.5056` as `50.56%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate * Decimal::ONE_HUNDRED))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_accepts_pound_sign() {
        assert_eq!(parse_decimal("£1,500").unwrap(), dec!(1500));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
    }

    #[test]
    fn parse_decimal_or_zero_swallows_garbage() {
        assert_eq!(parse_decimal_or_zero("NaN"), Decimal::ZERO);
        assert_eq!(parse_decimal_or_zero("1,650"), dec!(1650));
    }

    #[test]
    fn format_gbp_groups_thousands() {
        assert_eq!(format_gbp(dec!(166837.56)), "£166,837.56");
        assert_eq!(format_gbp(dec!(10023978.81)), "£10,023,978.81");
        assert_eq!(format_gbp(dec!(999.5)), "£999.50");
        assert_eq!(format_gbp(dec!(0)), "£0.00");
    }

    #[test]
    fn format_gbp_negative_amounts() {
        assert_eq!(format_gbp(dec!(-36300)), "-£36,300.00");
    }

    #[test]
    fn format_percent_two_places() {
        assert_eq!(format_percent(dec!(0.5056)), "50.56%");
        assert_eq!(format_percent(dec!(0)), "0.00%");
    }
}
