//! CSV loader for batches of engagements.
//!
//! ## CSV Format
//!
//! Columns are matched by header name, so order does not matter. Values are
//! trimmed.
//!
//! | Column          | Required | Type    | Notes |
//! |-----------------|----------|---------|-------|
//! | `label`         | yes      | string  | Shown in the summary |
//! | `day_rate`      | yes      | decimal | e.g. `1500.00` |
//! | `ir35_status`   | yes      | string  | `inside` or `outside`, any case |
//! | `days_per_year` | no       | integer | Leave empty for 220 |
//!
//! ### Example
//!
//! ```csv
//! label,day_rate,ir35_status,days_per_year
//! Fintech CFO,1650,outside,
//! NHS trust COO,950,inside,200
//! ```

use std::path::Path;

use ir35_core::{EngagementInput, Ir35Status};
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    day_rate: Decimal,
    ir35_status: String,
    #[serde(default)]
    days_per_year: Option<u32>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, not counting the header.
    #[error("unrecognised IR35 status '{status}' on row {row}")]
    InvalidStatus { status: String, row: usize },

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One engagement from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEngagement {
    pub label: String,
    pub input: EngagementInput,
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchEngagement, CsvLoadError> {
    let status =
        Ir35Status::parse(&row.ir35_status).ok_or_else(|| CsvLoadError::InvalidStatus {
            status: row.ir35_status.clone(),
            row: row_number,
        })?;

    let mut input = EngagementInput::new(row.day_rate, status);
    if let Some(days) = row.days_per_year {
        input = input.with_days_per_year(days);
    }

    Ok(BatchEngagement {
        label: row.label,
        input,
    })
}

/// Parse CSV text and return the engagements in file order.
///
/// Day rates and day counts are not clamped here; the calculator does that.
pub fn load_from_str(input: &str) -> Result<Vec<BatchEngagement>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<BatchEngagement>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
label,day_rate,ir35_status
Interim CFO,1600,outside
";

    #[test]
    fn loads_minimal_row_with_default_days() {
        let engagements = load_from_str(MINIMAL_CSV).unwrap();

        assert_eq!(
            engagements,
            vec![BatchEngagement {
                label: "Interim CFO".to_string(),
                input: EngagementInput::new(dec!(1600), Ir35Status::Outside),
            }]
        );
    }

    #[test]
    fn column_order_and_whitespace_do_not_matter() {
        let csv = "\
ir35_status , days_per_year, label, day_rate
 Inside , 180 , Interim CHRO , 1400.50
";

        let engagements = load_from_str(csv).unwrap();

        assert_eq!(engagements[0].label, "Interim CHRO");
        assert_eq!(engagements[0].input.day_rate, dec!(1400.50));
        assert_eq!(engagements[0].input.days_per_year, 180);
        assert_eq!(engagements[0].input.ir35_status, Ir35Status::Inside);
    }

    #[test]
    fn empty_days_cell_uses_default() {
        let csv = "label,day_rate,ir35_status,days_per_year\nCTO,1700,outside,\n";

        let engagements = load_from_str(csv).unwrap();

        assert_eq!(engagements[0].input.days_per_year, 220);
    }

    #[test]
    fn invalid_status_reports_row() {
        let csv = "label,day_rate,ir35_status\nA,1000,inside\nB,1000,unknown\n";

        let err = load_from_str(csv).unwrap_err();

        match err {
            CsvLoadError::InvalidStatus { status, row } => {
                assert_eq!(status, "unknown");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidStatus, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_column_is_parse_error() {
        let csv = "label,ir35_status\nA,inside\n";

        assert!(matches!(load_from_str(csv), Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn header_only_is_empty() {
        let engagements = load_from_str("label,day_rate,ir35_status\n").unwrap();

        assert!(engagements.is_empty());
    }
}
