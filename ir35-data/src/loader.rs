use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ir35_core::{BandTable, RateTable, RatesError, TaxBand, TaxYearRates};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading rate tables.
#[derive(Debug, Error)]
pub enum RatesLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("Failed to open {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown rate table '{0}'")]
    UnknownTable(String),

    #[error("Rows for tax year '{found}' mixed with tax year '{expected}'")]
    MixedTaxYears { expected: String, found: String },

    #[error("No rate records found")]
    Empty,

    #[error("Invalid rates: {0}")]
    InvalidRates(#[from] RatesError),
}

/// A single band row from a rates CSV file.
///
/// - `tax_year`: label of the tax year (e.g., `2025/26`)
/// - `table`: one of `income_tax`, `dividend_tax`, `employee_ni`,
///   `employer_ni`, `corporation_tax`
/// - `min_income`: where the band starts
/// - `max_income`: where the band ends (empty for the top band)
/// - `rate`: the marginal rate as a decimal (e.g., 0.20 for 20%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RateRecord {
    pub tax_year: String,
    pub table: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl RateRecord {
    fn band(&self) -> TaxBand {
        TaxBand {
            from: self.min_income,
            to: self.max_income,
            rate: self.rate,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for replacement band tables from CSV files.
///
/// Tables named in the file replace the matching tables of a base
/// [`TaxYearRates`]; tables the file does not mention are kept. The result is
/// validated before it is returned.
pub struct RatesLoader;

impl RatesLoader {
    /// Parse rate records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RateRecord>, RatesLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RateRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Overlays parsed records onto `base`.
    ///
    /// All rows must share one tax year, which becomes the label of the
    /// returned rates. Bands within a table may appear in any order.
    pub fn apply(
        records: &[RateRecord],
        base: &TaxYearRates,
    ) -> Result<TaxYearRates, RatesLoaderError> {
        let first = records.first().ok_or(RatesLoaderError::Empty)?;
        let tax_year = first.tax_year.trim();

        let mut tables: Vec<(RateTable, Vec<TaxBand>)> = Vec::new();
        for record in records {
            if record.tax_year.trim() != tax_year {
                return Err(RatesLoaderError::MixedTaxYears {
                    expected: tax_year.to_string(),
                    found: record.tax_year.clone(),
                });
            }

            let which = RateTable::parse(record.table.trim())
                .ok_or_else(|| RatesLoaderError::UnknownTable(record.table.clone()))?;

            match tables.iter_mut().find(|(table, _)| *table == which) {
                Some((_, bands)) => bands.push(record.band()),
                None => tables.push((which, vec![record.band()])),
            }
        }

        let mut rates = base.clone();
        rates.tax_year = tax_year.to_string();

        for (which, mut bands) in tables {
            bands.sort_by(|a, b| a.from.cmp(&b.from));
            debug!(table = %which, bands = bands.len(), "replacing rate table");
            rates.set_table(which, BandTable::new(bands));
        }

        rates.validate()?;
        Ok(rates)
    }

    /// Reads a rates CSV from disk and overlays it onto `base`.
    pub fn load_path(
        path: &Path,
        base: &TaxYearRates,
    ) -> Result<TaxYearRates, RatesLoaderError> {
        let file = File::open(path).map_err(|source| RatesLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records = Self::parse(file)?;
        debug!(path = %path.display(), records = records.len(), "parsed rates file");

        Self::apply(&records, base)
    }
}
