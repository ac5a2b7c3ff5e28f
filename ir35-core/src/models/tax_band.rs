use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single slice of a progressive rate schedule.
///
/// `to` is `None` for the top band, which has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    pub from: Decimal,
    pub to: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBand {
    pub fn bounded(
        from: Decimal,
        to: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            from,
            to: Some(to),
            rate,
        }
    }

    pub fn unbounded(
        from: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            from,
            to: None,
            rate,
        }
    }

    /// Width of the band, or `None` for the unbounded top band.
    pub fn width(&self) -> Option<Decimal> {
        self.to.map(|to| to - self.from)
    }
}

/// Errors reported by [`BandTable::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BandTableError {
    #[error("band table has no bands")]
    Empty,

    #[error("first band must start at 0, got {0}")]
    NonZeroStart(Decimal),

    #[error("band {index} starts at {from} but the previous band ends at {expected}")]
    NotContiguous {
        index: usize,
        from: Decimal,
        expected: Decimal,
    },

    #[error("band {index} upper bound {to} is not above its lower bound {from}")]
    NotIncreasing {
        index: usize,
        from: Decimal,
        to: Decimal,
    },

    #[error("band {0} is unbounded but is not the last band")]
    UnboundedBeforeEnd(usize),

    #[error("last band must be unbounded")]
    BoundedTop,

    #[error("band {index} rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },
}

/// An ordered, contiguous progressive rate schedule.
///
/// Bands run from zero upwards with no gaps or overlaps and the final band
/// is unbounded. Tables built by hand or loaded from disk should be checked
/// with [`BandTable::validate`] before use.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir35_core::{BandTable, TaxBand};
///
/// let table = BandTable::new(vec![
///     TaxBand::bounded(dec!(0), dec!(5000), dec!(0)),
///     TaxBand::unbounded(dec!(5000), dec!(0.15)),
/// ]);
///
/// assert!(table.validate().is_ok());
/// assert_eq!(table.top_rate(), dec!(0.15));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTable {
    pub bands: Vec<TaxBand>,
}

impl BandTable {
    pub fn new(bands: Vec<TaxBand>) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &[TaxBand] {
        &self.bands
    }

    /// Marginal rate of the top (unbounded) band, or zero for an empty table.
    pub fn top_rate(&self) -> Decimal {
        self.bands
            .last()
            .map(|band| band.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// The table as it applies once `reduction` of the personal allowance
    /// (the zero-rate first band) has been withdrawn.
    ///
    /// Thresholds below `taper_from` move down by `reduction`. The band that
    /// starts at `taper_from` prices the withdrawal into its rate, so it is
    /// folded into the band below. Bands left with no width are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ir35_core::TaxYearRates;
    ///
    /// let rates = TaxYearRates::uk_2025_26();
    /// let table = rates.income_tax.with_allowance_withdrawn(dec!(12570), dec!(100000));
    ///
    /// assert_eq!(table.bands()[0].rate, dec!(0.20));
    /// assert_eq!(table.bands()[1].to, Some(dec!(125140)));
    /// ```
    pub fn with_allowance_withdrawn(
        &self,
        reduction: Decimal,
        taper_from: Decimal,
    ) -> Self {
        if reduction <= Decimal::ZERO {
            return self.clone();
        }

        let shift = |value: Decimal| {
            if value < taper_from {
                (value - reduction).max(Decimal::ZERO)
            } else {
                value
            }
        };

        let mut bands: Vec<TaxBand> = Vec::with_capacity(self.bands.len());
        for band in &self.bands {
            if band.from == taper_from {
                if let Some(below) = bands.last_mut() {
                    below.to = band.to;
                    continue;
                }
            }

            let from = shift(band.from);
            let to = band.to.map(shift);
            if to.is_some_and(|to| to <= from) {
                continue;
            }
            bands.push(TaxBand {
                from,
                to,
                rate: band.rate,
            });
        }

        Self::new(bands)
    }

    /// Checks the structural invariants of the table.
    ///
    /// # Errors
    ///
    /// Returns [`BandTableError`] if:
    /// - the table is empty
    /// - the first band does not start at zero
    /// - a band does not start where the previous one ended
    /// - a bounded band does not have `to > from`
    /// - an unbounded band appears before the end, or the last band is bounded
    /// - a rate is outside `[0, 1]`
    pub fn validate(&self) -> Result<(), BandTableError> {
        let first = self.bands.first().ok_or(BandTableError::Empty)?;
        if first.from != Decimal::ZERO {
            return Err(BandTableError::NonZeroStart(first.from));
        }

        let last_index = self.bands.len() - 1;
        let mut expected_from = Decimal::ZERO;

        for (index, band) in self.bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(BandTableError::InvalidRate {
                    index,
                    rate: band.rate,
                });
            }
            if band.from != expected_from {
                return Err(BandTableError::NotContiguous {
                    index,
                    from: band.from,
                    expected: expected_from,
                });
            }
            match band.to {
                Some(to) if to <= band.from => {
                    return Err(BandTableError::NotIncreasing {
                        index,
                        from: band.from,
                        to,
                    });
                }
                Some(_) if index == last_index => return Err(BandTableError::BoundedTop),
                Some(to) => expected_from = to,
                None if index != last_index => {
                    return Err(BandTableError::UnboundedBeforeEnd(index));
                }
                None => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn employer_ni() -> BandTable {
        BandTable::new(vec![
            TaxBand::bounded(dec!(0), dec!(5000), dec!(0)),
            TaxBand::unbounded(dec!(5000), dec!(0.15)),
        ])
    }

    #[test]
    fn validate_accepts_contiguous_table() {
        assert_eq!(employer_ni().validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_single_unbounded_band() {
        let table = BandTable::new(vec![TaxBand::unbounded(dec!(0), dec!(0.20))]);

        assert_eq!(table.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_table() {
        assert_eq!(BandTable::new(vec![]).validate(), Err(BandTableError::Empty));
    }

    #[test]
    fn validate_rejects_non_zero_start() {
        let table = BandTable::new(vec![TaxBand::unbounded(dec!(100), dec!(0.20))]);

        assert_eq!(
            table.validate(),
            Err(BandTableError::NonZeroStart(dec!(100)))
        );
    }

    #[test]
    fn validate_rejects_gap_between_bands() {
        let table = BandTable::new(vec![
            TaxBand::bounded(dec!(0), dec!(5000), dec!(0)),
            TaxBand::unbounded(dec!(6000), dec!(0.15)),
        ]);

        assert_eq!(
            table.validate(),
            Err(BandTableError::NotContiguous {
                index: 1,
                from: dec!(6000),
                expected: dec!(5000),
            })
        );
    }

    #[test]
    fn validate_rejects_overlapping_bands() {
        let table = BandTable::new(vec![
            TaxBand::bounded(dec!(0), dec!(5000), dec!(0)),
            TaxBand::unbounded(dec!(4000), dec!(0.15)),
        ]);

        assert!(matches!(
            table.validate(),
            Err(BandTableError::NotContiguous { index: 1, .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_width_band() {
        let table = BandTable::new(vec![
            TaxBand::bounded(dec!(0), dec!(0), dec!(0)),
            TaxBand::unbounded(dec!(0), dec!(0.15)),
        ]);

        assert_eq!(
            table.validate(),
            Err(BandTableError::NotIncreasing {
                index: 0,
                from: dec!(0),
                to: dec!(0),
            })
        );
    }

    #[test]
    fn validate_rejects_unbounded_band_before_end() {
        let table = BandTable::new(vec![
            TaxBand::unbounded(dec!(0), dec!(0)),
            TaxBand::unbounded(dec!(5000), dec!(0.15)),
        ]);

        assert_eq!(
            table.validate(),
            Err(BandTableError::UnboundedBeforeEnd(0))
        );
    }

    #[test]
    fn validate_rejects_bounded_top_band() {
        let table = BandTable::new(vec![TaxBand::bounded(dec!(0), dec!(5000), dec!(0))]);

        assert_eq!(table.validate(), Err(BandTableError::BoundedTop));
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let table = BandTable::new(vec![TaxBand::unbounded(dec!(0), dec!(1.5))]);

        assert_eq!(
            table.validate(),
            Err(BandTableError::InvalidRate {
                index: 0,
                rate: dec!(1.5),
            })
        );
    }

    fn income_tax() -> BandTable {
        BandTable::new(vec![
            TaxBand::bounded(dec!(0), dec!(12570), dec!(0)),
            TaxBand::bounded(dec!(12570), dec!(50270), dec!(0.20)),
            TaxBand::bounded(dec!(50270), dec!(100000), dec!(0.40)),
            TaxBand::bounded(dec!(100000), dec!(125140), dec!(0.60)),
            TaxBand::unbounded(dec!(125140), dec!(0.45)),
        ])
    }

    // =========================================================================
    // with_allowance_withdrawn tests
    // =========================================================================

    #[test]
    fn no_reduction_leaves_table_unchanged() {
        let table = income_tax();

        assert_eq!(table.with_allowance_withdrawn(dec!(0), dec!(100000)), table);
    }

    #[test]
    fn partial_reduction_shifts_lower_thresholds() {
        let table = income_tax().with_allowance_withdrawn(dec!(714.5), dec!(100000));

        assert_eq!(
            table,
            BandTable::new(vec![
                TaxBand::bounded(dec!(0), dec!(11855.5), dec!(0)),
                TaxBand::bounded(dec!(11855.5), dec!(49555.5), dec!(0.20)),
                TaxBand::bounded(dec!(49555.5), dec!(125140), dec!(0.40)),
                TaxBand::unbounded(dec!(125140), dec!(0.45)),
            ])
        );
        assert_eq!(table.validate(), Ok(()));
    }

    #[test]
    fn full_reduction_drops_the_allowance_band() {
        let table = income_tax().with_allowance_withdrawn(dec!(12570), dec!(100000));

        assert_eq!(
            table,
            BandTable::new(vec![
                TaxBand::bounded(dec!(0), dec!(37700), dec!(0.20)),
                TaxBand::bounded(dec!(37700), dec!(125140), dec!(0.40)),
                TaxBand::unbounded(dec!(125140), dec!(0.45)),
            ])
        );
        assert_eq!(table.validate(), Ok(()));
    }

    #[test]
    fn width_is_none_for_top_band() {
        let table = employer_ni();

        assert_eq!(table.bands()[0].width(), Some(dec!(5000)));
        assert_eq!(table.bands()[1].width(), None);
    }
}
