use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ConfigError, InvalidMetric};

// ---------------------------------------------------------------------------
// Band – one labelled interval of the metric space
// ---------------------------------------------------------------------------

/// A half-open interval `[lower_bound, next band's lower_bound)` with a label.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// Inclusive lower bound. `-inf` for the lowest band of a table.
    pub lower_bound: f64,
    pub label: String,
}

impl Band {
    /// Whether this is the catch-all band below the first real threshold.
    pub fn is_floor(&self) -> bool {
        self.lower_bound == f64::NEG_INFINITY
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_floor() {
            write!(f, "{}", self.label)
        } else {
            write!(f, "{} (>= {})", self.label, self.lower_bound)
        }
    }
}

// ---------------------------------------------------------------------------
// BandTable – the ordered, immutable set of bands
// ---------------------------------------------------------------------------

/// Ascending, validated sequence of bands.
///
/// Invariants upheld by every constructor:
/// * at least one band
/// * strictly ascending `lower_bound`, the first one being `-inf`
/// * unique, non-empty labels
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    bands: Vec<Band>,
}

impl BandTable {
    /// Build a table from `(threshold, label)` pairs in any order.
    ///
    /// The entry with the smallest threshold becomes the catch-all band: every
    /// value below the second threshold lands in it, however low.
    pub fn new<I, L>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (f64, L)>,
        L: Into<String>,
    {
        let mut bands: Vec<Band> = entries
            .into_iter()
            .map(|(lower_bound, label)| Band {
                lower_bound,
                label: label.into(),
            })
            .collect();

        if bands.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut seen_labels = BTreeSet::new();
        for band in &bands {
            if band.label.is_empty() {
                return Err(ConfigError::EmptyLabel);
            }
            if band.lower_bound.is_nan() {
                return Err(ConfigError::NanThreshold {
                    label: band.label.clone(),
                });
            }
            if !seen_labels.insert(band.label.as_str()) {
                return Err(ConfigError::DuplicateLabel(band.label.clone()));
            }
        }

        bands.sort_by(|a, b| a.lower_bound.total_cmp(&b.lower_bound));

        // `==` rather than `total_cmp` so that 0.0 and -0.0 collide.
        if let Some(pair) = bands
            .windows(2)
            .find(|pair| pair[0].lower_bound == pair[1].lower_bound)
        {
            return Err(ConfigError::DuplicateThreshold(pair[1].lower_bound));
        }

        bands[0].lower_bound = f64::NEG_INFINITY;

        Ok(BandTable { bands })
    }

    /// The three-band exam score table: below 60 fails, 90 and up is excellent.
    ///
    /// Mirrors the classic student grading of 不及格 (fail), 中等 (medium) and
    /// 优秀 (excellent).
    pub fn score_bands() -> Self {
        BandTable {
            bands: vec![
                Band {
                    lower_bound: f64::NEG_INFINITY,
                    label: "fail".to_string(),
                },
                Band {
                    lower_bound: 60.0,
                    label: "medium".to_string(),
                },
                Band {
                    lower_bound: 90.0,
                    label: "excellent".to_string(),
                },
            ],
        }
    }

    /// Index of the band with the greatest lower bound `<= value`.
    ///
    /// Binary search; never fails for a non-NaN value since the first band
    /// starts at `-inf`.
    pub fn index_for(&self, value: f64) -> Result<usize, InvalidMetric> {
        if value.is_nan() {
            return Err(InvalidMetric { value });
        }
        let above = self.bands.partition_point(|b| b.lower_bound <= value);
        Ok(above - 1)
    }

    /// The band `value` falls into.
    pub fn band_for(&self, value: f64) -> Result<&Band, InvalidMetric> {
        self.index_for(value).map(|i| &self.bands[i])
    }

    pub fn band(&self, index: usize) -> Option<&Band> {
        self.bands.get(index)
    }

    /// Position of the band carrying `label`, if any.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.bands.iter().position(|b| b.label == label)
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bands.iter().map(|b| b.label.as_str())
    }

    /// Real thresholds, i.e. every lower bound except the floor's `-inf`.
    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.bands.iter().skip(1).map(|b| b.lower_bound)
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Always false: an empty table is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl fmt::Display for BandTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, band) in self.bands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.bands.get(i + 1) {
                Some(next) => write!(
                    f,
                    "{}: [{}, {})",
                    band.label, band.lower_bound, next.lower_bound
                )?,
                None => write!(f, "{}: [{}, inf)", band.label, band.lower_bound)?,
            }
        }
        Ok(())
    }
}
