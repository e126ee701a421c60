use thiserror::Error;

// ---------------------------------------------------------------------------
// Construction errors
// ---------------------------------------------------------------------------

/// A band table that cannot be built. No classifier is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("band table needs at least one band")]
    Empty,
    #[error("duplicate threshold {0}")]
    DuplicateThreshold(f64),
    #[error("duplicate label '{0}'")]
    DuplicateLabel(String),
    #[error("threshold for band '{label}' is NaN")]
    NanThreshold { label: String },
    #[error("band label must not be empty")]
    EmptyLabel,
}

// ---------------------------------------------------------------------------
// Submission errors
// ---------------------------------------------------------------------------

/// A metric that cannot be ordered against the thresholds (NaN).
///
/// Recoverable: the classifier is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("metric {value} cannot be classified")]
pub struct InvalidMetric {
    pub value: f64,
}

/// Either failure, for callers that build and submit in one `?` chain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    InvalidMetric(#[from] InvalidMetric),
}
