use std::sync::Arc;

use log::{debug, trace};
use parking_lot::Mutex;

use crate::data::model::{Band, BandTable};
use crate::error::{ConfigError, InvalidMetric};

// ---------------------------------------------------------------------------
// Observation – the outcome of one submission
// ---------------------------------------------------------------------------

/// What a single submission did to the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// The submitted metric.
    pub value: f64,
    /// Index of the band the value fell into (now the current band).
    pub band: usize,
    /// Index of the band held before the call, `None` if unclassified.
    pub previous: Option<usize>,
}

impl Observation {
    /// Whether the value moved the classifier from one band to another.
    pub fn is_transition(&self) -> bool {
        matches!(self.previous, Some(prev) if prev != self.band)
    }

    /// Whether this was the submission that left the unclassified state.
    pub fn is_first_classification(&self) -> bool {
        self.previous.is_none()
    }
}

// ---------------------------------------------------------------------------
// Classifier state
// ---------------------------------------------------------------------------

/// Tracks one subject's current band. Single-owner; see [`SharedClassifier`]
/// for concurrent use.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: BandTable,

    /// Index into `table`. None until the first successful submission.
    current: Option<usize>,

    /// Band-to-band changes since construction. Leaving the unclassified
    /// state is not counted.
    transitions: u64,
}

impl Classifier {
    /// Build a classifier from `(threshold, label)` pairs.
    pub fn new<I, L>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (f64, L)>,
        L: Into<String>,
    {
        Ok(Self::with_table(BandTable::new(entries)?))
    }

    /// Wrap an already validated table. Starts unclassified.
    pub fn with_table(table: BandTable) -> Self {
        Self {
            table,
            current: None,
            transitions: 0,
        }
    }

    /// Classify `value`, update the current band and return its label.
    ///
    /// The label is returned whether or not the band changed. On
    /// [`InvalidMetric`] nothing is modified.
    pub fn submit(&mut self, value: f64) -> Result<&str, InvalidMetric> {
        let obs = self.observe(value)?;
        Ok(self.table.bands()[obs.band].label.as_str())
    }

    /// Like [`submit`](Self::submit) but reports the previous band as well.
    pub fn observe(&mut self, value: f64) -> Result<Observation, InvalidMetric> {
        let band = self.table.index_for(value)?;
        let previous = self.current;
        let obs = Observation {
            value,
            band,
            previous,
        };

        if obs.is_transition() || obs.is_first_classification() {
            self.current = Some(band);
            if obs.is_transition() {
                self.transitions += 1;
            }
            debug!(
                "transition {} -> {} at {value}",
                previous
                    .map(|i| self.table.bands()[i].label.as_str())
                    .unwrap_or("<unclassified>"),
                self.table.bands()[band].label,
            );
        } else {
            trace!("{value} stays in {}", self.table.bands()[band].label);
        }
        Ok(obs)
    }

    /// Label of the current band, `None` before the first submission.
    pub fn current_label(&self) -> Option<&str> {
        self.current_band().map(|b| b.label.as_str())
    }

    pub fn current_band(&self) -> Option<&Band> {
        self.current.and_then(|i| self.table.band(i))
    }

    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    pub fn table(&self) -> &BandTable {
        &self.table
    }
}

/// Free-function constructor, equivalent to [`Classifier::new`].
pub fn new_classifier<I, L>(entries: I) -> Result<Classifier, ConfigError>
where
    I: IntoIterator<Item = (f64, L)>,
    L: Into<String>,
{
    Classifier::new(entries)
}

// ---------------------------------------------------------------------------
// SharedClassifier – lock-serialized handle
// ---------------------------------------------------------------------------

/// Cloneable handle to one classifier shared between threads.
///
/// Every call takes the lock, so a `submit` (read, lookup, write) is atomic
/// with respect to other submits and reads.
#[derive(Debug, Clone)]
pub struct SharedClassifier {
    inner: Arc<Mutex<Classifier>>,
}

impl SharedClassifier {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            inner: Arc::new(Mutex::new(classifier)),
        }
    }

    pub fn submit(&self, value: f64) -> Result<String, InvalidMetric> {
        self.inner.lock().submit(value).map(str::to_owned)
    }

    pub fn observe(&self, value: f64) -> Result<Observation, InvalidMetric> {
        self.inner.lock().observe(value)
    }

    pub fn current_label(&self) -> Option<String> {
        self.inner.lock().current_label().map(str::to_owned)
    }

    pub fn transition_count(&self) -> u64 {
        self.inner.lock().transition_count()
    }

    /// Run `f` with the lock held, for multi-step reads.
    pub fn with<R>(&self, f: impl FnOnce(&Classifier) -> R) -> R {
        let guard = self.inner.lock();
        f(&*guard)
    }
}

impl From<Classifier> for SharedClassifier {
    fn from(classifier: Classifier) -> Self {
        Self::new(classifier)
    }
}
