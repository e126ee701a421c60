//! Threshold-driven state classifier.
//!
//! A [`BandTable`] splits the real line into labelled half-open bands; a
//! [`Classifier`] holds the band of the latest submitted metric and moves
//! between bands as values cross thresholds.
//!
//! ```
//! use band_classifier::Classifier;
//!
//! let mut c = Classifier::new([(f64::NEG_INFINITY, "low"), (60.0, "mid"), (90.0, "high")])?;
//! assert_eq!(c.current_label(), None);
//! assert_eq!(c.submit(70.0)?, "mid");
//! assert_eq!(c.submit(90.0)?, "high");
//! # Ok::<(), band_classifier::Error>(())
//! ```

pub mod data;
pub mod error;
pub mod replay;
pub mod state;

pub use data::model::{Band, BandTable};
pub use error::{ConfigError, Error, InvalidMetric};
pub use replay::{Step, Trace, replay};
pub use state::{Classifier, Observation, SharedClassifier, new_classifier};
