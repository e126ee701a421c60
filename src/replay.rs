use std::fmt;

use log::warn;

use crate::error::InvalidMetric;
use crate::state::Classifier;

// ---------------------------------------------------------------------------
// Trace: what happened to each value of a series
// ---------------------------------------------------------------------------

/// Outcome of feeding one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Classified {
        value: f64,
        label: String,
        transition: bool,
    },
    Rejected(InvalidMetric),
}

impl Step {
    pub fn label(&self) -> Option<&str> {
        match self {
            Step::Classified { label, .. } => Some(label.as_str()),
            Step::Rejected(_) => None,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Step::Classified { value, .. } => *value,
            Step::Rejected(err) => err.value,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Classified { value, label, .. } => {
                write!(f, "current value: {value}, current state: {label}")
            }
            Step::Rejected(err) => write!(f, "error: {err}"),
        }
    }
}

/// Per-value steps of one replay plus the number of band-to-band changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub steps: Vec<Step>,
    pub transitions: u64,
}

impl Trace {
    /// Labels of the classified steps, in order. Rejected values are skipped.
    pub fn labels(&self) -> Vec<&str> {
        self.steps.iter().filter_map(Step::label).collect()
    }

    /// Positions in `steps` where the band changed.
    pub fn transition_indices(&self) -> Vec<usize> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, step)| {
                matches!(
                    step,
                    Step::Classified {
                        transition: true,
                        ..
                    }
                )
            })
            .map(|(i, _)| i)
            .collect()
    }

    pub fn errors(&self) -> Vec<InvalidMetric> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                Step::Rejected(err) => Some(*err),
                Step::Classified { .. } => None,
            })
            .collect()
    }
}

/// Feed every value of `series` through `classifier`.
///
/// An invalid value is recorded as [`Step::Rejected`] and replay moves on; the
/// classifier keeps the band it had before that value.
pub fn replay(classifier: &mut Classifier, series: &[f64]) -> Trace {
    let mut trace = Trace {
        steps: Vec::with_capacity(series.len()),
        transitions: 0,
    };

    for &value in series {
        match classifier.observe(value) {
            Ok(obs) => {
                let transition = obs.is_transition();
                if transition {
                    trace.transitions += 1;
                }
                let label = classifier.table().bands()[obs.band].label.clone();
                trace.steps.push(Step::Classified {
                    value,
                    label,
                    transition,
                });
            }
            Err(err) => {
                warn!("skipping value: {err}");
                trace.steps.push(Step::Rejected(err));
            }
        }
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classifier() -> Classifier {
        Classifier::new([(f64::NEG_INFINITY, "low"), (60.0, "mid"), (90.0, "high")]).unwrap()
    }

    #[test]
    fn three_scores_walk_up_the_bands() {
        let mut c = classifier();
        let trace = replay(&mut c, &[50.0, 70.0, 90.0]);
        assert_eq!(trace.labels(), vec!["low", "mid", "high"]);
        assert_eq!(trace.transitions, 2);
        assert_eq!(trace.transition_indices(), vec![1, 2]);
        assert_eq!(trace.transitions, c.transition_count());
    }

    #[test]
    fn nan_is_recorded_and_skipped() {
        let mut c = classifier();
        let trace = replay(&mut c, &[70.0, f64::NAN, 71.0]);
        assert_eq!(trace.labels(), vec!["mid", "mid"]);
        assert_eq!(trace.errors().len(), 1);
        assert!(trace.steps[1].value().is_nan());
        assert_eq!(trace.transitions, 0);
        assert_eq!(c.current_label(), Some("mid"));
    }

    #[test]
    fn replay_continues_from_existing_state() {
        let mut c = classifier();
        c.submit(95.0).unwrap();
        let trace = replay(&mut c, &[92.0, 99.0]);
        assert_eq!(trace.transitions, 0);
        assert!(trace.transition_indices().is_empty());
    }

    #[test]
    fn steps_render_as_report_lines() {
        let mut c = classifier();
        let trace = replay(&mut c, &[50.0, f64::NAN, 90.5]);
        let lines: Vec<String> = trace.steps.iter().map(Step::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "current value: 50, current state: low",
                "error: metric NaN cannot be classified",
                "current value: 90.5, current state: high",
            ]
        );
    }

    #[test]
    fn empty_series_is_an_empty_trace() {
        let mut c = classifier();
        assert_eq!(replay(&mut c, &[]), Trace::default());
        assert_eq!(c.current_label(), None);
    }
}
