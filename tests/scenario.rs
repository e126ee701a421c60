use band_classifier::data::loader::{load_band_table, load_series};
use band_classifier::{
    BandTable, Classifier, ConfigError, Error, SharedClassifier, Step, new_classifier, replay,
};
use pretty_assertions::assert_eq;

fn low_mid_high() -> Classifier {
    new_classifier([(f64::NEG_INFINITY, "low"), (60.0, "mid"), (90.0, "high")]).unwrap()
}

#[test]
fn end_to_end_three_scores() {
    let mut c = low_mid_high();
    let labels: Vec<String> = [50.0, 70.0, 90.0]
        .into_iter()
        .map(|v| c.submit(v).unwrap().to_string())
        .collect();
    assert_eq!(labels, vec!["low", "mid", "high"]);
    assert_eq!(c.transition_count(), 2);
}

#[test]
fn mixed_errors_chain_through_one_type() -> Result<(), Error> {
    let mut c = Classifier::new([(0.0, "cold"), (15.0, "mild"), (25.0, "hot")])?;
    assert_eq!(c.submit(-40.0)?, "cold");
    assert_eq!(c.submit(30.0)?, "hot");

    let err = c.submit(f64::NAN).map(str::to_owned).map_err(Error::from);
    assert!(matches!(err, Err(Error::InvalidMetric(_))));
    assert_eq!(c.current_label(), Some("hot"));

    let empty: Vec<(f64, &str)> = Vec::new();
    assert_eq!(
        Classifier::new(empty).map_err(Error::from).unwrap_err(),
        Error::Config(ConfigError::Empty)
    );
    Ok(())
}

#[test]
fn many_bands_classify_by_greatest_lower_bound() {
    let table = BandTable::new((0..1000).map(|i| (i as f64 * 10.0, format!("band-{i}")))).unwrap();
    let mut c = Classifier::with_table(table);
    assert_eq!(c.submit(-5.0).unwrap(), "band-0");
    assert_eq!(c.submit(9.99).unwrap(), "band-0");
    assert_eq!(c.submit(10.0).unwrap(), "band-1");
    assert_eq!(c.submit(5_555.0).unwrap(), "band-555");
    assert_eq!(c.submit(1e12).unwrap(), "band-999");
}

#[test]
fn files_drive_a_replay() {
    let dir = tempfile::tempdir().unwrap();
    let bands = dir.path().join("bands.csv");
    std::fs::write(&bands, "threshold,label\n,fail\n60,medium\n90,excellent\n").unwrap();
    let series = dir.path().join("scores.json");
    std::fs::write(&series, "[50, 70, 90, 90, 40]").unwrap();

    let mut c = Classifier::with_table(load_band_table(&bands).unwrap());
    let trace = replay(&mut c, &load_series(&series).unwrap());

    assert_eq!(
        trace.labels(),
        vec!["fail", "medium", "excellent", "excellent", "fail"]
    );
    assert_eq!(trace.transitions, 3);
    assert!(matches!(
        trace.steps[3],
        Step::Classified {
            transition: false,
            ..
        }
    ));
}

#[test]
fn shared_handle_sees_the_same_state() {
    let shared = SharedClassifier::new(low_mid_high());
    let writer = shared.clone();
    std::thread::spawn(move || {
        writer.submit(75.0).unwrap();
    })
    .join()
    .unwrap();
    assert_eq!(shared.current_label().as_deref(), Some("mid"));
    assert!(shared.observe(95.0).unwrap().is_transition());
    assert_eq!(shared.transition_count(), 1);
}
