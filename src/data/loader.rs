use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::BandTable;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a band table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `{ "bands": [{ "threshold": 60, "label": "mid" }, ...] }`
/// * `.csv`  – header `threshold,label`
///
/// In both, a missing threshold marks the catch-all band.
pub fn load_band_table(path: &Path) -> Result<BandTable> {
    let table = match extension(path).as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading band table JSON")?;
            parse_band_table_json(&text)?
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening band table CSV")?;
            parse_band_table_csv(file)?
        }
        other => bail!("Unsupported band table extension: .{other}"),
    };
    info!("loaded {} bands from {}", table.len(), path.display());
    Ok(table)
}

/// Load a metric series from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[50, 70.5, 90, ...]`
/// * `.csv`  – a `value` column, or the first column if there is none
pub fn load_series(path: &Path) -> Result<Vec<f64>> {
    let series = match extension(path).as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading series JSON")?;
            parse_series_json(&text)?
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening series CSV")?;
            parse_series_csv(file)?
        }
        other => bail!("Unsupported series extension: .{other}"),
    };
    info!("loaded {} values from {}", series.len(), path.display());
    Ok(series)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Band table parsing
// ---------------------------------------------------------------------------

/// One row of a band table file. `threshold: None` is the catch-all band.
#[derive(Debug, Deserialize)]
struct BandEntry {
    #[serde(default)]
    threshold: Option<f64>,
    label: String,
}

#[derive(Debug, Deserialize)]
struct BandTableFile {
    bands: Vec<BandEntry>,
}

fn build_table(entries: Vec<BandEntry>) -> Result<BandTable> {
    let floors = entries.iter().filter(|e| e.threshold.is_none()).count();
    if floors > 1 {
        bail!("{floors} bands have no threshold; at most one catch-all band is allowed");
    }
    let table = BandTable::new(
        entries
            .into_iter()
            .map(|e| (e.threshold.unwrap_or(f64::NEG_INFINITY), e.label)),
    )
    .context("invalid band table")?;
    Ok(table)
}

/// Parse the JSON band table layout:
///
/// ```json
/// {
///   "bands": [
///     { "label": "fail" },
///     { "threshold": 60, "label": "medium" },
///     { "threshold": 90, "label": "excellent" }
///   ]
/// }
/// ```
pub fn parse_band_table_json(text: &str) -> Result<BandTable> {
    let file: BandTableFile = serde_json::from_str(text).context("parsing band table JSON")?;
    build_table(file.bands)
}

/// CSV layout: header `threshold,label`; an empty threshold cell is the
/// catch-all band.
pub fn parse_band_table_csv<R: Read>(reader: R) -> Result<BandTable> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut entries = Vec::new();
    for (row_no, result) in reader.deserialize::<BandEntry>().enumerate() {
        let entry = result.with_context(|| format!("band table CSV row {row_no}"))?;
        entries.push(entry);
    }
    build_table(entries)
}

// ---------------------------------------------------------------------------
// Series parsing
// ---------------------------------------------------------------------------

/// Parse a top-level JSON array of numbers.
pub fn parse_series_json(text: &str) -> Result<Vec<f64>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing series JSON")?;
    let values = root.as_array().context("Expected top-level JSON array")?;

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64()
                .with_context(|| format!("series[{i}]: not a number"))
        })
        .collect()
}

/// Parse a CSV series. Reads the `value` column when present, otherwise the
/// first column. The first row is a header only if it names a `value` column
/// or its first cell is not a number, so a bare list of numbers loses nothing.
/// Cells such as `NaN` are kept; rejecting them is the classifier's job.
pub fn parse_series_csv<R: Read>(reader: R) -> Result<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = reader.records().enumerate().peekable();

    let mut idx = 0;
    if let Some((_, Ok(first))) = records.peek() {
        if let Some(pos) = first.iter().position(|h| h == "value") {
            idx = pos;
            records.next();
        } else if first.get(0).is_some_and(|c| c.parse::<f64>().is_err()) {
            records.next();
        }
    }

    let mut series = Vec::new();
    for (row_no, result) in records {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = record
            .get(idx)
            .with_context(|| format!("CSV row {row_no}: missing column {idx}"))?;
        let value = cell
            .parse::<f64>()
            .with_context(|| format!("CSV row {row_no}: '{cell}' is not a number"))?;
        series.push(value);
    }
    Ok(series)
}
