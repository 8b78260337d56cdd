use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{ExperimentParams, Measurement};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load replicate measurements from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row `Time, FRET, Error, Enzyme, RNA`
/// * `.json` – records-oriented array, one object per row with the same keys
pub fn load_measurements(path: &Path) -> Result<Vec<Measurement>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            read_measurements_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_measurements_json(&text)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Load the experiment-level parameter mapping from a JSON file:
/// `{"dGo": ..., "alpha": ..., "QT": ..., "n": ..., "Temperature": ...}`.
pub fn load_params(path: &Path) -> Result<ExperimentParams> {
    let text = std::fs::read_to_string(path).context("reading parameter file")?;
    serde_json::from_str(&text).context("parsing experiment parameters")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

const TIME_COL: &str = "Time";
const SIGNAL_COL: &str = "FRET";
const ERROR_COL: &str = "Error";
const CONDITION_COL: &str = "Enzyme";
const RNA_COL: &str = "RNA";

/// Parse the replicate table from any CSV reader.
///
/// A missing `Enzyme` column, or an `Enzyme` cell that does not parse as a
/// number, is a fatal [`AnalysisError::MissingConditionKey`]; rows are never
/// silently dropped.
pub fn read_measurements_csv(input: impl Read) -> Result<Vec<Measurement>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = |name: &str| headers.iter().position(|h| h == name);

    let condition_idx = col(CONDITION_COL).ok_or_else(|| AnalysisError::MissingConditionKey {
        context: format!("CSV has no '{CONDITION_COL}' column"),
    })?;
    let time_idx = col(TIME_COL).with_context(|| format!("CSV missing '{TIME_COL}' column"))?;
    let signal_idx =
        col(SIGNAL_COL).with_context(|| format!("CSV missing '{SIGNAL_COL}' column"))?;
    let error_idx = col(ERROR_COL).with_context(|| format!("CSV missing '{ERROR_COL}' column"))?;
    let rna_idx = col(RNA_COL).with_context(|| format!("CSV missing '{RNA_COL}' column"))?;

    let mut measurements = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let condition: f64 = field(condition_idx).parse().map_err(|_| {
            AnalysisError::MissingConditionKey {
                context: format!(
                    "CSV row {row_no}: '{}' is not a valid condition value",
                    field(condition_idx)
                ),
            }
        })?;

        measurements.push(Measurement {
            time: parse_number(field(time_idx), row_no, TIME_COL)?,
            signal: parse_number(field(signal_idx), row_no, SIGNAL_COL)?,
            error: parse_number(field(error_idx), row_no, ERROR_COL)?,
            condition,
            rna: parse_number(field(rna_idx), row_no, RNA_COL)?,
        });
    }

    log::debug!("read {} measurement rows", measurements.len());
    Ok(measurements)
}

fn parse_number(s: &str, row: usize, col: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Time": 0.0, "FRET": 0.91, "Error": 0.01, "Enzyme": 1e-9, "RNA": 1e-6 },
///   ...
/// ]
/// ```
pub fn parse_measurements_json(text: &str) -> Result<Vec<Measurement>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut measurements = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let number = |key: &str| -> Result<f64> {
            obj.get(key)
                .and_then(JsonValue::as_f64)
                .with_context(|| format!("Row {i}: missing or non-numeric '{key}'"))
        };

        let condition = obj
            .get(CONDITION_COL)
            .and_then(JsonValue::as_f64)
            .ok_or_else(|| AnalysisError::MissingConditionKey {
                context: format!("JSON row {i}: missing or non-numeric '{CONDITION_COL}'"),
            })?;

        measurements.push(Measurement {
            time: number(TIME_COL)?,
            signal: number(SIGNAL_COL)?,
            error: number(ERROR_COL)?,
            condition,
            rna: number(RNA_COL)?,
        });
    }

    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_parse_in_order() {
        let csv = "\
Time,FRET,Error,Enzyme,RNA
0.0,0.91,0.01,2e-9,1e-6
30.0,0.85,0.02,2e-9,1e-6
0.0,0.90,0.01,1e-9,1e-6
";
        let rows = read_measurements_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].signal, 0.91);
        assert_eq!(rows[1].time, 30.0);
        assert_eq!(rows[2].condition, 1e-9);
    }

    #[test]
    fn csv_missing_condition_column_is_fatal() {
        let csv = "Time,FRET,Error,RNA\n0.0,0.91,0.01,1e-6\n";
        let err = read_measurements_csv(csv.as_bytes()).unwrap_err();
        let err = err.downcast::<AnalysisError>().unwrap();
        assert!(matches!(err, AnalysisError::MissingConditionKey { .. }));
    }

    #[test]
    fn csv_unparseable_condition_cell_is_fatal() {
        let csv = "Time,FRET,Error,Enzyme,RNA\n0.0,0.91,0.01,not-a-number,1e-6\n";
        let err = read_measurements_csv(csv.as_bytes()).unwrap_err();
        let err = err.downcast::<AnalysisError>().unwrap();
        assert!(matches!(err, AnalysisError::MissingConditionKey { .. }));
    }

    #[test]
    fn json_records_parse() {
        let json = r#"[
            {"Time": 0.0, "FRET": 0.91, "Error": 0.01, "Enzyme": 2e-9, "RNA": 1e-6},
            {"Time": 30.0, "FRET": 0.85, "Error": 0.02, "Enzyme": 2e-9, "RNA": 1e-6}
        ]"#;
        let rows = parse_measurements_json(json).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].signal, 0.85);
    }

    #[test]
    fn json_row_without_condition_is_fatal() {
        let json = r#"[{"Time": 0.0, "FRET": 0.91, "Error": 0.01, "RNA": 1e-6}]"#;
        let err = parse_measurements_json(json).unwrap_err();
        let err = err.downcast::<AnalysisError>().unwrap();
        assert!(matches!(err, AnalysisError::MissingConditionKey { .. }));
    }
}
