use crate::data::model::{ConditionSeries, Experiment, ExperimentParams, Measurement};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Aggregation: raw measurements → Experiment
// ---------------------------------------------------------------------------

/// Group measurements by their condition key into one [`Experiment`].
///
/// Conditions appear in the output in the order they are first encountered
/// in the input, never sorted: downstream color assignment keys off this
/// order and must stay stable across repeated runs on the same file.  Rows
/// within a condition keep their input order (table-filter, no re-sort).
///
/// A NaN condition key is a fatal [`AnalysisError::MissingConditionKey`];
/// rows are never silently dropped.
pub fn aggregate(
    measurements: &[Measurement],
    params: ExperimentParams,
) -> Result<Experiment, AnalysisError> {
    let mut conditions: Vec<f64> = Vec::new();

    for (row, m) in measurements.iter().enumerate() {
        if m.condition.is_nan() {
            return Err(AnalysisError::MissingConditionKey {
                context: format!("row {row} has no parseable condition value"),
            });
        }
        if !conditions.iter().any(|c| c.to_bits() == m.condition.to_bits()) {
            conditions.push(m.condition);
        }
    }

    let series: Vec<ConditionSeries> = conditions
        .iter()
        .map(|&condition| {
            let mut s = ConditionSeries::default();
            for m in measurements {
                if m.condition.to_bits() == condition.to_bits() {
                    s.time.push(m.time);
                    s.signal.push(m.signal);
                    s.error.push(m.error);
                }
            }
            s
        })
        .collect();

    let rna = measurements.first().map(|m| m.rna).unwrap_or(0.0);

    log::debug!(
        "aggregated {} measurements into {} conditions",
        measurements.len(),
        conditions.len()
    );

    Ok(Experiment {
        conditions,
        series,
        rna,
        params,
    })
}

// ---------------------------------------------------------------------------
// Cross-replicate averaging
// ---------------------------------------------------------------------------

/// Average replicate experiments point-wise into a single experiment.
///
/// The mean and the (population) standard deviation are computed at
/// matching sequence positions, not by matching time values, so every
/// replicate must carry the same condition set and identical per-condition
/// sequence lengths.  A missing condition is
/// [`AnalysisError::MissingConditionKey`]; a length mismatch is
/// [`AnalysisError::SequenceLengthMismatch`] — neither is ever papered over
/// by truncation or padding.
///
/// The averaged series reuses the first replicate's time vectors; its
/// `error` vector holds the cross-replicate standard deviation of the
/// signal (zero for a single replicate).
pub fn average_experiments(
    first: &Experiment,
    rest: &[Experiment],
) -> Result<Experiment, AnalysisError> {
    for (j, replicate) in rest.iter().enumerate() {
        for &condition in &first.conditions {
            let series = replicate.series_for(condition).ok_or_else(|| {
                AnalysisError::MissingConditionKey {
                    context: format!(
                        "condition {condition:e} absent from replicate {}",
                        j + 2
                    ),
                }
            })?;
            let expected = first
                .series_for(condition)
                .map(ConditionSeries::len)
                .unwrap_or(0);
            if series.len() != expected {
                return Err(AnalysisError::SequenceLengthMismatch {
                    condition: format!("{condition:e}"),
                    expected,
                    found: series.len(),
                });
            }
        }
    }

    let n = (rest.len() + 1) as f64;
    let series = first
        .conditions
        .iter()
        .zip(&first.series)
        .map(|(&condition, base)| {
            let mut mean = vec![0.0; base.len()];
            let mut var = vec![0.0; base.len()];

            for k in 0..base.len() {
                let mut sum = base.signal[k];
                for replicate in rest {
                    // presence and length were validated above
                    sum += replicate.series_for(condition).map(|s| s.signal[k]).unwrap_or(0.0);
                }
                mean[k] = sum / n;
            }
            for k in 0..base.len() {
                let mut sq = (base.signal[k] - mean[k]).powi(2);
                for replicate in rest {
                    let v = replicate.series_for(condition).map(|s| s.signal[k]).unwrap_or(0.0);
                    sq += (v - mean[k]).powi(2);
                }
                var[k] = sq / n;
            }

            ConditionSeries {
                time: base.time.clone(),
                signal: mean,
                error: var.into_iter().map(f64::sqrt).collect(),
            }
        })
        .collect();

    Ok(Experiment {
        conditions: first.conditions.clone(),
        series,
        rna: first.rna,
        params: first.params,
    })
}
