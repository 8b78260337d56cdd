use serde::Deserialize;

// ---------------------------------------------------------------------------
// Measurement – one row of the replicate table
// ---------------------------------------------------------------------------

/// One replicate's raw observation at a single time point.
///
/// Immutable once parsed; produced by the loader, consumed by the
/// aggregator.  `condition` is the grouping key (initial enzyme
/// concentration, M) and `rna` the initial substrate concentration (M).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Time since mixing (s).
    pub time: f64,
    /// Measured FRET signal.
    pub signal: f64,
    /// Per-point standard deviation of the signal.
    pub error: f64,
    /// Condition key: initial enzyme concentration (M).
    pub condition: f64,
    /// Initial RNA concentration (M).
    pub rna: f64,
}

// ---------------------------------------------------------------------------
// ConditionSeries – one condition's time / signal / error vectors
// ---------------------------------------------------------------------------

/// Per-condition time series: three parallel vectors of equal length, in the
/// order the rows appeared in the source table.  Rows are collected by
/// table-filter, never re-sorted; callers relying on chronological order must
/// ensure the source is sorted by time within each condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSeries {
    pub time: Vec<f64>,
    pub signal: Vec<f64>,
    pub error: Vec<f64>,
}

impl ConditionSeries {
    /// Number of time points.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Min/max-normalized signal together with the error vector scaled by
    /// the same range.  A flat trace normalizes to all zeros rather than
    /// dividing by a vanishing range.
    pub fn normalized(&self) -> (Vec<f64>, Vec<f64>) {
        let min = self.signal.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.signal.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        if !range.is_finite() || range.abs() < f64::EPSILON {
            return (vec![0.0; self.signal.len()], vec![0.0; self.error.len()]);
        }
        let signal = self.signal.iter().map(|&s| (s - min) / range).collect();
        let error = self.error.iter().map(|&e| e / range).collect();
        (signal, error)
    }
}

// ---------------------------------------------------------------------------
// ExperimentParams – experiment-level scalars
// ---------------------------------------------------------------------------

/// Experiment-level scalar parameters, supplied once at construction from
/// the configuration mapping and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ExperimentParams {
    /// Hybridization standard free energy (kcal/mol).
    #[serde(rename = "dGo")]
    pub free_energy: f64,
    /// Cooperativity factor.
    #[serde(rename = "alpha")]
    pub cooperativity: f64,
    /// Total probe concentration (M).
    #[serde(rename = "QT")]
    pub probe_total: f64,
    /// Oligomer (poly(A) tail) length n.
    #[serde(rename = "n")]
    pub oligomer_len: u32,
    /// Temperature (K).
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

// ---------------------------------------------------------------------------
// Experiment – the aggregated dataset
// ---------------------------------------------------------------------------

/// One aggregated experiment: the distinct condition values in first-seen
/// order, one [`ConditionSeries`] per condition, and the experiment-level
/// parameters.  Built once at aggregation time and read-only afterward; a
/// change in source data means a wholesale rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    /// Distinct condition values, first-seen order.
    pub conditions: Vec<f64>,
    /// One series per condition, parallel to `conditions`.
    pub series: Vec<ConditionSeries>,
    /// Initial RNA concentration (M), shared across conditions.
    pub rna: f64,
    pub params: ExperimentParams,
}

impl Experiment {
    /// Series for an exact condition value, if present.
    pub fn series_for(&self, condition: f64) -> Option<&ConditionSeries> {
        self.conditions
            .iter()
            .position(|c| c.to_bits() == condition.to_bits())
            .map(|i| &self.series[i])
    }

    /// Largest time value across all conditions, 0.0 if there is no data.
    pub fn max_time(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.time.iter().cloned())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ExperimentParams {
        ExperimentParams {
            free_energy: -9.8,
            cooperativity: 1.2,
            probe_total: 2e-6,
            oligomer_len: 20,
            temperature: 298.15,
        }
    }

    #[test]
    fn normalized_maps_trace_onto_unit_interval() {
        let series = ConditionSeries {
            time: vec![0.0, 10.0, 20.0],
            signal: vec![0.2, 0.6, 1.0],
            error: vec![0.04, 0.04, 0.08],
        };
        let (signal, error) = series.normalized();
        assert_eq!(signal, vec![0.0, 0.5, 1.0]);
        assert_eq!(error, vec![0.05, 0.05, 0.1]);
    }

    #[test]
    fn normalized_flat_trace_is_all_zeros() {
        let series = ConditionSeries {
            time: vec![0.0, 10.0],
            signal: vec![0.4, 0.4],
            error: vec![0.01, 0.01],
        };
        let (signal, error) = series.normalized();
        assert_eq!(signal, vec![0.0, 0.0]);
        assert_eq!(error, vec![0.0, 0.0]);
    }

    #[test]
    fn series_for_matches_exact_condition_value() {
        let experiment = Experiment {
            conditions: vec![2e-9, 1e-9],
            series: vec![
                ConditionSeries {
                    time: vec![0.0],
                    signal: vec![0.9],
                    error: vec![0.01],
                },
                ConditionSeries::default(),
            ],
            rna: 1e-6,
            params: params(),
        };
        assert_eq!(experiment.series_for(2e-9).unwrap().signal, vec![0.9]);
        assert!(experiment.series_for(3e-9).is_none());
    }

    #[test]
    fn experiment_params_deserialize_from_config_names() {
        let json = r#"{"dGo": -9.8, "alpha": 1.2, "QT": 2e-6, "n": 20, "Temperature": 298.15}"#;
        let p: ExperimentParams = serde_json::from_str(json).unwrap();
        assert_eq!(p, params());
    }
}
