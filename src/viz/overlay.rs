use anyhow::{ensure, Result};
use palette::Srgb;

use crate::color::Palette;
use crate::data::model::Experiment;
use crate::sim::HybridizationTrajectory;

// ---------------------------------------------------------------------------
// Fit overlays: measured series + model trace per condition
// ---------------------------------------------------------------------------

/// Numeric content of one fit-overlay trace: the measured series, the model
/// trace, normalized variants of both, and the assigned color.  One value
/// per condition; the drawing layer renders these without touching the
/// aggregated data again.
#[derive(Debug, Clone)]
pub struct FitOverlay {
    pub condition: f64,
    pub color: Srgb<u8>,

    pub time: Vec<f64>,
    pub signal: Vec<f64>,
    pub error: Vec<f64>,
    pub normalized_signal: Vec<f64>,
    pub normalized_error: Vec<f64>,

    pub model_time: Vec<f64>,
    pub model_signal: Vec<f64>,
    pub model_normalized_signal: Vec<f64>,
}

/// Assemble one overlay per condition, pairing the experiment's series with
/// the hybridization model's traces in condition order.
pub fn fit_overlays(
    experiment: &Experiment,
    model: &HybridizationTrajectory,
    palette: &Palette,
) -> Result<Vec<FitOverlay>> {
    let n = experiment.conditions.len();
    ensure!(
        model.time.len() == n && model.fret.len() == n && model.normalized_fret.len() == n,
        "hybridization model covers {} conditions, experiment has {n}",
        model.time.len()
    );
    ensure!(
        palette.len() >= n,
        "palette has {} colors for {n} conditions",
        palette.len()
    );

    let overlays = experiment
        .conditions
        .iter()
        .zip(&experiment.series)
        .enumerate()
        .map(|(i, (&condition, series))| {
            let (normalized_signal, normalized_error) = series.normalized();
            FitOverlay {
                condition,
                // length checked above
                color: palette.get(i).unwrap_or(Srgb::new(0, 0, 0)),
                time: series.time.clone(),
                signal: series.signal.clone(),
                error: series.error.clone(),
                normalized_signal,
                normalized_error,
                model_time: model.time[i].clone(),
                model_signal: model.fret[i].clone(),
                model_normalized_signal: model.normalized_fret[i].clone(),
            }
        })
        .collect();

    Ok(overlays)
}

// ---------------------------------------------------------------------------
// Residual panels
// ---------------------------------------------------------------------------

/// Numeric content of one residual subplot: the residual vector for one
/// condition with its normalized errors and assigned color.
#[derive(Debug, Clone)]
pub struct ResidualPanel {
    pub condition: f64,
    pub color: Srgb<u8>,
    pub time: Vec<f64>,
    pub residual: Vec<f64>,
    pub error: Vec<f64>,
}

/// Assemble one panel per condition from externally computed (fit-layer)
/// normalized residuals.
pub fn residual_panels(
    experiment: &Experiment,
    model: &HybridizationTrajectory,
    residuals: &[Vec<f64>],
    palette: &Palette,
) -> Result<Vec<ResidualPanel>> {
    let n = experiment.conditions.len();
    ensure!(
        residuals.len() == n,
        "{} residual vectors for {n} conditions",
        residuals.len()
    );
    ensure!(
        model.normalized_error.len() == n,
        "hybridization model covers {} conditions, experiment has {n}",
        model.normalized_error.len()
    );
    ensure!(
        palette.len() >= n,
        "palette has {} colors for {n} conditions",
        palette.len()
    );

    let panels = experiment
        .conditions
        .iter()
        .zip(&experiment.series)
        .enumerate()
        .map(|(i, (&condition, series))| ResidualPanel {
            condition,
            color: palette.get(i).unwrap_or(Srgb::new(0, 0, 0)),
            time: series.time.clone(),
            residual: residuals[i].clone(),
            error: model.normalized_error[i].clone(),
        })
        .collect();

    Ok(panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::condition_palette;
    use crate::data::aggregate::aggregate;
    use crate::data::model::{ExperimentParams, Measurement};

    fn experiment() -> Experiment {
        let params = ExperimentParams {
            free_energy: -9.8,
            cooperativity: 1.2,
            probe_total: 2e-6,
            oligomer_len: 20,
            temperature: 298.15,
        };
        let rows = vec![
            Measurement { time: 0.0, signal: 0.9, error: 0.01, condition: 1e-9, rna: 1e-6 },
            Measurement { time: 30.0, signal: 0.5, error: 0.02, condition: 1e-9, rna: 1e-6 },
            Measurement { time: 0.0, signal: 0.9, error: 0.01, condition: 2e-9, rna: 1e-6 },
            Measurement { time: 30.0, signal: 0.3, error: 0.02, condition: 2e-9, rna: 1e-6 },
        ];
        aggregate(&rows, params).unwrap()
    }

    fn model() -> HybridizationTrajectory {
        HybridizationTrajectory {
            time: vec![vec![0.0, 15.0, 30.0]; 2],
            fret: vec![vec![0.9, 0.7, 0.5], vec![0.9, 0.6, 0.3]],
            normalized_fret: vec![vec![1.0, 0.5, 0.0], vec![1.0, 0.5, 0.0]],
            normalized_error: vec![vec![0.02, 0.04], vec![0.02, 0.04]],
        }
    }

    #[test]
    fn one_overlay_per_condition_in_condition_order() {
        let experiment = experiment();
        let palette = condition_palette(2).unwrap();
        let overlays = fit_overlays(&experiment, &model(), &palette).unwrap();

        assert_eq!(overlays.len(), 2);
        assert_eq!(overlays[0].condition, 1e-9);
        assert_eq!(overlays[1].condition, 2e-9);
        assert_eq!(overlays[0].color, palette.get(0).unwrap());
        assert_eq!(overlays[1].signal, vec![0.9, 0.3]);
        assert_eq!(overlays[1].model_signal, vec![0.9, 0.6, 0.3]);
        // normalized measured trace spans the unit interval
        assert_eq!(overlays[0].normalized_signal, vec![1.0, 0.0]);
    }

    #[test]
    fn condition_count_mismatch_is_rejected() {
        let experiment = experiment();
        let mut model = model();
        model.time.pop();
        model.fret.pop();
        model.normalized_fret.pop();
        let palette = condition_palette(2).unwrap();
        assert!(fit_overlays(&experiment, &model, &palette).is_err());
    }

    #[test]
    fn short_palette_is_rejected() {
        let experiment = experiment();
        let palette = condition_palette(1).unwrap();
        assert!(fit_overlays(&experiment, &model(), &palette).is_err());
    }

    #[test]
    fn residual_panels_pair_conditions_with_their_residuals() {
        let experiment = experiment();
        let palette = condition_palette(2).unwrap();
        let residuals = vec![vec![0.01, -0.02], vec![0.03, 0.00]];
        let panels = residual_panels(&experiment, &model(), &residuals, &palette).unwrap();

        assert_eq!(panels.len(), 2);
        assert_eq!(panels[1].residual, vec![0.03, 0.00]);
        assert_eq!(panels[0].error, vec![0.02, 0.04]);

        let too_few = vec![vec![0.01, -0.02]];
        assert!(residual_panels(&experiment, &model(), &too_few, &palette).is_err());
    }
}
