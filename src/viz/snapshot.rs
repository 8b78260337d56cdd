use anyhow::{ensure, Context, Result};
use palette::Srgb;

use crate::color::Palette;
use crate::resample::{interpolate, linspace, nearest_index, GridValues, RegularGrid, ScatterSample};
use crate::sim::{KineticTrajectory, Species};

/// Default times (s) at which population snapshots are taken.
pub const SNAPSHOT_TIMES: [f64; 13] = [
    0.0, 30.0, 60.0, 120.0, 300.0, 600.0, 900.0, 1200.0, 1500.0, 1800.0, 2100.0, 2400.0, 3600.0,
];

// ---------------------------------------------------------------------------
// 2D population bars: per-condition fractions at one snapshot time
// ---------------------------------------------------------------------------

/// One product-length bar: tail length, population fraction, palette color.
#[derive(Debug, Clone, Copy)]
pub struct ProductBar {
    pub len: u32,
    pub fraction: f64,
    pub color: Srgb<u8>,
}

/// Population fractions for one condition at one snapshot time, resolved to
/// the nearest actually-simulated sample.  Fractions are unclamped; values
/// marginally outside [0, 1] from solver round-off pass through.
#[derive(Debug, Clone)]
pub struct PopulationSnapshot {
    pub condition_index: usize,
    pub requested_time: f64,
    /// Simulated time of the resolved sample.
    pub sample_time: f64,
    /// Free enzyme over total enzyme.
    pub enzyme_fraction: f64,
    /// Activated enzyme over total enzyme.
    pub activated_enzyme_fraction: f64,
    /// Full-length substrate over total RNA.
    pub intact_rna_fraction: f64,
    /// Released AMP over its theoretical maximum, `rna * (n - 1)`.
    pub amp_fraction: f64,
    /// Degradation products of length `1..n`, ascending.
    pub products: Vec<ProductBar>,
}

/// Assemble the bar-chart fractions for one condition at `requested_time`.
///
/// `colors` supplies one color per product length (the population palette);
/// short products take the cold end.
pub fn population_snapshot(
    model: &KineticTrajectory,
    condition_index: usize,
    requested_time: f64,
    colors: &Palette,
) -> Result<PopulationSnapshot> {
    ensure!(
        condition_index < model.n_conditions(),
        "condition index {condition_index} out of range ({} conditions)",
        model.n_conditions()
    );
    let n = model.oligomer_len;
    ensure!(n >= 2, "oligomer length {n} leaves no degradation products");

    let e0 = model.enzyme[condition_index];
    ensure!(
        e0 > 0.0,
        "condition {condition_index} has no enzyme; its population snapshot is undefined"
    );

    let t = nearest_index(&model.time[condition_index], requested_time)?;
    let totals = model.total_rna_concentrations();

    let at = |species: Species| -> Result<f64> {
        let traces = model
            .trace(species)
            .with_context(|| format!("model does not track species {species}"))?;
        Ok(traces[condition_index][t])
    };
    let total_at = |species: Species| -> Result<f64> {
        let traces = totals
            .get(&species)
            .with_context(|| format!("model has no total-RNA bucket {species}"))?;
        Ok(traces[condition_index][t])
    };

    let products = (1..n)
        .map(|len| {
            let fraction = total_at(Species::Rna { len })? / model.rna;
            let color = colors
                .get((len - 1) as usize)
                .with_context(|| format!("palette has no color for product length {len}"))?;
            Ok(ProductBar {
                len,
                fraction,
                color,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PopulationSnapshot {
        condition_index,
        requested_time,
        sample_time: model.time[condition_index][t],
        enzyme_fraction: at(Species::Enzyme)? / e0,
        activated_enzyme_fraction: at(Species::ActivatedEnzyme)? / e0,
        intact_rna_fraction: total_at(Species::Rna { len: n })? / model.rna,
        amp_fraction: total_at(Species::Amp)? / (model.rna * f64::from(n - 1)),
        products,
    })
}

// ---------------------------------------------------------------------------
// 3D population surface: scattered fractions resampled onto a fine grid
// ---------------------------------------------------------------------------

/// Enzyme-axis resolution of the resampled surface.
const FINE_ENZYME_POINTS: usize = 10;

/// Scattered and resampled population fractions for one snapshot time:
/// x = product length, y = enzyme concentration (µM), value = fraction.
/// Grid nodes outside the sampled hull stay `None` and render transparent.
#[derive(Debug, Clone)]
pub struct SurfaceSnapshot {
    pub requested_time: f64,
    pub samples: Vec<ScatterSample>,
    pub grid: RegularGrid,
    pub fractions: GridValues,
}

/// Build the fraction surface at `requested_time`.
///
/// The zero-enzyme control (condition 0) carries no degradation signal and
/// is excluded from the scatter, matching the per-condition bar charts.
pub fn surface_snapshot(model: &KineticTrajectory, requested_time: f64) -> Result<SurfaceSnapshot> {
    ensure!(
        model.n_conditions() >= 3,
        "surface needs at least 2 conditions beyond the control, got {}",
        model.n_conditions()
    );
    let n = model.oligomer_len;
    ensure!(n >= 2, "oligomer length {n} leaves nothing to resample");

    let totals = model.total_rna_concentrations();

    let mut samples = Vec::with_capacity((model.n_conditions() - 1) * n as usize);
    for (ei, &enzyme) in model.enzyme.iter().enumerate().skip(1) {
        let t = nearest_index(&model.time[ei], requested_time)?;
        for len in 1..=n {
            let traces = totals
                .get(&Species::Rna { len })
                .with_context(|| format!("model has no total-RNA bucket TA{len}"))?;
            samples.push(ScatterSample {
                x: f64::from(len),
                y: enzyme * 1e6,
                value: traces[ei][t] / model.rna,
            });
        }
    }

    let enzyme_lo = model.enzyme[1] * 1e6;
    let enzyme_hi = model.enzyme[model.enzyme.len() - 1] * 1e6;
    let grid = RegularGrid::from_axes(
        linspace(1.0, f64::from(n), n as usize),
        linspace(enzyme_lo, enzyme_hi, FINE_ENZYME_POINTS),
    );

    let fractions = interpolate(&samples, &grid)?;

    Ok(SurfaceSnapshot {
        requested_time,
        samples,
        grid,
        fractions,
    })
}
