use std::collections::BTreeMap;

use anyhow::{bail, ensure, Context, Result};

use super::species::Species;

// ---------------------------------------------------------------------------
// KineticTrajectory – ingested kinetic-solver output
// ---------------------------------------------------------------------------

/// Per-species concentration traces: `traces[condition][time index]`, in
/// the experiment's condition order.
pub type ConcentrationTraces = Vec<Vec<f64>>;

/// Kinetic-solver output for one replicate, ingested at the collaborator
/// boundary.  The solver itself is outside this crate; this type only
/// carries its trajectories, with species labels classified once at
/// construction.
#[derive(Debug, Clone)]
pub struct KineticTrajectory {
    /// One simulated time vector per condition.
    pub time: Vec<Vec<f64>>,
    /// Concentration traces per species, parallel to `time`.
    pub concentrations: BTreeMap<Species, ConcentrationTraces>,
    /// Initial enzyme concentration per condition (M).
    pub enzyme: Vec<f64>,
    /// Initial RNA concentration (M).
    pub rna: f64,
    /// Oligomer (poly(A) tail) length n.
    pub oligomer_len: u32,
}

impl KineticTrajectory {
    /// Ingest raw solver output keyed by label strings.
    ///
    /// Every label is classified exactly once; an unknown label or a trace
    /// whose condition count disagrees with `time` aborts ingestion.
    pub fn from_labeled(
        time: Vec<Vec<f64>>,
        raw: BTreeMap<String, ConcentrationTraces>,
        enzyme: Vec<f64>,
        rna: f64,
        oligomer_len: u32,
    ) -> Result<Self> {
        ensure!(
            enzyme.len() == time.len(),
            "{} enzyme concentrations for {} condition time vectors",
            enzyme.len(),
            time.len()
        );

        let mut concentrations = BTreeMap::new();
        for (label, traces) in raw {
            let species = Species::parse(&label)
                .with_context(|| format!("unknown species label '{label}'"))?;
            if traces.len() != time.len() {
                bail!(
                    "species '{label}': {} condition traces for {} conditions",
                    traces.len(),
                    time.len()
                );
            }
            concentrations.insert(species, traces);
        }

        Ok(KineticTrajectory {
            time,
            concentrations,
            enzyme,
            rna,
            oligomer_len,
        })
    }

    /// Number of conditions.
    pub fn n_conditions(&self) -> usize {
        self.time.len()
    }

    /// Trace set for one species, if the model tracks it.
    pub fn trace(&self, species: Species) -> Option<&ConcentrationTraces> {
        self.concentrations.get(&species)
    }

    /// Aggregate raw per-state traces into total-RNA buckets.
    ///
    /// Free and enzyme-bound RNA of the same tail length sum into one
    /// `Species::Rna { len }` bucket; AMP passes through under
    /// `Species::Amp`.  Enzyme states do not contribute.
    pub fn total_rna_concentrations(&self) -> BTreeMap<Species, ConcentrationTraces> {
        let mut totals: BTreeMap<Species, ConcentrationTraces> = BTreeMap::new();

        for (species, traces) in &self.concentrations {
            let bucket = match species {
                Species::Amp => Species::Amp,
                Species::Rna { len } | Species::EnzymeRna { len } => Species::Rna { len: *len },
                Species::Enzyme | Species::ActivatedEnzyme => continue,
            };
            match totals.get_mut(&bucket) {
                Some(total) => {
                    for (sum, add) in total.iter_mut().zip(traces) {
                        for (s, a) in sum.iter_mut().zip(add) {
                            *s += a;
                        }
                    }
                }
                None => {
                    totals.insert(bucket, traces.clone());
                }
            }
        }
        totals
    }
}

// ---------------------------------------------------------------------------
// HybridizationTrajectory – simulated FRET traces
// ---------------------------------------------------------------------------

/// Hybridization-model output for one replicate: simulated FRET and its
/// normalized variant per condition, plus the measurement errors scaled
/// into normalized units.  Produced by the thermodynamics collaborator,
/// consumed by fit-overlay and residual assembly.
#[derive(Debug, Clone)]
pub struct HybridizationTrajectory {
    /// One simulated time vector per condition.
    pub time: Vec<Vec<f64>>,
    /// Simulated FRET per condition.
    pub fret: Vec<Vec<f64>>,
    /// Simulated FRET normalized onto the unit interval.
    pub normalized_fret: Vec<Vec<f64>>,
    /// Measurement errors scaled by the same normalization range.
    pub normalized_error: Vec<Vec<f64>>,
}
