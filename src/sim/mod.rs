/// Model-collaborator interface.
///
/// The ODE kinetic solver and the two-state hybridization model live
/// outside this crate; these types carry their already-solved trajectories
/// across the boundary, with species labels classified into [`Species`]
/// tags exactly once at ingestion.

pub mod species;
pub mod trajectory;

pub use species::Species;
pub use trajectory::{ConcentrationTraces, HybridizationTrajectory, KineticTrajectory};
