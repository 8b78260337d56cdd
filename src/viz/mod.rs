/// Numeric figure content.
///
/// Everything the drawing layer needs, with no drawing in it: fit overlays
/// and residual panels per condition, population bar fractions at snapshot
/// times, and the resampled 3D fraction surface.  The rendering boundary is
/// exactly these types; this crate guarantees their numeric content, not
/// the document that gets drawn from them.

pub mod overlay;
pub mod snapshot;

pub use overlay::{fit_overlays, residual_panels, FitOverlay, ResidualPanel};
pub use snapshot::{
    population_snapshot, surface_snapshot, PopulationSnapshot, ProductBar, SurfaceSnapshot,
    SNAPSHOT_TIMES,
};
