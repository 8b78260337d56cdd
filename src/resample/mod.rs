/// Irregular-to-regular resampling.
///
/// [`nearest::nearest_index`] resolves a requested wall-clock time to the
/// closest actually-simulated sample; [`grid::interpolate`] reconstructs a
/// fraction surface on a regular mesh from sparse scattered samples.  Both
/// are pure functions over immutable snapshots.

pub mod grid;
pub mod nearest;

pub use grid::{interpolate, linspace, GridValues, RegularGrid, ScatterSample};
pub use nearest::nearest_index;
