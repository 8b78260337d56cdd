use thiserror::Error;

// ---------------------------------------------------------------------------
// Analysis errors
// ---------------------------------------------------------------------------

/// Unrecoverable failures in the aggregation / resampling core.
///
/// Every variant carries enough context (condition key, lengths, query time,
/// point count) for the caller to abort the current visualization unit
/// cleanly instead of emitting a partially-correct document.  None of these
/// is ever substituted with a default value.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A measurement row without a usable condition key, or a condition
    /// absent from one replicate during cross-replicate averaging.
    #[error("missing condition key: {context}")]
    MissingConditionKey { context: String },

    /// Replicates being averaged must have identical per-condition sequence
    /// lengths; averaging is position-wise, not time-matched.
    #[error("condition {condition}: replicate series lengths differ ({expected} vs {found})")]
    SequenceLengthMismatch {
        condition: String,
        expected: usize,
        found: usize,
    },

    /// Nearest-index lookup has no sensible answer on an empty series.
    #[error("nearest-time lookup on an empty time series (query {query} s)")]
    EmptyTimeSeries { query: f64 },

    /// Fewer than 3 non-collinear scattered points cannot define a
    /// triangulated surface.
    #[error("cannot triangulate scattered input: {reason} ({points} usable points)")]
    DegenerateScatterInput { points: usize, reason: &'static str },

    /// Palette count and stride must both be positive.
    #[error("palette parameters must be positive: count={count}, stride={stride}")]
    InvalidPaletteParameters { count: usize, stride: usize },
}
