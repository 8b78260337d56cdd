/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse table → Vec<Measurement>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group by condition → Experiment
///   └───────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ Experiment  │  ConditionSeries per condition, first-seen order
///   └────────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
