//! Aggregation and resampling pipeline for time-resolved FRET kinetics
//! experiments.
//!
//! ```text
//!  raw replicate table
//!        │
//!        ▼
//!   ┌───────────┐      ┌──────────────────┐
//!   │   data     │      │  sim (interface)  │  solver trajectories
//!   └───────────┘      └──────────────────┘
//!        │                      │
//!        ▼                      ▼
//!   ┌──────────────────────────────────┐
//!   │  viz: overlays, bars, surfaces    │──► drawing layer (out of scope)
//!   └──────────────────────────────────┘
//!          │                │
//!   ┌────────────┐   ┌────────────┐
//!   │  resample   │   │   color     │
//!   └────────────┘   └────────────┘
//! ```
//!
//! The ODE solver, the hybridization thermodynamics, and all drawing live
//! outside this crate; `sim` carries their output across the boundary and
//! `viz` hands finished numeric content back.

pub mod color;
pub mod data;
pub mod error;
pub mod resample;
pub mod sim;
pub mod viz;

pub use error::AnalysisError;
