//! # Pricer Risk (L4: Application)
//!
//! Scenario sensitivity for the American option pricer.
//!
//! This crate provides:
//! - Axis generation for holding-day and spot-move grids (`grid`)
//! - The sensitivity table and its builder (`table`)
//! - Rayon worker pool configuration (`parallel`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  grid/      - day and move axes         │
//! │  table/     - SensitivityTable, builder │
//! │  parallel/  - Rayon utilities           │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  Engines, aggregation, pipeline         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Every cell re-runs the full pricing pipeline on its own copy of the base
//! scenario. A cell that fails is left empty; only an unusable grid or a
//! pool that cannot start aborts the build.
//!
//! ## Example
//!
//! ```
//! use pricer_risk::grid::{days_axis, move_axis};
//!
//! assert_eq!(days_axis(30).unwrap().len(), 16);
//! assert_eq!(move_axis(0.05).unwrap().len(), 11);
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod grid;
pub mod parallel;
pub mod table;

pub use error::{GridConfigurationError, TableError};
pub use grid::GridAxes;
pub use parallel::ParallelConfig;
pub use table::{SensitivityTable, TableBuilder};
