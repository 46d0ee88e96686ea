//! Tabular Data Refinement Library
//!
//! A data cleaning library built with Rust and Polars that repairs missing
//! values and explains every numeric repair it makes.
//!
//! # Overview
//!
//! This library provides:
//!
//! - **Column Classification**: Name-based rules decide whether a column is numeric,
//!   categorical or an identifier
//! - **Missing Value Repair**: Linear interpolation for numeric gaps with a provenance
//!   record per value, mode filling for categorical gaps
//! - **Data Cleaning**: Duplicate removal and normalization of text casing and numeric types
//! - **Reporting**: A validation report rendered as text or written as JSON
//! - **Progress Reporting**: Stage-by-stage progress updates
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use refine_processing::{Refiner, RefineConfig, ReportAssembler};
//!
//! let config = RefineConfig::builder()
//!     .column_rule("score", ColumnKind::Numeric)
//!     .build()?;
//!
//! let refiner = Refiner::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?;
//!
//! let (csv, report) = refiner.clean_data(&std::fs::read_to_string("people.csv")?)?;
//! println!("{}", ReportAssembler.render(&report));
//! ```
//!
//! # Missing Value Repair
//!
//! A numeric gap with a present value on both sides is filled on the straight
//! line between its nearest neighbours:
//!
//! ```text
//! [10, _, _, 40]  ->  [10, 20, 30, 40]
//! ```
//!
//! Gaps at the start or end of a column are handled by the configured
//! [`BoundaryFill`] policy and never produce a record.

pub mod classifier;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod io;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use classifier::ColumnClassifier;
pub use cleaner::{DuplicateRemover, Normalizer};
pub use config::{
    BoundaryFill, ColumnRule, ConfigValidationError, DEFAULT_CATEGORICAL_FALLBACK,
    DEFAULT_PRECISION, RefineConfig, RefineConfigBuilder, default_column_rules,
};
pub use error::{RefineError, Result as RefineResult, ResultExt};
pub use imputers::{CategoricalFiller, InterpolationEngine};
pub use io::{load_table, load_table_from_path, write_table};
pub use pipeline::{
    ClosureProgressReporter, MissingValueCoordinator, ProgressReporter, ProgressUpdate,
    RefineOutcome, RefineStage, Refiner, RefinerBuilder,
};
pub use reporting::{NO_INTERPOLATION_LINE, ReportAssembler, ReportEnvelope, ReportWriter};
pub use types::{
    ColumnKind, DataOverview, DuplicateReport, FinalStatus, InterpolationRecord,
    MissingDataReport, NormalizationReport, ValidationReport,
};
