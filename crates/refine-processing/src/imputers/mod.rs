//! Imputation module for repairing missing values.
//!
//! This module provides the two repair strategies:
//! - Linear interpolation with provenance for numeric columns
//! - Mode / fallback filling for categorical columns

mod categorical;
mod interpolation;

pub use categorical::CategoricalFiller;
pub use interpolation::{InterpolationEngine, find_gaps};
