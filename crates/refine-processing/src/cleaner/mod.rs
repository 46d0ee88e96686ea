//! Data cleaning stages that run after missing value repair.
//!
//! This module provides functionality for:
//! - Removing exact duplicate rows
//! - Normalizing text casing and numeric types

mod normalizer;

pub use normalizer::Normalizer;

use crate::error::Result;
use crate::types::DuplicateReport;
use polars::prelude::*;
use tracing::{debug, info};

/// Removes rows that repeat an earlier row in every column.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateRemover;

impl DuplicateRemover {
    /// Drop exact duplicate rows, keeping the first occurrence and row order.
    pub fn remove(&self, df: DataFrame) -> Result<(DataFrame, DuplicateReport)> {
        let before = df.height();
        if before == 0 || df.width() == 0 {
            return Ok((df, DuplicateReport::default()));
        }

        let df = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let removed = before - df.height();

        if removed > 0 {
            let pct = (removed as f64 / before as f64) * 100.0;
            info!("Removed {} duplicate rows ({:.1}%)", removed, pct);
        } else {
            debug!("No duplicate rows found");
        }

        Ok((
            df,
            DuplicateReport {
                total_duplicates: removed,
                conflicting_records: 0,
            },
        ))
    }
}
