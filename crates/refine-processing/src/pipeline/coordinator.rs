//! Per-column missing value repair.
//!
//! Walks the table in column order, classifies every column that has gaps and
//! hands it to the matching repair strategy. Numeric provenance is collected
//! into the [`MissingDataReport`]; categorical repairs are only counted.
//! Identifier columns with gaps are listed in the report but left as they are.

use crate::classifier::ColumnClassifier;
use crate::config::RefineConfig;
use crate::error::{Result, ResultExt};
use crate::imputers::{CategoricalFiller, InterpolationEngine};
use crate::types::{ColumnKind, MissingDataReport};
use polars::prelude::*;
use tracing::{debug, info, warn};

/// Orchestrates missing value repair for a whole table.
#[derive(Debug, Clone, Default)]
pub struct MissingValueCoordinator {
    classifier: ColumnClassifier,
    engine: InterpolationEngine,
    filler: CategoricalFiller,
}

impl MissingValueCoordinator {
    pub fn new(
        classifier: ColumnClassifier,
        engine: InterpolationEngine,
        filler: CategoricalFiller,
    ) -> Self {
        Self {
            classifier,
            engine,
            filler,
        }
    }

    pub fn from_config(config: &RefineConfig) -> Self {
        Self::new(
            ColumnClassifier::new(&config.column_rules),
            InterpolationEngine::from_config(config),
            CategoricalFiller::from_config(config),
        )
    }

    /// Repair every eligible column and report what was found and done.
    pub fn repair(&self, mut df: DataFrame) -> Result<(DataFrame, MissingDataReport)> {
        let mut report = MissingDataReport::new();
        let col_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for col_name in &col_names {
            let series = df.column(col_name)?.as_materialized_series();
            let missing_count = series.null_count();
            if missing_count == 0 {
                continue;
            }

            report.note_missing_column(col_name);
            let kind = self.classifier.classify(col_name);
            debug!("Column '{}' ({}): {} missing", col_name, kind, missing_count);

            let repaired = match kind {
                ColumnKind::Numeric => {
                    let (repaired, records) = self
                        .engine
                        .interpolate(series)
                        .context(format!("Interpolating column '{}'", col_name))?;
                    report.numeric_fields_missing += missing_count;
                    report.interpolation_details.extend(records);
                    repaired
                }
                ColumnKind::Categorical => {
                    let repaired = self
                        .filler
                        .fill(series)
                        .context(format!("Filling column '{}'", col_name))?;
                    report.categorical_fields_missing += missing_count;
                    repaired
                }
                ColumnKind::Identifier => {
                    warn!(
                        "Column '{}' is an identifier; {} missing values left as-is",
                        col_name, missing_count
                    );
                    continue;
                }
            };

            df.replace(col_name, repaired)?;
        }

        info!(
            "Missing values: {} numeric, {} categorical across {} columns ({} interpolated)",
            report.numeric_fields_missing,
            report.categorical_fields_missing,
            report.columns_with_missing.len(),
            report.interpolation_details.len()
        );

        Ok((df, report))
    }
}
