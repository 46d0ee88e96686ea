//! Main refinement pipeline module.
//!
//! This module provides the core `Refiner` struct and builder for
//! orchestrating the repair, deduplication and normalization stages.

use crate::classifier::ColumnClassifier;
use crate::cleaner::{DuplicateRemover, Normalizer};
use crate::config::RefineConfig;
use crate::error::{RefineError, Result};
use crate::io::{load_table, write_table};
use crate::pipeline::MissingValueCoordinator;
use crate::pipeline::progress::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, RefineStage,
};
use crate::types::{DataOverview, FinalStatus, ValidationReport};
use polars::prelude::*;
use std::sync::Arc;
use tracing::{error, info};

/// Result of one refinement run.
#[derive(Debug, Clone)]
pub struct RefineOutcome {
    /// The repaired, deduplicated and normalized table.
    pub data: DataFrame,
    /// What was found and done along the way.
    pub report: ValidationReport,
}

/// The refinement pipeline.
///
/// Use [`Refiner::builder()`] to create a new pipeline with custom configuration.
/// A `Refiner` holds no per-run state, so one instance can process any number
/// of tables, each run producing its own report.
///
/// # Example
///
/// ```rust,ignore
/// use refine_processing::{Refiner, RefineConfig};
///
/// let (csv, report) = Refiner::builder()
///     .config(RefineConfig::builder().remove_duplicates(false).build()?)
///     .build()?
///     .clean_data("name,age\nAnn,10\nBob,\nCy,30\n")?;
/// ```
pub struct Refiner {
    config: RefineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    coordinator: MissingValueCoordinator,
    deduplicator: DuplicateRemover,
    normalizer: Normalizer,
}

static_assertions::assert_impl_all!(Refiner: Send, Sync);

impl Refiner {
    /// Create a new pipeline builder.
    pub fn builder() -> RefinerBuilder {
        RefinerBuilder::default()
    }

    pub fn config(&self) -> &RefineConfig {
        &self.config
    }

    /// Load delimited text, refine it and serialize the result.
    pub fn clean_data(&self, text: &str) -> Result<(String, ValidationReport)> {
        let df = load_table(text, &self.config)?;
        let RefineOutcome { mut data, report } = self.process(df)?;
        let csv = write_table(&mut data, &self.config)?;
        Ok((csv, report))
    }

    /// Refine a table.
    pub fn process(&self, df: DataFrame) -> Result<RefineOutcome> {
        match self.process_internal(df) {
            Ok(outcome) => {
                self.report_progress(ProgressUpdate::complete("Refinement completed"));
                Ok(outcome)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Refinement error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn process_internal(&self, df: DataFrame) -> Result<RefineOutcome> {
        let mut report = ValidationReport {
            data_overview: DataOverview {
                total_rows: df.height(),
                total_columns: df.width(),
            },
            ..Default::default()
        };

        info!(
            "Starting refinement of {} rows x {} columns",
            df.height(),
            df.width()
        );
        self.report_progress(ProgressUpdate::new(
            RefineStage::Initializing,
            1.0,
            "Table loaded",
        ));

        // Step 1: Missing value repair
        self.report_progress(ProgressUpdate::new(
            RefineStage::Repair,
            0.0,
            "Repairing missing values...",
        ));
        let (df, missing_report) = self.coordinator.repair(df)?;
        report.missing_data = missing_report;
        self.report_progress(ProgressUpdate::new(
            RefineStage::Repair,
            1.0,
            format!(
                "Repaired {} columns",
                report.missing_data.columns_with_missing.len()
            ),
        ));

        // Step 2: Duplicate removal
        let df = if self.config.remove_duplicates {
            self.report_progress(ProgressUpdate::new(
                RefineStage::Deduplication,
                0.0,
                "Removing duplicate rows...",
            ));
            let (df, duplicate_report) = self.deduplicator.remove(df)?;
            report.duplicate_records = duplicate_report;
            self.report_progress(ProgressUpdate::new(
                RefineStage::Deduplication,
                1.0,
                format!(
                    "Removed {} duplicate rows",
                    report.duplicate_records.total_duplicates
                ),
            ));
            df
        } else {
            info!("Skipping duplicate removal (disabled)");
            df
        };

        // Step 3: Normalization
        let df = if self.config.normalize {
            self.report_progress(ProgressUpdate::new(
                RefineStage::Normalization,
                0.0,
                "Normalizing values...",
            ));
            let (df, normalization_report) = self.normalizer.normalize(df)?;
            report.normalization = normalization_report;
            self.report_progress(ProgressUpdate::new(
                RefineStage::Normalization,
                1.0,
                "Normalization complete",
            ));
            df
        } else {
            info!("Skipping normalization (disabled)");
            df
        };

        report.final_status = FinalStatus {
            rows_after_cleaning: df.height(),
            columns_after_cleaning: df.width(),
        };

        info!(
            "Refinement finished: {} rows x {} columns",
            df.height(),
            df.width()
        );

        Ok(RefineOutcome { data: df, report })
    }
}

/// Builder for creating a [`Refiner`] instance.
#[derive(Default)]
pub struct RefinerBuilder {
    config: Option<RefineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(RefinerBuilder: Send);

impl RefinerBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RefineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during processing.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<Refiner> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| RefineError::InvalidConfig(e.to_string()))?;

        let classifier = ColumnClassifier::new(&config.column_rules);
        Ok(Refiner {
            coordinator: MissingValueCoordinator::from_config(&config),
            deduplicator: DuplicateRemover,
            normalizer: Normalizer::new(classifier),
            progress_reporter: self.progress_reporter,
            config,
        })
    }
}
