use crate::error::{RefineError, Result};
use crate::types::ValidationReport;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// A validation report together with the metadata of the run that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEnvelope {
    /// Timestamp when the report was written
    pub generated_at: String,
    /// Path of the source table
    pub input_file: String,
    #[serde(flatten)]
    pub report: ValidationReport,
}

impl ReportEnvelope {
    pub fn new(input_file: impl Into<String>, report: ValidationReport) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.into(),
            report,
        }
    }
}

/// Writes cleaned tables and JSON reports into an output directory.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `<stem>_report.json` and return its path.
    pub fn write_json(&self, envelope: &ReportEnvelope, stem: &str) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(envelope)
            .map_err(|e| RefineError::ReportGenerationFailed(e.to_string()))?;

        let report_path = self.write_file(&format!("{}_report.json", stem), &json)?;
        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }

    /// Write `<name>.csv` and return its path.
    pub fn write_dataset(&self, csv: &str, name: &str) -> Result<PathBuf> {
        let output_path = self.write_file(&format!("{}.csv", name), csv)?;
        info!("Dataset saved: {}", output_path.display());
        Ok(output_path)
    }

    fn write_file(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);
        let mut file = File::create(&path)?;
        file.write_all(contents.as_bytes())?;
        Ok(path)
    }
}
