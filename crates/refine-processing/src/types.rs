use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kind of a column, fixed by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Gaps are repaired by linear interpolation.
    Numeric,
    /// Gaps are repaired with the most frequent value.
    Categorical,
    /// Never repaired and never normalized.
    Identifier,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Identifier => "id",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of one numeric gap resolved by interpolation.
///
/// Created once by the interpolation engine and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolationRecord {
    pub column: String,
    pub missing_index: usize,
    pub left_index: usize,
    pub left_value: f64,
    pub right_value: f64,
    pub right_index: usize,
    pub position_ratio: f64,
    pub interpolated_value: f64,
    pub calculation_description: String,
}

/// Missing-data section of the validation report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingDataReport {
    pub numeric_fields_missing: usize,
    pub categorical_fields_missing: usize,
    /// Column names in first-seen order, without repeats.
    pub columns_with_missing: Vec<String>,
    pub interpolation_details: Vec<InterpolationRecord>,
}

impl MissingDataReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a column had gaps. Later mentions of the same column are ignored.
    pub fn note_missing_column(&mut self, column: &str) {
        if !self.columns_with_missing.iter().any(|c| c == column) {
            self.columns_with_missing.push(column.to_string());
        }
    }

    /// Total number of gaps counted for repairable columns.
    pub fn total_missing(&self) -> usize {
        self.numeric_fields_missing + self.categorical_fields_missing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataOverview {
    pub total_rows: usize,
    pub total_columns: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub total_duplicates: usize,
    pub conflicting_records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub text_fields: bool,
    pub numeric_fields: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStatus {
    pub rows_after_cleaning: usize,
    pub columns_after_cleaning: usize,
}

/// Structured report of one refinement run.
///
/// Every run builds its own value; nothing is shared between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub data_overview: DataOverview,
    pub missing_data: MissingDataReport,
    pub duplicate_records: DuplicateReport,
    pub normalization: NormalizationReport,
    pub final_status: FinalStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_missing_column_keeps_first_seen_order() {
        let mut report = MissingDataReport::new();
        report.note_missing_column("name");
        report.note_missing_column("age");
        report.note_missing_column("name");

        assert_eq!(report.columns_with_missing, vec!["name", "age"]);
    }

    #[test]
    fn test_validation_report_json_field_names() {
        let report = ValidationReport::default();
        let json = serde_json::to_value(&report).unwrap();

        for key in [
            "data_overview",
            "missing_data",
            "duplicate_records",
            "normalization",
            "final_status",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert!(json["missing_data"].get("interpolation_details").is_some());
        assert!(json["final_status"].get("rows_after_cleaning").is_some());
    }

    #[test]
    fn test_column_kind_display() {
        assert_eq!(ColumnKind::Numeric.to_string(), "numeric");
        assert_eq!(ColumnKind::Identifier.to_string(), "id");
    }
}
