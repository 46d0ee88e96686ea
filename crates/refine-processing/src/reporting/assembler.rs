use crate::types::{InterpolationRecord, ValidationReport};
use crate::utils::format_number;
use std::fmt::Write;

/// Line rendered when no numeric gap was resolved by interpolation.
pub const NO_INTERPOLATION_LINE: &str = "   No interpolation performed";

/// Renders a [`ValidationReport`] as a human-readable summary.
///
/// Pure formatting: every number shown comes from the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAssembler;

impl ReportAssembler {
    pub fn render(&self, report: &ValidationReport) -> String {
        let overview = &report.data_overview;
        let missing = &report.missing_data;
        let duplicates = &report.duplicate_records;
        let normalization = &report.normalization;
        let status = &report.final_status;

        format!(
            "
Summary Report

1. Data Overview:
   - Total Rows: {total_rows}
   - Total Columns: {total_columns}

2. Missing Data Handling:
   - Numeric Fields missing: {numeric_missing}
   - Categorical Fields missing: {categorical_missing}
   - Columns with Missing Data: {missing_columns}

   Interpolation Details:
{interpolation_details}

3. Duplicate Records:
   - Total Duplicates Removed: {duplicates}
   - Conflicting Records: {conflicts}

4. Data Normalization:
   - Text Fields Normalization: {text_norm}
   - Numeric Fields Normalization: {numeric_norm}

5. Final Dataset Status:
   - Number of Rows After Cleaning: {final_rows}
   - Number of Columns After Cleaning: {final_columns}
",
            total_rows = overview.total_rows,
            total_columns = overview.total_columns,
            numeric_missing = missing.numeric_fields_missing,
            categorical_missing = missing.categorical_fields_missing,
            missing_columns = missing.columns_with_missing.join(", "),
            interpolation_details = self.render_interpolation_details(&missing.interpolation_details),
            duplicates = duplicates.total_duplicates,
            conflicts = duplicates.conflicting_records,
            text_norm = normalization.text_fields,
            numeric_norm = normalization.numeric_fields,
            final_rows = status.rows_after_cleaning,
            final_columns = status.columns_after_cleaning,
        )
    }

    fn render_interpolation_details(&self, records: &[InterpolationRecord]) -> String {
        if records.is_empty() {
            return NO_INTERPOLATION_LINE.to_string();
        }

        records
            .iter()
            .map(render_record)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_record(record: &InterpolationRecord) -> String {
    let mut block = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(block, "   Column: {}", record.column);
    let _ = writeln!(block, "   - Missing at index: {}", record.missing_index);
    let _ = writeln!(
        block,
        "   - Left value (index {}): {}",
        record.left_index,
        format_number(record.left_value)
    );
    let _ = writeln!(
        block,
        "   - Right value (index {}): {}",
        record.right_index,
        format_number(record.right_value)
    );
    let _ = writeln!(
        block,
        "   - Interpolation calculation: {}",
        record.calculation_description
    );
    let _ = writeln!(
        block,
        "   - Interpolated value: {}",
        format_number(record.interpolated_value)
    );
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        DataOverview, DuplicateReport, FinalStatus, MissingDataReport, NormalizationReport,
    };

    fn record() -> InterpolationRecord {
        InterpolationRecord {
            column: "age".to_string(),
            missing_index: 2,
            left_index: 0,
            left_value: 10.0,
            right_value: 20.0,
            right_index: 3,
            position_ratio: 2.0 / 3.0,
            interpolated_value: 16.67,
            calculation_description: "10.0 + (20.0 - 10.0) × (2 - 0)/(3 - 0)".to_string(),
        }
    }

    fn report(records: Vec<InterpolationRecord>) -> ValidationReport {
        ValidationReport {
            data_overview: DataOverview {
                total_rows: 10,
                total_columns: 4,
            },
            missing_data: MissingDataReport {
                numeric_fields_missing: 2,
                categorical_fields_missing: 1,
                columns_with_missing: vec!["name".to_string(), "age".to_string()],
                interpolation_details: records,
            },
            duplicate_records: DuplicateReport {
                total_duplicates: 3,
                conflicting_records: 0,
            },
            normalization: NormalizationReport {
                text_fields: true,
                numeric_fields: false,
            },
            final_status: FinalStatus {
                rows_after_cleaning: 7,
                columns_after_cleaning: 4,
            },
        }
    }

    #[test]
    fn test_render_record_fields() {
        let text = ReportAssembler.render(&report(vec![record()]));

        assert!(text.contains("   Column: age"));
        assert!(text.contains("   - Missing at index: 2"));
        assert!(text.contains("   - Left value (index 0): 10.0"));
        assert!(text.contains("   - Right value (index 3): 20.0"));
        assert!(text.contains("× (2 - 0)/(3 - 0)"));
        assert!(text.contains("   - Interpolated value: 16.67"));
        assert!(!text.contains(NO_INTERPOLATION_LINE));
    }

    #[test]
    fn test_render_sections() {
        let text = ReportAssembler.render(&report(Vec::new()));

        assert!(text.contains("   - Total Rows: 10"));
        assert!(text.contains("   - Columns with Missing Data: name, age"));
        assert!(text.contains(NO_INTERPOLATION_LINE));
        assert!(text.contains("   - Total Duplicates Removed: 3"));
        assert!(text.contains("   - Text Fields Normalization: true"));
        assert!(text.contains("   - Numeric Fields Normalization: false"));
        assert!(text.contains("   - Number of Rows After Cleaning: 7"));
    }

    #[test]
    fn test_records_are_separated_in_order() {
        let mut second = record();
        second.missing_index = 5;
        let text = ReportAssembler.render(&report(vec![record(), second]));

        let first_at = text.find("Missing at index: 2").unwrap();
        let second_at = text.find("Missing at index: 5").unwrap();
        assert!(first_at < second_at);
    }
}
