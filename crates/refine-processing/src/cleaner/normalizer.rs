//! Text casing and numeric type normalization.

use crate::classifier::ColumnClassifier;
use crate::error::Result;
use crate::types::{ColumnKind, NormalizationReport};
use crate::utils::{is_numeric_dtype, parse_number, string_values};
use polars::prelude::*;
use tracing::debug;

/// Normalizes classified columns after repair.
///
/// Categorical columns are lowercased. Numeric columns are coerced to numbers;
/// text that is not a number becomes absent rather than failing. Identifier
/// columns are left alone.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    classifier: ColumnClassifier,
}

impl Normalizer {
    pub fn new(classifier: ColumnClassifier) -> Self {
        Self { classifier }
    }

    pub fn normalize(&self, mut df: DataFrame) -> Result<(DataFrame, NormalizationReport)> {
        let mut report = NormalizationReport::default();

        for (col_name, kind) in self.classifier.classify_table(&df) {
            let series = df.column(&col_name)?.as_materialized_series();
            let normalized = match kind {
                ColumnKind::Categorical => {
                    report.text_fields = true;
                    lowercase(series)?
                }
                ColumnKind::Numeric => {
                    report.numeric_fields = true;
                    match to_numeric(series)? {
                        Some(converted) => converted,
                        None => continue,
                    }
                }
                ColumnKind::Identifier => continue,
            };

            debug!("Normalized '{}' ({})", col_name, kind);
            df.replace(&col_name, normalized)?;
        }

        Ok((df, report))
    }
}

fn lowercase(series: &Series) -> Result<Series> {
    let lowered: Vec<Option<String>> = string_values(series)?
        .into_iter()
        .map(|val| val.map(|s| s.to_lowercase()))
        .collect();

    Ok(Series::new(series.name().clone(), lowered))
}

/// Coerce a column to numbers. Returns `None` when it is already numeric.
fn to_numeric(series: &Series) -> Result<Option<Series>> {
    if is_numeric_dtype(series.dtype()) {
        return Ok(None);
    }

    let coerced: Vec<Option<f64>> = string_values(series)?
        .into_iter()
        .map(|val| val.as_deref().and_then(parse_number))
        .collect();

    Ok(Some(Series::new(series.name().clone(), coerced)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_columns_are_lowercased() {
        let df = df![
            "name" => [Some("Mira Flowers"), None, Some("KAI")],
            "region" => ["Kayseri", "Junín", "Coquimbo"],
        ]
        .unwrap();

        let (df, report) = Normalizer::default().normalize(df).unwrap();

        assert!(report.text_fields);
        assert!(!report.numeric_fields);
        let names: Vec<Option<&str>> = df
            .column("name")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(names, vec![Some("mira flowers"), None, Some("kai")]);
        // Identifier untouched
        let region = df.column("region").unwrap().as_materialized_series();
        assert_eq!(region.str().unwrap().get(0), Some("Kayseri"));
    }

    #[test]
    fn test_numeric_text_is_coerced() {
        let df = df![
            "age" => ["30", "abc", "41.5"],
        ]
        .unwrap();

        let (df, report) = Normalizer::default().normalize(df).unwrap();

        assert!(report.numeric_fields);
        let age: Vec<Option<f64>> = df
            .column("age")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(age, vec![Some(30.0), None, Some(41.5)]);
    }

    #[test]
    fn test_numeric_column_keeps_dtype() {
        let df = df![
            "age" => [30i64, 40],
        ]
        .unwrap();

        let (df, report) = Normalizer::default().normalize(df).unwrap();
        assert!(report.numeric_fields);
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_no_classified_columns() {
        let df = df![
            "country" => ["Sweden"],
        ]
        .unwrap();

        let (_, report) = Normalizer::default().normalize(df).unwrap();
        assert_eq!(report, NormalizationReport::default());
    }
}
