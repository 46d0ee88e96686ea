//! Most-frequent-value filling for categorical columns.

use crate::config::{DEFAULT_CATEGORICAL_FALLBACK, RefineConfig};
use crate::error::Result;
use crate::utils::{fill_string_nulls, string_mode, string_values};
use polars::prelude::*;
use tracing::debug;

/// Fills categorical gaps with the column's mode, or a fixed label when the
/// column has no present value.
///
/// No provenance is kept for these repairs.
#[derive(Debug, Clone)]
pub struct CategoricalFiller {
    fallback: String,
}

impl Default for CategoricalFiller {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORICAL_FALLBACK)
    }
}

impl CategoricalFiller {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }

    pub fn from_config(config: &RefineConfig) -> Self {
        Self::new(config.categorical_fallback.clone())
    }

    /// Fill every absent entry of a column. The result is a String column.
    pub fn fill(&self, series: &Series) -> Result<Series> {
        if series.null_count() == 0 {
            return Ok(series.clone());
        }

        let values = string_values(series)?;
        let fill_value = match string_mode(&values) {
            Some(mode) => {
                debug!("Filling '{}' with mode '{}'", series.name(), mode);
                mode
            }
            None => {
                debug!(
                    "Column '{}' has no values, filling with '{}'",
                    series.name(),
                    self.fallback
                );
                self.fallback.clone()
            }
        };

        fill_string_nulls(series, &fill_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn str_values(series: &Series) -> Vec<Option<String>> {
        series
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_fill_with_mode() {
        let series = Series::new("name".into(), &[Some("Ann"), Some("Bob"), Some("Bob"), None]);
        let filled = CategoricalFiller::default().fill(&series).unwrap();

        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.str().unwrap().get(3), Some("Bob"));
    }

    #[test]
    fn test_tie_goes_to_first_encountered() {
        let series = Series::new("name".into(), &[Some("Zed"), None, Some("Amy")]);
        let filled = CategoricalFiller::default().fill(&series).unwrap();
        assert_eq!(filled.str().unwrap().get(1), Some("Zed"));
    }

    #[test]
    fn test_all_absent_uses_fallback() {
        let series = Series::new("name".into(), &[Option::<&str>::None, None, None]);
        let filled = CategoricalFiller::default().fill(&series).unwrap();

        assert_eq!(
            str_values(&filled),
            vec![
                Some("Unknown".to_string()),
                Some("Unknown".to_string()),
                Some("Unknown".to_string())
            ]
        );
    }

    #[test]
    fn test_custom_fallback() {
        let series = Series::new("name".into(), &[Option::<&str>::None]);
        let filled = CategoricalFiller::new("missing").fill(&series).unwrap();
        assert_eq!(filled.str().unwrap().get(0), Some("missing"));
    }

    #[test]
    fn test_present_values_are_kept() {
        let series = Series::new("name".into(), &[Some("Ann"), None, Some("Cy")]);
        let filled = CategoricalFiller::default().fill(&series).unwrap();
        assert_eq!(
            str_values(&filled),
            vec![
                Some("Ann".to_string()),
                Some("Ann".to_string()),
                Some("Cy".to_string())
            ]
        );
    }

    #[test]
    fn test_no_gaps_returns_column_unchanged() {
        let series = Series::new("name".into(), &["Ann", "Bob"]);
        let filled = CategoricalFiller::default().fill(&series).unwrap();
        assert!(filled.equals(&series));
    }
}
