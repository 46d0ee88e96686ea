//! Shared utilities for the refinement pipeline.
//!
//! This module contains common helper functions used across multiple modules
//! to reduce code duplication and ensure consistency.

use crate::error::{RefineError, Result};
use polars::prelude::*;
use std::collections::HashMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Field contents treated as an absent value when loading text.
pub const NULL_MARKERS: [&str; 14] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A",
    "<NA>", "#NA",
];

/// Check if a raw field is a marker for an absent value.
pub fn is_null_marker(s: &str) -> bool {
    NULL_MARKERS.contains(&s)
}

/// Try to parse a field as a whole number.
pub fn parse_integer(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

/// Try to parse a field as a number.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Number Formatting Utilities
// =============================================================================

/// Round a value to a fixed number of decimal digits.
///
/// Values too large to carry a fractional digit at that precision are
/// returned unchanged.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_INTEGER {
        return value;
    }
    scaled.round() / factor
}

// Past 2^53 every f64 is already a whole number.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Format a number for reports, always showing a fractional part.
///
/// ```rust,ignore
/// assert_eq!(format_number(20.0), "20.0");
/// assert_eq!(format_number(23.33), "23.33");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

// =============================================================================
// Series Extraction Utilities
// =============================================================================

/// Read a column as numbers, keeping absent values as `None`.
///
/// Numeric columns are widened to Float64. String columns are parsed value by
/// value; a present value that is not a number is an error.
pub fn numeric_values(series: &Series) -> Result<Vec<Option<f64>>> {
    let dtype = series.dtype();

    if is_numeric_dtype(dtype) {
        let floats = series.cast(&DataType::Float64)?;
        return Ok(floats.f64()?.into_iter().collect());
    }

    if matches!(dtype, DataType::Null) {
        return Ok(vec![None; series.len()]);
    }

    if matches!(dtype, DataType::String) {
        return series
            .str()?
            .into_iter()
            .map(|val| match val {
                None => Ok(None),
                Some(s) => parse_number(s).map(Some).ok_or_else(|| {
                    RefineError::TypeConversionFailed {
                        column: series.name().to_string(),
                        target_type: "Float64".to_string(),
                        reason: format!("'{}' is not a number", s),
                    }
                }),
            })
            .collect();
    }

    Err(RefineError::TypeConversionFailed {
        column: series.name().to_string(),
        target_type: "Float64".to_string(),
        reason: format!("unsupported dtype {}", dtype),
    })
}

/// Read a column as text, keeping absent values as `None`.
pub fn string_values(series: &Series) -> Result<Vec<Option<String>>> {
    let as_str = series.cast(&DataType::String)?;
    Ok(as_str
        .str()?
        .into_iter()
        .map(|val| val.map(str::to_string))
        .collect())
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Most frequent present value. Ties go to the value encountered first.
pub fn string_mode(values: &[Option<String>]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for val in values.iter().flatten() {
        let count = counts.entry(val.as_str()).or_insert(0);
        if *count == 0 {
            order.push(val.as_str());
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for val in order {
        let count = counts[val];
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((val, count));
        }
    }

    best.map(|(val, _)| val.to_string())
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> Result<Series> {
    let filled: Vec<Option<String>> = string_values(series)?
        .into_iter()
        .map(|val| Some(val.unwrap_or_else(|| fill_value.to_string())))
        .collect();

    Ok(Series::new(series.name().clone(), filled))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_is_null_marker() {
        assert!(is_null_marker(""));
        assert!(is_null_marker("NA"));
        assert!(is_null_marker("NaN"));
        assert!(!is_null_marker("na"));
        assert!(!is_null_marker("Unknown"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number(" -1.5 "), Some(-1.5));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("hello"), None);
        assert_eq!(parse_integer("7"), Some(7));
        assert_eq!(parse_integer("7.5"), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(23.333333, 2), 23.33);
        assert_eq!(round_to(26.666666, 2), 26.67);
        assert_eq!(round_to(5.0, 0), 5.0);
    }

    #[test]
    fn test_round_to_large_values_unchanged() {
        assert_eq!(round_to(8e307, 2), 8e307);
        assert_eq!(round_to(-1.5e300, 10), -1.5e300);
        assert_eq!(round_to(1e20, 2), 1e20);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(20.0), "20.0");
        assert_eq!(format_number(-3.0), "-3.0");
        assert_eq!(format_number(23.33), "23.33");
    }

    #[test]
    fn test_numeric_values_from_int_column() {
        let series = Series::new("age".into(), &[Some(10i64), None, Some(40)]);
        let values = numeric_values(&series).unwrap();
        assert_eq!(values, vec![Some(10.0), None, Some(40.0)]);
    }

    #[test]
    fn test_numeric_values_from_string_column() {
        let series = Series::new("age".into(), &[Some("1.5"), None, Some(" 3")]);
        let values = numeric_values(&series).unwrap();
        assert_eq!(values, vec![Some(1.5), None, Some(3.0)]);
    }

    #[test]
    fn test_numeric_values_rejects_text() {
        let series = Series::new("age".into(), &[Some("ten"), None]);
        let err = numeric_values(&series).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_CONVERSION_FAILED");
    }

    #[test]
    fn test_string_mode() {
        let values = vec![
            Some("a".to_string()),
            Some("b".to_string()),
            None,
            Some("b".to_string()),
            Some("a".to_string()),
            Some("c".to_string()),
        ];
        // a and b tie; a came first
        assert_eq!(string_mode(&values), Some("a".to_string()));
        assert_eq!(string_mode(&[None, None]), None);
    }

    #[test]
    fn test_fill_string_nulls() {
        let series = Series::new("name".into(), &[Some("a"), None]);
        let filled = fill_string_nulls(&series, "Unknown").unwrap();
        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.str().unwrap().get(1), Some("Unknown"));
    }
}
