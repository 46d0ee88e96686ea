//! Positional linear interpolation with provenance.
//!
//! For every gap in a numeric column the engine looks for the nearest present
//! value before it (`L`) and after it (`R`). When both exist the gap is
//! resolved as
//!
//! ```text
//! ratio = (i - L) / (R - L)
//! value = v_L + (v_R - v_L) * ratio
//! ```
//!
//! and an [`InterpolationRecord`] captures the neighbors, the ratio and the
//! rounded value. Gaps with a neighbor on one side only are boundary gaps: the
//! linear method cannot extrapolate, so they never get a record, and what the
//! repaired column holds there is decided by [`BoundaryFill`].

use crate::config::{BoundaryFill, DEFAULT_PRECISION, RefineConfig};
use crate::error::{Result, ResultExt};
use crate::types::InterpolationRecord;
use crate::utils::{format_number, numeric_values, round_to};
use polars::prelude::*;
use tracing::{debug, warn};

/// Repairs numeric gaps and records how each interior gap was derived.
#[derive(Debug, Clone, Copy)]
pub struct InterpolationEngine {
    boundary_fill: BoundaryFill,
    precision: u32,
}

impl Default for InterpolationEngine {
    fn default() -> Self {
        Self::new(BoundaryFill::default(), DEFAULT_PRECISION)
    }
}

impl InterpolationEngine {
    pub fn new(boundary_fill: BoundaryFill, precision: u32) -> Self {
        Self {
            boundary_fill,
            precision,
        }
    }

    pub fn from_config(config: &RefineConfig) -> Self {
        Self::new(config.boundary_fill, config.precision)
    }

    /// Interpolate a numeric column.
    ///
    /// Returns the repaired column (Float64, same name) and one record per gap
    /// lying strictly between two present values, in ascending index order.
    /// A column without gaps is returned unchanged. A column with no present
    /// value at all is returned unchanged with no records.
    pub fn interpolate(&self, series: &Series) -> Result<(Series, Vec<InterpolationRecord>)> {
        if series.null_count() == 0 {
            return Ok((series.clone(), Vec::new()));
        }

        let column = series.name().to_string();
        let values =
            numeric_values(series).context(format!("Reading numeric column '{}'", column))?;
        let (repaired, records) = self.interpolate_values(&column, &values);

        Ok((Series::new(series.name().clone(), repaired), records))
    }

    /// Interpolate raw positional values belonging to `column`.
    pub fn interpolate_values(
        &self,
        column: &str,
        values: &[Option<f64>],
    ) -> (Vec<Option<f64>>, Vec<InterpolationRecord>) {
        let gaps = find_gaps(values);
        let mut repaired = values.to_vec();
        let mut records = Vec::with_capacity(gaps.len());

        if gaps.is_empty() {
            return (repaired, records);
        }

        let mut unresolved = 0usize;
        for &index in &gaps {
            match (nearest_left(values, index), nearest_right(values, index)) {
                (Some(left), Some(right)) => {
                    let record = self.calculate(column, index, left, right);
                    repaired[index] = Some(linear_value(index, left, right));
                    records.push(record);
                }
                (None, Some((_, first))) => {
                    unresolved += 1;
                    if self.boundary_fill == BoundaryFill::Nearest {
                        repaired[index] = Some(first);
                    }
                }
                (Some((_, last)), None) => {
                    unresolved += 1;
                    if self.boundary_fill != BoundaryFill::Leave {
                        repaired[index] = Some(last);
                    }
                }
                (None, None) => unresolved += 1,
            }
        }

        debug!(
            "Column '{}': {} gaps, {} interpolated",
            column,
            gaps.len(),
            records.len()
        );
        if unresolved > 0 {
            warn!(
                "Column '{}': {} boundary gaps not interpolated (fill policy: {:?})",
                column, unresolved, self.boundary_fill
            );
        }

        (repaired, records)
    }

    fn calculate(
        &self,
        column: &str,
        index: usize,
        (left_index, left_value): (usize, f64),
        (right_index, right_value): (usize, f64),
    ) -> InterpolationRecord {
        let position_ratio = (index - left_index) as f64 / (right_index - left_index) as f64;
        let interpolated_value = round_to(
            linear_value(index, (left_index, left_value), (right_index, right_value)),
            self.precision,
        );

        let left = format_number(left_value);
        let right = format_number(right_value);
        let calculation_description = format!(
            "{left} + ({right} - {left}) × ({index} - {left_index})/({right_index} - {left_index})"
        );

        InterpolationRecord {
            column: column.to_string(),
            missing_index: index,
            left_index,
            left_value,
            right_value,
            right_index,
            position_ratio,
            interpolated_value,
            calculation_description,
        }
    }
}

/// Positions holding an absent value, ascending.
pub fn find_gaps(values: &[Option<f64>]) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.is_none().then_some(i))
        .collect()
}

fn nearest_left(values: &[Option<f64>], index: usize) -> Option<(usize, f64)> {
    values[..index]
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, v)| v.map(|v| (i, v)))
}

fn nearest_right(values: &[Option<f64>], index: usize) -> Option<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .skip(index + 1)
        .find_map(|(i, v)| v.map(|v| (i, v)))
}

// left.0 < index < right.0 always holds, so the span is never zero.
fn linear_value(index: usize, (li, lv): (usize, f64), (ri, rv): (usize, f64)) -> f64 {
    let ratio = (index - li) as f64 / (ri - li) as f64;
    lv + (rv - lv) * ratio
}
