//! Configuration types for the refinement pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use crate::types::ColumnKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Label written into categorical gaps when a column has no present value at all.
pub const DEFAULT_CATEGORICAL_FALLBACK: &str = "Unknown";

/// Decimal digits kept on recorded interpolated values.
pub const DEFAULT_PRECISION: u32 = 2;

const MAX_PRECISION: u32 = 10;

/// What happens to numeric gaps that lack a present neighbor on one side.
///
/// These gaps never produce an interpolation record; the policy only decides
/// what the repaired column holds at those positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoundaryFill {
    /// Trailing gaps take the last present value; leading gaps stay absent.
    #[default]
    Forward,
    /// Leading gaps take the first present value, trailing gaps the last.
    Nearest,
    /// Boundary gaps stay absent.
    Leave,
}

/// A single entry of the name-based classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// Exact column name the rule applies to.
    pub name: String,
    /// Kind assigned to columns with that name.
    pub kind: ColumnKind,
}

impl ColumnRule {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// The classification table used when none is configured.
pub fn default_column_rules() -> Vec<ColumnRule> {
    vec![
        ColumnRule::new("age", ColumnKind::Numeric),
        ColumnRule::new("name", ColumnKind::Categorical),
    ]
}

/// Configuration for the refinement pipeline.
///
/// Use [`RefineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use refine_processing::config::{BoundaryFill, RefineConfig};
///
/// let config = RefineConfig::builder()
///     .boundary_fill(BoundaryFill::Leave)
///     .remove_duplicates(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Name to kind lookup. Names not listed here are identifiers.
    /// Default: `age` is numeric, `name` is categorical
    pub column_rules: Vec<ColumnRule>,

    /// Replacement for gaps in a categorical column with no present value.
    /// Default: "Unknown"
    pub categorical_fallback: String,

    /// Fill policy for numeric gaps at the edges of a column.
    /// Default: Forward
    pub boundary_fill: BoundaryFill,

    /// Decimal digits of recorded interpolated values.
    /// Default: 2
    pub precision: u32,

    /// Whether to drop exact duplicate rows after repair.
    /// Default: true
    pub remove_duplicates: bool,

    /// Whether to normalize text casing and numeric types after repair.
    /// Default: true
    pub normalize: bool,

    /// Field delimiter of the source and output text.
    /// Default: b','
    pub delimiter: u8,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            column_rules: default_column_rules(),
            categorical_fallback: DEFAULT_CATEGORICAL_FALLBACK.to_string(),
            boundary_fill: BoundaryFill::default(),
            precision: DEFAULT_PRECISION,
            remove_duplicates: true,
            normalize: true,
            delimiter: b',',
        }
    }
}

impl RefineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> RefineConfigBuilder {
        RefineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let mut seen = HashSet::new();
        for rule in &self.column_rules {
            if rule.name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyRuleName);
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(ConfigValidationError::DuplicateRule(rule.name.clone()));
            }
        }

        if self.categorical_fallback.is_empty() {
            return Err(ConfigValidationError::EmptyFallback);
        }

        if self.precision > MAX_PRECISION {
            return Err(ConfigValidationError::InvalidPrecision(self.precision));
        }

        if matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(ConfigValidationError::InvalidDelimiter(
                self.delimiter as char,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Column rule with empty name")]
    EmptyRuleName,

    #[error("Column '{0}' has more than one classification rule")]
    DuplicateRule(String),

    #[error("Categorical fallback label must not be empty")]
    EmptyFallback,

    #[error("Invalid precision: {0} (must be at most 10)")]
    InvalidPrecision(u32),

    #[error("Invalid delimiter: {0:?}")]
    InvalidDelimiter(char),
}

/// Builder for [`RefineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct RefineConfigBuilder {
    column_rules: Option<Vec<ColumnRule>>,
    categorical_fallback: Option<String>,
    boundary_fill: Option<BoundaryFill>,
    precision: Option<u32>,
    remove_duplicates: Option<bool>,
    normalize: Option<bool>,
    delimiter: Option<u8>,
}

impl RefineConfigBuilder {
    /// Replace the whole classification table.
    pub fn column_rules(mut self, rules: Vec<ColumnRule>) -> Self {
        self.column_rules = Some(rules);
        self
    }

    /// Add one rule on top of the current table (the default table if none was set).
    pub fn column_rule(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.column_rules
            .get_or_insert_with(default_column_rules)
            .push(ColumnRule::new(name, kind));
        self
    }

    /// Set the label used for categorical columns without any present value.
    pub fn categorical_fallback(mut self, label: impl Into<String>) -> Self {
        self.categorical_fallback = Some(label.into());
        self
    }

    /// Set the fill policy for numeric boundary gaps.
    pub fn boundary_fill(mut self, policy: BoundaryFill) -> Self {
        self.boundary_fill = Some(policy);
        self
    }

    /// Set the decimal digits kept on recorded interpolated values.
    pub fn precision(mut self, digits: u32) -> Self {
        self.precision = Some(digits);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Enable or disable text and numeric normalization.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = Some(normalize);
        self
    }

    /// Set the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `RefineConfig` or an error if validation fails.
    pub fn build(self) -> Result<RefineConfig, ConfigValidationError> {
        let config = RefineConfig {
            column_rules: self.column_rules.unwrap_or_else(default_column_rules),
            categorical_fallback: self
                .categorical_fallback
                .unwrap_or_else(|| DEFAULT_CATEGORICAL_FALLBACK.to_string()),
            boundary_fill: self.boundary_fill.unwrap_or_default(),
            precision: self.precision.unwrap_or(DEFAULT_PRECISION),
            remove_duplicates: self.remove_duplicates.unwrap_or(true),
            normalize: self.normalize.unwrap_or(true),
            delimiter: self.delimiter.unwrap_or(b','),
        };

        config.validate()?;
        Ok(config)
    }
}
