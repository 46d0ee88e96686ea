//! Name-based column classification.
//!
//! A column's kind is a business rule looked up by exact name in the
//! configured table, never inferred from its values. Unknown names are
//! identifiers: counted for missing-data statistics but never repaired or
//! normalized.

use crate::config::ColumnRule;
use crate::types::ColumnKind;
use polars::prelude::*;
use std::collections::HashMap;

/// Maps column names to their [`ColumnKind`].
#[derive(Debug, Clone)]
pub struct ColumnClassifier {
    rules: HashMap<String, ColumnKind>,
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new(&crate::config::default_column_rules())
    }
}

impl ColumnClassifier {
    /// Build a classifier from a classification table.
    pub fn new(rules: &[ColumnRule]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|rule| (rule.name.clone(), rule.kind))
                .collect(),
        }
    }

    /// Kind of the column with the given name.
    pub fn classify(&self, column_name: &str) -> ColumnKind {
        self.rules
            .get(column_name)
            .copied()
            .unwrap_or(ColumnKind::Identifier)
    }

    /// Kind of every column of a table, in table order.
    pub fn classify_table(&self, df: &DataFrame) -> Vec<(String, ColumnKind)> {
        df.get_column_names()
            .into_iter()
            .map(|name| (name.to_string(), self.classify(name.as_str())))
            .collect()
    }
}
