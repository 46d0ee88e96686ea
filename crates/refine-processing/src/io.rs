//! Loading tables from delimited text and writing them back.
//!
//! Fields are read as text first and typed afterwards so that the null
//! markers and the whitespace rule apply the same way to every column.

use crate::config::RefineConfig;
use crate::error::{RefineError, Result, ResultExt};
use crate::utils::{is_null_marker, parse_integer, parse_number};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Load a table from delimited text with a header row.
///
/// Leading spaces after a delimiter are dropped, quoted fields may contain the
/// delimiter, blank lines are skipped and null markers become absent values.
/// Columns whose present values are all integers become Int64, all numbers
/// Float64, anything else String.
pub fn load_table(text: &str, config: &RefineConfig) -> Result<DataFrame> {
    let cleaned = strip_initial_space(text, config.delimiter);
    if cleaned.trim().is_empty() {
        return Ok(DataFrame::empty());
    }

    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(config.delimiter)
                .with_quote_char(Some(b'"'))
                .with_missing_is_null(true),
        )
        .into_reader_with_file_handle(Cursor::new(cleaned))
        .finish()
        .map_err(|e| RefineError::MalformedInput(e.to_string()))?;

    let columns = raw
        .get_columns()
        .iter()
        .map(|col| infer_column(col.as_materialized_series()).map(Column::from))
        .collect::<Result<Vec<_>>>()?;

    let df = DataFrame::new(columns)?;
    debug!("Loaded table: {:?}", df.shape());
    Ok(df)
}

/// Read a file and load it with [`load_table`].
pub fn load_table_from_path(path: impl AsRef<Path>, config: &RefineConfig) -> Result<DataFrame> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(RefineError::from)
        .context(format!("Reading {}", path.display()))?;
    load_table(&text, config)
}

/// Serialize a table to delimited text: header included, no index column,
/// absent values as empty fields.
pub fn write_table(df: &mut DataFrame, config: &RefineConfig) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .with_separator(config.delimiter)
        .with_quote_char(b'"')
        .finish(df)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Drop spaces and tabs that directly follow a delimiter or start a line,
/// outside quoted fields.
fn strip_initial_space(text: &str, delimiter: u8) -> String {
    let delimiter = delimiter as char;
    let mut out = String::with_capacity(text.len());
    let mut in_quotes = false;
    let mut at_field_start = true;

    for line in text.split_inclusive('\n') {
        if !in_quotes && line.trim().is_empty() {
            continue;
        }
        for ch in line.chars() {
            if at_field_start && !in_quotes && (ch == ' ' || ch == '\t') {
                continue;
            }
            at_field_start = false;
            if ch == '"' {
                in_quotes = !in_quotes;
            } else if !in_quotes && (ch == delimiter || ch == '\n') {
                at_field_start = true;
            }
            out.push(ch);
        }
    }

    out
}

fn infer_column(series: &Series) -> Result<Series> {
    let name = series.name().clone();
    let values: Vec<Option<&str>> = series
        .str()?
        .into_iter()
        .map(|val| val.filter(|s| !is_null_marker(s)))
        .collect();

    let present: Vec<&str> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return Ok(Series::new(name, values));
    }

    if present.iter().all(|s| parse_integer(s).is_some()) {
        let ints: Vec<Option<i64>> = values.iter().map(|v| v.and_then(parse_integer)).collect();
        return Ok(Series::new(name, ints));
    }

    if present.iter().all(|s| parse_number(s).is_some()) {
        let floats: Vec<Option<f64>> = values.iter().map(|v| v.and_then(parse_number)).collect();
        return Ok(Series::new(name, floats));
    }

    Ok(Series::new(name, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> RefineConfig {
        RefineConfig::default()
    }

    #[test]
    fn test_load_types_columns() {
        let text = "name,age,score\nAnn,30,1.5\nBob,,2\n";
        let df = load_table(text, &config()).unwrap();

        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("name").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("score").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("age").unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_skips_initial_space_and_keeps_quoted_delimiters() {
        let text = "name, address\nIvory, \"P.O. Box 950, 5927 Nulla. Street\"\n";
        let df = load_table(text, &config()).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["name", "address"]);
        let address = df.column("address").unwrap().as_materialized_series();
        assert_eq!(
            address.str().unwrap().get(0),
            Some("P.O. Box 950, 5927 Nulla. Street")
        );
    }

    #[test]
    fn test_null_markers_become_absent() {
        let text = "name,age\nNA,N/A\nAnn,NaN\nBob,4\n";
        let df = load_table(text, &config()).unwrap();

        assert_eq!(df.column("name").unwrap().null_count(), 1);
        assert_eq!(df.column("age").unwrap().null_count(), 2);
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let text = "name,age\n\nAnn,1\n   \nBob,2\n";
        let df = load_table(text, &config()).unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_empty_text_gives_empty_table() {
        let df = load_table("", &config()).unwrap();
        assert_eq!(df.shape(), (0, 0));
    }

    #[test]
    fn test_header_only() {
        let df = load_table("name,age\n", &config()).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_write_table() {
        let mut df = df![
            "name" => [Some("ann"), Some("bob")],
            "age" => [Some(20.0), None],
        ]
        .unwrap();

        let text = write_table(&mut df, &config()).unwrap();
        assert_eq!(text, "name,age\nann,20.0\nbob,\n");
    }

    #[test]
    fn test_write_quotes_fields_with_delimiter() {
        let mut df = df![
            "address" => ["P.O. Box 121, 1146 Dignissim Road"],
        ]
        .unwrap();

        let text = write_table(&mut df, &config()).unwrap();
        assert!(text.contains("\"P.O. Box 121, 1146 Dignissim Road\""));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let config = RefineConfig::builder().delimiter(b';').build().unwrap();
        let df = load_table("name; age\nAnn; 3\n", &config).unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["name", "age"]);
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_strip_initial_space() {
        assert_eq!(strip_initial_space("a, b,  c\n", b','), "a,b,c\n");
        assert_eq!(strip_initial_space("\" a, b\", c", b','), "\" a, b\",c");
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = load_table_from_path("/definitely/not/here.csv", &config()).unwrap_err();
        assert!(err.is_input_error());
    }
}
