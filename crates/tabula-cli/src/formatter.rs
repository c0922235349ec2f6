//! Output formatting for query results.
//!
//! Supports CSV, table, JSON, and raw output formats. Every formatted result
//! ends with a newline unless it is empty.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use comfy_table::{Cell, ContentArrangement, Table as TextTable};
use serde_json::{Map, Value as JsonValue};

use tabula_sql::Table;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values, header first.
    Csv,
    /// Formatted table output.
    Table,
    /// JSON array of row objects.
    Json,
    /// Raw output (values separated by tabs).
    Raw,
}

impl OutputFormat {
    /// Names accepted by [`OutputFormat::from_str`].
    pub const NAMES: &'static str = "csv, table, json, raw";
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "raw" => Ok(OutputFormat::Raw),
            _ => bail!("Unknown format '{}'. Available: {}", s, Self::NAMES),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Raw => "raw",
        };
        f.write_str(name)
    }
}

/// Formats a result table according to the specified format.
pub fn format_result(table: &Table, format: OutputFormat) -> Result<String> {
    if table.num_columns() == 0 {
        return Ok(String::new());
    }
    let output = match format {
        OutputFormat::Csv => tabula_sql::to_csv_string(table)?,
        OutputFormat::Table => format_table(table),
        OutputFormat::Json => format_json(table)?,
        OutputFormat::Raw => format_raw(table),
    };
    Ok(output)
}

/// Formats the result as a table.
fn format_table(table: &Table) -> String {
    let mut out = TextTable::new();

    out.set_content_arrangement(ContentArrangement::Dynamic)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    out.set_header(table.column_names().map(Cell::new));
    for row in table.rows() {
        out.add_row(row.into_iter().map(Cell::new));
    }

    format!("{}\n", out)
}

/// Formats the result as JSON, keeping column order within each object.
fn format_json(table: &Table) -> Result<String> {
    let rows: Vec<JsonValue> = table
        .rows()
        .map(|row| {
            let obj: Map<String, JsonValue> = table
                .column_names()
                .zip(row)
                .map(|(name, value)| (name.to_string(), JsonValue::from(value)))
                .collect();
            JsonValue::Object(obj)
        })
        .collect();

    Ok(format!("{}\n", serde_json::to_string_pretty(&rows)?))
}

/// Formats the result as raw tab-separated values.
fn format_raw(table: &Table) -> String {
    let mut output = table.column_names().collect::<Vec<_>>().join("\t");
    output.push('\n');

    for row in table.rows() {
        output.push_str(&row.join("\t"));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_result() -> Table {
        Table::from_columns([
            ("m.title", vec!["Titanic", "Crouching Tiger, Hidden Dragon"]),
            ("m.year", vec!["1997", "2000"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_format_csv() {
        let output = format_result(&make_test_result(), OutputFormat::Csv).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3); // Header + 2 rows
        assert_eq!(lines[0], "m.title,m.year");
        assert_eq!(lines[1], "Titanic,1997");
        assert_eq!(lines[2], "\"Crouching Tiger, Hidden Dragon\",2000");
    }

    #[test]
    fn test_format_table() {
        let output = format_result(&make_test_result(), OutputFormat::Table).unwrap();
        assert!(output.contains("m.title"));
        assert!(output.contains("m.year"));
        assert!(output.contains("Titanic"));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_format_json() {
        let output = format_result(&make_test_result(), OutputFormat::Json).unwrap();
        assert!(output.contains("\"m.title\""));
        assert!(output.contains("\"Titanic\""));

        // Verify it's valid JSON and that cells stay strings
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["m.year"], "1997");

        // Column order is preserved
        assert!(output.find("m.title").unwrap() < output.find("m.year").unwrap());
    }

    #[test]
    fn test_format_raw() {
        let output = format_result(&make_test_result(), OutputFormat::Raw).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "m.title\tm.year");
        assert_eq!(lines[1], "Titanic\t1997");
    }

    #[test]
    fn test_format_no_columns() {
        for format in [OutputFormat::Csv, OutputFormat::Table, OutputFormat::Json, OutputFormat::Raw] {
            assert_eq!(format_result(&Table::empty(), format).unwrap(), "");
        }
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Table.to_string(), "table");
    }
}
