use anyhow::{anyhow, Result};
use serde_json::{Map, Value};
use std::io::Write;
use tracing::info;

use crate::config::config::DisplayConfig;
use crate::data::column::{ColumnKind, ColumnSpec};
use crate::data::row::{CellValue, Row};
use crate::data::tabular_view::TabularView;

/// Exports the filtered and sorted rows of a view (all pages)
pub struct DataExporter;

impl DataExporter {
    /// Write the filtered set as CSV, one header row of column labels
    pub fn write_csv<W: Write>(
        view: &TabularView,
        writer: W,
        display: &DisplayConfig,
    ) -> Result<usize> {
        let rows = Self::rows_to_export(view)?;
        let columns = view.columns();

        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(columns.iter().map(|c| c.label.as_str()))?;

        for row in &rows {
            let record: Vec<String> = columns
                .iter()
                .map(|column| Self::format_cell(column, row, display))
                .collect();
            wtr.write_record(&record)?;
        }
        wtr.flush()?;

        info!(target: "export", "Exported {} rows to CSV", rows.len());
        Ok(rows.len())
    }

    /// Write the filtered set as a JSON array of objects keyed by column label
    pub fn write_json<W: Write>(
        view: &TabularView,
        writer: W,
        display: &DisplayConfig,
    ) -> Result<usize> {
        let rows = Self::rows_to_export(view)?;
        let columns = view.columns();

        let json_array: Vec<Value> = rows
            .iter()
            .map(|row| {
                let mut json_obj = Map::new();
                for column in columns {
                    json_obj.insert(
                        column.label.clone(),
                        Value::String(Self::format_cell(column, row, display)),
                    );
                }
                Value::Object(json_obj)
            })
            .collect();

        serde_json::to_writer_pretty(writer, &json_array)?;

        info!(target: "export", "Exported {} rows to JSON", rows.len());
        Ok(rows.len())
    }

    /// Export text for one cell, formatted by the column's kind
    pub fn format_cell(column: &ColumnSpec, row: &Row, display: &DisplayConfig) -> String {
        let value = row.get(&column.key);
        if value.is_blank() {
            return display.empty_cell.clone();
        }

        match (column.kind, value) {
            (ColumnKind::List, CellValue::List(items)) => {
                items.join(display.list_separator.as_str())
            }
            (ColumnKind::Boolean, CellValue::Boolean(b)) => {
                if *b {
                    display.true_label.clone()
                } else {
                    display.false_label.clone()
                }
            }
            (_, value) => value.to_string(),
        }
    }

    fn rows_to_export(view: &TabularView) -> Result<Vec<&Row>> {
        let rows = view.filtered_rows();
        if rows.is_empty() {
            return Err(anyhow!("No data to export"));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tabular_view::ViewOptions;

    fn journal_view() -> TabularView {
        let columns = vec![
            ColumnSpec::new("nama", "Nama"),
            ColumnSpec::new("scope", "Scope").with_kind(ColumnKind::List),
            ColumnSpec::new("fastTrack", "Fast Track").with_kind(ColumnKind::Boolean),
        ];
        let mut view = TabularView::new(columns, ViewOptions::default().with_page_size(1));
        view.set_data(&[
            Row::new()
                .with("nama", "Jurnal, Sains")
                .with("scope", vec!["Fisika", "Kimia"])
                .with("fastTrack", true),
            Row::new().with("nama", "Jurnal Teknik").with("fastTrack", false),
        ]);
        view
    }

    #[test]
    fn test_csv_exports_all_pages() {
        let view = journal_view();
        let mut out = Vec::new();
        let count = DataExporter::write_csv(&view, &mut out, &DisplayConfig::default()).unwrap();

        assert_eq!(count, 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Nama,Scope,Fast Track\n\"Jurnal, Sains\",\"Fisika, Kimia\",Yes\nJurnal Teknik,-,No\n"
        );
    }

    #[test]
    fn test_json_uses_labels_and_display_config() {
        let view = journal_view();
        let display = DisplayConfig {
            true_label: "Ya".to_string(),
            false_label: "Tidak".to_string(),
            list_separator: "; ".to_string(),
            ..DisplayConfig::default()
        };

        let mut out = Vec::new();
        DataExporter::write_json(&view, &mut out, &display).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(parsed[0]["Scope"], "Fisika; Kimia");
        assert_eq!(parsed[0]["Fast Track"], "Ya");
        assert_eq!(parsed[1]["Fast Track"], "Tidak");
    }

    #[test]
    fn test_export_respects_filters() {
        let mut view = journal_view();
        view.set_search("teknik");
        let mut out = Vec::new();
        let count = DataExporter::write_csv(&view, &mut out, &DisplayConfig::default()).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_empty_export_is_error() {
        let mut view = journal_view();
        view.set_search("nothing matches this");
        let result = DataExporter::write_csv(&view, Vec::new(), &DisplayConfig::default());
        assert!(result.is_err());
    }
}
