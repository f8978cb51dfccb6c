//! Render description for a [`TabularView`] page.
//!
//! Pure data for a painter to draw: header labels with sort markers, cell
//! text, pagination metadata and the empty state. Nothing here draws.

use serde::Serialize;

use crate::config::config::DisplayConfig;
use crate::data::column::ColumnSpec;
use crate::data::pagination::{page_offset, PaginationInfo};
use crate::data::row::Row;
use crate::data::tabular_view::{SortDirection, TabularView};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Marker for the active sort column, e.g. "↑"
    pub sort_marker: Option<String>,
}

impl HeaderCell {
    /// Label followed by the sort marker, if any
    pub fn title(&self) -> String {
        match &self.sort_marker {
            Some(marker) => format!("{} {}", self.label, marker),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    /// Index within the filtered set, as passed to `activate_row`
    pub index: usize,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
    pub pagination: PaginationInfo,
    pub page_numbers: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
    pub is_empty: bool,
    pub empty_title: String,
    pub empty_text: String,
}

impl RenderedPage {
    /// "Showing 11-20 of 25"
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {}",
            self.pagination.range_start,
            self.pagination.range_end,
            self.pagination.total_filtered_count
        )
    }

    /// Page selector text with gaps, e.g. "1 … 9 [10] 11 … 20"
    pub fn page_selector(&self) -> String {
        let mut parts = Vec::new();
        let mut previous = 0;
        for &page in &self.page_numbers {
            if previous != 0 && page > previous + 1 {
                parts.push("…".to_string());
            }
            if page == self.pagination.current_page {
                parts.push(format!("[{}]", page));
            } else {
                parts.push(page.to_string());
            }
            previous = page;
        }
        parts.join(" ")
    }
}

/// Display text for one cell: the column renderer if set, otherwise the
/// value's text, with blank values replaced by the placeholder
pub fn cell_text(column: &ColumnSpec, row: &Row, display: &DisplayConfig) -> String {
    if let Some(text) = column.render_custom(row) {
        return text;
    }

    let value = row.get(&column.key);
    if value.is_blank() {
        display.empty_cell.clone()
    } else {
        value.to_string()
    }
}

impl TabularView {
    pub fn render(&self, display: &DisplayConfig) -> RenderedPage {
        let sort = self.sort_state();
        let headers = self
            .columns()
            .iter()
            .map(|column| {
                let sort_marker = (sort.column.as_deref() == Some(column.key.as_str())).then(|| {
                    match sort.direction {
                        SortDirection::Ascending => display.ascending_marker.clone(),
                        SortDirection::Descending => display.descending_marker.clone(),
                    }
                });
                HeaderCell {
                    key: column.key.clone(),
                    label: column.label.clone(),
                    sortable: column.sortable,
                    sort_marker,
                }
            })
            .collect();

        let offset = page_offset(self.current_page(), self.page_size());
        let rows = self
            .visible_rows()
            .into_iter()
            .enumerate()
            .map(|(position, row)| RenderedRow {
                index: offset + position,
                cells: self
                    .columns()
                    .iter()
                    .map(|column| cell_text(column, row, display))
                    .collect(),
            })
            .collect();

        let pagination = self.pagination_info();
        RenderedPage {
            headers,
            rows,
            page_numbers: self.page_numbers(),
            has_previous: pagination.has_previous(),
            has_next: pagination.has_next(),
            is_empty: pagination.is_empty(),
            pagination,
            empty_title: display.empty_title.clone(),
            empty_text: display.empty_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tabular_view::ViewOptions;

    fn view_with(rows: Vec<Row>) -> TabularView {
        let columns = vec![
            ColumnSpec::new("nama", "Nama"),
            ColumnSpec::new("scope", "Scope"),
            ColumnSpec::new("harga", "Harga").with_render(|value, _| format!("Rp {}", value)),
        ];
        let mut view = TabularView::new(columns, ViewOptions::default().with_page_size(2));
        view.set_data(&rows);
        view
    }

    #[test]
    fn test_cells_use_renderer_and_placeholder() {
        let view = view_with(vec![
            Row::new()
                .with("nama", "Jurnal A")
                .with("scope", vec!["Sains", "Teknik"])
                .with("harga", 150000),
            Row::new().with("nama", ""),
        ]);

        let page = view.render(&DisplayConfig::default());
        assert_eq!(page.rows[0].cells, vec!["Jurnal A", "Sains, Teknik", "Rp 150000"]);
        assert_eq!(page.rows[1].cells, vec!["-", "-", "Rp "]);
    }

    #[test]
    fn test_header_sort_marker() {
        let mut view = view_with(vec![Row::new().with("nama", "a")]);
        view.sort("nama");
        let display = DisplayConfig::default();

        let page = view.render(&display);
        assert_eq!(page.headers[0].title(), "Nama ↑");
        assert_eq!(page.headers[1].title(), "Scope");

        view.sort("nama");
        assert_eq!(view.render(&display).headers[0].sort_marker.as_deref(), Some("↓"));
    }

    #[test]
    fn test_row_indices_are_absolute() {
        let rows = (0..5).map(|i| Row::new().with("nama", format!("n{}", i))).collect();
        let mut view = view_with(rows);
        view.go_to_page(2);

        let page = view.render(&DisplayConfig::default());
        let indices: Vec<usize> = page.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![2, 3]);
        assert_eq!(page.summary(), "Showing 3-4 of 5");
        assert!(page.has_previous);
        assert!(page.has_next);
    }

    #[test]
    fn test_empty_state() {
        let view = view_with(Vec::new());
        let page = view.render(&DisplayConfig::default());
        assert!(page.is_empty);
        assert!(page.rows.is_empty());
        assert_eq!(page.empty_title, "No data");
        assert_eq!(page.summary(), "Showing 0-0 of 0");
    }

    #[test]
    fn test_page_selector_gaps() {
        let rows = (0..40).map(|i| Row::new().with("nama", format!("n{}", i))).collect();
        let mut view = view_with(rows);
        view.go_to_page(10);
        let page = view.render(&DisplayConfig::default());
        assert_eq!(page.page_selector(), "1 … 9 [10] 11 … 20");
    }
}
