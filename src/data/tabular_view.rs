use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::config::config::ViewConfig;
use crate::data::column::ColumnSpec;
use crate::data::filter::FilterValue;
use crate::data::pagination::{self, PaginationInfo};
use crate::data::row::{CellValue, Row};
use crate::data::value_compare::compare_cell_values;

/// Rows shown per page when no page size is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Called with the activated row and its index within the filtered set
pub type RowActivateFn = Box<dyn Fn(&Row, usize)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: SortDirection,
}

/// Construction options for a [`TabularView`]
#[derive(Default)]
pub struct ViewOptions {
    pub page_size: Option<usize>,
    pub default_sort_column: Option<String>,
    pub on_row_activate: Option<RowActivateFn>,
}

impl ViewOptions {
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            page_size: Some(config.page_size),
            default_sort_column: config.default_sort_column.clone(),
            on_row_activate: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_default_sort(mut self, column: impl Into<String>) -> Self {
        self.default_sort_column = Some(column.into());
        self
    }

    pub fn with_on_row_activate<F>(mut self, on_row_activate: F) -> Self
    where
        F: Fn(&Row, usize) + 'static,
    {
        self.on_row_activate = Some(Box::new(on_row_activate));
        self
    }
}

/// A view over a row collection that searches, filters, sorts and paginates
/// without modifying the underlying rows.
///
/// Every state-changing call recomputes the filtered set in a fixed order:
/// column filters, free-text search, stable sort, page clamp.
pub struct TabularView {
    columns: Vec<ColumnSpec>,

    /// The backing rows; never mutated
    source: Arc<Vec<Row>>,

    /// Indices into `source` after filtering, search and sort
    filtered_rows: Vec<usize>,

    filters: BTreeMap<String, FilterValue>,
    search: String,
    sort: SortState,

    page_size: usize,
    /// Current page (1-indexed)
    current_page: usize,

    on_row_activate: Option<RowActivateFn>,
}

impl TabularView {
    pub fn new(columns: Vec<ColumnSpec>, options: ViewOptions) -> Self {
        let page_size = options
            .page_size
            .filter(|&size| size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let sort_column = options
            .default_sort_column
            .filter(|key| columns.iter().any(|c| &c.key == key));

        Self {
            columns,
            source: Arc::new(Vec::new()),
            filtered_rows: Vec::new(),
            filters: BTreeMap::new(),
            search: String::new(),
            sort: SortState {
                column: sort_column,
                direction: SortDirection::Ascending,
            },
            page_size,
            current_page: 1,
            on_row_activate: options.on_row_activate,
        }
    }

    /// Replace the backing rows with a copy of `rows`
    pub fn set_data(&mut self, rows: &[Row]) {
        self.set_shared_data(Arc::new(rows.to_vec()));
    }

    /// Replace the backing rows without copying them
    pub fn set_shared_data(&mut self, rows: Arc<Vec<Row>>) {
        self.source = rows;
        self.current_page = 1;
        self.recompute();
    }

    /// Set or clear (with `None` or an empty value) the filter for one column
    pub fn set_filter(&mut self, column_key: &str, value: Option<FilterValue>) {
        if !self.has_column(column_key) {
            trace!(target: "tabular_view", "Ignoring filter on unknown column '{}'", column_key);
            return;
        }

        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                self.filters.insert(column_key.to_string(), value);
            }
            None => {
                self.filters.remove(column_key);
            }
        }

        self.current_page = 1;
        self.recompute();
    }

    /// Remove every column filter
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.current_page = 1;
        self.recompute();
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
        self.current_page = 1;
        self.recompute();
    }

    /// Sort by a column; sorting the same column again flips the direction
    pub fn sort(&mut self, column_key: &str) {
        let sortable = self
            .column(column_key)
            .map(|c| c.sortable)
            .unwrap_or(false);
        if !sortable {
            trace!(target: "tabular_view", "Ignoring sort on '{}'", column_key);
            return;
        }

        if self.sort.column.as_deref() == Some(column_key) {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort.column = Some(column_key.to_string());
            self.sort.direction = SortDirection::Ascending;
        }

        self.recompute();
    }

    /// Return to source order
    pub fn clear_sort(&mut self) {
        self.sort = SortState::default();
        self.recompute();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            trace!(target: "tabular_view", "Ignoring page size 0");
            return;
        }

        self.page_size = page_size;
        self.current_page = 1;
        self.recompute();
    }

    /// Move to `page` if it exists; out-of-range requests are ignored
    pub fn go_to_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
        } else {
            trace!(
                target: "tabular_view",
                "Ignoring page {} (total {})",
                page,
                self.total_pages()
            );
        }
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page + 1);
    }

    pub fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.go_to_page(self.current_page - 1);
        }
    }

    /// Rows on the current page
    pub fn visible_rows(&self) -> Vec<&Row> {
        self.visible_indices()
            .iter()
            .map(|&idx| &self.source[idx])
            .collect()
    }

    /// The whole filtered and sorted set, across all pages
    pub fn filtered_rows(&self) -> Vec<&Row> {
        self.filtered_rows
            .iter()
            .map(|&idx| &self.source[idx])
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_rows.len()
    }

    pub fn pagination_info(&self) -> PaginationInfo {
        PaginationInfo::new(self.current_page, self.page_size, self.filtered_count())
    }

    /// Page numbers for a bounded page selector
    pub fn page_numbers(&self) -> Vec<usize> {
        pagination::page_numbers(self.current_page, self.total_pages())
    }

    /// Notify the activation callback about a row of the filtered set.
    /// Returns whether the callback ran.
    pub fn activate_row(&self, index: usize) -> bool {
        let (Some(callback), Some(&row_idx)) =
            (&self.on_row_activate, self.filtered_rows.get(index))
        else {
            return false;
        };

        callback(&self.source[row_idx], index);
        true
    }

    /// Same as [`activate_row`](Self::activate_row) for a position on the current page
    pub fn activate_visible_row(&self, position: usize) -> bool {
        if position >= self.page_size {
            return false;
        }
        let offset = pagination::page_offset(self.current_page, self.page_size);
        self.activate_row(offset + position)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self, column_key: &str) -> Option<&FilterValue> {
        self.filters.get(column_key)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered_count(), self.page_size)
    }

    /// Number of rows before filtering
    pub fn total_rows(&self) -> usize {
        self.source.len()
    }

    fn has_column(&self, key: &str) -> bool {
        self.column(key).is_some()
    }

    fn visible_indices(&self) -> &[usize] {
        let start = pagination::page_offset(self.current_page, self.page_size)
            .min(self.filtered_rows.len());
        let end = (start + self.page_size).min(self.filtered_rows.len());
        &self.filtered_rows[start..end]
    }

    fn recompute(&mut self) {
        let source = &self.source;
        let filters = &self.filters;

        let mut rows: Vec<usize> = (0..source.len())
            .filter(|&idx| {
                let row = &source[idx];
                filters
                    .iter()
                    .all(|(key, filter)| filter.matches(row.get(key)))
            })
            .collect();

        if !self.search.is_empty() {
            let query = self.search.to_lowercase();
            rows.retain(|&idx| self.matches_search(&source[idx], &query));
        }

        if let Some(key) = &self.sort.column {
            let descending = self.sort.direction == SortDirection::Descending;
            // sort_by is stable, so equal keys keep their filtered order
            rows.sort_by(|&a, &b| {
                let cmp = compare_cell_values(source[a].get(key), source[b].get(key));
                if descending {
                    cmp.reverse()
                } else {
                    cmp
                }
            });
        }

        self.filtered_rows = rows;
        self.current_page = self.current_page.clamp(1, self.total_pages());

        debug!(
            target: "tabular_view",
            "Recomputed view: {} of {} rows, page {}/{}",
            self.filtered_rows.len(),
            self.source.len(),
            self.current_page,
            self.total_pages()
        );
    }

    fn matches_search(&self, row: &Row, query: &str) -> bool {
        self.columns.iter().any(|column| match row.get(&column.key) {
            CellValue::List(items) => items
                .iter()
                .any(|item| item.to_lowercase().contains(query)),
            value => value
                .search_text()
                .map(|text| text.contains(query))
                .unwrap_or(false),
        })
    }
}

impl fmt::Debug for TabularView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabularView")
            .field("columns", &self.columns)
            .field("total_rows", &self.source.len())
            .field("filtered_rows", &self.filtered_rows.len())
            .field("filters", &self.filters)
            .field("search", &self.search)
            .field("sort", &self.sort)
            .field("page_size", &self.page_size)
            .field("current_page", &self.current_page)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_rows(count: usize) -> Vec<Row> {
        (1..=count)
            .map(|i| Row::new().with("id", i as i64).with("name", format!("row {}", i)))
            .collect()
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("name", "Name"),
            ColumnSpec::new("notes", "Notes").with_sortable(false),
        ]
    }

    fn ids(rows: &[&Row]) -> Vec<CellValue> {
        rows.iter().map(|r| r.get("id").clone()).collect()
    }

    #[test]
    fn test_new_view_is_empty() {
        let view = TabularView::new(columns(), ViewOptions::default());
        assert_eq!(view.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(view.current_page(), 1);
        assert!(view.visible_rows().is_empty());
        assert!(view.pagination_info().is_empty());
    }

    #[test]
    fn test_zero_page_size_option_uses_default() {
        let view = TabularView::new(columns(), ViewOptions::default().with_page_size(0));
        assert_eq!(view.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_default_sort_must_be_in_schema() {
        let view = TabularView::new(columns(), ViewOptions::default().with_default_sort("missing"));
        assert_eq!(view.sort_state().column, None);

        let view = TabularView::new(columns(), ViewOptions::default().with_default_sort("name"));
        assert_eq!(view.sort_state().column.as_deref(), Some("name"));
    }

    #[test]
    fn test_unknown_filter_column_is_ignored() {
        let mut view = TabularView::new(columns(), ViewOptions::default());
        view.set_data(&numbered_rows(25));
        view.go_to_page(2);

        view.set_filter("missing", Some(FilterValue::exact("x")));
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.filtered_count(), 25);
    }

    #[test]
    fn test_non_sortable_column_is_ignored() {
        let mut view = TabularView::new(columns(), ViewOptions::default());
        view.set_data(&numbered_rows(3));
        view.sort("notes");
        assert_eq!(view.sort_state().column, None);
        view.sort("missing");
        assert_eq!(view.sort_state().column, None);
    }

    #[test]
    fn test_sort_keeps_page_but_reclamps() {
        let mut view = TabularView::new(columns(), ViewOptions::default());
        view.set_data(&numbered_rows(25));
        view.go_to_page(3);
        view.sort("id");
        assert_eq!(view.current_page(), 3);
        view.sort("id");
        assert_eq!(view.current_page(), 3);
        assert_eq!(ids(&view.visible_rows())[0], CellValue::from(5));
    }

    #[test]
    fn test_page_size_zero_is_ignored() {
        let mut view = TabularView::new(columns(), ViewOptions::default());
        view.set_data(&numbered_rows(25));
        view.go_to_page(2);
        view.set_page_size(0);
        assert_eq!(view.page_size(), 10);
        assert_eq!(view.current_page(), 2);

        view.set_page_size(5);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.total_pages(), 5);
    }

    #[test]
    fn test_next_and_previous_page() {
        let mut view = TabularView::new(columns(), ViewOptions::default());
        view.set_data(&numbered_rows(15));
        view.previous_page();
        assert_eq!(view.current_page(), 1);
        view.next_page();
        assert_eq!(view.current_page(), 2);
        view.next_page();
        assert_eq!(view.current_page(), 2);
        view.previous_page();
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_activate_visible_row_maps_to_filtered_index() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let options = ViewOptions::default().with_on_row_activate(move |row, index| {
            sink.borrow_mut().push((row.get("id").clone(), index));
        });

        let mut view = TabularView::new(columns(), options);
        view.set_data(&numbered_rows(25));
        view.go_to_page(2);

        assert!(view.activate_visible_row(0));
        assert!(!view.activate_visible_row(10));
        assert!(!view.activate_row(25));
        assert_eq!(*seen.borrow(), vec![(CellValue::from(11), 10)]);
    }

    #[test]
    fn test_activate_without_callback() {
        let mut view = TabularView::new(columns(), ViewOptions::default());
        view.set_data(&numbered_rows(2));
        assert!(!view.activate_row(0));
    }
}
