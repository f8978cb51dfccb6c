use std::fmt;

use crate::data::row::CellValue;

/// Filter applied to a single column
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Row value must equal this scalar (or, for list values, contain it)
    Exact(CellValue),
    /// Row value must be one of these scalars (or, for list values, share one)
    AnyOf(Vec<CellValue>),
}

impl FilterValue {
    pub fn exact(value: impl Into<CellValue>) -> Self {
        FilterValue::Exact(value.into())
    }

    pub fn any_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        FilterValue::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// An empty filter clears the column's filter instead of being stored
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Exact(value) => value.is_blank(),
            FilterValue::AnyOf(values) => values.is_empty(),
        }
    }

    /// Whether a row's cell value passes this filter
    pub fn matches(&self, cell: &CellValue) -> bool {
        if cell.is_null() {
            return false;
        }

        match (cell, self) {
            (CellValue::List(items), FilterValue::AnyOf(wanted)) => wanted.iter().any(|w| {
                w.as_str()
                    .map(|w| items.iter().any(|item| item == w))
                    .unwrap_or(false)
            }),
            (_, FilterValue::Exact(wanted)) => cell.contains_scalar(wanted),
            (_, FilterValue::AnyOf(wanted)) => wanted.iter().any(|w| cell == w),
        }
    }
}

type ChangeCallback = Box<dyn Fn(&[String])>;

/// Multi-select (checkbox) or single-select option group whose selection
/// feeds a column filter
pub struct FilterGroup {
    label: String,
    options: Vec<String>,
    selected: Vec<String>,
    multiple: bool,
    on_change: Option<ChangeCallback>,
}

impl FilterGroup {
    pub fn new(label: impl Into<String>, options: Vec<String>, multiple: bool) -> Self {
        Self {
            label: label.into(),
            options,
            selected: Vec::new(),
            multiple,
            on_change: None,
        }
    }

    pub fn with_on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(&[String]) + 'static,
    {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|v| v == value)
    }

    /// Replace the selection without notifying
    pub fn set_selected(&mut self, selected: Vec<String>) {
        self.selected = selected;
    }

    /// Check or uncheck one option
    pub fn toggle(&mut self, value: &str, checked: bool) {
        if checked {
            if !self.is_selected(value) {
                self.selected.push(value.to_string());
            }
        } else {
            self.selected.retain(|v| v != value);
        }
        self.notify();
    }

    /// Single-select change; `None` or an empty value means "all"
    pub fn select_single(&mut self, value: Option<&str>) {
        self.selected = match value {
            Some(v) if !v.is_empty() => vec![v.to_string()],
            _ => Vec::new(),
        };
        self.notify();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.notify();
    }

    /// Filter for the current selection, `None` when nothing is selected
    pub fn filter_value(&self) -> Option<FilterValue> {
        if self.selected.is_empty() {
            None
        } else {
            Some(FilterValue::any_of(self.selected.iter().cloned()))
        }
    }

    fn notify(&self) {
        if let Some(on_change) = &self.on_change {
            on_change(&self.selected);
        }
    }
}

impl fmt::Debug for FilterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterGroup")
            .field("label", &self.label)
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("multiple", &self.multiple)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_list_against_any_of_intersects() {
        let cell = CellValue::from(vec!["a", "b"]);
        assert!(FilterValue::any_of(["b"]).matches(&cell));
        assert!(FilterValue::any_of(["x", "a"]).matches(&cell));
        assert!(!FilterValue::any_of(["c"]).matches(&cell));
    }

    #[test]
    fn test_list_against_exact_contains() {
        let cell = CellValue::from(vec!["a", "b"]);
        assert!(FilterValue::exact("a").matches(&cell));
        assert!(!FilterValue::exact("z").matches(&cell));
    }

    #[test]
    fn test_scalar_against_filters() {
        let cell = CellValue::from("Sinta 2");
        assert!(FilterValue::exact("Sinta 2").matches(&cell));
        assert!(!FilterValue::exact("sinta 2").matches(&cell));
        assert!(FilterValue::any_of(["Sinta 1", "Sinta 2"]).matches(&cell));
        assert!(!FilterValue::any_of(["Sinta 3"]).matches(&cell));
        assert!(FilterValue::exact(true).matches(&CellValue::Boolean(true)));
    }

    #[test]
    fn test_null_never_matches() {
        assert!(!FilterValue::exact("a").matches(&CellValue::Null));
        assert!(!FilterValue::any_of(["a"]).matches(&CellValue::Null));
    }

    #[test]
    fn test_empty_filters() {
        assert!(FilterValue::exact("").is_empty());
        assert!(FilterValue::Exact(CellValue::Null).is_empty());
        assert!(FilterValue::AnyOf(vec![]).is_empty());
        assert!(!FilterValue::exact(0).is_empty());
    }

    #[test]
    fn test_group_toggle_and_clear() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let seen = changes.clone();
        let mut group = FilterGroup::new(
            "Akreditasi",
            vec!["Sinta 1".into(), "Sinta 2".into()],
            true,
        )
        .with_on_change(move |selected| seen.borrow_mut().push(selected.len()));

        group.toggle("Sinta 1", true);
        group.toggle("Sinta 1", true);
        group.toggle("Sinta 2", true);
        assert_eq!(group.selected(), ["Sinta 1", "Sinta 2"]);
        assert_eq!(
            group.filter_value(),
            Some(FilterValue::any_of(["Sinta 1", "Sinta 2"]))
        );

        group.toggle("Sinta 1", false);
        assert_eq!(group.selected(), ["Sinta 2"]);

        group.clear();
        assert!(group.filter_value().is_none());
        assert_eq!(*changes.borrow(), vec![1, 1, 2, 1, 0]);
    }

    #[test]
    fn test_group_single_select() {
        let mut group = FilterGroup::new("Kategori", vec!["Teknik".into()], false);
        group.select_single(Some("Teknik"));
        assert_eq!(group.selected(), ["Teknik"]);
        group.select_single(Some(""));
        assert!(group.selected().is_empty());
        group.select_single(None);
        assert!(group.filter_value().is_none());
    }
}
