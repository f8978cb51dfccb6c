use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::data::row::{CellValue, Row};

/// Maps a cell value (and its row) to display text
pub type CellRenderer = Arc<dyn Fn(&CellValue, &Row) -> String + Send + Sync>;

/// How a column's values are formatted on export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
    Boolean,
    List,
}

impl ColumnKind {
    /// Infer the kind from a sample value
    pub fn infer_from_value(value: &CellValue) -> Self {
        match value {
            CellValue::Number(_) => ColumnKind::Number,
            CellValue::Boolean(_) => ColumnKind::Boolean,
            CellValue::List(_) => ColumnKind::List,
            CellValue::String(_) | CellValue::Null => ColumnKind::Text,
        }
    }
}

/// Schema entry describing how to read, label and format one field of a row
#[derive(Clone)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub kind: ColumnKind,
    render: Option<CellRenderer>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            kind: ColumnKind::Text,
            render: None,
        }
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue, &Row) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn has_renderer(&self) -> bool {
        self.render.is_some()
    }

    /// Run the custom renderer for this column, if one is configured
    pub fn render_custom(&self, row: &Row) -> Option<String> {
        self.render
            .as_ref()
            .map(|render| render(row.get(&self.key), row))
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("kind", &self.kind)
            .field("render", &self.render.is_some())
            .finish()
    }
}
