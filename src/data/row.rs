use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::fmt;

/// A single cell value in a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Number(f64),
    Boolean(bool),
    List(Vec<String>),
    Null,
}

static NULL: CellValue = CellValue::Null;

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, CellValue::List(_))
    }

    /// Null, empty strings and empty lists have nothing to show
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            CellValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Lowercased text used by free-text search. Null has no searchable text.
    pub fn search_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string().to_lowercase()),
        }
    }

    /// Whether a list value contains `item`, or a scalar value equals it
    pub fn contains_scalar(&self, item: &CellValue) -> bool {
        match (self, item) {
            (CellValue::List(items), CellValue::String(s)) => items.iter().any(|v| v == s),
            (CellValue::List(_), _) => false,
            (value, item) => value == item,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Number(n) => {
                // Whole numbers print without a trailing ".0"
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::List(items) => write!(f, "{}", items.join(", ")),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<Vec<String>> for CellValue {
    fn from(value: Vec<String>) -> Self {
        CellValue::List(value)
    }
}

impl From<Vec<&str>> for CellValue {
    fn from(value: Vec<&str>) -> Self {
        CellValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// One record of the displayed collection, keyed by column key.
/// Keys keep their insertion order; serializes as a flat object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: IndexMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Value at `key`; missing keys read as `Null`
    pub fn get(&self, key: &str) -> &CellValue {
        self.values.get(key).unwrap_or(&NULL)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.set(key, value);
        }
        row
    }
}
