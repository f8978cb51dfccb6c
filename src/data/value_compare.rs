use crate::data::row::CellValue;
use std::cmp::Ordering;

/// Compare two cell values for sorting.
///
/// Strings compare case-insensitively, numbers and booleans by their native
/// ordering, lists by their lowercased joined text. NaN sorts after every
/// other number. Null sorts before any value. Values of different types order as
/// Null < Boolean < Number < String < List.
pub fn compare_cell_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::String(a), CellValue::String(b)) => compare_case_insensitive(a, b),

        (CellValue::Number(a), CellValue::Number(b)) => compare_numbers(*a, *b),

        (CellValue::Boolean(a), CellValue::Boolean(b)) => a.cmp(b),

        (CellValue::List(a), CellValue::List(b)) => {
            compare_case_insensitive(&a.join(", "), &b.join(", "))
        }

        // Null handling
        (CellValue::Null, CellValue::Null) => Ordering::Equal,
        (CellValue::Null, _) => Ordering::Less,
        (_, CellValue::Null) => Ordering::Greater,

        // Cross-type comparisons use a fixed type rank
        (a, b) => type_rank(a).cmp(&type_rank(b)),
    }
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // Both are ordered, so partial_cmp is always Some
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn type_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Null => 0,
        CellValue::Boolean(_) => 1,
        CellValue::Number(_) => 2,
        CellValue::String(_) => 3,
        CellValue::List(_) => 4,
    }
}
