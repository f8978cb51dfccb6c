pub mod config;
pub mod data;
pub mod utils;

pub use data::column::{CellRenderer, ColumnKind, ColumnSpec};
pub use data::filter::{FilterGroup, FilterValue};
pub use data::pagination::PaginationInfo;
pub use data::render::RenderedPage;
pub use data::row::{CellValue, Row};
pub use data::tabular_view::{SortDirection, SortState, TabularView, ViewOptions};
