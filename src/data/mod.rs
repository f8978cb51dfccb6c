//! Data layer for the tabular view
//!
//! Rows and column schema on one side, the searchable, sortable,
//! paginated view over them on the other. Rendering and export read
//! from the view without changing it.

// Core data modules
pub mod column;
pub mod row;
pub mod tabular_view;
pub mod value_compare;

// View state helpers
pub mod filter;
pub mod pagination;
pub mod render;

// Input and output
pub mod data_exporter;
pub mod row_loader;
