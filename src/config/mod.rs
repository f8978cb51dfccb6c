//! Configuration module
//!
//! Page size, default sort and display settings loaded from TOML.

pub mod config;
