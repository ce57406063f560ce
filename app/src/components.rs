//! This module serves as a container for the reusable UI components of the
//! dashboard.
//!
//! Each sub-module defines a specific UI element: the data grid, the
//! apply-YAML dialog, the page header, the loading spinner, and the error
//! template.

pub mod apply_yaml;
pub mod datagrid;
pub mod error_template;
pub mod header;
pub mod loader;
