//! # lmfit-table
//!
//! `lmfit-table` presents a collection of fit parameters, in the style of
//! `lmfit-py`, as an editable table for Model/View GUI toolkits.
//!
//! The library provides:
//! - A parameter system with bounds, a vary flag and algebraic constraint
//!   expressions linking parameters to each other
//! - A toolkit-neutral Model/View vocabulary (indices, roles, flags, signals)
//! - A table model exposing the parameters as rows of Name, Vary, Value, Min,
//!   Max and Expr
//!
//! ## Basic Usage
//!
//! ```
//! use lmfit_table::parameters::Parameters;
//! use lmfit_table::table::Column;
//! use lmfit_table::view::{ItemData, ItemRole};
//! use lmfit_table::{ItemModel, ParameterTableModel};
//!
//! let mut params = Parameters::new();
//! params.add_param_with_bounds("amplitude", 2.0, 0.0, 10.0).unwrap();
//! params.add_param_with_expr("height", 0.0, "amplitude / 2").unwrap();
//!
//! let mut table = ParameterTableModel::from_parameters(params);
//! assert_eq!(table.row_count(), 2);
//!
//! let value = table.index(0, Column::Value.index());
//! assert!(table.set_data(value, ItemData::from("4.0"), ItemRole::Edit));
//!
//! let height = table.index(1, Column::Value.index());
//! assert_eq!(table.display_text(height).as_deref(), Some("2"));
//! ```

pub mod error;
pub mod parameters;
pub mod table;
pub mod view;

// Re-exports for convenience
pub use error::{Result, TableError};
pub use parameters::Parameters;
pub use table::ParameterTableModel;
pub use view::ItemModel;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
