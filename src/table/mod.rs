//! Parameter table
//!
//! [`ParameterTableModel`] adapts a [`Parameters`](crate::parameters::Parameters)
//! collection to the [`ItemModel`](crate::view::ItemModel) interface so that a
//! table view can show and edit it. Each parameter is a row with the columns
//! Name, Vary, Value, Min, Max and Expr.
//!
//! The table never owns the parameters exclusively. It holds a
//! [`SharedParameters`] handle, and any code holding a clone of that handle
//! can add, remove or modify parameters; the table reflects the current state
//! on every query.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use lmfit_table::parameters::Parameters;
//! use lmfit_table::table::ParameterTableModel;
//! use lmfit_table::view::ItemModel;
//!
//! let params = Rc::new(RefCell::new(Parameters::new()));
//! let table = ParameterTableModel::new(Rc::clone(&params));
//! assert_eq!(table.row_count(), 0);
//!
//! params.borrow_mut().add_param("amplitude", 2.0).unwrap();
//! assert_eq!(table.row_count(), 1);
//! ```

mod column;
mod config;
mod model;

pub use column::Column;
pub use config::{TableConfig, ValuePolicy};
pub use model::{ParameterTableModel, SharedParameters};
