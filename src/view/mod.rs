//! Model/View vocabulary
//!
//! Toolkit-neutral types for exposing data to a table widget. A concrete GUI
//! binding adapts its own table-model base class to [`ItemModel`]; the types
//! here are what flows across that boundary.
//!
//! - [`ModelIndex`]: identifies a cell
//! - [`ItemRole`]: which aspect of a cell is read or written
//! - [`ItemData`] and [`CheckState`]: values exchanged with the view
//! - [`ItemFlags`]: what the view may do with a cell
//! - [`ModelSignals`]: change notifications back to the view

mod index;
mod role;
mod traits;

pub use index::ModelIndex;
pub use role::{CheckState, ItemData, ItemRole};
pub use traits::{ItemFlags, ItemModel, ModelSignals, Orientation};
