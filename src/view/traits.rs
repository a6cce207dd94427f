//! The table model trait and its supporting types.

use super::index::ModelIndex;
use super::role::{ItemData, ItemRole};
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// What a view may do with a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemFlags: u8 {
        const ENABLED        = 0b0001;
        const SELECTABLE     = 0b0010;
        const EDITABLE       = 0b0100;
        const USER_CHECKABLE = 0b1000;
    }
}

/// Header axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The header above the columns
    Horizontal,
    /// The header beside the rows
    Vertical,
}

type DataChangedSlot = Box<dyn FnMut(ModelIndex, ModelIndex)>;

/// Change notifications emitted by a model
///
/// Slots are called synchronously, in connection order, from the call that
/// changed the data.
#[derive(Default)]
pub struct ModelSignals {
    data_changed: Vec<DataChangedSlot>,
}

impl ModelSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a slot receiving the `(top_left, bottom_right)` corners of the
    /// changed range
    pub fn connect_data_changed<F>(&mut self, slot: F)
    where
        F: FnMut(ModelIndex, ModelIndex) + 'static,
    {
        self.data_changed.push(Box::new(slot));
    }

    /// Notify every slot that the cells from `top_left` to `bottom_right` changed
    pub fn emit_data_changed(&mut self, top_left: ModelIndex, bottom_right: ModelIndex) {
        for slot in &mut self.data_changed {
            slot(top_left, bottom_right);
        }
    }

    pub fn data_changed_receivers(&self) -> usize {
        self.data_changed.len()
    }
}

impl fmt::Debug for ModelSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSignals")
            .field("data_changed", &self.data_changed.len())
            .finish()
    }
}

/// A two-dimensional model a table view can render and edit
///
/// Every accessor treats an invalid or out-of-range index as "no cell":
/// reads return `None`, writes return `false`, and nothing panics.
pub trait ItemModel {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// Index for `(row, column)`, or the invalid index when out of range
    fn index(&self, row: usize, column: usize) -> ModelIndex {
        if row < self.row_count() && column < self.column_count() {
            ModelIndex::new(row, column)
        } else {
            ModelIndex::invalid()
        }
    }

    /// Capabilities of the cell at `index`
    fn flags(&self, index: ModelIndex) -> ItemFlags;

    /// The cell's data for `role`, or `None` if it has none
    fn data(&self, index: ModelIndex, role: ItemRole) -> Option<ItemData>;

    /// Write `value` into the cell for `role`; `true` if the edit was accepted
    fn set_data(&mut self, index: ModelIndex, value: ItemData, role: ItemRole) -> bool;

    /// Header content for `section` along `orientation`
    fn header_data(&self, section: usize, orientation: Orientation, role: ItemRole)
        -> Option<ItemData>;

    fn signals_mut(&mut self) -> &mut ModelSignals;

    /// Display data rendered as text
    fn display_text(&self, index: ModelIndex) -> Option<String> {
        self.data(index, ItemRole::Display).map(|data| data.to_string())
    }
}
