//! Column layout of the parameter table.

use crate::view::ItemFlags;
use std::fmt;

/// One of the six fixed columns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Vary,
    Value,
    Min,
    Max,
    Expr,
}

impl Column {
    /// All columns in display order
    pub const ALL: [Column; 6] = [
        Column::Name,
        Column::Vary,
        Column::Value,
        Column::Min,
        Column::Max,
        Column::Expr,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Header label
    pub fn label(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Vary => "Vary",
            Column::Value => "Value",
            Column::Min => "Min",
            Column::Max => "Max",
            Column::Expr => "Expr",
        }
    }

    /// Capabilities of a cell in this column on an existing row
    ///
    /// The name is read-only and the vary flag is a check box, never a text
    /// field.
    pub fn flags(self) -> ItemFlags {
        let base = ItemFlags::ENABLED | ItemFlags::SELECTABLE;
        match self {
            Column::Name => base,
            Column::Vary => base | ItemFlags::USER_CHECKABLE,
            Column::Value | Column::Min | Column::Max | Column::Expr => base | ItemFlags::EDITABLE,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
