//! Cell addressing.

/// Position of a cell in a table model
///
/// An index is either valid, carrying a row and column, or the invalid index
/// used for "no cell". A valid index can still go stale when rows are removed
/// from the underlying data, so models check the row against their current
/// row count on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModelIndex {
    position: Option<(usize, usize)>,
}

impl ModelIndex {
    /// A valid index for `(row, column)`
    pub fn new(row: usize, column: usize) -> Self {
        Self {
            position: Some((row, column)),
        }
    }

    /// The index that addresses no cell
    pub fn invalid() -> Self {
        Self { position: None }
    }

    pub fn is_valid(&self) -> bool {
        self.position.is_some()
    }

    /// Row, or `None` for the invalid index
    pub fn row(&self) -> Option<usize> {
        self.position.map(|(row, _)| row)
    }

    /// Column, or `None` for the invalid index
    pub fn column(&self) -> Option<usize> {
        self.position.map(|(_, column)| column)
    }

    /// `(row, column)`, or `None` for the invalid index
    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }
}
