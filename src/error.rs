use crate::parameters::{ExpressionError, ParameterError, SerializationError};
use crate::view::{ItemData, ItemRole};
use thiserror::Error;

/// Error types for the lmfit-table library.
#[derive(Error, Debug)]
pub enum TableError {
    /// The invalid model index was used.
    #[error("Invalid model index")]
    InvalidIndex,

    /// The row does not address a parameter.
    #[error("Row {row} is out of range ({count} parameters)")]
    RowOutOfRange { row: usize, count: usize },

    /// The column does not exist.
    #[error("Column {0} is out of range")]
    ColumnOutOfRange(usize),

    /// The column cannot be written.
    #[error("Column '{0}' is read-only")]
    ReadOnlyColumn(&'static str),

    /// The role cannot be written to the column.
    #[error("Role {role:?} is not supported for column '{column}'")]
    UnsupportedRole { column: &'static str, role: ItemRole },

    /// Input that should be a number is not.
    #[error("'{input}' is not a valid number")]
    InvalidNumber { input: String },

    /// Input that should be a boolean is not.
    #[error("'{input}' is not a valid flag")]
    InvalidFlag { input: String },

    /// Data of a kind the column cannot take.
    #[error("Column '{column}' cannot take {data:?}")]
    UnexpectedData { column: &'static str, data: ItemData },

    /// Parameter update rejected by the parameter.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// Expression text rejected before being stored.
    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),

    /// Parameters could not be loaded or saved.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// Result type alias for lmfit-table operations.
pub type Result<T> = std::result::Result<T, TableError>;
