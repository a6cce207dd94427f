//! Data roles and the values exchanged with views.

use std::fmt;

/// The aspect of a cell a view asks for or edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// Value rendered as the cell's content
    Display,
    /// Value placed into, or received from, an editor
    Edit,
    /// State of the cell's check box
    CheckState,
    /// Hover text
    ToolTip,
}

/// State of a check box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckState {
    Unchecked,
    PartiallyChecked,
    Checked,
}

impl CheckState {
    /// `false` only for [`CheckState::Unchecked`]
    pub fn is_checked(self) -> bool {
        self != CheckState::Unchecked
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

/// A value passed between a model and a view
#[derive(Debug, Clone, PartialEq)]
pub enum ItemData {
    Text(String),
    Float(f64),
    Bool(bool),
    CheckState(CheckState),
}

impl ItemData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_check_state(&self) -> Option<CheckState> {
        match self {
            Self::CheckState(state) => Some(*state),
            _ => None,
        }
    }
}

impl fmt::Display for ItemData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Float(value) => write!(f, "{}", value),
            Self::Bool(value) => write!(f, "{}", value),
            Self::CheckState(state) => write!(f, "{:?}", state),
        }
    }
}

impl From<&str> for ItemData {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ItemData {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for ItemData {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ItemData {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<CheckState> for ItemData {
    fn from(state: CheckState) -> Self {
        Self::CheckState(state)
    }
}
