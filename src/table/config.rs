//! Configuration options for the parameter table.

/// What a value edit outside the parameter's bounds does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValuePolicy {
    /// Clamp the new value into `[min, max]` and accept the edit
    #[default]
    Clamp,

    /// Reject the edit and keep the old value
    Reject,
}

/// Configuration options for [`ParameterTableModel`](super::ParameterTableModel).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableConfig {
    /// Handling of out-of-bounds value edits. Default: Clamp
    ///
    /// NaN is rejected under either policy.
    pub value_policy: ValuePolicy,

    /// Require expression edits to parse before they are stored. Default: false
    ///
    /// When off, expression text is stored verbatim and errors only show up
    /// when the value column of a linked row is read.
    pub strict_expressions: bool,
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value_policy(mut self, value_policy: ValuePolicy) -> Self {
        self.value_policy = value_policy;
        self
    }

    pub fn with_strict_expressions(mut self, strict: bool) -> Self {
        self.strict_expressions = strict;
        self
    }
}
