//! Parameter definition and implementation
//!
//! A [`Parameter`] is a named value with bounds, a flag telling the fitting
//! code whether it may be varied, and an optional constraint expression that
//! links it to other parameters.

use crate::parameters::bounds::{Bounds, BoundsError};
use crate::parameters::expression::ExpressionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when working with parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Bounds error: {0}")]
    BoundsError(#[from] BoundsError),

    #[error("Cannot evaluate expression for parameter '{name}': {source}")]
    ExpressionEvaluation {
        name: String,
        #[source]
        source: ExpressionError,
    },

    #[error("Parameter '{name}' not found")]
    ParameterNotFound { name: String },

    #[error("Parameter '{name}' already exists")]
    DuplicateName { name: String },
}

/// How a parameter takes part in a fit
///
/// An expression always wins over the vary flag: a parameter with an
/// expression is [`ParameterState::Linked`] whatever `vary` says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterState {
    /// Adjusted independently by the optimizer
    Free,
    /// Held at its current value
    Fixed,
    /// Derived from other parameters through an expression
    Linked,
}

impl fmt::Display for ParameterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("free"),
            Self::Fixed => f.write_str("fixed"),
            Self::Linked => f.write_str("linked"),
        }
    }
}

/// A parameter for optimization problems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ParameterRecord")]
pub struct Parameter {
    name: String,

    value: f64,

    /// Value at creation, restored by [`Parameter::reset`]
    init_value: f64,

    /// Whether the optimizer may vary this parameter when it has no expression
    pub vary: bool,

    bounds: Bounds,

    /// Constraint expression; never `Some("")`
    expr: Option<String>,

    /// Standard error of the parameter (set after fitting)
    pub stderr: Option<f64>,

    /// User data associated with this parameter
    pub user_data: Option<String>,
}

/// Serialized form of a [`Parameter`], normalized on the way in: an empty
/// expression becomes `None` and the values are clamped into the bounds.
#[derive(Deserialize)]
struct ParameterRecord {
    name: String,
    value: f64,
    init_value: f64,
    vary: bool,
    bounds: Bounds,
    #[serde(default)]
    expr: Option<String>,
    #[serde(default)]
    stderr: Option<f64>,
    #[serde(default)]
    user_data: Option<String>,
}

impl From<ParameterRecord> for Parameter {
    fn from(record: ParameterRecord) -> Self {
        Self {
            value: record.bounds.clamp(record.value),
            init_value: record.bounds.clamp(record.init_value),
            expr: normalize_expr(record.expr.as_deref()),
            name: record.name,
            vary: record.vary,
            bounds: record.bounds,
            stderr: record.stderr,
            user_data: record.user_data,
        }
    }
}

/// A multi-field change applied by [`Parameter::set`]
///
/// Fields left as `None` are not touched. For `expr`, `Some(None)` and
/// `Some(Some(""))` both clear the expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterUpdate {
    pub value: Option<f64>,
    pub vary: Option<bool>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub expr: Option<Option<String>>,
}

impl ParameterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn vary(mut self, vary: bool) -> Self {
        self.vary = Some(vary);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn expr(mut self, expr: Option<&str>) -> Self {
        self.expr = Some(expr.map(str::to_string));
        self
    }
}

fn normalize_expr(expr: Option<&str>) -> Option<String> {
    expr.filter(|text| !text.is_empty()).map(str::to_string)
}

impl Parameter {
    /// Create a new free, unbounded parameter
    ///
    /// # Examples
    ///
    /// ```
    /// use lmfit_table::parameters::{Parameter, ParameterState};
    ///
    /// let param = Parameter::new("amplitude", 10.0);
    /// assert_eq!(param.name(), "amplitude");
    /// assert_eq!(param.value(), 10.0);
    /// assert_eq!(param.state(), ParameterState::Free);
    /// ```
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            init_value: value,
            vary: true,
            bounds: Bounds::default(),
            expr: None,
            stderr: None,
            user_data: None,
        }
    }

    /// Create a new free parameter limited to `[min, max]`
    ///
    /// The value is clamped into the bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use lmfit_table::parameters::Parameter;
    ///
    /// let param = Parameter::with_bounds("amplitude", 25.0, 0.0, 20.0).unwrap();
    /// assert_eq!(param.value(), 20.0);
    /// assert_eq!(param.min(), 0.0);
    /// assert_eq!(param.max(), 20.0);
    /// ```
    pub fn with_bounds(name: &str, value: f64, min: f64, max: f64) -> Result<Self, ParameterError> {
        let bounds = Bounds::new(min, max)?;
        let value = bounds.clamp(value);

        Ok(Self {
            bounds,
            value,
            init_value: value,
            ..Self::new(name, value)
        })
    }

    /// Create a new parameter linked to others through `expr`
    ///
    /// The vary flag is cleared; an empty `expr` yields a fixed parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use lmfit_table::parameters::{Parameter, ParameterState};
    ///
    /// let param = Parameter::with_expr("half_amplitude", 5.0, "amplitude / 2");
    /// assert_eq!(param.expr(), Some("amplitude / 2"));
    /// assert_eq!(param.state(), ParameterState::Linked);
    /// ```
    pub fn with_expr(name: &str, value: f64, expr: &str) -> Self {
        Self {
            vary: false,
            expr: normalize_expr(Some(expr)),
            ..Self::new(name, value)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored value
    ///
    /// For a linked parameter this is the last value written back by
    /// [`Parameters::update_expressions`](crate::parameters::Parameters::update_expressions);
    /// use [`Parameters::resolved_value`](crate::parameters::Parameters::resolved_value)
    /// for the current evaluation.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set the value, rejecting NaN and anything outside the bounds
    pub fn set_value(&mut self, value: f64) -> Result<(), ParameterError> {
        self.bounds.check(value)?;
        self.value = value;
        Ok(())
    }

    pub fn init_value(&self) -> f64 {
        self.init_value
    }

    /// Reset the parameter to its initial value, clamped to the current bounds
    pub fn reset(&mut self) {
        self.value = self.bounds.clamp(self.init_value);
    }

    pub fn vary(&self) -> bool {
        self.vary
    }

    /// Set the vary flag
    ///
    /// The expression is left alone, so a linked parameter stays linked and
    /// picks this flag back up once its expression is cleared.
    pub fn set_vary(&mut self, vary: bool) {
        self.vary = vary;
    }

    /// Free, fixed or linked
    pub fn state(&self) -> ParameterState {
        if self.expr.is_some() {
            ParameterState::Linked
        } else if self.vary {
            ParameterState::Free
        } else {
            ParameterState::Fixed
        }
    }

    /// `true` if the optimizer should adjust this parameter
    pub fn is_varying(&self) -> bool {
        self.state() == ParameterState::Free
    }

    pub fn min(&self) -> f64 {
        self.bounds.min
    }

    pub fn max(&self) -> f64 {
        self.bounds.max
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Replace both bounds, clamping the value into the new interval
    pub fn set_bounds(&mut self, min: f64, max: f64) -> Result<(), ParameterError> {
        let bounds = Bounds::new(min, max)?;
        self.bounds = bounds;
        self.value = bounds.clamp(self.value);
        Ok(())
    }

    pub fn set_min(&mut self, min: f64) -> Result<(), ParameterError> {
        self.set_bounds(min, self.bounds.max)
    }

    pub fn set_max(&mut self, max: f64) -> Result<(), ParameterError> {
        self.set_bounds(self.bounds.min, max)
    }

    pub fn expr(&self) -> Option<&str> {
        self.expr.as_deref()
    }

    /// Set or clear the constraint expression
    ///
    /// The text is stored verbatim; it is parsed only when the value is
    /// resolved. `Some("")` clears the expression like `None`.
    pub fn set_expr(&mut self, expr: Option<&str>) {
        self.expr = normalize_expr(expr);
    }

    pub fn stderr(&self) -> Option<f64> {
        self.stderr
    }

    pub fn set_stderr(&mut self, stderr: Option<f64>) {
        self.stderr = stderr;
    }

    pub fn user_data(&self) -> Option<&str> {
        self.user_data.as_deref()
    }

    pub fn set_user_data(&mut self, user_data: Option<&str>) {
        self.user_data = user_data.map(|s| s.to_string());
    }

    /// Apply several field changes at once
    ///
    /// Either every field in `update` is applied or, on error, none is. New
    /// bounds are validated first; an explicit new value must lie within them,
    /// while the current value is clamped into them.
    ///
    /// # Examples
    ///
    /// ```
    /// use lmfit_table::parameters::{Parameter, ParameterUpdate};
    ///
    /// let mut param = Parameter::new("center", 5.0);
    /// param.set(ParameterUpdate::new().min(0.0).max(4.0)).unwrap();
    /// assert_eq!(param.value(), 4.0);
    ///
    /// // Rejected as a whole: the max is not applied either
    /// assert!(param.set(ParameterUpdate::new().max(10.0).value(20.0)).is_err());
    /// assert_eq!(param.max(), 4.0);
    /// ```
    pub fn set(&mut self, update: ParameterUpdate) -> Result<(), ParameterError> {
        let mut bounds = self.bounds;
        if let Some(min) = update.min {
            bounds = bounds.with_min(min)?;
        }
        if let Some(max) = update.max {
            bounds = bounds.with_max(max)?;
        }

        let value = match update.value {
            Some(value) => {
                bounds.check(value)?;
                value
            }
            None => bounds.clamp(self.value),
        };

        self.bounds = bounds;
        self.value = value;
        if let Some(vary) = update.vary {
            self.vary = vary;
        }
        if let Some(expr) = update.expr {
            self.set_expr(expr.as_deref());
        }

        Ok(())
    }
}
