//! # Parameter System
//!
//! Named fit parameters in the style of lmfit-py: each parameter has a value,
//! min/max bounds, a vary flag and an optional constraint expression linking it
//! to other parameters.
//!
//! ## Core Components
//!
//! - [`Parameter`]: a single parameter, with its [`ParameterState`] (free, fixed or linked)
//! - [`Parameters`]: an insertion-ordered collection that resolves linked values
//! - [`Bounds`]: the min/max interval of a parameter
//! - [`Expression`]: parser and evaluator for constraint expressions
//!
//! ## Example Usage
//!
//! ```rust
//! use lmfit_table::parameters::{ParameterState, Parameters};
//!
//! let mut params = Parameters::new();
//! params.add_param_with_bounds("amplitude", 3.0, 0.0, 10.0).unwrap();
//! params.add_param_with_bounds("decay", 0.5, 0.0, f64::INFINITY).unwrap();
//! params.add_param_with_expr("half_life", 0.0, "ln(2) / decay").unwrap();
//!
//! params.get_mut("amplitude").unwrap().set_vary(false);
//!
//! assert_eq!(params.get("amplitude").unwrap().state(), ParameterState::Fixed);
//! let half_life = params.resolved_value("half_life").unwrap();
//! assert!((half_life - 2.0_f64.ln() / 0.5).abs() < 1e-12);
//! ```

pub mod bounds;
pub mod expression;
pub mod parameter;
pub mod parameters;

pub use bounds::{Bounds, BoundsError};
pub use expression::{EvaluationContext, Expression, ExpressionError};
pub use parameter::{Parameter, ParameterError, ParameterState, ParameterUpdate};
pub use parameters::{Parameters, SerializationError};
