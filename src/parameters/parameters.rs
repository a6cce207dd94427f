//! Parameters collection implementation
//!
//! [`Parameters`] keeps parameters in insertion order, which is the row order a
//! table view presents. It resolves linked parameters by evaluating their
//! expressions against the rest of the collection.

use crate::parameters::expression::{EvaluationContext, Expression, ExpressionError};
use crate::parameters::parameter::{Parameter, ParameterError, ParameterState};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// An insertion-ordered collection of uniquely named parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    params: IndexMap<String, Parameter>,
}

/// Evaluation context that resolves linked parameters on demand
///
/// Names currently being resolved are kept on a stack so a cycle such as
/// `a = b`, `b = a` is reported instead of recursing forever.
struct Resolver<'a> {
    params: &'a Parameters,
    stack: RefCell<Vec<String>>,
}

impl<'a> Resolver<'a> {
    fn new(params: &'a Parameters) -> Self {
        Self {
            params,
            stack: RefCell::new(Vec::new()),
        }
    }

    fn resolve(&self, param: &Parameter) -> Result<f64, ExpressionError> {
        let Some(text) = param.expr() else {
            return Ok(param.value());
        };

        if self.stack.borrow().iter().any(|name| name == param.name()) {
            return Err(ExpressionError::CircularReference {
                name: param.name().to_string(),
            });
        }

        let expr = Expression::parse(text)?;
        self.stack.borrow_mut().push(param.name().to_string());
        let result = expr.evaluate(self);
        self.stack.borrow_mut().pop();
        result.map(|value| param.bounds().clamp(value))
    }
}

impl EvaluationContext for Resolver<'_> {
    fn get_variable(&self, name: &str) -> Result<f64, ExpressionError> {
        let param = self
            .params
            .get(name)
            .ok_or_else(|| ExpressionError::UndefinedVariable {
                name: name.to_string(),
            })?;
        self.resolve(param)
    }

    fn has_variable(&self, name: &str) -> bool {
        self.params.contains(name)
    }
}

impl Parameters {
    /// Create a new empty parameters collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    ///
    /// Fails with [`ParameterError::DuplicateName`] if the name is taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use lmfit_table::parameters::{Parameter, Parameters};
    ///
    /// let mut params = Parameters::new();
    /// params.add(Parameter::new("amplitude", 10.0)).unwrap();
    /// assert!(params.add(Parameter::new("amplitude", 1.0)).is_err());
    /// assert_eq!(params.len(), 1);
    /// ```
    pub fn add(&mut self, param: Parameter) -> Result<(), ParameterError> {
        if self.params.contains_key(param.name()) {
            return Err(ParameterError::DuplicateName {
                name: param.name().to_string(),
            });
        }

        self.params.insert(param.name().to_string(), param);
        Ok(())
    }

    /// Append a free, unbounded parameter
    pub fn add_param(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        self.add(Parameter::new(name, value))
    }

    /// Append a free parameter limited to `[min, max]`
    pub fn add_param_with_bounds(
        &mut self,
        name: &str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<(), ParameterError> {
        self.add(Parameter::with_bounds(name, value, min, max)?)
    }

    /// Append a parameter linked through `expr`
    ///
    /// # Examples
    ///
    /// ```
    /// use lmfit_table::parameters::Parameters;
    ///
    /// let mut params = Parameters::new();
    /// params.add_param("amplitude", 10.0).unwrap();
    /// params.add_param_with_expr("half_amplitude", 0.0, "amplitude / 2").unwrap();
    /// assert_eq!(params.resolved_value("half_amplitude").unwrap(), 5.0);
    /// ```
    pub fn add_param_with_expr(
        &mut self,
        name: &str,
        value: f64,
        expr: &str,
    ) -> Result<(), ParameterError> {
        self.add(Parameter::with_expr(name, value, expr))
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.params.get_mut(name)
    }

    /// Parameter at position `index` in insertion order
    pub fn get_index(&self, index: usize) -> Option<&Parameter> {
        self.params.get_index(index).map(|(_, param)| param)
    }

    /// Mutable parameter at position `index` in insertion order
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Parameter> {
        self.params.get_index_mut(index).map(|(_, param)| param)
    }

    /// Position of the named parameter
    pub fn position(&self, name: &str) -> Option<usize> {
        self.params.get_index_of(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Remove a parameter, keeping the order of the others
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        self.params.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.params.keys().cloned().collect()
    }

    /// Iterate over the parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values()
    }

    /// Stored values in insertion order
    pub fn values(&self) -> Vec<f64> {
        self.params.values().map(Parameter::value).collect()
    }

    fn in_state(&self, state: ParameterState) -> Vec<&Parameter> {
        self.params
            .values()
            .filter(|param| param.state() == state)
            .collect()
    }

    /// Parameters the optimizer adjusts
    pub fn varying(&self) -> Vec<&Parameter> {
        self.in_state(ParameterState::Free)
    }

    /// Parameters held at their value
    pub fn fixed(&self) -> Vec<&Parameter> {
        self.in_state(ParameterState::Fixed)
    }

    /// Parameters derived from an expression
    pub fn linked(&self) -> Vec<&Parameter> {
        self.in_state(ParameterState::Linked)
    }

    /// Reset every parameter to its initial value
    pub fn reset(&mut self) {
        for param in self.params.values_mut() {
            param.reset();
        }
    }

    /// Current value of the named parameter
    ///
    /// Free and fixed parameters return their stored value. A linked parameter
    /// is evaluated from its expression, recursively resolving any linked
    /// parameters it refers to, and clamped into its own bounds.
    pub fn resolved_value(&self, name: &str) -> Result<f64, ParameterError> {
        let param = self
            .get(name)
            .ok_or_else(|| ParameterError::ParameterNotFound {
                name: name.to_string(),
            })?;
        self.resolve(param)
    }

    /// Like [`Parameters::resolved_value`], by position
    pub fn resolved_value_at(&self, index: usize) -> Result<f64, ParameterError> {
        let param = self
            .get_index(index)
            .ok_or_else(|| ParameterError::ParameterNotFound {
                name: format!("#{}", index),
            })?;
        self.resolve(param)
    }

    fn resolve(&self, param: &Parameter) -> Result<f64, ParameterError> {
        Resolver::new(self)
            .resolve(param)
            .map_err(|source| ParameterError::ExpressionEvaluation {
                name: param.name().to_string(),
                source,
            })
    }

    /// Evaluate arbitrary expression text against the collection
    pub fn eval_expression(&self, text: &str) -> Result<f64, ExpressionError> {
        Expression::parse(text)?.evaluate(&Resolver::new(self))
    }

    /// Write the resolved value of every linked parameter into its stored value
    ///
    /// Resolved values already lie within each parameter's bounds.
    /// Stops at the first expression that cannot be evaluated; parameters
    /// before it in insertion order keep their updated values.
    pub fn update_expressions(&mut self) -> Result<(), ParameterError> {
        let linked: Vec<String> = self
            .linked()
            .into_iter()
            .map(|param| param.name().to_string())
            .collect();

        for name in linked {
            let value = self.resolved_value(&name)?;
            if let Some(param) = self.params.get_mut(&name) {
                param.set_value(value)?;
            }
        }

        Ok(())
    }

    /// Names of the parameters in this collection referenced by `name`'s expression
    pub fn dependencies(&self, name: &str) -> Result<Vec<String>, ParameterError> {
        let param = self
            .get(name)
            .ok_or_else(|| ParameterError::ParameterNotFound {
                name: name.to_string(),
            })?;

        let Some(text) = param.expr() else {
            return Ok(Vec::new());
        };

        let expr = Expression::parse(text).map_err(|source| ParameterError::ExpressionEvaluation {
            name: name.to_string(),
            source,
        })?;

        Ok(expr
            .variables()
            .into_iter()
            .filter(|var| self.contains(var))
            .collect())
    }

    /// Names of the parameters whose expressions reference `name`
    ///
    /// Expressions that do not parse are skipped.
    pub fn dependents(&self, name: &str) -> Vec<String> {
        self.params
            .values()
            .filter(|param| {
                param
                    .expr()
                    .and_then(|text| Expression::parse(text).ok())
                    .is_some_and(|expr| expr.variables().iter().any(|var| var == name))
            })
            .map(|param| param.name().to_string())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = indexmap::map::Values<'a, String, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.values()
    }
}

/// Error that can occur during serialization/deserialization
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Parameter '{key}' is stored under a different name ('{name}')")]
    NameMismatch { key: String, name: String },
}

impl Parameters {
    /// Save parameters to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), SerializationError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, SerializationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load parameters from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, SerializationError> {
        let file = File::open(path)?;
        let params: Parameters = serde_json::from_reader(BufReader::new(file))?;
        params.check_keys()?;
        Ok(params)
    }

    /// Load parameters from a JSON string
    ///
    /// # Examples
    ///
    /// ```
    /// use lmfit_table::parameters::Parameters;
    ///
    /// let json = r#"{
    ///   "params": {
    ///     "amplitude": {
    ///       "name": "amplitude",
    ///       "value": 10.0,
    ///       "init_value": 10.0,
    ///       "vary": true,
    ///       "bounds": { "min": 0.0, "max": null }
    ///     }
    ///   }
    /// }"#;
    ///
    /// let params = Parameters::from_json(json).unwrap();
    /// assert_eq!(params.get("amplitude").unwrap().max(), f64::INFINITY);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SerializationError> {
        let params: Parameters = serde_json::from_str(json)?;
        params.check_keys()?;
        Ok(params)
    }

    fn check_keys(&self) -> Result<(), SerializationError> {
        match self.params.iter().find(|(key, param)| *key != param.name()) {
            Some((key, param)) => Err(SerializationError::NameMismatch {
                key: key.clone(),
                name: param.name().to_string(),
            }),
            None => Ok(()),
        }
    }
}
