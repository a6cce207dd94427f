//! Constraint expressions
//!
//! A linked parameter stores a textual formula over other parameters, e.g.
//! `"2 * sigma"` or `"sqrt(amp^2 + 1)"`. This module parses that text into an
//! [`Expression`] tree and evaluates it against an [`EvaluationContext`].
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! additive := term (('+' | '-') term)*
//! term     := unary (('*' | '/') unary)*
//! unary    := ('-' | '+') unary | power
//! power    := primary (('^' | '**') unary)?
//! primary  := number | identifier '(' args ')' | identifier | '(' additive ')'
//! ```

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, multispace0},
    combinator::recognize,
    multi::many0,
    number::complete::double,
    sequence::{pair, preceded},
    IResult, Parser,
};
use std::collections::HashMap;
use thiserror::Error;

/// Error that can occur during expression parsing or evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Failed to parse expression: {message}")]
    ParseError { message: String },

    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String },

    #[error("Circular reference through '{name}'")]
    CircularReference { name: String },
}

/// Result type for expression evaluation
type ExprResult<T> = Result<T, ExpressionError>;

/// Expression AST node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Constant number
    Number(f64),

    /// Variable reference
    Variable(String),

    /// Unary operations
    Unary(UnaryOp, Box<Expression>),

    /// Binary operations
    Binary(BinaryOp, Box<Expression>, Box<Expression>),

    /// Function call
    Function(String, Vec<Expression>),
}

/// Unary operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
}

/// Binary operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Source of variable values during evaluation
pub trait EvaluationContext {
    /// Get the value of a variable
    fn get_variable(&self, name: &str) -> ExprResult<f64>;

    /// Check if a variable exists
    fn has_variable(&self, name: &str) -> bool;
}

impl EvaluationContext for HashMap<String, f64> {
    fn get_variable(&self, name: &str) -> ExprResult<f64> {
        self.get(name)
            .copied()
            .ok_or_else(|| ExpressionError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    fn has_variable(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

/// Named constants, shadowed by variables of the same name
fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

fn arity_error(name: &str, expected: &str, got: usize) -> ExpressionError {
    ExpressionError::InvalidOperation {
        message: format!("{}() requires {} argument(s), got {}", name, expected, got),
    }
}

fn call_function(name: &str, args: &[f64]) -> ExprResult<f64> {
    let one_arg = |f: fn(f64) -> f64| match args {
        [x] => Ok(f(*x)),
        _ => Err(arity_error(name, "1", args.len())),
    };

    match name {
        "sin" => one_arg(f64::sin),
        "cos" => one_arg(f64::cos),
        "tan" => one_arg(f64::tan),
        "exp" => one_arg(f64::exp),
        "log" | "ln" => one_arg(f64::ln),
        "log10" => one_arg(f64::log10),
        "sqrt" => one_arg(f64::sqrt),
        "abs" => one_arg(f64::abs),
        "max" | "min" => {
            if args.is_empty() {
                return Err(arity_error(name, "at least 1", 0));
            }
            let fold: fn(f64, f64) -> f64 = if name == "max" { f64::max } else { f64::min };
            Ok(args[1..].iter().fold(args[0], |acc, &x| fold(acc, x)))
        }
        _ => Err(ExpressionError::UndefinedFunction {
            name: name.to_string(),
        }),
    }
}

impl Expression {
    /// Parse an expression from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use lmfit_table::parameters::Expression;
    ///
    /// let expr = Expression::parse("2 * (x + 1)").unwrap();
    /// assert_eq!(expr.variables(), vec!["x".to_string()]);
    /// assert!(Expression::parse("2 *").is_err());
    /// ```
    pub fn parse(input: &str) -> ExprResult<Self> {
        if input.trim().is_empty() {
            return Err(ExpressionError::ParseError {
                message: "empty expression".to_string(),
            });
        }

        match additive(input) {
            Ok((remainder, expr)) => {
                if remainder.trim().is_empty() {
                    Ok(expr)
                } else {
                    Err(ExpressionError::ParseError {
                        message: format!("Unexpected trailing characters: '{}'", remainder.trim()),
                    })
                }
            }
            Err(e) => Err(ExpressionError::ParseError {
                message: e.to_string(),
            }),
        }
    }

    /// Evaluate the expression with the given context
    pub fn evaluate<C: EvaluationContext + ?Sized>(&self, context: &C) -> ExprResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),

            Self::Variable(name) => {
                if !context.has_variable(name) {
                    if let Some(value) = constant(name) {
                        return Ok(value);
                    }
                }
                context.get_variable(name)
            }

            Self::Unary(UnaryOp::Neg, expr) => Ok(-expr.evaluate(context)?),

            Self::Binary(op, left, right) => {
                let lhs = left.evaluate(context)?;
                let rhs = right.evaluate(context)?;

                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div if rhs == 0.0 => Err(ExpressionError::DivisionByZero),
                    BinaryOp::Div => Ok(lhs / rhs),
                    BinaryOp::Pow => Ok(lhs.powf(rhs)),
                }
            }

            Self::Function(name, args) => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate(context))
                    .collect::<ExprResult<Vec<_>>>()?;
                call_function(name, &values)
            }
        }
    }

    /// All variable names referenced by the expression, sorted and deduplicated
    pub fn variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Self::Number(_) => {}
            Self::Variable(name) => vars.push(name.clone()),
            Self::Unary(_, expr) => expr.collect_variables(vars),
            Self::Binary(_, left, right) => {
                left.collect_variables(vars);
                right.collect_variables(vars);
            }
            Self::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }
}

// Parser functions using nom

fn skip_ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

/// Match `symbol`, allowing leading whitespace
fn keyword<'a>(symbol: &'static str, input: &'a str) -> IResult<&'a str, &'a str> {
    preceded(multispace0, tag(symbol)).parse(input)
}

/// Try each operator symbol in turn; the first match wins
fn operator<'a>(input: &'a str, ops: &[(&'static str, BinaryOp)]) -> Option<(&'a str, BinaryOp)> {
    ops.iter()
        .find_map(|&(symbol, op)| keyword(symbol, input).ok().map(|(rest, _)| (rest, op)))
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    double(input)
}

fn call_args(input: &str) -> IResult<&str, Vec<Expression>> {
    let (input, _) = keyword("(", input)?;
    if let Ok((rest, _)) = keyword(")", input) {
        return Ok((rest, Vec::new()));
    }

    let (mut input, first) = additive(input)?;
    let mut args = vec![first];
    while let Ok((rest, _)) = keyword(",", input) {
        let (rest, arg) = additive(rest)?;
        args.push(arg);
        input = rest;
    }

    let (input, _) = keyword(")", input)?;
    Ok((input, args))
}

fn primary(input: &str) -> IResult<&str, Expression> {
    let (input, _) = skip_ws(input)?;

    match input.chars().next() {
        // Identifiers are tried by first character so names such as `info` or
        // `nano` are not read as the float literals `inf` / `nan`.
        Some(c) if c.is_ascii_digit() || c == '.' => {
            let (rest, value) = number(input)?;
            Ok((rest, Expression::Number(value)))
        }
        Some('(') => {
            let (rest, _) = keyword("(", input)?;
            let (rest, expr) = additive(rest)?;
            let (rest, _) = keyword(")", rest)?;
            Ok((rest, expr))
        }
        _ => {
            let (rest, name) = identifier(input)?;
            if keyword("(", rest).is_ok() {
                let (rest, args) = call_args(rest)?;
                Ok((rest, Expression::Function(name.to_string(), args)))
            } else {
                Ok((rest, Expression::Variable(name.to_string())))
            }
        }
    }
}

fn power(input: &str) -> IResult<&str, Expression> {
    let (input, base) = primary(input)?;

    match operator(input, &[("**", BinaryOp::Pow), ("^", BinaryOp::Pow)]) {
        Some((rest, op)) => {
            let (rest, exponent) = unary(rest)?;
            Ok((rest, Expression::Binary(op, Box::new(base), Box::new(exponent))))
        }
        None => Ok((input, base)),
    }
}

fn unary(input: &str) -> IResult<&str, Expression> {
    if let Ok((rest, _)) = keyword("-", input) {
        let (rest, expr) = unary(rest)?;
        return Ok((rest, Expression::Unary(UnaryOp::Neg, Box::new(expr))));
    }
    if let Ok((rest, _)) = keyword("+", input) {
        return unary(rest);
    }
    power(input)
}

fn term(input: &str) -> IResult<&str, Expression> {
    let (mut input, mut left) = unary(input)?;

    while let Some((rest, op)) = operator(input, &[("*", BinaryOp::Mul), ("/", BinaryOp::Div)]) {
        let (rest, right) = unary(rest)?;
        left = Expression::Binary(op, Box::new(left), Box::new(right));
        input = rest;
    }

    Ok((input, left))
}

fn additive(input: &str) -> IResult<&str, Expression> {
    let (mut input, mut left) = term(input)?;

    while let Some((rest, op)) = operator(input, &[("+", BinaryOp::Add), ("-", BinaryOp::Sub)]) {
        let (rest, right) = term(rest)?;
        left = Expression::Binary(op, Box::new(left), Box::new(right));
        input = rest;
    }

    Ok((input, left))
}
