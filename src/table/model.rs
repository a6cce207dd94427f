//! Table model over a [`Parameters`] collection.
//!
//! Each parameter is one row; the columns are [`Column::ALL`]. Reads go
//! straight to the shared collection, so rows added or removed by other code
//! show up on the next query. Edits are applied to the parameter in place and
//! announced through [`ModelSignals`].

use super::column::Column;
use super::config::{TableConfig, ValuePolicy};
use crate::error::{Result, TableError};
use crate::parameters::{Expression, Parameter, ParameterState, ParameterUpdate, Parameters};
use crate::view::{
    CheckState, ItemData, ItemFlags, ItemModel, ItemRole, ModelIndex, ModelSignals, Orientation,
};
use std::cell::{Ref, RefCell};
use std::f64::{INFINITY, NEG_INFINITY};
use std::path::Path;
use std::rc::Rc;

/// Parameter collection shared between the table and the code that owns it
pub type SharedParameters = Rc<RefCell<Parameters>>;

impl From<ParameterState> for CheckState {
    fn from(state: ParameterState) -> Self {
        match state {
            ParameterState::Free => CheckState::Checked,
            ParameterState::Fixed => CheckState::Unchecked,
            ParameterState::Linked => CheckState::PartiallyChecked,
        }
    }
}

fn to_number(value: &ItemData) -> Result<f64> {
    match value {
        ItemData::Float(number) => Ok(*number),
        ItemData::Text(text) => text.trim().parse().map_err(|_| TableError::InvalidNumber {
            input: text.clone(),
        }),
        other => Err(TableError::InvalidNumber {
            input: other.to_string(),
        }),
    }
}

fn to_flag(value: &ItemData) -> Result<bool> {
    match value {
        ItemData::Bool(flag) => Ok(*flag),
        ItemData::CheckState(state) => Ok(state.is_checked()),
        ItemData::Float(number) => Ok(*number != 0.0),
        ItemData::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "checked" => Ok(true),
            "false" | "0" | "no" | "off" | "unchecked" | "" => Ok(false),
            _ => Err(TableError::InvalidFlag {
                input: text.clone(),
            }),
        },
    }
}

/// Expression text as typed; whitespace alone clears the expression
fn to_expr_text(value: &ItemData) -> Result<String> {
    match value {
        ItemData::Text(text) if text.trim().is_empty() => Ok(String::new()),
        ItemData::Text(text) => Ok(text.clone()),
        ItemData::Float(number) => Ok(number.to_string()),
        other => Err(TableError::UnexpectedData {
            column: Column::Expr.label(),
            data: other.clone(),
        }),
    }
}

/// Parse a bound, falling back to `fallback` (±∞) when the input is not a number
fn bound_or(value: &ItemData, fallback: f64, row: usize, column: Column) -> f64 {
    match to_number(value) {
        Ok(bound) => bound,
        Err(err) => {
            tracing::warn!(
                row,
                column = %column,
                error = %err,
                fallback,
                "invalid bound, using fallback"
            );
            fallback
        }
    }
}

/// An [`ItemModel`] presenting one parameter per row
///
/// | column | display | edit |
/// |---|---|---|
/// | Name | name | read-only |
/// | Vary | check box: checked = free, unchecked = fixed, partial = linked | vary flag |
/// | Value | resolved value (blank if the expression fails) | value, clamped into the bounds |
/// | Min / Max | bound (±∞ when open) | bound, ±∞ on non-numeric input; crossed bounds are swapped |
/// | Expr | expression text | expression, empty text clears it |
///
/// The tool tip of the Vary column names the [`ParameterState`]; on the Value
/// column it carries the evaluation error of a broken expression.
///
/// # Examples
///
/// ```
/// use lmfit_table::parameters::Parameters;
/// use lmfit_table::table::{Column, ParameterTableModel};
/// use lmfit_table::view::{CheckState, ItemData, ItemModel, ItemRole};
///
/// let mut params = Parameters::new();
/// params.add_param("p1", 1.0).unwrap();
/// let mut table = ParameterTableModel::from_parameters(params);
///
/// let expr = table.index(0, Column::Expr.index());
/// assert!(table.set_data(expr, ItemData::from("2.0"), ItemRole::Edit));
///
/// let vary = table.index(0, Column::Vary.index());
/// assert_eq!(
///     table.data(vary, ItemRole::CheckState),
///     Some(ItemData::CheckState(CheckState::PartiallyChecked))
/// );
/// ```
#[derive(Debug, Default)]
pub struct ParameterTableModel {
    parameters: SharedParameters,
    config: TableConfig,
    signals: ModelSignals,
}

impl ParameterTableModel {
    /// Present a shared collection with the default configuration
    pub fn new(parameters: SharedParameters) -> Self {
        Self::with_config(parameters, TableConfig::default())
    }

    pub fn with_config(parameters: SharedParameters, config: TableConfig) -> Self {
        Self {
            parameters,
            config,
            signals: ModelSignals::new(),
        }
    }

    /// Take ownership of a collection; it stays reachable through
    /// [`ParameterTableModel::parameters`]
    pub fn from_parameters(parameters: Parameters) -> Self {
        Self::new(Rc::new(RefCell::new(parameters)))
    }

    /// Present a collection loaded from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_parameters(Parameters::load_json(path)?))
    }

    /// The shared collection behind the table
    pub fn parameters(&self) -> &SharedParameters {
        &self.parameters
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The parameter shown in `row`, or `None` when out of range
    pub fn parameter_at(&self, row: usize) -> Option<Ref<'_, Parameter>> {
        Ref::filter_map(self.parameters.borrow(), |params| params.get_index(row)).ok()
    }

    /// Index of the named parameter's cell in `column`, or the invalid index
    pub fn index_of(&self, name: &str, column: Column) -> ModelIndex {
        match self.parameters.borrow().position(name) {
            Some(row) => ModelIndex::new(row, column.index()),
            None => ModelIndex::invalid(),
        }
    }

    /// Row and column addressed by `index` if it names a current cell
    fn locate(&self, index: ModelIndex) -> Result<(usize, Column)> {
        let (row, column) = index.position().ok_or(TableError::InvalidIndex)?;
        let column = Column::from_index(column).ok_or(TableError::ColumnOutOfRange(column))?;

        let count = self.row_count();
        if row >= count {
            return Err(TableError::RowOutOfRange { row, count });
        }

        Ok((row, column))
    }

    /// Apply an edit, reporting why it was rejected
    ///
    /// This is [`ItemModel::set_data`] without the logging. On success the
    /// `data_changed` signal fires for `index`; on error nothing changes.
    pub fn try_set_data(&mut self, index: ModelIndex, value: &ItemData, role: ItemRole) -> Result<()> {
        let (row, column) = self.locate(index)?;

        match (role, column) {
            (ItemRole::Edit, _) => self.apply_edit(row, column, value)?,
            (ItemRole::CheckState, Column::Vary) => {
                let vary = to_flag(value)?;
                let mut params = self.parameters.borrow_mut();
                let count = params.len();
                let param = params
                    .get_index_mut(row)
                    .ok_or(TableError::RowOutOfRange { row, count })?;
                param.vary = vary;
            }
            (role, column) => {
                return Err(TableError::UnsupportedRole {
                    column: column.label(),
                    role,
                })
            }
        }

        self.signals.emit_data_changed(index, index);
        Ok(())
    }

    fn apply_edit(&self, row: usize, column: Column, value: &ItemData) -> Result<()> {
        let mut params = self.parameters.borrow_mut();
        let count = params.len();
        let param = params
            .get_index_mut(row)
            .ok_or(TableError::RowOutOfRange { row, count })?;

        let update = match column {
            Column::Name => return Err(TableError::ReadOnlyColumn(Column::Name.label())),
            Column::Vary => ParameterUpdate::new().vary(to_flag(value)?),
            Column::Value => {
                let number = to_number(value)?;
                let number = match self.config.value_policy {
                    ValuePolicy::Reject => number,
                    ValuePolicy::Clamp if number.is_nan() => number,
                    ValuePolicy::Clamp => param.bounds().clamp(number),
                };
                ParameterUpdate::new().value(number)
            }
            Column::Min => {
                let min = bound_or(value, NEG_INFINITY, row, column);
                let max = param.max();
                if min > max {
                    tracing::debug!(
                        parameter = param.name(),
                        min,
                        max,
                        "bounds crossed, swapping"
                    );
                    ParameterUpdate::new().min(max).max(min)
                } else {
                    ParameterUpdate::new().min(min)
                }
            }
            Column::Max => {
                let max = bound_or(value, INFINITY, row, column);
                let min = param.min();
                if max < min {
                    tracing::debug!(
                        parameter = param.name(),
                        min,
                        max,
                        "bounds crossed, swapping"
                    );
                    ParameterUpdate::new().min(max).max(min)
                } else {
                    ParameterUpdate::new().max(max)
                }
            }
            Column::Expr => {
                let text = to_expr_text(value)?;
                if self.config.strict_expressions && !text.is_empty() {
                    Expression::parse(&text)?;
                }
                ParameterUpdate::new().expr(Some(&text))
            }
        };

        param.set(update)?;

        tracing::debug!(
            parameter = param.name(),
            column = %column,
            input = %value,
            "parameter edited"
        );
        Ok(())
    }
}

impl ItemModel for ParameterTableModel {
    fn row_count(&self) -> usize {
        self.parameters.borrow().len()
    }

    fn column_count(&self) -> usize {
        Column::COUNT
    }

    fn flags(&self, index: ModelIndex) -> ItemFlags {
        match self.locate(index) {
            Ok((_, column)) => column.flags(),
            Err(_) => ItemFlags::ENABLED,
        }
    }

    fn data(&self, index: ModelIndex, role: ItemRole) -> Option<ItemData> {
        let (row, column) = self.locate(index).ok()?;
        let params = self.parameters.borrow();
        let param = params.get_index(row)?;

        match role {
            ItemRole::Display | ItemRole::Edit => match column {
                Column::Name => Some(param.name().into()),
                Column::Vary => None,
                Column::Value => match params.resolved_value_at(row) {
                    Ok(value) => Some(value.into()),
                    Err(err) => {
                        tracing::warn!(
                            row,
                            parameter = param.name(),
                            expr = param.expr().unwrap_or_default(),
                            error = %err,
                            "expression could not be evaluated"
                        );
                        None
                    }
                },
                Column::Min => Some(param.min().into()),
                Column::Max => Some(param.max().into()),
                Column::Expr => param.expr().map(ItemData::from),
            },
            ItemRole::CheckState if column == Column::Vary => {
                Some(CheckState::from(param.state()).into())
            }
            ItemRole::ToolTip => match column {
                Column::Vary => Some(param.state().to_string().into()),
                Column::Value => params
                    .resolved_value_at(row)
                    .err()
                    .map(|err| err.to_string().into()),
                _ => None,
            },
            _ => None,
        }
    }

    fn set_data(&mut self, index: ModelIndex, value: ItemData, role: ItemRole) -> bool {
        match self.try_set_data(index, &value, role) {
            Ok(()) => true,
            Err(
                err @ (TableError::InvalidIndex
                | TableError::RowOutOfRange { .. }
                | TableError::ColumnOutOfRange(_)
                | TableError::UnsupportedRole { .. }),
            ) => {
                tracing::debug!(error = %err, "edit ignored");
                false
            }
            Err(err) => {
                tracing::warn!(
                    row = index.row(),
                    column = index.column(),
                    input = %value,
                    error = %err,
                    "edit rejected"
                );
                false
            }
        }
    }

    fn header_data(&self, section: usize, orientation: Orientation, role: ItemRole) -> Option<ItemData> {
        if role != ItemRole::Display || orientation != Orientation::Horizontal {
            return None;
        }
        Column::from_index(section).map(|column| column.label().into())
    }

    fn signals_mut(&mut self) -> &mut ModelSignals {
        &mut self.signals
    }
}
