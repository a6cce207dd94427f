//! Tests for editing through the parameter table

use crate::test_helpers::{cell, display, edit, peak_table};
use approx::assert_relative_eq;
use lmfit_table::parameters::ParameterState;
use lmfit_table::table::{Column, ParameterTableModel, TableConfig, ValuePolicy};
use lmfit_table::view::{CheckState, ItemData, ItemModel, ItemRole, ModelIndex};
use lmfit_table::TableError;
use std::cell::RefCell;
use std::f64::{INFINITY, NEG_INFINITY};
use std::rc::Rc;

#[test]
fn test_read_after_write() {
    let (mut table, _) = peak_table();

    assert!(edit(&mut table, 0, Column::Value, "12.5"));
    assert_eq!(display(&table, 0, Column::Value), Some(ItemData::Float(12.5)));

    assert!(edit(&mut table, 0, Column::Min, "-3"));
    assert_eq!(display(&table, 0, Column::Min), Some(ItemData::Float(-3.0)));

    assert!(edit(&mut table, 0, Column::Max, " 1e3 "));
    assert_eq!(display(&table, 0, Column::Max), Some(ItemData::Float(1000.0)));

    assert!(edit(&mut table, 0, Column::Expr, "center + 1"));
    assert_eq!(display(&table, 0, Column::Expr), Some(ItemData::from("center + 1")));

    // Numbers are accepted as well as text
    assert!(table.set_data(cell(1, Column::Value), ItemData::Float(2.0), ItemRole::Edit));
    assert_eq!(display(&table, 1, Column::Value), Some(ItemData::Float(2.0)));
}

#[test]
fn test_name_is_read_only() {
    let (mut table, params) = peak_table();

    assert!(!edit(&mut table, 0, Column::Name, "renamed"));
    assert!(!table.set_data(cell(0, Column::Name), "renamed".into(), ItemRole::CheckState));
    assert_eq!(display(&table, 0, Column::Name), Some(ItemData::from("amp")));
    assert!(params.borrow().contains("amp"));
    assert!(!params.borrow().contains("renamed"));
}

#[test]
fn test_invalid_value_is_rejected() {
    let (mut table, params) = peak_table();

    assert!(!edit(&mut table, 0, Column::Value, "abc"));
    assert!(!edit(&mut table, 0, Column::Value, ""));
    assert!(!table.set_data(cell(0, Column::Value), ItemData::Bool(true), ItemRole::Edit));
    assert_eq!(params.borrow().get("amp").unwrap().value(), 10.0);

    assert!(!edit(&mut table, 1, Column::Value, "nan"));
    assert_eq!(params.borrow().get("center").unwrap().value(), 5.0);
}

#[test]
fn test_out_of_bounds_value_is_clamped() {
    let (mut table, params) = peak_table();

    assert!(edit(&mut table, 1, Column::Value, "11"));
    assert_eq!(display(&table, 1, Column::Value), Some(ItemData::Float(10.0)));

    assert!(edit(&mut table, 1, Column::Value, "-4"));
    assert_eq!(display(&table, 1, Column::Value), Some(ItemData::Float(0.0)));
    assert_eq!(params.borrow().get("center").unwrap().value(), 0.0);
}

#[test]
fn test_reject_policy() {
    let (table, params) = peak_table();
    let mut table = ParameterTableModel::with_config(
        Rc::clone(table.parameters()),
        TableConfig::new().with_value_policy(ValuePolicy::Reject),
    );

    assert!(!edit(&mut table, 1, Column::Value, "11"));
    assert_eq!(params.borrow().get("center").unwrap().value(), 5.0);

    // On the boundary is fine
    assert!(edit(&mut table, 1, Column::Value, "10"));
    assert_eq!(display(&table, 1, Column::Value), Some(ItemData::Float(10.0)));
}

#[test]
fn test_invalid_bound_falls_back_to_infinity() {
    let (mut table, params) = peak_table();

    assert!(edit(&mut table, 1, Column::Min, "abc"));
    assert_eq!(display(&table, 1, Column::Min), Some(ItemData::Float(NEG_INFINITY)));

    assert!(edit(&mut table, 1, Column::Max, ""));
    assert_eq!(display(&table, 1, Column::Max), Some(ItemData::Float(INFINITY)));

    // The value is untouched by the widened range
    assert_eq!(params.borrow().get("center").unwrap().value(), 5.0);
}

#[test]
fn test_bounds_clamp_value() {
    let (mut table, params) = peak_table();

    assert!(edit(&mut table, 1, Column::Max, "2"));
    assert_eq!(params.borrow().get("center").unwrap().value(), 2.0);

    assert!(edit(&mut table, 1, Column::Min, "1.5"));
    assert_eq!(params.borrow().get("center").unwrap().value(), 2.0);
}

#[test]
fn test_crossed_bounds_are_swapped() {
    let (mut table, params) = peak_table();

    // A minimum above the maximum becomes the new maximum
    assert!(edit(&mut table, 1, Column::Min, "20"));
    assert_eq!(display(&table, 1, Column::Min), Some(ItemData::Float(10.0)));
    assert_eq!(display(&table, 1, Column::Max), Some(ItemData::Float(20.0)));
    assert_eq!(display(&table, 1, Column::Value), Some(ItemData::Float(10.0)));

    // And the other way round
    assert!(edit(&mut table, 1, Column::Max, "-1"));
    let params = params.borrow();
    let center = params.get("center").unwrap();
    assert_eq!((center.min(), center.max()), (-1.0, 10.0));
    assert_eq!(center.value(), 10.0);
}

#[test]
fn test_expression_edits() {
    let (mut table, params) = peak_table();
    let state = |table: &ParameterTableModel, row| table.data(cell(row, Column::Vary), ItemRole::CheckState);

    // Linking
    assert!(edit(&mut table, 1, Column::Expr, "amp / 2"));
    assert_eq!(state(&table, 1), Some(ItemData::CheckState(CheckState::PartiallyChecked)));
    assert_eq!(display(&table, 1, Column::Value), Some(ItemData::Float(5.0)));

    // Unlinking restores the vary flag
    assert!(edit(&mut table, 1, Column::Expr, ""));
    assert_eq!(state(&table, 1), Some(ItemData::CheckState(CheckState::Checked)));
    assert_eq!(display(&table, 1, Column::Expr), None);
    assert_eq!(params.borrow().get("center").unwrap().expr(), None);

    // Whitespace only counts as empty
    assert!(edit(&mut table, 2, Column::Expr, "   "));
    assert_eq!(params.borrow().get("sigma").unwrap().state(), ParameterState::Fixed);

    // Anything else is stored as typed
    assert!(edit(&mut table, 2, Column::Expr, "  center "));
    assert_eq!(display(&table, 2, Column::Expr), Some(ItemData::from("  center ")));
    assert_eq!(params.borrow().get("sigma").unwrap().expr(), Some("  center "));
    assert_eq!(display(&table, 2, Column::Value), Some(ItemData::Float(5.0)));

    // Numeric data is stored as its text
    assert!(table.set_data(cell(2, Column::Expr), ItemData::Float(2.0), ItemRole::Edit));
    assert_eq!(display(&table, 2, Column::Expr), Some(ItemData::from("2")));
    assert_eq!(display(&table, 2, Column::Value), Some(ItemData::Float(2.0)));
}

#[test]
fn test_linked_value_is_clamped_into_bounds() {
    let (mut table, params) = peak_table();

    // center is bounded to [0, 10]
    assert!(edit(&mut table, 1, Column::Expr, "2*amp"));
    assert_eq!(display(&table, 1, Column::Value), Some(ItemData::Float(10.0)));

    // References see the clamped value
    assert!(edit(&mut table, 2, Column::Expr, "center + 1"));
    assert_eq!(display(&table, 2, Column::Value), Some(ItemData::Float(11.0)));

    params.borrow_mut().update_expressions().unwrap();
    assert_eq!(params.borrow().get("center").unwrap().value(), 10.0);
    assert_eq!(params.borrow().get("sigma").unwrap().value(), 11.0);
}

#[test]
fn test_expressions_are_stored_unchecked_by_default() {
    let (mut table, _) = peak_table();

    assert!(edit(&mut table, 0, Column::Expr, "2 *"));
    assert_eq!(display(&table, 0, Column::Expr), Some(ItemData::from("2 *")));
    assert_eq!(display(&table, 0, Column::Value), None);
}

#[test]
fn test_strict_expressions() {
    let (table, _) = peak_table();
    let mut table = ParameterTableModel::with_config(
        Rc::clone(table.parameters()),
        TableConfig::new().with_strict_expressions(true),
    );

    assert!(!edit(&mut table, 0, Column::Expr, "2 *"));
    assert_eq!(display(&table, 0, Column::Expr), None);

    // Parsing does not require the names to exist yet
    assert!(edit(&mut table, 0, Column::Expr, "width * 2"));
}

#[test]
fn test_vary_column() {
    let (mut table, params) = peak_table();
    let vary = cell(0, Column::Vary);

    assert!(table.set_data(vary, CheckState::Unchecked.into(), ItemRole::CheckState));
    assert_eq!(
        table.data(vary, ItemRole::CheckState),
        Some(ItemData::CheckState(CheckState::Unchecked))
    );
    assert!(!params.borrow().get("amp").unwrap().vary());

    assert!(table.set_data(vary, CheckState::Checked.into(), ItemRole::CheckState));
    assert!(params.borrow().get("amp").unwrap().vary());

    // Edit role with text or booleans
    assert!(edit(&mut table, 0, Column::Vary, "false"));
    assert!(!params.borrow().get("amp").unwrap().vary());
    assert!(table.set_data(vary, ItemData::Bool(true), ItemRole::Edit));
    assert!(params.borrow().get("amp").unwrap().vary());
    assert!(!edit(&mut table, 0, Column::Vary, "sometimes"));
    assert!(params.borrow().get("amp").unwrap().vary());

    // On a linked row the flag is stored but the box stays partial
    let linked = cell(2, Column::Vary);
    assert!(table.set_data(linked, CheckState::Checked.into(), ItemRole::CheckState));
    assert!(params.borrow().get("sigma").unwrap().vary());
    assert_eq!(
        table.data(linked, ItemRole::CheckState),
        Some(ItemData::CheckState(CheckState::PartiallyChecked))
    );
}

#[test]
fn test_value_edit_on_linked_row() {
    let (mut table, params) = peak_table();

    assert!(edit(&mut table, 2, Column::Value, "7"));
    assert_eq!(params.borrow().get("sigma").unwrap().value(), 7.0);
    // The expression still decides what is shown
    assert_eq!(display(&table, 2, Column::Value), Some(ItemData::Float(2.5)));
}

#[test]
fn test_writes_outside_the_table_are_rejected() {
    let (mut table, params) = peak_table();
    let before = params.borrow().clone();

    assert!(!table.set_data(ModelIndex::invalid(), "1".into(), ItemRole::Edit));
    assert!(!table.set_data(ModelIndex::new(3, 2), "1".into(), ItemRole::Edit));
    assert!(!table.set_data(ModelIndex::new(0, 6), "1".into(), ItemRole::Edit));
    assert!(!table.set_data(cell(0, Column::Value), "1".into(), ItemRole::Display));
    assert!(!table.set_data(cell(0, Column::Value), "1".into(), ItemRole::ToolTip));
    assert!(!table.set_data(cell(0, Column::Value), "1".into(), ItemRole::CheckState));

    assert_eq!(*params.borrow(), before);
}

#[test]
fn test_try_set_data_errors() {
    let (mut table, _) = peak_table();

    assert!(matches!(
        table.try_set_data(ModelIndex::new(5, 0), &"x".into(), ItemRole::Edit),
        Err(TableError::RowOutOfRange { row: 5, count: 3 })
    ));
    assert!(matches!(
        table.try_set_data(cell(0, Column::Vary), &"maybe".into(), ItemRole::Edit),
        Err(TableError::InvalidFlag { .. })
    ));
    assert!(matches!(
        table.try_set_data(cell(0, Column::Min), &"20".into(), ItemRole::Edit),
        Ok(())
    ));
    assert!(matches!(
        table.try_set_data(cell(0, Column::Value), &"1".into(), ItemRole::Edit),
        Ok(())
    ));
    assert_eq!(display(&table, 0, Column::Value), Some(ItemData::Float(20.0)));
    assert!(matches!(
        table.try_set_data(cell(0, Column::Value), &"nan".into(), ItemRole::Edit),
        Err(TableError::Parameter(_))
    ));
}

#[test]
fn test_data_changed_signal() {
    let (mut table, _) = peak_table();
    let changes = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&changes);
    table
        .signals_mut()
        .connect_data_changed(move |top_left, bottom_right| {
            sink.borrow_mut().push((top_left, bottom_right));
        });

    assert!(edit(&mut table, 1, Column::Value, "6"));
    assert!(!edit(&mut table, 1, Column::Value, "abc"));
    assert!(!edit(&mut table, 1, Column::Name, "c"));
    assert!(table.set_data(cell(0, Column::Vary), CheckState::Unchecked.into(), ItemRole::CheckState));

    assert_eq!(
        *changes.borrow(),
        vec![
            (cell(1, Column::Value), cell(1, Column::Value)),
            (cell(0, Column::Vary), cell(0, Column::Vary)),
        ]
    );
}

#[test]
fn test_value_precision() {
    let (mut table, _) = peak_table();

    assert!(edit(&mut table, 0, Column::Value, "0.1"));
    assert!(edit(&mut table, 1, Column::Expr, "amp * 3"));

    let value = display(&table, 1, Column::Value)
        .and_then(|data| data.as_f64())
        .unwrap();
    assert_relative_eq!(value, 0.3, epsilon = 1e-12);
}
