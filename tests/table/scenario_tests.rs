//! Editing sessions from start to finish

use crate::test_helpers::{cell, display, edit};
use lmfit_table::parameters::Parameters;
use lmfit_table::table::{Column, ParameterTableModel};
use lmfit_table::view::{CheckState, ItemData, ItemModel, ItemRole};
use std::f64::{INFINITY, NEG_INFINITY};

fn check_state(table: &ParameterTableModel, row: usize) -> Option<ItemData> {
    table.data(cell(row, Column::Vary), ItemRole::CheckState)
}

#[test]
fn test_link_and_unlink_single_parameter() {
    let mut params = Parameters::new();
    params.add_param("p1", 1.0).unwrap();
    let mut table = ParameterTableModel::from_parameters(params);

    // Initial row
    assert_eq!(display(&table, 0, Column::Name), Some(ItemData::from("p1")));
    assert_eq!(
        check_state(&table, 0),
        Some(ItemData::CheckState(CheckState::Checked))
    );
    assert_eq!(display(&table, 0, Column::Value), Some(ItemData::Float(1.0)));
    assert_eq!(display(&table, 0, Column::Min), Some(ItemData::Float(NEG_INFINITY)));
    assert_eq!(display(&table, 0, Column::Max), Some(ItemData::Float(INFINITY)));
    assert_eq!(display(&table, 0, Column::Expr), None);

    // A number typed into the expression column is an expression
    assert!(edit(&mut table, 0, Column::Expr, "2.0"));
    assert_eq!(
        check_state(&table, 0),
        Some(ItemData::CheckState(CheckState::PartiallyChecked))
    );
    assert_eq!(display(&table, 0, Column::Value), Some(ItemData::Float(2.0)));

    // Clearing it brings back the vary flag that was never changed
    assert!(edit(&mut table, 0, Column::Expr, ""));
    assert_eq!(
        check_state(&table, 0),
        Some(ItemData::CheckState(CheckState::Checked))
    );
    assert_eq!(display(&table, 0, Column::Value), Some(ItemData::Float(1.0)));
}

#[test]
fn test_fixed_parameter_unlinks_to_unchecked() {
    let mut params = Parameters::new();
    params.add_param("p1", 1.0).unwrap();
    params.add_param("p2", 3.0).unwrap();
    let mut table = ParameterTableModel::from_parameters(params);

    assert!(table.set_data(
        cell(1, Column::Vary),
        CheckState::Unchecked.into(),
        ItemRole::CheckState
    ));
    assert!(edit(&mut table, 1, Column::Expr, "2*p1"));
    assert_eq!(
        check_state(&table, 1),
        Some(ItemData::CheckState(CheckState::PartiallyChecked))
    );
    assert_eq!(display(&table, 1, Column::Value), Some(ItemData::Float(2.0)));

    // Changing the referenced parameter moves the linked one
    assert!(edit(&mut table, 0, Column::Value, "4"));
    assert_eq!(display(&table, 1, Column::Value), Some(ItemData::Float(8.0)));

    assert!(edit(&mut table, 1, Column::Expr, ""));
    assert_eq!(
        check_state(&table, 1),
        Some(ItemData::CheckState(CheckState::Unchecked))
    );
    assert_eq!(display(&table, 1, Column::Value), Some(ItemData::Float(3.0)));
}

#[test]
fn test_session_survives_json_round_trip() {
    let mut params = Parameters::new();
    params.add_param_with_bounds("amp", 2.0, 0.0, 5.0).unwrap();
    params.add_param("center", 1.0).unwrap();
    let mut table = ParameterTableModel::from_parameters(params);

    assert!(edit(&mut table, 1, Column::Expr, "amp / 2"));
    assert!(edit(&mut table, 0, Column::Max, "none"));

    let path = std::env::temp_dir().join(format!(
        "lmfit_table_session_{}.json",
        std::process::id()
    ));
    table.parameters().borrow().save_json(&path).unwrap();
    let reloaded = ParameterTableModel::load_json(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    for row in 0..table.row_count() {
        for column in Column::ALL {
            assert_eq!(
                reloaded.data(cell(row, column), ItemRole::Display),
                table.data(cell(row, column), ItemRole::Display)
            );
        }
        assert_eq!(check_state(&reloaded, row), check_state(&table, row));
    }
    assert_eq!(display(&reloaded, 0, Column::Max), Some(ItemData::Float(INFINITY)));
}

#[test]
fn test_missing_file() {
    assert!(ParameterTableModel::load_json("/nonexistent/session.json").is_err());
}
