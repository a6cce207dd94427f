//! Integration tests for the parameter table
//!
//! These tests drive `ParameterTableModel` through the `ItemModel` interface
//! the way a table view would.


// Writes through the edit and check-state roles
mod edit_tests;

// Whole editing sessions
mod scenario_tests;
