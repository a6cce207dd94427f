//! Example of editing a parameter collection through the table model.
//!
//! This example plays the part of a table view: it renders the table, applies
//! a series of edits the way a user would type them into cells, and prints the
//! table again after each one. Rejected edits and unevaluable expressions are
//! reported through `tracing`.

use lmfit_table::parameters::Parameters;
use lmfit_table::table::{Column, ParameterTableModel};
use lmfit_table::view::{CheckState, ItemData, ItemModel, ItemRole, Orientation};

fn render(table: &ParameterTableModel) {
    let header: Vec<String> = (0..table.column_count())
        .filter_map(|section| table.header_data(section, Orientation::Horizontal, ItemRole::Display))
        .map(|label| format!("{:>12}", label.to_string()))
        .collect();
    println!("{}", header.join(""));

    for row in 0..table.row_count() {
        let cells: Vec<String> = Column::ALL
            .iter()
            .map(|&column| {
                let index = table.index(row, column.index());
                let text = match table.data(index, ItemRole::CheckState) {
                    Some(ItemData::CheckState(CheckState::Checked)) => "[x]".to_string(),
                    Some(ItemData::CheckState(CheckState::Unchecked)) => "[ ]".to_string(),
                    Some(ItemData::CheckState(CheckState::PartiallyChecked)) => "[~]".to_string(),
                    _ => table.display_text(index).unwrap_or_default(),
                };
                format!("{:>12}", text)
            })
            .collect();
        println!("{}", cells.join(""));
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("Parameter table example");
    println!("=======================\n");

    // A Gaussian peak on a constant background
    let mut params = Parameters::new();
    params.add_param_with_bounds("amplitude", 3.0, 0.0, 100.0)?;
    params.add_param("center", 5.0)?;
    params.add_param_with_bounds("sigma", 0.8, 0.0, f64::INFINITY)?;
    params.add_param("background", 0.5)?;

    let mut table = ParameterTableModel::from_parameters(params);
    table.signals_mut().connect_data_changed(|top_left, _| {
        if let Some((row, column)) = top_left.position() {
            println!("  changed: row {}, column {}", row, column);
        }
    });

    render(&table);

    let edits = [
        ("center", Column::Value, "4.2"),
        ("background", Column::Vary, "false"),
        ("sigma", Column::Expr, "amplitude / 4"),
        ("amplitude", Column::Value, "250"),
        ("amplitude", Column::Min, "150"),
        ("amplitude", Column::Value, "abc"),
        ("center", Column::Min, "abc"),
        ("center", Column::Name, "position"),
        ("sigma", Column::Expr, ""),
    ];

    for (name, column, input) in edits {
        let index = table.index_of(name, column);
        let accepted = table.set_data(index, ItemData::from(input), ItemRole::Edit);
        println!(
            "{}.{} <- {:?}: {}",
            name,
            column,
            input,
            if accepted { "accepted" } else { "rejected" }
        );
        render(&table);
    }

    let vary = table.index_of("sigma", Column::Vary);
    if let Some(tip) = table.data(vary, ItemRole::ToolTip) {
        println!("sigma is {}", tip);
    }

    // Rows added by other code show up on the next render
    table
        .parameters()
        .borrow_mut()
        .add_param_with_expr("fwhm", 0.0, "2.3548 * sigma")?;
    render(&table);

    Ok(())
}
