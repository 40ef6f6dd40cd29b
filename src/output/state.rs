//! State output formatter

use comfy_table::{presets::NOTHING, Table};
use serde_json::{Map, Value};

use super::common::{display_value, print_json, print_yaml, SENSITIVE_PLACEHOLDER};
use crate::cli::OutputFormat;

/// Output one resource or data source state
///
/// Tables hide sensitive attributes; JSON and YAML print the state verbatim
/// so it can be passed back with `--state`.
pub fn output_state(state: &Value, sensitive: &[&str], format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => output_table(state, sensitive, no_header),
        OutputFormat::Json => print_json(state),
        OutputFormat::Yaml => print_yaml(state),
    }
}

/// Output several states (refresh of a state array)
pub fn output_states(states: &[Value], sensitive: &[&str], format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => {
            for (i, state) in states.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                output_table(state, sensitive, no_header);
            }
        }
        OutputFormat::Json => print_json(states),
        OutputFormat::Yaml => print_yaml(states),
    }
}

fn output_table(state: &Value, sensitive: &[&str], no_header: bool) {
    let Some(fields) = state.as_object() else {
        println!("{}", display_value(state));
        return;
    };

    let rows = attribute_rows(fields, sensitive);
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["ATTRIBUTE", "VALUE"]);
    }
    for (name, value) in &rows {
        table.add_row(vec![name.as_str(), value.as_str()]);
    }
    println!("{table}");

    for (name, items) in fields.iter().filter_map(|(k, v)| object_list(v).map(|l| (k, l))) {
        println!("\n{}:", name);
        println!("{}", items_table(items, no_header));
    }
}

/// Scalar and compound attributes as (name, display value) rows
///
/// Lists of objects are left out; they get their own table.
fn attribute_rows(fields: &Map<String, Value>, sensitive: &[&str]) -> Vec<(String, String)> {
    fields
        .iter()
        .filter(|(_, value)| object_list(value).is_none())
        .map(|(name, value)| {
            let shown = if sensitive.contains(&name.as_str()) && !value.is_null() {
                SENSITIVE_PLACEHOLDER.to_string()
            } else {
                display_value(value)
            };
            (name.clone(), shown)
        })
        .collect()
}

/// The items of a non-empty list whose elements are all objects
fn object_list(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            Some(items)
        }
        _ => None,
    }
}

/// One row per item, columns from the first item's keys
fn items_table(items: &[Value], no_header: bool) -> Table {
    let columns: Vec<String> = items
        .first()
        .and_then(Value::as_object)
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default();

    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(columns.iter().map(|c| c.to_uppercase()));
    }
    for item in items {
        table.add_row(
            columns
                .iter()
                .map(|c| display_value(item.get(c).unwrap_or(&Value::Null))),
        );
    }
    table
}
