//! Schema and type listing output

use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

use super::common::{print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::provider::{AttributeMode, Schema};

/// Output a schema, one attribute per table row
pub fn output_schema(schema: &Schema, format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => {
            if !no_header {
                println!("{}\n", schema.description);
            }
            println!("{}", schema_table(schema, no_header));
        }
        OutputFormat::Json => print_json(schema),
        OutputFormat::Yaml => print_yaml(schema),
    }
}

fn mode_label(mode: AttributeMode) -> &'static str {
    match mode {
        AttributeMode::Required => "required",
        AttributeMode::Optional => "optional",
        AttributeMode::Computed => "computed",
        AttributeMode::OptionalComputed => "optional, computed",
    }
}

fn schema_table(schema: &Schema, no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["ATTRIBUTE", "TYPE", "MODE", "FLAGS", "DESCRIPTION"]);
    }

    for (name, attribute) in &schema.attributes {
        let mut flags = Vec::new();
        if attribute.sensitive {
            flags.push("sensitive");
        }
        if attribute.requires_replace {
            flags.push("forces replacement");
        }
        table.add_row(vec![
            name.clone(),
            attribute.kind.describe(),
            mode_label(attribute.mode).to_string(),
            flags.join(", "),
            attribute.description.clone(),
        ]);
    }
    table
}

/// Serializable type listing for structured output (JSON/YAML)
#[derive(Serialize, Debug, PartialEq)]
struct TypeListing<'a> {
    resources: &'a [&'static str],
    data_sources: &'a [&'static str],
}

/// Output the supported resource and data source type names
pub fn output_types(
    resources: &[&'static str],
    data_sources: &[&'static str],
    format: OutputFormat,
    no_header: bool,
) {
    let listing = TypeListing {
        resources,
        data_sources,
    };
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(NOTHING);
            if !no_header {
                table.set_header(vec!["KIND", "TYPE"]);
            }
            for name in resources {
                table.add_row(vec!["resource", *name]);
            }
            for name in data_sources {
                table.add_row(vec!["data source", *name]);
            }
            println!("{table}");
        }
        OutputFormat::Json => print_json(&listing),
        OutputFormat::Yaml => print_yaml(&listing),
    }
}
