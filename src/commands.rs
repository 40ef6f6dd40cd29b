//! Command handlers
//!
//! Each handler loads its JSON inputs, calls the provider and prints the
//! resulting state. Provider failures arrive as diagnostics and are printed
//! once at the end; only local problems (unreadable input, prompt failure)
//! are returned as `Err`.

use std::error::Error;

use futures::future::join_all;
use log::{debug, info};
use serde_json::{Map, Value};

use crate::cli::{
    load_json_arg, Cli, Command, CreateArgs, DataArgs, DeleteArgs, ImportArgs, ReadArgs,
    SchemaArgs, UpdateArgs,
};
use crate::output::{output_diagnostics, output_schema, output_state, output_states, output_types};
use crate::provider::{CacheFlyProvider, Diagnostics, ResourceState};
use crate::ui::{confirm_delete, create_spinner, finish_spinner};

type CommandResult = Result<(), Box<dyn Error>>;

/// Run the parsed command
///
/// Returns `Ok(false)` when the operation reported error diagnostics.
pub async fn run_command(cli: &Cli) -> Result<bool, Box<dyn Error>> {
    let mut provider = CacheFlyProvider::new();
    let mut diags = Diagnostics::new();

    if cli.command.needs_client() && !provider.configure(&provider_config(cli), &mut diags) {
        output_diagnostics(&diags);
        return Ok(false);
    }

    match &cli.command {
        Command::Schema(args) => run_schema(&provider, args, cli, &mut diags),
        Command::Types => output_types(
            &provider.resource_types(),
            &provider.data_source_types(),
            cli.output,
            cli.no_header,
        ),
        Command::Data(args) => run_data(&provider, args, cli, &mut diags).await?,
        Command::Create(args) => run_create(&provider, args, cli, &mut diags).await?,
        Command::Read(args) => run_read(&provider, args, cli, &mut diags).await?,
        Command::Update(args) => run_update(&provider, args, cli, &mut diags).await?,
        Command::Import(args) => run_import(&provider, args, cli, &mut diags).await?,
        Command::Delete(args) => run_delete(&provider, args, cli, &mut diags).await?,
    }

    output_diagnostics(&diags);
    if diags.has_errors() {
        info!("Completed with {} error(s)", diags.error_count());
    } else {
        info!("Completed successfully");
    }
    Ok(!diags.has_errors())
}

/// Provider configuration block from global flags (and their env fallbacks)
fn provider_config(cli: &Cli) -> Value {
    let mut config = Map::new();
    if let Some(token) = &cli.token {
        config.insert("api_token".to_string(), Value::String(token.clone()));
    }
    if let Some(base_url) = &cli.base_url {
        config.insert("base_url".to_string(), Value::String(base_url.clone()));
    }
    Value::Object(config)
}

fn run_schema(provider: &CacheFlyProvider, args: &SchemaArgs, cli: &Cli, diags: &mut Diagnostics) {
    let schema = match (&args.type_name, args.data_source) {
        (None, _) => Some(CacheFlyProvider::schema()),
        (Some(name), true) => provider.data_source_schema(name, diags),
        (Some(name), false) => provider.resource_schema(name, diags),
    };
    if let Some(schema) = schema {
        output_schema(&schema, cli.output, cli.no_header);
    }
}

async fn run_data(
    provider: &CacheFlyProvider,
    args: &DataArgs,
    cli: &Cli,
    diags: &mut Diagnostics,
) -> CommandResult {
    let config = load_json_arg(&args.config)?;
    let Some(schema) = provider.data_source_schema(&args.type_name, diags) else {
        return Ok(());
    };

    let spinner = create_spinner(&format!("Reading {}...", args.type_name), cli.batch);
    let state = provider
        .read_data_source(&args.type_name, &config, diags)
        .await;
    finish_spinner(spinner);

    if let Some(state) = state {
        output_state(&state, &schema.sensitive_attributes(), cli.output, cli.no_header);
    }
    Ok(())
}

async fn run_create(
    provider: &CacheFlyProvider,
    args: &CreateArgs,
    cli: &Cli,
    diags: &mut Diagnostics,
) -> CommandResult {
    let plan = load_json_arg(&args.config)?;
    let Some(schema) = provider.resource_schema(&args.type_name, diags) else {
        return Ok(());
    };

    let spinner = create_spinner(&format!("Creating {}...", args.type_name), cli.batch);
    let state = provider.create_resource(&args.type_name, &plan, diags).await;
    finish_spinner(spinner);

    if let Some(state) = state {
        output_state(&state, &schema.sensitive_attributes(), cli.output, cli.no_header);
    }
    Ok(())
}

/// Turn a read result into the state to print
///
/// A removed object becomes `null` with a warning, like a refresh that drops
/// the resource from state.
fn refreshed_state(
    result: Option<ResourceState>,
    type_name: &str,
    prior: &Value,
    diags: &mut Diagnostics,
) -> Value {
    match result {
        Some(ResourceState::Present(state)) => state,
        Some(ResourceState::Removed) => {
            let id = prior.get("id").and_then(Value::as_str).unwrap_or("<unknown>");
            diags.warning(
                "Resource no longer exists",
                format!("{} '{}' was not found and should be removed from state.", type_name, id),
            );
            Value::Null
        }
        None => Value::Null,
    }
}

async fn run_read(
    provider: &CacheFlyProvider,
    args: &ReadArgs,
    cli: &Cli,
    diags: &mut Diagnostics,
) -> CommandResult {
    let input = load_json_arg(&args.state)?;
    let Some(schema) = provider.resource_schema(&args.type_name, diags) else {
        return Ok(());
    };
    let sensitive = schema.sensitive_attributes();
    let type_name = args.type_name.as_str();

    match input {
        Value::Array(states) => {
            debug!("Refreshing {} {} states", states.len(), type_name);
            let spinner = create_spinner(
                &format!("Refreshing {} {} resources...", states.len(), type_name),
                cli.batch,
            );

            let reads = states.iter().map(|state| async move {
                let mut item_diags = Diagnostics::new();
                let result = provider.read_resource(type_name, state, &mut item_diags).await;
                (result, item_diags)
            });
            let results = join_all(reads).await;
            finish_spinner(spinner);

            let mut refreshed = Vec::with_capacity(states.len());
            for ((result, item_diags), prior) in results.into_iter().zip(&states) {
                diags.append(item_diags);
                refreshed.push(refreshed_state(result, type_name, prior, diags));
            }
            output_states(&refreshed, &sensitive, cli.output, cli.no_header);
        }
        state => {
            let spinner = create_spinner(&format!("Refreshing {}...", type_name), cli.batch);
            let result = provider.read_resource(type_name, &state, diags).await;
            finish_spinner(spinner);

            let has_result = result.is_some();
            let refreshed = refreshed_state(result, type_name, &state, diags);
            if has_result {
                output_state(&refreshed, &sensitive, cli.output, cli.no_header);
            }
        }
    }
    Ok(())
}

async fn run_update(
    provider: &CacheFlyProvider,
    args: &UpdateArgs,
    cli: &Cli,
    diags: &mut Diagnostics,
) -> CommandResult {
    let prior = load_json_arg(&args.state)?;
    let plan = load_json_arg(&args.config)?;
    let Some(schema) = provider.resource_schema(&args.type_name, diags) else {
        return Ok(());
    };

    let spinner = create_spinner(&format!("Updating {}...", args.type_name), cli.batch);
    let state = provider
        .update_resource(&args.type_name, &prior, &plan, diags)
        .await;
    finish_spinner(spinner);

    if let Some(state) = state {
        output_state(&state, &schema.sensitive_attributes(), cli.output, cli.no_header);
    }
    Ok(())
}

async fn run_import(
    provider: &CacheFlyProvider,
    args: &ImportArgs,
    cli: &Cli,
    diags: &mut Diagnostics,
) -> CommandResult {
    let Some(schema) = provider.resource_schema(&args.type_name, diags) else {
        return Ok(());
    };

    let spinner = create_spinner(
        &format!("Importing {} '{}'...", args.type_name, args.id),
        cli.batch,
    );
    let state = provider
        .import_resource(&args.type_name, &args.id, diags)
        .await;
    finish_spinner(spinner);

    if let Some(state) = state {
        output_state(&state, &schema.sensitive_attributes(), cli.output, cli.no_header);
    }
    Ok(())
}

async fn run_delete(
    provider: &CacheFlyProvider,
    args: &DeleteArgs,
    cli: &Cli,
    diags: &mut Diagnostics,
) -> CommandResult {
    let state = load_json_arg(&args.state)?;
    let id = state
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();

    if !confirm_delete(&args.type_name, &id, args.yes, cli.batch)? {
        if cli.batch {
            diags.error(
                "Delete not confirmed",
                "Pass --yes to delete resources in batch mode.",
            );
        } else {
            eprintln!("Cancelled.");
        }
        return Ok(());
    }

    let spinner = create_spinner(&format!("Deleting {} '{}'...", args.type_name, id), cli.batch);
    let deleted = provider.delete_resource(&args.type_name, &state, diags).await;
    finish_spinner(spinner);

    if deleted.is_some() {
        println!("Deleted {} '{}'", args.type_name, id);
    }
    Ok(())
}
