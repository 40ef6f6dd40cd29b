//! Arguments for schema, data source and resource lifecycle commands

use clap::Parser;

/// Arguments for 'schema'
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Resource or data source type (omit for the provider schema)
    pub type_name: Option<String>,

    /// Look the type up among data sources instead of resources
    #[arg(short = 'd', long, default_value_t = false)]
    pub data_source: bool,
}

/// Arguments for 'data'
#[derive(Parser, Debug)]
pub struct DataArgs {
    /// Data source type (e.g. cachefly_origins)
    pub type_name: String,

    /// Data source configuration as JSON, or @file
    #[arg(short, long, default_value = "{}")]
    pub config: String,
}

/// Arguments for 'create'
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Resource type (e.g. cachefly_origin)
    pub type_name: String,

    /// Planned configuration as JSON, or @file
    #[arg(short, long)]
    pub config: String,
}

/// Arguments for 'read'
#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// Resource type
    pub type_name: String,

    /// Current state as JSON (object or array of objects), or @file
    #[arg(short, long)]
    pub state: String,
}

/// Arguments for 'update'
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Resource type
    pub type_name: String,

    /// Prior state as JSON, or @file
    #[arg(short, long)]
    pub state: String,

    /// Planned configuration as JSON, or @file
    #[arg(short, long)]
    pub config: String,
}

/// Arguments for 'import'
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Resource type
    pub type_name: String,

    /// Remote object ID
    ///
    ///   cachefly_service_domain   <service_id>/<domain_id>
    ///   cachefly_service_options  <service_id>
    ///   everything else           the object ID
    #[arg(verbatim_doc_comment)]
    pub id: String,
}

/// Arguments for 'delete'
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Resource type
    pub type_name: String,

    /// Current state as JSON, or @file
    #[arg(short, long)]
    pub state: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}
