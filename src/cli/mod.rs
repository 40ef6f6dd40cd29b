//! CLI argument parsing

mod common;
mod lifecycle;

use clap::{Parser, Subcommand};

use crate::config::{credentials, defaults};

pub use common::{load_json_arg, OutputFormat};
pub use lifecycle::{
    CreateArgs, DataArgs, DeleteArgs, ImportArgs, ReadArgs, SchemaArgs, UpdateArgs,
};

/// Driver for the CacheFly provider
#[derive(Parser, Debug)]
#[command(name = "cachefly-provider")]
#[command(version)]
#[command(
    about = "Run CacheFly provider operations against the CacheFly API",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API token (overrides the CACHEFLY_API_TOKEN environment variable)
    #[arg(
        short = 't',
        long,
        global = true,
        env = credentials::TOKEN_ENV_VAR,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = credentials::BASE_URL_ENV_VAR)]
    pub base_url: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: no spinner, no prompts
    #[arg(short = 'b', long, global = true, default_value_t = false)]
    pub batch: bool,

    /// Omit table headers
    #[arg(long, global = true, default_value_t = false)]
    pub no_header: bool,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Provider operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the provider, resource or data source schema
    Schema(SchemaArgs),

    /// List supported resource and data source types
    Types,

    /// Read a data source
    #[command(visible_alias = "data-source")]
    Data(DataArgs),

    /// Create a resource
    Create(CreateArgs),

    /// Refresh resource state (a JSON array refreshes several at once)
    #[command(visible_alias = "refresh")]
    Read(ReadArgs),

    /// Update a resource in place
    Update(UpdateArgs),

    /// Import an existing object by ID
    Import(ImportArgs),

    /// Delete a resource
    Delete(DeleteArgs),
}

impl Command {
    /// Whether the command talks to the API and needs a configured provider
    pub fn needs_client(&self) -> bool {
        !matches!(self, Command::Schema(_) | Command::Types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["cachefly-provider", "types"]);
        assert_eq!(cli.log_level, defaults::LOG_LEVEL);
        assert_eq!(cli.output, OutputFormat::Table);
        assert!(!cli.batch);
        assert!(!cli.no_header);
        assert!(matches!(cli.command, Command::Types));
        assert!(!cli.command.needs_client());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "cachefly-provider",
            "data",
            "cachefly_origins",
            "--config",
            "{}",
            "-o",
            "json",
            "--base-url",
            "http://localhost:9000",
            "-b",
        ]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        assert!(cli.batch);
        assert!(cli.command.needs_client());
    }

    #[test]
    fn test_cli_schema_for_data_source() {
        let cli = Cli::parse_from(["cachefly-provider", "schema", "cachefly_service", "--data-source"]);
        let Command::Schema(args) = cli.command else {
            panic!("Expected schema command");
        };
        assert_eq!(args.type_name.as_deref(), Some("cachefly_service"));
        assert!(args.data_source);
    }

    #[test]
    fn test_cli_refresh_alias() {
        let cli = Cli::parse_from([
            "cachefly-provider",
            "refresh",
            "cachefly_origin",
            "--state",
            "@state.json",
        ]);
        assert!(matches!(cli.command, Command::Read(_)));
    }

    #[test]
    fn test_cli_delete_yes() {
        let cli = Cli::parse_from([
            "cachefly-provider",
            "delete",
            "cachefly_user",
            "--state",
            r#"{"id":"u1"}"#,
            "-y",
        ]);
        let Command::Delete(args) = cli.command else {
            panic!("Expected delete command");
        };
        assert!(args.yes);
    }

    #[test]
    fn test_cli_import_requires_id() {
        assert!(Cli::try_parse_from(["cachefly-provider", "import", "cachefly_origin"]).is_err());
    }
}
