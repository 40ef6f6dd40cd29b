//! CacheFly provider - manage CacheFly CDN objects the Terraform way
//!
//! A provider for the CacheFly REST API (v2.5) with a small driver CLI.
//!
//! # Features
//!
//! - Resources for services, service domains, origins, certificates, users,
//!   log targets, script configs and service options
//! - List data sources that walk offset-paginated endpoints to the end
//! - Schema validation and structured diagnostics
//! - Table, JSON and YAML output
//!
//! # Example
//!
//! ```bash
//! # List every origin
//! cachefly-provider data cachefly_origins -o json
//!
//! # Create an origin from a file
//! cachefly-provider create cachefly_origin --config @origin.json -o json > state.json
//!
//! # Refresh it
//! cachefly-provider read cachefly_origin --state @state.json
//! ```

pub mod cachefly;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod provider;
pub mod ui;

pub use cachefly::{
    collect_pages, BaseUrlResolver, CacheFlyClient, Collected, ListFilters,
    ListOptions, OptionMap, OptionValue, Page, PageRequest, TokenResolver,
};
pub use cli::{Cli, Command, OutputFormat};
pub use commands::run_command;
pub use error::{CacheFlyError, Result};
pub use provider::{CacheFlyProvider, DataSource, Diagnostic, Diagnostics, Resource, Schema};
