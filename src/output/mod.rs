//! Output formatting module
//!
//! Handles table, JSON and YAML rendering of states, schemas and type
//! listings, plus diagnostics on stderr.

mod common;
mod diagnostics;
mod schema;
mod state;

pub use common::{display_value, print_json, print_yaml};
pub use diagnostics::output_diagnostics;
pub use schema::{output_schema, output_types};
pub use state::{output_state, output_states};
