//! UI utilities for terminal output
//!
//! Progress spinners for API calls and the delete confirmation prompt.

mod confirm;
mod spinner;

pub use confirm::confirm_delete;
pub use spinner::{create_spinner, finish_spinner};
