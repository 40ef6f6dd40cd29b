//! Diagnostics output

use crate::provider::Diagnostics;

/// Print every diagnostic to stderr, separated by blank lines
pub fn output_diagnostics(diags: &Diagnostics) {
    for diagnostic in diags {
        eprintln!("{}\n", diagnostic);
    }
}
