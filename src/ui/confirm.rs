//! Confirmation prompt for destructive operations

use dialoguer::Confirm;

/// Ask before deleting a resource
///
/// `--yes` skips the prompt. In batch mode without `--yes` the answer is
/// always no.
pub fn confirm_delete(
    type_name: &str,
    id: &str,
    assume_yes: bool,
    batch_mode: bool,
) -> Result<bool, dialoguer::Error> {
    if assume_yes {
        return Ok(true);
    }
    if batch_mode {
        return Ok(false);
    }

    Confirm::new()
        .with_prompt(format!("Delete {} '{}'?", type_name, id))
        .default(false)
        .interact()
}
