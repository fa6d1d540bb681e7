//! Shared helpers for command handlers.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::error::CliError;

/// Ask for confirmation, honoring `--yes`.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
