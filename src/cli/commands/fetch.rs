//! `secretvault fetch` — print the base64 payload of a stored secret.

use crate::cli::{load_settings, open_service, Cli};
use crate::errors::Result;

/// Execute the `fetch` command.
pub fn execute(cli: &Cli, secret_id: &str) -> Result<()> {
    let settings = load_settings(cli)?;
    let service = open_service(&settings)?;

    let secret = service.fetch(secret_id)?;
    println!("{secret}");

    Ok(())
}
