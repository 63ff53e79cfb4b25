//! `secretvault keygen` — print a fresh base64 vault key.

use crate::cli::output;
use crate::config::ENV_KEY;
use crate::crypto::VaultKey;
use crate::errors::Result;

/// Execute the `keygen` command.
pub fn execute() -> Result<()> {
    let key = VaultKey::generate();
    println!("{}", key.to_base64().as_str());

    output::warning("Anyone holding this key can read every stored secret.");
    output::tip(&format!("Export it before starting the server: {ENV_KEY}=<key>"));

    Ok(())
}
