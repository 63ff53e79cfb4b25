//! `secretvault create` — store a base64 secret and print its identifier.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{load_settings, open_service, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `create` command.
pub fn execute(cli: &Cli, secret: Option<&str>) -> Result<()> {
    let payload = if let Some(v) = secret {
        output::warning("Secret provided on command line — it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        return Err(VaultError::InvalidEncoding(
            "no secret given — pass it as an argument or pipe it on stdin".into(),
        ));
    };

    let settings = load_settings(cli)?;
    let service = open_service(&settings)?;

    let id = service.create(&payload)?;
    println!("{id}");

    output::success("Secret stored.");
    output::tip(&format!("Retrieve it with: secretvault fetch {id}"));

    Ok(())
}
