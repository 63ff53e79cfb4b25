//! `secretvault serve` — run the HTTP API.

use std::sync::Arc;

use crate::cli::output;
use crate::cli::{load_settings, open_service, Cli};
use crate::errors::Result;
use crate::server;

/// Execute the `serve` command.
///
/// The key and the store are loaded before the runtime starts, so a
/// misconfigured process fails without ever binding a port.
pub fn execute(cli: &Cli, bind: Option<&str>) -> Result<()> {
    let settings = load_settings(cli)?;
    let service = Arc::new(open_service(&settings)?);
    let addr = bind.unwrap_or(settings.bind_addr.as_str()).to_string();

    output::success(&format!("Serving secrets on http://{addr}"));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(&addr, service))
}
