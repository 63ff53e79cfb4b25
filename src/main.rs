use clap::Parser;
use secretvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=secretvault=debug for verbose output.  Log lines never
    // include payloads, ciphertexts or the key.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("secretvault=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { ref bind } => {
            secretvault::cli::commands::serve::execute(&cli, bind.as_deref())
        }
        Commands::Create { ref secret } => {
            secretvault::cli::commands::create::execute(&cli, secret.as_deref())
        }
        Commands::Fetch { ref secret_id } => {
            secretvault::cli::commands::fetch::execute(&cli, secret_id)
        }
        Commands::Keygen => secretvault::cli::commands::keygen::execute(),
    };

    if let Err(e) = result {
        secretvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
