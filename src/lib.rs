pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod server;
pub mod vault;

pub use errors::{Result, VaultError};
