//! Configuration: `secretvault.toml` plus environment overrides.

pub mod settings;

pub use settings::{Settings, ENV_BIND_ADDR, ENV_DATABASE_URL, ENV_KEY};
