//! Configuration file loading.
//!
//! The vault root normally comes from a named profile in
//! `~/.config/notevault/config.toml`; a root given on the command line
//! overrides it.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{LoggingConfig, ResolvedConfig};
