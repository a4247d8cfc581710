pub mod config;
pub mod vault;
