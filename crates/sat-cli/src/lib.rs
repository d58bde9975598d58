//! Satisfaction report CLI library.
//!
//! This crate provides the CLI interface for satisfaction reports.

mod cli;
pub mod commands;
mod config;
mod credentials;

pub use cli::Cli;
pub use config::Config;
pub use credentials::unmask_api_key;
