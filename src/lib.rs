pub mod config;
pub mod error;

// Dataset loading and matching
pub mod dataset;
pub mod matcher;

// HTTP service
pub mod api;

// Command-line interface
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
