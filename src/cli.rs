//! CLI argument parsing and command dispatch

pub mod access;
pub mod args;
pub mod common;
pub mod compile;
pub mod init;
pub mod list;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
