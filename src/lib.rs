// ABOUTME: Library root for halyard - exposes the deployment engine for the CLI and tests.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod error;
pub mod exec;
pub mod hooks;
pub mod output;
pub mod types;
