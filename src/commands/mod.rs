// ABOUTME: Command module aggregator for the halyard CLI.
// ABOUTME: Re-exports deploy, rollback, and releases command handlers.

mod context;
mod deploy;
mod releases;
mod rollback;

pub use context::load_config;
pub use deploy::deploy;
pub use releases::releases;
pub use rollback::rollback;
