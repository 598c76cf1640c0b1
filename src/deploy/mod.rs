// ABOUTME: Release deployment engine built on shell command execution.
// ABOUTME: Cache mirror, release directories, pruning, atomic activation, and rollback.

mod activation;
mod cache;
mod deployer;
mod error;
mod layout;
mod pipeline;
mod prune;
mod releases;
mod rollback;

pub use activation::Platform;
pub use deployer::Deployer;
pub use error::{DeployError, DeployErrorKind, ENGINE_FAILURE_CODE};
pub use layout::DeployLayout;
pub use pipeline::{default_error_handler, default_success_handler, exit_status, run};
pub use prune::releases_to_prune;
pub use releases::parse_release_listing;
pub use rollback::{previous_releases, select_rollback_target};
