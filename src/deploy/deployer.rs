// ABOUTME: The deployment engine: one configuration, one command runner, one deploy root.
// ABOUTME: Entry points push a release, activate it, and roll back.

use crate::config::Config;
use crate::exec::CommandRunner;
use crate::output::Output;
use crate::types::{ReleaseFormat, ReleaseToken};

use super::DeployError;
use super::layout::DeployLayout;

/// Runs deployment steps against a single deploy root.
///
/// The configuration is read-only for the lifetime of the deployer. Every
/// step goes through the [`CommandRunner`], so the same code path serves a
/// local deploy root and one reached over ssh.
///
/// A deployer assumes it is the only writer under the deploy root; nothing
/// here guards against a concurrent deploy to the same path.
#[derive(Debug)]
pub struct Deployer<R> {
    pub(crate) config: Config,
    pub(crate) runner: R,
    pub(crate) layout: DeployLayout,
    pub(crate) output: Output,
}

impl<R: CommandRunner> Deployer<R> {
    pub fn new(config: Config, runner: R, output: Output) -> Self {
        let layout = DeployLayout::new(&config.deploy_path);
        Self {
            config,
            runner,
            layout,
            output,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &DeployLayout {
        &self.layout
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub(crate) fn format(&self) -> ReleaseFormat {
        self.config.release_format
    }

    /// Fetch the source into a brand new release directory pinned to the
    /// configured revision.
    ///
    /// Steps, each aborting the push on failure: create `releases/`, make
    /// sure the cache mirror exists, fetch into it, prune old releases,
    /// clone the mirror into a new release, and reset it to the revision.
    ///
    /// `current` is untouched, so a failed push leaves the active release
    /// serving.
    pub async fn push_release(&self) -> Result<ReleaseToken, DeployError> {
        self.setup_dirs().await?;
        self.ensure_cache_repository().await?;
        self.update_cache_repository().await?;
        self.prune_releases().await?;
        let release = self.clone_to_release().await?;
        self.set_release_revision(&release).await?;

        tracing::info!(%release, "release pushed");
        Ok(release)
    }

    /// Create the `releases/` directory if it is missing.
    pub async fn setup_dirs(&self) -> Result<(), DeployError> {
        self.runner
            .run(&format!("mkdir -p {}", self.layout.releases()))
            .await?;
        Ok(())
    }
}
