// ABOUTME: Release pruning that keeps only the newest releases.
// ABOUTME: Older release directories are removed in a single batched rm.

use crate::exec::CommandRunner;
use crate::types::ReleaseToken;

use super::{DeployError, Deployer};

/// Releases that fall outside the newest `keep`, newest first.
pub fn releases_to_prune(mut releases: Vec<ReleaseToken>, keep: usize) -> Vec<ReleaseToken> {
    releases.sort_unstable_by(|a, b| b.cmp(a));
    releases.dedup();
    if releases.len() <= keep {
        return Vec::new();
    }
    releases.split_off(keep)
}

impl<R: CommandRunner> Deployer<R> {
    /// Delete every release except the newest `keep_releases`.
    ///
    /// Returns the deleted tokens. Having nothing to delete is a success.
    pub async fn prune_releases(&self) -> Result<Vec<ReleaseToken>, DeployError> {
        let releases = self.list_releases().await?;
        let doomed = releases_to_prune(releases, self.config.keep_releases);

        if doomed.is_empty() {
            tracing::debug!("no releases to prune");
            return Ok(doomed);
        }

        let paths: Vec<String> = doomed.iter().map(|r| self.layout.release(r)).collect();
        tracing::info!(count = doomed.len(), "pruning old releases");
        self.runner
            .run(&format!("rm -rf {}", paths.join(" ")))
            .await?;

        Ok(doomed)
    }
}
