// ABOUTME: Rollback to the newest release older than the active one.
// ABOUTME: Reuses the activation sequence so rollback switches just as atomically.

use crate::exec::CommandRunner;
use crate::types::ReleaseToken;

use super::{DeployError, Deployer};

/// Releases strictly older than `current`, in input order.
pub fn previous_releases(releases: &[ReleaseToken], current: &ReleaseToken) -> Vec<ReleaseToken> {
    releases.iter().filter(|r| *r < current).cloned().collect()
}

/// The newest release strictly older than `current`.
pub fn select_rollback_target(
    releases: &[ReleaseToken],
    current: &ReleaseToken,
) -> Result<ReleaseToken, DeployError> {
    previous_releases(releases, current)
        .into_iter()
        .max()
        .ok_or(DeployError::NoPreviousRelease)
}

impl<R: CommandRunner> Deployer<R> {
    /// The release `current` points at.
    pub async fn current_release(&self) -> Result<ReleaseToken, DeployError> {
        let target = self
            .runner
            .run(&format!("readlink {}", self.layout.current()))
            .await?
            .unwrap_or_default();
        let target = target.trim();

        let name = target.trim_end_matches('/').rsplit('/').next().unwrap_or("");
        ReleaseToken::parse(self.format(), name)
            .map_err(|_| DeployError::InvalidCurrentTarget(target.to_string()))
    }

    /// Releases on the target that are older than the active one.
    pub async fn previous_releases(&self) -> Result<Vec<ReleaseToken>, DeployError> {
        let current = self.current_release().await?;
        let releases = self.list_releases().await?;
        Ok(previous_releases(&releases, &current))
    }

    /// Activate the newest release older than the active one.
    pub async fn rollback(&self) -> Result<Option<String>, DeployError> {
        let current = self.current_release().await?;
        let releases = self.list_releases().await?;
        let target = select_rollback_target(&releases, &current)?;

        tracing::info!(from = %current, to = %target, "rolling back");
        self.activate_release(Some(&target)).await
    }
}
