// ABOUTME: Bare mirror of the source repository kept under the deploy root.
// ABOUTME: Cloned once, fetched on every push so releases clone from local history.

use crate::exec::CommandRunner;

use super::{DeployError, Deployer};

impl<R: CommandRunner> Deployer<R> {
    /// Clone the source repository into `repo/` unless it is already there.
    ///
    /// Returns `true` when a clone was made.
    pub async fn ensure_cache_repository(&self) -> Result<bool, DeployError> {
        let repo = self.layout.cache_repo();

        match self.runner.run(&format!("ls {repo}/refs")).await {
            Ok(_) => {
                tracing::debug!(%repo, "cache repository present");
                return Ok(false);
            }
            // A failing `ls` means the mirror is missing; anything else is fatal.
            Err(DeployError::CommandFailed { .. }) => {}
            Err(e) => return Err(e),
        }

        tracing::info!(%repo, repository = %self.config.repository, "cloning cache repository");
        self.runner
            .run(&format!(
                "git clone --bare {} {}",
                self.config.repository, repo
            ))
            .await?;
        Ok(true)
    }

    /// Bring every branch of the mirror up to date with the source.
    pub async fn update_cache_repository(&self) -> Result<(), DeployError> {
        self.runner
            .run(&format!(
                "cd {} && git fetch origin +refs/heads/*:refs/heads/*",
                self.layout.cache_repo()
            ))
            .await?;
        Ok(())
    }
}
