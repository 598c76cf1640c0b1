// ABOUTME: Build and restart hooks run through the deployment command runner.
// ABOUTME: Build script lines run inside the release, joined so the first failure stops the rest.

use std::path::{Path, PathBuf};

use crate::deploy::{DeployError, Deployer};
use crate::exec::CommandRunner;
use crate::types::ReleaseToken;

/// Value returned by [`Deployer::restart`] when no restart command is configured.
pub const NO_RESTART_COMMAND: &str = "No command given for restart action.";

/// Notice printed when the build step has nothing to run.
pub const NO_BUILD_SCRIPT: &str = "No build script specified, skipping build step.";

/// A build script read from the local machine.
///
/// Blank lines and `#` comment lines are dropped; every other line is one
/// command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildScript {
    path: PathBuf,
    commands: Vec<String>,
}

impl BuildScript {
    pub async fn load(path: &Path) -> Result<Self, DeployError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DeployError::BuildScript {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(path, &text))
    }

    pub fn parse(path: &Path, text: &str) -> Self {
        let commands = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        Self {
            path: path.to_path_buf(),
            commands,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// One command line that runs every script line inside `release_dir`.
    pub fn compound_command(&self, release_dir: &str) -> String {
        std::iter::once(format!("cd {release_dir}"))
            .chain(self.commands.iter().cloned())
            .collect::<Vec<_>>()
            .join(" && ")
    }
}

impl<R: CommandRunner> Deployer<R> {
    /// Run the configured build script inside `releases/<release>/`.
    ///
    /// Without a configured script this prints a notice and succeeds.
    pub async fn run_build(
        &self,
        release: Option<&ReleaseToken>,
    ) -> Result<Option<String>, DeployError> {
        let Some(path) = &self.config.build_script else {
            self.output.progress(NO_BUILD_SCRIPT);
            return Ok(None);
        };

        let release = release.ok_or(DeployError::NoReleaseToBuild)?;
        let script = BuildScript::load(path).await?;

        if script.is_empty() {
            self.output.progress(&format!(
                "Build script {} has no commands, skipping build step.",
                path.display()
            ));
            return Ok(None);
        }

        tracing::info!(%release, script = %path.display(), "running build script");
        self.runner
            .run(&script.compound_command(&self.layout.release(release)))
            .await
    }

    /// Run the configured restart command.
    ///
    /// Without one, succeeds with [`NO_RESTART_COMMAND`] as the value.
    pub async fn restart(&self) -> Result<Option<String>, DeployError> {
        match &self.config.restart_command {
            Some(command) => {
                tracing::info!(%command, "restarting");
                self.runner.run(command).await
            }
            None => Ok(Some(NO_RESTART_COMMAND.to_string())),
        }
    }
}
