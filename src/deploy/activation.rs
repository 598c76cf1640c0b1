// ABOUTME: Atomic activation of a release through the `current` symlink.
// ABOUTME: Stages current_tmp, then renames it over current with an OS-appropriate mv.

use crate::exec::CommandRunner;
use crate::types::ReleaseToken;

use super::{DeployError, Deployer};

/// OS family of the deploy target, as far as `mv` semantics go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// GNU coreutils: `mv -T` renames onto the target in one step.
    Linux,
    /// BSD-style userland (macOS, the BSDs): only `mv -f` is available.
    Bsd,
}

const BSD_FAMILIES: [&str; 5] = ["Darwin", "FreeBSD", "OpenBSD", "NetBSD", "DragonFly"];

impl Platform {
    /// Classify `uname` output.
    ///
    /// Anything that is neither Linux nor a known BSD is rejected rather
    /// than guessed at.
    pub fn from_uname(output: &str) -> Result<Self, DeployError> {
        let name = output.trim();
        if name == "Linux" {
            Ok(Platform::Linux)
        } else if BSD_FAMILIES.contains(&name) {
            Ok(Platform::Bsd)
        } else {
            Err(DeployError::UnsupportedPlatform(name.to_string()))
        }
    }

    /// Command that moves `from` onto `to`, replacing `to`.
    pub fn move_command(&self, from: &str, to: &str) -> String {
        match self {
            Platform::Linux => format!("mv -Tf {from} {to}"),
            Platform::Bsd => format!("mv -f {from} {to}"),
        }
    }
}

impl<R: CommandRunner> Deployer<R> {
    /// Ask the target which OS family it runs.
    pub async fn detect_platform(&self) -> Result<Platform, DeployError> {
        let output = self.runner.run("uname").await?;
        Platform::from_uname(output.as_deref().unwrap_or_default())
    }

    /// Point `current` at `releases/<release>`.
    ///
    /// Sequence: remove `current`, detect the platform, link `current_tmp` to
    /// the release, then move `current_tmp` onto `current`. The link and the
    /// move stay two separate commands because the rename is what makes the
    /// switch atomic.
    ///
    /// Fails with [`DeployError::NoReleaseToActivate`] before touching the
    /// filesystem when `release` is `None`.
    pub async fn activate_release(
        &self,
        release: Option<&ReleaseToken>,
    ) -> Result<Option<String>, DeployError> {
        let release = release.ok_or(DeployError::NoReleaseToActivate)?;

        let current = self.layout.current();
        let current_tmp = self.layout.current_tmp();

        self.runner.run(&format!("rm -rf {current}")).await?;

        let platform = self.detect_platform().await?;
        tracing::debug!(?platform, "detected target platform");

        // A leftover staging link from an interrupted run would make `ln -s`
        // create the link inside the old release instead.
        self.runner.run(&format!("rm -f {current_tmp}")).await?;
        self.runner
            .run(&format!(
                "ln -s {} {}",
                self.layout.release(release),
                current_tmp
            ))
            .await?;

        let moved = self
            .runner
            .run(&platform.move_command(&current_tmp, &current))
            .await?;

        tracing::info!(%release, "release activated");
        Ok(moved)
    }
}
