// ABOUTME: Failure channel shared by every deployment step.
// ABOUTME: Each failure reduces to an exit code plus a message for the top-level handler.

use std::path::PathBuf;

/// Exit code reported for failures detected by the engine itself.
pub const ENGINE_FAILURE_CODE: i32 = 1;

/// Errors that halt a deployment pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A spawned command exited with a non-zero status.
    #[error("command `{command}` failed with exit code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// The program could not be started at all.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A command line with no words was handed to the executor.
    #[error("refusing to run an empty command")]
    EmptyCommand,

    /// Activation was requested without a release.
    #[error("No releases to symlink!")]
    NoReleaseToActivate,

    /// The build step was requested without a release.
    #[error("No release to build!")]
    NoReleaseToBuild,

    /// Rollback found nothing older than the active release.
    #[error("No previous releases detected")]
    NoPreviousRelease,

    /// `uname` reported an OS family with no known atomic move semantics.
    #[error("unsupported platform: {0:?}")]
    UnsupportedPlatform(String),

    /// The `current` symlink does not point at a release directory.
    #[error("current symlink does not point at a release: {0:?}")]
    InvalidCurrentTarget(String),

    /// The configured build script could not be read.
    #[error("failed to read build script {path}: {source}")]
    BuildScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    /// An external process failed or could not be started.
    Execution,
    /// The engine refused to continue with the state it observed.
    Engine,
    /// Local input for a hook was unusable.
    Hook,
}

impl DeployError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::CommandFailed { .. }
            | DeployError::Spawn { .. }
            | DeployError::EmptyCommand => DeployErrorKind::Execution,
            DeployError::NoReleaseToActivate
            | DeployError::NoReleaseToBuild
            | DeployError::NoPreviousRelease
            | DeployError::UnsupportedPlatform(_)
            | DeployError::InvalidCurrentTarget(_) => DeployErrorKind::Engine,
            DeployError::BuildScript { .. } => DeployErrorKind::Hook,
        }
    }

    /// Exit code carried by this failure.
    ///
    /// Command failures keep the child's own status; everything else uses
    /// [`ENGINE_FAILURE_CODE`].
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::CommandFailed { code, .. } => *code,
            _ => ENGINE_FAILURE_CODE,
        }
    }

    /// Message handed to the error handler alongside the exit code.
    pub fn message(&self) -> String {
        match self {
            DeployError::CommandFailed { stderr, .. } => stderr.clone(),
            other => other.to_string(),
        }
    }
}
