// ABOUTME: The single place where deployment commands spawn processes.
// ABOUTME: Runs locally or through ssh and maps exit status onto the failure channel.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use super::invocation::Invocation;
use crate::deploy::DeployError;
use crate::output::Output;

/// Exit code reported when a process was terminated by a signal.
const SIGNALLED_EXIT_CODE: i32 = -1;

/// Runs one command line against the deploy target.
///
/// Success carries captured stdout, or `None` when the command printed
/// nothing. A non-zero exit is a [`DeployError::CommandFailed`] carrying the
/// exit code and stderr.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Remote host the commands run on, `None` for the local machine.
    fn host(&self) -> Option<&str>;

    /// Run `command` and wait for it to exit.
    async fn run(&self, command: &str) -> Result<Option<String>, DeployError>;
}

/// Spawns real processes, locally or through the `ssh` binary.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    host: Option<String>,
    output: Output,
}

impl ShellRunner {
    pub fn new(host: Option<String>, output: Output) -> Self {
        Self { host, output }
    }

    pub fn local(output: Output) -> Self {
        Self::new(None, output)
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    async fn run(&self, command: &str) -> Result<Option<String>, DeployError> {
        let invocation =
            Invocation::for_target(self.host(), command).ok_or(DeployError::EmptyCommand)?;

        tracing::debug!(
            program = %invocation.program,
            args = ?invocation.args,
            "spawning command"
        );

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| DeployError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();

        if !output.status.success() {
            let mut stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let code = match output.status.code() {
                Some(code) => code,
                None => {
                    stderr.push_str("process terminated by signal\n");
                    SIGNALLED_EXIT_CODE
                }
            };
            tracing::debug!(code, stderr = %stderr.trim_end(), "command failed");
            return Err(DeployError::CommandFailed {
                command: command.to_string(),
                code,
                stderr,
            });
        }

        self.output
            .progress(&format!("Command executed successfully: {command}"));

        if stdout.is_empty() {
            return Ok(None);
        }

        self.output.progress(&format!("Output:\n{}", stdout.trim_end()));
        Ok(Some(stdout))
    }
}
