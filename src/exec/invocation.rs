// ABOUTME: Turns a command line into the program and arguments to spawn.
// ABOUTME: Local lines are split on whitespace; remote lines are handed to ssh.

/// Shell control operators that need a shell to interpret them.
const SHELL_OPERATORS: [&str; 5] = ["&&", ";", "|", ">", "<"];

/// Program and arguments for one spawned process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Build the invocation for `command` run against `host`.
    ///
    /// With no host, a plain command line is split into program and
    /// arguments. A line containing shell operators (such as
    /// `cd path && git fetch`) is run through `sh -c` so it means the same
    /// thing locally as it does through the remote login shell.
    ///
    /// With a host, the command words follow `ssh <host>`.
    ///
    /// Returns `None` for a command line with no words.
    pub fn for_target(host: Option<&str>, command: &str) -> Option<Self> {
        let mut words = command.split_whitespace();
        let first = words.next()?;

        let invocation = match host {
            Some(host) => Invocation {
                program: "ssh".to_string(),
                args: std::iter::once(host)
                    .chain(std::iter::once(first))
                    .chain(words)
                    .map(str::to_string)
                    .collect(),
            },
            None if needs_shell(command) => Invocation {
                program: "sh".to_string(),
                args: vec!["-c".to_string(), command.trim().to_string()],
            },
            None => Invocation {
                program: first.to_string(),
                args: words.map(str::to_string).collect(),
            },
        };

        Some(invocation)
    }
}

fn needs_shell(command: &str) -> bool {
    SHELL_OPERATORS.iter().any(|op| command.contains(op))
}
