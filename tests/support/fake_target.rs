// ABOUTME: In-memory deploy target that answers the engine's command lines.
// ABOUTME: Records every command so tests can assert on exact command shapes and counts.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use halyard::deploy::DeployError;
use halyard::exec::CommandRunner;

/// Simulated filesystem state under one deploy root.
#[derive(Debug, Clone)]
pub struct TargetState {
    pub repo_exists: bool,
    pub releases: BTreeSet<String>,
    /// Extra directories under `releases/` that are not release tokens.
    pub stray_dirs: Vec<String>,
    pub current: Option<String>,
    pub current_tmp: Option<String>,
    pub uname: String,
    /// Revisions that make `git reset --hard` fail.
    pub bad_revisions: Vec<String>,
}

impl Default for TargetState {
    fn default() -> Self {
        Self {
            repo_exists: false,
            releases: BTreeSet::new(),
            stray_dirs: Vec::new(),
            current: None,
            current_tmp: None,
            uname: "Linux".to_string(),
            bad_revisions: Vec::new(),
        }
    }
}

/// A [`CommandRunner`] backed by [`TargetState`].
///
/// Cloning shares the same state and command log.
#[derive(Debug, Clone)]
pub struct FakeTarget {
    root: String,
    host: Option<String>,
    state: Arc<Mutex<TargetState>>,
    log: Arc<Mutex<Vec<String>>>,
}

impl FakeTarget {
    pub fn new(root: &str) -> Self {
        Self::with_state(root, TargetState::default())
    }

    pub fn with_state(root: &str, state: TargetState) -> Self {
        Self {
            root: root.trim_end_matches('/').to_string(),
            host: None,
            state: Arc::new(Mutex::new(state)),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn remote(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    pub fn state(&self) -> TargetState {
        self.state.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear_commands(&self) {
        self.log.lock().unwrap().clear();
    }

    /// Number of recorded commands starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.commands()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn releases_dir(&self) -> String {
        format!("{}/releases", self.root)
    }

    fn basename(path: &str) -> String {
        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(path)
            .to_string()
    }

    fn fail(command: &str, code: i32, stderr: &str) -> Result<Option<String>, DeployError> {
        Err(DeployError::CommandFailed {
            command: command.to_string(),
            code,
            stderr: stderr.to_string(),
        })
    }

    fn answer(&self, command: &str) -> Result<Option<String>, DeployError> {
        let mut state = self.state.lock().unwrap();
        let words: Vec<&str> = command.split_whitespace().collect();

        match words.as_slice() {
            ["ls", path] if path.ends_with("/repo/refs") => {
                if state.repo_exists {
                    Ok(Some("heads\ntags\n".to_string()))
                } else {
                    Self::fail(command, 2, "ls: cannot access: No such file or directory\n")
                }
            }
            ["git", "clone", "--bare", _, _] => {
                state.repo_exists = true;
                Ok(None)
            }
            ["git", "clone", _, path] => {
                state.releases.insert(Self::basename(path));
                Ok(None)
            }
            ["find", dir, ..] if *dir == self.releases_dir() => {
                let mut listing = String::new();
                for name in state.releases.iter().chain(state.stray_dirs.iter()) {
                    listing.push_str(&format!("{}/{}\n", dir, name));
                }
                Ok(if listing.is_empty() { None } else { Some(listing) })
            }
            ["cd", _, "&&", "git", "fetch", "--all", "&&", "git", "reset", "--hard", rev] => {
                if state.bad_revisions.iter().any(|b| b == rev) {
                    Self::fail(command, 128, "fatal: ambiguous argument\n")
                } else {
                    Ok(Some(format!("HEAD is now at {}\n", rev)))
                }
            }
            ["rm", "-rf", paths @ ..] => {
                for path in paths {
                    if *path == format!("{}/current", self.root) {
                        state.current = None;
                    } else {
                        state.releases.remove(&Self::basename(path));
                    }
                }
                Ok(None)
            }
            ["rm", "-f", path] if *path == format!("{}/current_tmp", self.root) => {
                state.current_tmp = None;
                Ok(None)
            }
            ["uname"] => Ok(Some(format!("{}\n", state.uname))),
            ["ln", "-s", target, _] => {
                state.current_tmp = Some(Self::basename(target));
                Ok(None)
            }
            ["mv", ..] => match state.current_tmp.take() {
                Some(release) => {
                    state.current = Some(release);
                    Ok(None)
                }
                None => Self::fail(command, 1, "mv: cannot stat 'current_tmp'\n"),
            },
            ["readlink", _] => match &state.current {
                Some(release) => Ok(Some(format!("{}/{}\n", self.releases_dir(), release))),
                None => Self::fail(command, 1, ""),
            },
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl CommandRunner for FakeTarget {
    fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    async fn run(&self, command: &str) -> Result<Option<String>, DeployError> {
        self.log.lock().unwrap().push(command.to_string());
        self.answer(command)
    }
}
