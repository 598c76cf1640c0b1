// ABOUTME: Throwaway git repository used as the source of real deploys.
// ABOUTME: Tests that need git skip themselves when it is not installed.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A local repository with a `main` branch.
pub struct GitOrigin {
    dir: TempDir,
}

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(["-c", "user.name=halyard", "-c", "user.email=halyard@example.com"])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git should run");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

impl GitOrigin {
    /// Create a repository with one commit, or `None` when git is missing.
    pub fn create() -> Option<Self> {
        if !git_available() {
            eprintln!("git not available, skipping");
            return None;
        }

        let dir = TempDir::new().expect("tempdir");
        git(dir.path(), &["init", "-q"]);
        git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);

        let origin = Self { dir };
        origin.commit("VERSION", "1\n", "first");
        Some(origin)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn url(&self) -> String {
        self.dir.path().display().to_string()
    }

    /// Write `contents` to `file` and commit it on `main`.
    pub fn commit(&self, file: &str, contents: &str, message: &str) {
        std::fs::write(self.dir.path().join(file), contents).expect("write file");
        git(self.dir.path(), &["add", file]);
        git(self.dir.path(), &["commit", "-q", "-m", message]);
    }
}
