// ABOUTME: Paths of the deploy root's fixed filesystem layout.
// ABOUTME: repo/, releases/<token>/, current, and the transient current_tmp.

use std::path::Path;

use crate::types::ReleaseToken;

const CACHE_REPO_DIR: &str = "repo";
const RELEASES_DIR: &str = "releases";
const CURRENT_LINK: &str = "current";
const CURRENT_TMP_LINK: &str = "current_tmp";

/// Path strings under a deploy root, rendered for use in command lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployLayout {
    root: String,
}

impl DeployLayout {
    pub fn new(root: &Path) -> Self {
        let rendered = root.to_string_lossy();
        let trimmed = rendered.trim_end_matches('/');
        Self {
            root: trimmed.to_string(),
        }
    }

    pub fn root(&self) -> &str {
        if self.root.is_empty() { "/" } else { &self.root }
    }

    /// Bare mirror of the source repository.
    pub fn cache_repo(&self) -> String {
        self.join(CACHE_REPO_DIR)
    }

    pub fn releases(&self) -> String {
        self.join(RELEASES_DIR)
    }

    pub fn release(&self, token: &ReleaseToken) -> String {
        format!("{}/{}/{}", self.root, RELEASES_DIR, token)
    }

    pub fn current(&self) -> String {
        self.join(CURRENT_LINK)
    }

    /// Staging link that only exists while activation is in progress.
    pub fn current_tmp(&self) -> String {
        self.join(CURRENT_TMP_LINK)
    }

    fn join(&self, name: &str) -> String {
        format!("{}/{}", self.root, name)
    }
}
