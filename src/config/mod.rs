// ABOUTME: Configuration types and parsing for halyard.yml.
// ABOUTME: Handles YAML parsing, environment overrides, validation, and destination merging.

mod init;

pub use init::init_config;

use crate::error::{Error, Result};
use crate::types::ReleaseFormat;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "halyard.yml";
pub const CONFIG_FILENAME_ALT: &str = "halyard.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".halyard/config.yml";

/// Releases kept on the target after pruning.
pub const DEFAULT_KEEP_RELEASES: usize = 4;

/// Environment variables that override file values, in the order they are applied.
pub const ENV_HOST: &str = "HALYARD_HOST";
pub const ENV_DEPLOY_PATH: &str = "HALYARD_DEPLOY_PATH";
pub const ENV_REPOSITORY: &str = "HALYARD_REPOSITORY";
pub const ENV_REVISION: &str = "HALYARD_REVISION";
pub const ENV_BUILD_SCRIPT: &str = "HALYARD_BUILD_SCRIPT";
pub const ENV_RESTART_COMMAND: &str = "HALYARD_RESTART_COMMAND";

/// Everything the deployment engine reads. Never mutated once a run starts.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// ssh target such as `deploy@web1.example.com`; absent means local.
    #[serde(default)]
    pub host: Option<String>,

    pub deploy_path: PathBuf,

    pub repository: String,

    pub revision: String,

    #[serde(default)]
    pub release_format: ReleaseFormat,

    /// Local file whose lines run inside the new release.
    #[serde(default)]
    pub build_script: Option<PathBuf>,

    #[serde(default)]
    pub restart_command: Option<String>,

    #[serde(default = "default_keep_releases")]
    pub keep_releases: usize,

    #[serde(default)]
    pub destinations: HashMap<String, Destination>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Destination {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub deploy_path: Option<PathBuf>,

    #[serde(default)]
    pub revision: Option<String>,
}

fn default_keep_releases() -> usize {
    DEFAULT_KEEP_RELEASES
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.deploy_path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("deploy_path cannot be empty".to_string()));
        }

        if !self.deploy_path.is_absolute() {
            return Err(Error::InvalidConfig(format!(
                "deploy_path must be absolute: {}",
                self.deploy_path.display()
            )));
        }

        if self.repository.trim().is_empty() {
            return Err(Error::InvalidConfig("repository cannot be empty".to_string()));
        }

        if self.revision.trim().is_empty() {
            return Err(Error::InvalidConfig("revision cannot be empty".to_string()));
        }

        if self.keep_releases == 0 {
            return Err(Error::InvalidConfig(
                "keep_releases must be at least 1".to_string(),
            ));
        }

        if matches!(&self.host, Some(host) if host.trim().is_empty()) {
            return Err(Error::InvalidConfig("host cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn for_destination(&self, name: &str) -> Result<Config> {
        let dest = self
            .destinations
            .get(name)
            .ok_or_else(|| Error::UnknownDestination(name.to_string()))?;

        let mut merged = self.clone();

        if dest.host.is_some() {
            merged.host = dest.host.clone();
        }

        if let Some(ref path) = dest.deploy_path {
            merged.deploy_path = path.clone();
        }

        if let Some(ref revision) = dest.revision {
            merged.revision = revision.clone();
        }

        merged.validate()?;
        Ok(merged)
    }

    /// Apply `HALYARD_*` environment variables over the file values.
    pub fn with_env_overrides(self) -> Result<Config> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a `HALYARD_*` name to its value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = Some(host);
        }
        if let Some(path) = lookup(ENV_DEPLOY_PATH) {
            self.deploy_path = PathBuf::from(path);
        }
        if let Some(repository) = lookup(ENV_REPOSITORY) {
            self.repository = repository;
        }
        if let Some(revision) = lookup(ENV_REVISION) {
            self.revision = revision;
        }
        if let Some(script) = lookup(ENV_BUILD_SCRIPT) {
            self.build_script = Some(PathBuf::from(script));
        }
        if let Some(command) = lookup(ENV_RESTART_COMMAND) {
            self.restart_command = Some(command);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn template() -> Self {
        Config {
            host: Some("deploy@server.example.com".to_string()),
            deploy_path: PathBuf::from("/srv/my-app"),
            repository: "https://github.com/example/my-app.git".to_string(),
            revision: "origin/main".to_string(),
            release_format: ReleaseFormat::default(),
            build_script: None,
            restart_command: None,
            keep_releases: DEFAULT_KEEP_RELEASES,
            destinations: HashMap::new(),
        }
    }
}
