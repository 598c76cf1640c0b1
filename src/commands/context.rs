// ABOUTME: Shared helper for resolving configuration and building a deployer.
// ABOUTME: Applies file, destination, environment, and flag overrides in that order.

use std::env;

use crate::cli::TargetArgs;
use halyard::config::Config;
use halyard::deploy::Deployer;
use halyard::error::Result;
use halyard::exec::ShellRunner;
use halyard::output::Output;

/// Load the configuration a command should run with.
pub fn load_config(target: &TargetArgs, revision: Option<&str>) -> Result<Config> {
    let config = match &target.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(&env::current_dir()?)?,
    };

    let config = match &target.destination {
        Some(dest) => config.for_destination(dest)?,
        None => config,
    };

    let mut config = config.with_env_overrides()?;

    if let Some(revision) = revision {
        config.revision = revision.to_string();
        config.validate()?;
    }

    Ok(config)
}

/// Build a deployer that spawns real processes against the configured host.
pub fn deployer(config: Config, output: &Output) -> Deployer<ShellRunner> {
    let runner = ShellRunner::new(config.host.clone(), output.clone());
    Deployer::new(config, runner, output.clone())
}

/// Human-readable name of where commands run.
pub fn target_name(config: &Config) -> String {
    let host = config.host.as_deref().unwrap_or("localhost");
    format!("{}:{}", host, config.deploy_path.display())
}
