// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates halyard.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(
    dir: &Path,
    repository: Option<&str>,
    deploy_path: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(r) = repository {
        config.repository = r.to_string();
    }

    if let Some(p) = deploy_path {
        config.deploy_path = p.into();
    }

    config.validate()?;

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"# ssh target; remove to deploy on this machine
host: {}
deploy_path: {}
repository: {}
revision: {}
# short (YYYYMMDDHHMMSS) or long (26 digits)
release_format: {}
keep_releases: {}
# build_script: scripts/build.sh
# restart_command: sudo systemctl restart my-app
"#,
        config.host.as_deref().unwrap_or("deploy@server.example.com"),
        config.deploy_path.display(),
        config.repository,
        config.revision,
        config.release_format,
        config.keep_releases,
    )
}
