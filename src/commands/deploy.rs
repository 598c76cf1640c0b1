// ABOUTME: Deploy command implementation.
// ABOUTME: Pushes a release, builds it, activates it, and restarts the service.

use super::context::{deployer, target_name};
use halyard::config::Config;
use halyard::deploy::{self, DeployError};
use halyard::error::{Error, Result};
use halyard::hooks::NO_RESTART_COMMAND;
use halyard::output::Output;

/// Deploy the configured revision as a new release.
pub async fn deploy(config: Config, mut output: Output) -> Result<()> {
    output.start_timer();
    output.progress(&format!(
        "Deploying {} ({}) to {}",
        config.repository,
        config.revision,
        target_name(&config)
    ));

    let deployer = deployer(config, &output);

    deploy::run(
        &deployer,
        |d| async move {
            let release = d.push_release().await?;
            d.run_build(Some(&release)).await?;
            d.activate_release(Some(&release)).await?;
            let restarted = d.restart().await?;
            Ok::<_, DeployError>((release, restarted))
        },
        |code, message| {
            Err(Error::Pipeline {
                action: "Deploy",
                code,
                message,
            })
        },
        |(release, restarted)| {
            if restarted.as_deref() == Some(NO_RESTART_COMMAND) {
                output.progress(NO_RESTART_COMMAND);
            }
            output.success(&format!("Deployed release {release}"));
            Ok(())
        },
    )
    .await
}
