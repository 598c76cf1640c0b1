// ABOUTME: Rollback command implementation.
// ABOUTME: Re-activates the release before the current one and restarts the service.

use super::context::{deployer, target_name};
use halyard::config::Config;
use halyard::deploy::{self, DeployError};
use halyard::error::{Error, Result};
use halyard::hooks::NO_RESTART_COMMAND;
use halyard::output::Output;

/// Roll the target back to its previous release.
pub async fn rollback(config: Config, mut output: Output) -> Result<()> {
    output.start_timer();
    output.progress(&format!("Rolling back {}", target_name(&config)));

    let deployer = deployer(config, &output);

    deploy::run(
        &deployer,
        |d| async move {
            d.rollback().await?;
            let active = d.current_release().await?;
            let restarted = d.restart().await?;
            Ok::<_, DeployError>((active, restarted))
        },
        |code, message| {
            Err(Error::Pipeline {
                action: "Rollback",
                code,
                message,
            })
        },
        |(active, restarted)| {
            if restarted.as_deref() == Some(NO_RESTART_COMMAND) {
                output.progress(NO_RESTART_COMMAND);
            }
            output.success(&format!("Rolled back to release {active}"));
            Ok(())
        },
    )
    .await
}
