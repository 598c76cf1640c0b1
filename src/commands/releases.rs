// ABOUTME: Releases command implementation.
// ABOUTME: Lists release tokens on the target and marks the active one.

use super::context::deployer;
use halyard::config::Config;
use halyard::deploy::{self, DeployError};
use halyard::error::{Error, Result};
use halyard::output::{Output, OutputMode};

/// Print every release on the target, newest first.
pub async fn releases(config: Config, output: Output) -> Result<()> {
    // The listing is the result; command notices would only get in the way.
    let quiet = Output::new(OutputMode::Quiet);
    let deployer = deployer(config, &quiet);

    deploy::run(
        &deployer,
        |d| async move {
            let mut releases = d.list_releases().await?;
            releases.sort_unstable_by(|a, b| b.cmp(a));
            // No `current` link yet is not an error for a listing.
            let active = d.current_release().await.ok();
            Ok::<_, DeployError>((releases, active))
        },
        |code, message| {
            Err(Error::Pipeline {
                action: "Listing releases",
                code,
                message,
            })
        },
        |(releases, active)| {
            if releases.is_empty() {
                output.success("No releases found");
                return Ok(());
            }
            if active.is_none() {
                output.warning("no release is active");
            }
            for release in &releases {
                let marker = if Some(release) == active.as_ref() { "*" } else { " " };
                println!("{marker} {release}");
            }
            Ok(())
        },
    )
    .await
}
