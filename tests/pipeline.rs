// ABOUTME: Integration tests for the pipeline driver.
// ABOUTME: Checks that exactly one handler runs and the first failure stops later steps.

mod support;

use halyard::deploy::{self, DeployError, Deployer};
use halyard::output::{Output, OutputMode};
use std::path::Path;
use support::fake_target::FakeTarget;

const ROOT: &str = "/srv/app";

fn deployer(target: &FakeTarget) -> Deployer<FakeTarget> {
    let config = support::test_config(Path::new(ROOT), "https://example.com/app.git");
    Deployer::new(config, target.clone(), Output::new(OutputMode::Quiet))
}

#[derive(Debug, PartialEq)]
enum Handled {
    Failed(i32, String),
    Succeeded(String),
}

/// Test: a successful pipeline reaches only the success handler.
#[tokio::test]
async fn success_calls_only_success_handler() {
    let target = FakeTarget::new(ROOT);
    let d = deployer(&target);

    let handled = deploy::run(
        &d,
        |d| async move {
            let release = d.push_release().await?;
            d.activate_release(Some(&release)).await?;
            Ok::<_, DeployError>(release)
        },
        Handled::Failed,
        |release| Handled::Succeeded(release.to_string()),
    )
    .await;

    let expected = target.state().current.unwrap();
    assert_eq!(handled, Handled::Succeeded(expected));
}

/// Test: the first failure skips every later step and reaches only the error handler.
#[tokio::test]
async fn first_failure_stops_pipeline() {
    let target = FakeTarget::new(ROOT);
    let d = deployer(&target);

    let handled = deploy::run(
        &d,
        |d| async move {
            d.activate_release(None).await?;
            d.push_release().await?;
            Ok::<_, DeployError>(String::new())
        },
        Handled::Failed,
        Handled::Succeeded,
    )
    .await;

    assert_eq!(
        handled,
        Handled::Failed(1, "No releases to symlink!".to_string())
    );
    assert!(target.commands().is_empty());
}

/// Test: a failed command passes its exit code and stderr to the error handler.
#[tokio::test]
async fn command_failure_carries_code_and_stderr() {
    let target = FakeTarget::new(ROOT);
    let d = deployer(&target);

    let handled = deploy::run(
        &d,
        |d| async move { d.current_release().await },
        |code, message| Handled::Failed(code, message),
        |release| Handled::Succeeded(release.to_string()),
    )
    .await;

    assert_eq!(handled, Handled::Failed(1, String::new()));
}

/// Test: the rollback pipeline fails when there is nothing older to activate.
#[tokio::test]
async fn rollback_pipeline_reports_missing_previous_release() {
    let target = FakeTarget::new(ROOT);
    let d = deployer(&target);
    let release = d.push_release().await.unwrap();
    d.activate_release(Some(&release)).await.unwrap();
    target.clear_commands();

    let handled = deploy::run(
        &d,
        |d| async move { d.rollback().await },
        Handled::Failed,
        |_| Handled::Succeeded(String::new()),
    )
    .await;

    assert_eq!(
        handled,
        Handled::Failed(1, "No previous releases detected".to_string())
    );
    assert_eq!(target.count("rm -rf"), 0);
}
