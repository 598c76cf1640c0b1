// ABOUTME: Driver that runs a deployment pipeline and closes it with one of two handlers.
// ABOUTME: The first failing step ends the pipeline; exactly one handler is called.

use std::fmt::Debug;
use std::future::Future;

use super::{DeployError, Deployer};

/// Run `pipeline` against `deployer` and hand its outcome to a handler.
///
/// Steps inside the pipeline return early with `?`, so the first
/// [`DeployError`] skips everything after it. On failure `on_error`
/// receives the exit code and message; on success `on_success` receives
/// the pipeline's value.
pub async fn run<'a, R, T, Out, F, Fut, E, S>(
    deployer: &'a Deployer<R>,
    pipeline: F,
    on_error: E,
    on_success: S,
) -> Out
where
    F: FnOnce(&'a Deployer<R>) -> Fut,
    Fut: Future<Output = Result<T, DeployError>> + 'a,
    E: FnOnce(i32, String) -> Out,
    S: FnOnce(T) -> Out,
{
    match pipeline(deployer).await {
        Ok(value) => on_success(value),
        Err(e) => {
            tracing::debug!(error = %e, "pipeline failed");
            on_error(e.exit_code(), e.message())
        }
    }
}

/// Print a failure notice and terminate the process with a non-zero status.
pub fn default_error_handler(code: i32, message: String) {
    eprintln!("Deploy failed.");
    if !message.trim().is_empty() {
        eprintln!("{}", message.trim_end());
    }
    std::process::exit(exit_status(code));
}

/// Print a success notice.
pub fn default_success_handler<T: Debug>(value: T) {
    tracing::debug!(?value, "pipeline succeeded");
    println!("Success!");
}

/// Map a failure code onto a process exit status that always signals failure.
pub fn exit_status(code: i32) -> i32 {
    if (1..=255).contains(&code) { code } else { 1 }
}
