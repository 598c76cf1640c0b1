// ABOUTME: Command execution against the deploy target.
// ABOUTME: Local and ssh execution share one success/failure contract.

mod invocation;
mod runner;

pub use invocation::Invocation;
pub use runner::{CommandRunner, ShellRunner};
