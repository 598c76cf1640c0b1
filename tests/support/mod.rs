// ABOUTME: Test support utilities.
// ABOUTME: Provides a simulated deploy target, git fixtures, and config helpers.

use std::path::Path;
use std::sync::Once;

use halyard::config::Config;
use halyard::types::ReleaseFormat;

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fake_target;
#[allow(dead_code)]
pub mod git_origin;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("halyard=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Config for a local deploy root with long tokens, so back-to-back pushes never collide.
#[allow(dead_code)]
pub fn test_config(deploy_path: &Path, repository: &str) -> Config {
    let mut config = Config::template();
    config.host = None;
    config.deploy_path = deploy_path.to_path_buf();
    config.repository = repository.to_string();
    config.revision = "origin/main".to_string();
    config.release_format = ReleaseFormat::Long;
    config
}
