// ABOUTME: Validated domain types shared across the deployment engine.
// ABOUTME: Release tokens are only constructed through format-aware parsing.

mod release;

pub use release::{ReleaseFormat, ReleaseToken, ReleaseTokenError};
