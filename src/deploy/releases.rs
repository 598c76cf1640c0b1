// ABOUTME: Release directory creation, revision pinning, and enumeration.
// ABOUTME: Only directories whose names are valid tokens count as releases.

use chrono::Utc;

use crate::exec::CommandRunner;
use crate::types::{ReleaseFormat, ReleaseToken};

use super::{DeployError, Deployer};

impl<R: CommandRunner> Deployer<R> {
    /// Clone the cache mirror into a new `releases/<token>/` directory.
    ///
    /// The token comes from the wall clock; this is the only place tokens
    /// are minted.
    pub async fn clone_to_release(&self) -> Result<ReleaseToken, DeployError> {
        let release = self.format().token_at(Utc::now());

        self.runner
            .run(&format!(
                "git clone {} {}",
                self.layout.cache_repo(),
                self.layout.release(&release)
            ))
            .await?;

        Ok(release)
    }

    /// Fetch all remotes inside the release and hard-reset it to the configured revision.
    ///
    /// The revision is not checked beforehand; an unknown revision fails the
    /// `git reset` and its exit status ends the pipeline.
    pub async fn set_release_revision(&self, release: &ReleaseToken) -> Result<(), DeployError> {
        self.runner
            .run(&format!(
                "cd {} && git fetch --all && git reset --hard {}",
                self.layout.release(release),
                self.config.revision
            ))
            .await?;
        Ok(())
    }

    /// Valid release tokens found directly under `releases/`, in no particular order.
    pub async fn list_releases(&self) -> Result<Vec<ReleaseToken>, DeployError> {
        let listing = self
            .runner
            .run(&format!(
                "find {} -mindepth 1 -maxdepth 1 -type d",
                self.layout.releases()
            ))
            .await?;

        Ok(parse_release_listing(
            self.format(),
            listing.as_deref().unwrap_or_default(),
        ))
    }
}

/// Pick the release tokens out of a directory listing, one path per line.
pub fn parse_release_listing(format: ReleaseFormat, listing: &str) -> Vec<ReleaseToken> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let name = line.trim_end_matches('/').rsplit('/').next().unwrap_or(line);
            match ReleaseToken::parse(format, name) {
                Ok(token) => Some(token),
                Err(e) => {
                    tracing::debug!(name, error = %e, "skipping non-release directory");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_keeps_only_tokens() {
        let listing = "/srv/app/releases/20230101000000\n\
                       /srv/app/releases/.hidden\n\
                       /srv/app/releases/manual-copy\n\
                       /srv/app/releases/20230102000000\n\
                       /srv/app/releases/202301030000001\n";

        let releases = parse_release_listing(ReleaseFormat::Short, listing);
        let names: Vec<_> = releases.iter().map(ReleaseToken::as_str).collect();
        assert_eq!(names, vec!["20230101000000", "20230102000000"]);
    }

    #[test]
    fn listing_respects_format() {
        let listing = "/r/20230101000000\n/r/20230101000000123456789000\n";

        let short = parse_release_listing(ReleaseFormat::Short, listing);
        let long = parse_release_listing(ReleaseFormat::Long, listing);
        assert_eq!(short.len(), 1);
        assert_eq!(long.len(), 1);
        assert_eq!(long[0].as_str(), "20230101000000123456789000");
    }

    #[test]
    fn empty_listing_has_no_releases() {
        assert!(parse_release_listing(ReleaseFormat::Short, "").is_empty());
    }
}
