//! Release resolution: map a platform tag to a concrete download URL.

use log::{debug, warn};

use crate::asset::{self, PlatformTag};
use crate::github::{GetReleases, GitHubRepo, Release};
use crate::http::FetchError;

/// Resolves the download URL for a platform against the newest published
/// release.
///
/// Every failure path degrades to the static releases-listing URL; no method
/// here returns an error to the caller.
pub struct ReleaseResolver {
    github: Box<dyn GetReleases>,
    repo: GitHubRepo,
    fallback_url: String,
}

impl ReleaseResolver {
    pub fn new(github: Box<dyn GetReleases>, repo: GitHubRepo) -> Self {
        let fallback_url = repo.releases_url();
        Self {
            github,
            repo,
            fallback_url,
        }
    }

    pub fn repo(&self) -> &GitHubRepo {
        &self.repo
    }

    /// The releases listing page, used whenever precise resolution fails.
    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    /// Fetches the newest release, or `None` if there is none to be had.
    ///
    /// Release publishing may lag: a repository can have releases while none
    /// is tagged "latest" yet. An error *response* from the latest endpoint
    /// therefore triggers exactly one follow-up against the full release
    /// list, whose first entry is the most recent. Transport failures, parse
    /// failures and an empty list all map to `None`.
    #[tracing::instrument(skip(self))]
    pub async fn latest_release(&self) -> Option<Release> {
        match self.github.get_latest_release(&self.repo).await {
            Ok(release) => Some(release),
            Err(e) if e.downcast_ref::<FetchError>().is_some() => {
                debug!(
                    "No release tagged latest for {} ({}), listing all releases...",
                    self.repo, e
                );
                match self.github.get_releases(&self.repo).await {
                    Ok(releases) => {
                        let release = releases.into_iter().next();
                        if release.is_none() {
                            warn!("{} has no published releases", self.repo);
                        }
                        release
                    }
                    Err(e) => {
                        warn!("Failed to list releases for {}: {:#}", self.repo, e);
                        None
                    }
                }
            }
            Err(e) => {
                warn!("Failed to fetch latest release for {}: {:#}", self.repo, e);
                None
            }
        }
    }

    /// Resolves the download URL for a platform tag. Infallible: when no
    /// release or no matching asset exists, the fallback URL is returned.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_download_url(&self, tag: PlatformTag) -> String {
        match self.latest_release().await {
            Some(release) => self.resolve_in_release(tag, &release),
            None => self.fallback_url.clone(),
        }
    }

    /// The pure half of resolution: pick from already-fetched metadata.
    pub fn resolve_in_release(&self, tag: PlatformTag, release: &Release) -> String {
        match asset::pick(tag, &release.assets) {
            Some(asset) => asset.browser_download_url.clone(),
            None => {
                debug!(
                    "No {} asset in release {} of {}, using releases page",
                    tag, release.tag_name, self.repo
                );
                self.fallback_url.clone()
            }
        }
    }
}
