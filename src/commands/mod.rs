//! CLI command implementations.

mod check;
mod download;
mod latest;
mod resolve;

pub use check::check;
pub use download::download;
pub use latest::latest;
pub use resolve::resolve;

use anyhow::Result;

use crate::github::{GitHub, GitHubRepo};
use crate::http::HttpClient;
use crate::resolver::ReleaseResolver;

/// Builds the resolver for a repository, sharing the HTTP client with
/// commands that issue their own requests.
fn build_resolver(
    repo_str: &str,
    api_url: Option<String>,
) -> Result<(ReleaseResolver, HttpClient)> {
    let repo = repo_str.parse::<GitHubRepo>()?;
    let http_client = HttpClient::with_defaults()?;
    let github = GitHub::new(http_client.clone(), api_url);

    Ok((ReleaseResolver::new(Box::new(github), repo), http_client))
}
