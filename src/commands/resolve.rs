use anyhow::Result;
use log::info;

use crate::asset::{PlatformTag, host_os_family};
use crate::github::GitHubRepo;

/// Resolve the download URL for a platform and print it.
#[tracing::instrument(skip(api_url))]
pub async fn resolve(
    repo_str: &str,
    api_url: Option<String>,
    platform: Option<String>,
    os_family: Option<String>,
    user_agent: Option<String>,
) -> Result<()> {
    let tag = select_tag(
        platform.as_deref(),
        os_family.as_deref(),
        user_agent.as_deref(),
    )?;

    let (resolver, _) = super::build_resolver(repo_str, api_url)?;

    if tag == PlatformTag::Mobile {
        print_mobile_notice(resolver.repo());
        return Ok(());
    }

    println!("Download for {}", tag.display_name());

    info!("Resolving download for {}...", resolver.repo());
    let url = resolver.resolve_download_url(tag).await;
    println!("{}", url);

    Ok(())
}

/// An explicit platform wins; otherwise classify from the (possibly
/// injected) OS family string and user agent.
fn select_tag(
    platform: Option<&str>,
    os_family: Option<&str>,
    user_agent: Option<&str>,
) -> Result<PlatformTag> {
    match platform {
        Some(p) => p.parse(),
        None => {
            let family = os_family
                .map(str::to_string)
                .unwrap_or_else(host_os_family);
            Ok(PlatformTag::classify(&family, user_agent))
        }
    }
}

/// Shown instead of a download link for mobile device classes.
fn print_mobile_notice(repo: &GitHubRepo) {
    println!("This is a desktop application for Windows, macOS and Linux.");
    println!("Visit from your computer to download, or view the project at:");
    println!("{}", repo.page_url());
}
