use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::path::PathBuf;

use crate::asset::{self, PlatformTag, host_os_family};
use crate::github::GitHubRepo;

/// Download the release asset for a platform to a local file.
#[tracing::instrument(skip(api_url))]
pub async fn download(
    repo_str: &str,
    api_url: Option<String>,
    platform: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let tag = match platform {
        Some(p) => p.parse::<PlatformTag>()?,
        None => PlatformTag::detect(&host_os_family()),
    };

    if matches!(tag, PlatformTag::Mobile | PlatformTag::Unknown) {
        anyhow::bail!(
            "No download asset for platform '{}'. Pick one of mac, windows or linux.",
            tag
        );
    }

    let (resolver, http_client) = super::build_resolver(repo_str, api_url)?;

    info!("Fetching release information for {}...", resolver.repo());
    let Some(release) = resolver.latest_release().await else {
        println!("No published releases. See {}", resolver.fallback_url());
        return Ok(());
    };

    let Some(asset) = asset::pick(tag, &release.assets) else {
        println!(
            "Release {} has no {} asset. See {}",
            release.tag_name,
            tag.display_name(),
            resolver.fallback_url()
        );
        return Ok(());
    };

    if tag == PlatformTag::Mac {
        print_gatekeeper_notice(resolver.repo());
    }

    let dest = output.unwrap_or_else(|| PathBuf::from(&asset.name));

    info!("Downloading {}...", asset.name);
    let bytes = http_client
        .download_file(&asset.browser_download_url, || {
            File::create(&dest).with_context(|| format!("Failed to create {:?}", dest))
        })
        .await?;

    println!(
        "Saved {} ({:.2} MB) to {}",
        asset.name,
        bytes as f64 / (1024.0 * 1024.0),
        dest.display()
    );

    Ok(())
}

/// One-time Gatekeeper step for apps from unidentified developers.
/// Informational only; printed before the download, never blocks it.
fn print_gatekeeper_notice(repo: &GitHubRepo) {
    println!("macOS quarantines apps from unidentified developers on first run.");
    println!("After downloading:");
    println!("  1. Move the app to /Applications");
    println!("  2. Remove the quarantine attribute:");
    println!("       xattr -cr /Applications/{}.app", repo.repo);
    println!("  or right-click the app and choose Open.");
    println!();
}
