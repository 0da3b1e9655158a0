use anyhow::Result;
use log::info;

use crate::asset::{self, PlatformTag};

/// Verify that every desktop platform resolves to a reachable asset.
///
/// Intended for release CI: a missing or unreachable asset means a dead
/// download button for every visitor on that platform.
#[tracing::instrument(skip(api_url))]
pub async fn check(repo_str: &str, api_url: Option<String>) -> Result<()> {
    let (resolver, http_client) = super::build_resolver(repo_str, api_url)?;

    info!("Fetching release information for {}...", resolver.repo());
    let Some(release) = resolver.latest_release().await else {
        anyhow::bail!("{} has no published releases", resolver.repo());
    };

    println!("Release: {}", release.tag_name);
    println!("Assets: {}", release.assets.len());
    println!();

    let mut broken = 0;

    for tag in [PlatformTag::Mac, PlatformTag::Windows, PlatformTag::Linux] {
        let name = tag.display_name();

        let Some(asset) = asset::pick(tag, &release.assets) else {
            println!("{:<10} no matching asset", name);
            broken += 1;
            continue;
        };

        match http_client.head(&asset.browser_download_url).await {
            Ok(status) if status.is_success() || status.is_redirection() => {
                println!("{:<10} {} ({})", name, asset.name, status.as_u16());
            }
            Ok(status) => {
                println!(
                    "{:<10} {} not accessible (HTTP {})",
                    name,
                    asset.name,
                    status.as_u16()
                );
                broken += 1;
            }
            Err(e) => {
                println!("{:<10} {} not accessible ({:#})", name, asset.name, e);
                broken += 1;
            }
        }
    }

    if broken > 0 {
        anyhow::bail!("{} platform download(s) are broken", broken);
    }

    println!("\nAll platform downloads are working.");
    Ok(())
}
