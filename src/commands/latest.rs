use anyhow::Result;
use log::info;

/// Show the newest release and its assets
#[tracing::instrument(skip(api_url))]
pub async fn latest(repo_str: &str, api_url: Option<String>, json: bool) -> Result<()> {
    let (resolver, _) = super::build_resolver(repo_str, api_url)?;

    info!("Fetching release information for {}...", resolver.repo());
    let Some(release) = resolver.latest_release().await else {
        println!("No published releases. See {}", resolver.fallback_url());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&release)?);
        return Ok(());
    }

    println!("Release: {}", release.tag_name);

    println!("\nAssets:");
    for asset in &release.assets {
        println!(
            "  {} ({:.2} MB)",
            asset.name,
            asset.size as f64 / (1024.0 * 1024.0)
        );
    }

    if release.assets.is_empty() {
        println!("  (none)");
    }

    Ok(())
}
