use crate::github::ReleaseAsset;

use super::PlatformTag;

/// Check if an asset filename matches the naming convention for a platform.
///
/// The rules mirror how release assets are published: installers by suffix,
/// zipped app bundles by a platform infix.
pub fn matches_platform(tag: PlatformTag, name: &str) -> bool {
    let name_lower = name.to_lowercase();

    match tag {
        PlatformTag::Mac => name_lower.ends_with(".dmg") || name_lower.contains("-mac.zip"),
        PlatformTag::Windows => name_lower.ends_with(".exe") || name_lower.contains("-win.zip"),
        PlatformTag::Linux => name_lower.ends_with(".appimage") || name_lower.ends_with(".deb"),
        // No download action for these tags
        PlatformTag::Mobile | PlatformTag::Unknown => false,
    }
}

/// Pick the asset for a platform from the given list.
///
/// Assets are scanned in published order and the first match wins.
/// Returns `None` if no asset matches.
pub fn pick<'a>(tag: PlatformTag, assets: &'a [ReleaseAsset]) -> Option<&'a ReleaseAsset> {
    assets.iter().find(|asset| matches_platform(tag, &asset.name))
}
