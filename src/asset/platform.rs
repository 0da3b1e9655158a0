use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

/// Coarse OS classification used to pick a release asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTag {
    Mac,
    Windows,
    Linux,
    Mobile,
    Unknown,
}

impl PlatformTag {
    /// Classify a client OS family string.
    ///
    /// Matching is case-insensitive and total: any unrecognized input maps to
    /// `Unknown`, which callers treat as "offer the generic download page".
    pub fn detect(os_family: &str) -> Self {
        let family = os_family.to_lowercase();

        // OS family libraries report Mac as "OS X" or "macOS"
        if family.contains("os x") || family.contains("macos") || family == "darwin" {
            return PlatformTag::Mac;
        }

        // The Windows family covers all Windows versions ("Windows Server 2008 R2 / 7", ...)
        if family.contains("windows") {
            return PlatformTag::Windows;
        }

        // Linux families, including common distribution names
        if family.contains("linux")
            || family.contains("ubuntu")
            || family.contains("debian")
            || family.contains("fedora")
        {
            return PlatformTag::Linux;
        }

        PlatformTag::Unknown
    }

    /// Classify from both the OS family and the user agent.
    ///
    /// A mobile device class wins over the family string: there is no desktop
    /// download for it, regardless of what OS the device reports.
    pub fn classify(os_family: &str, user_agent: Option<&str>) -> Self {
        if user_agent.is_some_and(is_mobile_device) {
            return PlatformTag::Mobile;
        }
        Self::detect(os_family)
    }

    /// Human-readable name shown next to the download action.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlatformTag::Mac => "macOS",
            PlatformTag::Windows => "Windows",
            PlatformTag::Linux => "Linux",
            PlatformTag::Mobile | PlatformTag::Unknown => "Download",
        }
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            PlatformTag::Mac => "mac",
            PlatformTag::Windows => "windows",
            PlatformTag::Linux => "linux",
            PlatformTag::Mobile => "mobile",
            PlatformTag::Unknown => "unknown",
        };
        write!(f, "{}", tag)
    }
}

impl FromStr for PlatformTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mac" | "macos" | "darwin" => Ok(PlatformTag::Mac),
            "windows" | "win" => Ok(PlatformTag::Windows),
            "linux" => Ok(PlatformTag::Linux),
            "mobile" => Ok(PlatformTag::Mobile),
            "unknown" => Ok(PlatformTag::Unknown),
            _ => Err(anyhow!(
                "Unknown platform '{}'. Expected mac, windows, linux, mobile or unknown.",
                s
            )),
        }
    }
}

/// Device-class heuristic for the mobile signal.
///
/// The OS family string alone cannot carry this (an iOS family would classify
/// as unknown), so it is a separate input sourced from the user agent.
pub fn is_mobile_device(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    ["android", "iphone", "ipad", "ipod", "mobile"]
        .iter()
        .any(|marker| ua.contains(marker))
}

/// OS family of the machine running the CLI, used when no family string is
/// injected on the command line.
pub fn host_os_family() -> String {
    #[cfg(target_os = "macos")]
    {
        "macOS".to_string()
    }
    #[cfg(target_os = "linux")]
    {
        "Linux".to_string()
    }
    #[cfg(target_os = "windows")]
    {
        "Windows".to_string()
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        std::env::consts::OS.to_string()
    }
}
