use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// The desktop application this resolver serves downloads for.
const DEFAULT_REPO: &str = "koraysels/rekordbox-library-fixer";

/// ghrr - GitHub Release Resolver
///
/// Resolve the right release asset for a visitor's platform and hand out its
/// download URL, falling back to the releases page whenever resolution is
/// impossible.
///
/// Examples:
///   ghrr resolve                     # URL for the current machine
///   ghrr resolve --platform windows  # URL for another platform
///   ghrr latest                      # newest release and its assets
///   ghrr check                       # verify all platform downloads
#[derive(Parser, Debug)]
#[command(author, version = env!("GHRR_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub repository to resolve against (also via GHRR_REPO)
    #[arg(
        long = "repo",
        short = 'R',
        env = "GHRR_REPO",
        value_name = "OWNER/REPO",
        default_value = DEFAULT_REPO,
        global = true
    )]
    pub repo: String,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve the download URL for a platform
    Resolve(ResolveArgs),

    /// Show the newest release and its assets
    Latest(LatestArgs),

    /// Verify every platform resolves to a reachable asset
    Check(CheckArgs),

    /// Download the release asset for a platform
    Download(DownloadArgs),
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Platform tag (mac, windows, linux); detected when omitted
    #[arg(long, short = 'p', value_name = "TAG")]
    pub platform: Option<String>,

    /// OS family string to run detection on instead of the host's
    #[arg(long = "os-family", value_name = "FAMILY")]
    pub os_family: Option<String>,

    /// Client user agent, consulted for the mobile device-class check
    #[arg(long = "user-agent", value_name = "UA")]
    pub user_agent: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct LatestArgs {
    /// Print the release as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {}

#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// Platform tag (mac, windows, linux); detected when omitted
    #[arg(long, short = 'p', value_name = "TAG")]
    pub platform: Option<String>,

    /// Destination path (defaults to the asset name in the current directory)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(args) => {
            ghrr::commands::resolve(
                &cli.repo,
                cli.api_url,
                args.platform,
                args.os_family,
                args.user_agent,
            )
            .await?
        }
        Commands::Latest(args) => ghrr::commands::latest(&cli.repo, cli.api_url, args.json).await?,
        Commands::Check(_args) => ghrr::commands::check(&cli.repo, cli.api_url).await?,
        Commands::Download(args) => {
            ghrr::commands::download(&cli.repo, cli.api_url, args.platform, args.output).await?
        }
    }
    Ok(())
}
