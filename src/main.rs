use anyhow::Result;
use clap::Parser;
use fenix_fetch::commands::{self, Outcome, Settings};
use fenix_fetch::download::FileNaming;
use fenix_fetch::github::{DEFAULT_REPO, GitHubRepo};
use std::path::PathBuf;
use std::process::ExitCode;

/// The latest asset was already downloaded; nothing to do.
const EXIT_ALREADY_DOWNLOADED: u8 = 1;

/// Any failure: release lookup, download, or writing to disk.
const EXIT_FAILURE: u8 = 2;

/// fenix-fetch - latest release downloader for Termux
///
/// Fetches the first asset of a GitHub repository's most recent release into
/// Termux's shared downloads folder.
///
/// Exit status: 0 after a download, 1 when the latest asset was already
/// downloaded (download command only), 2 on errors.
///
/// Examples:
///   fenix-fetch download            # Fetch the latest build unless already fetched
///   fenix-fetch install             # Fetch it and open the share sheet
#[derive(Parser, Debug)]
#[command(author, version = env!("FENIX_FETCH_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Repository whose releases are followed
    #[arg(
        long,
        env = "FENIX_FETCH_REPO",
        value_name = "OWNER/REPO",
        default_value = DEFAULT_REPO,
        value_parser = parse_repo,
        global = true
    )]
    pub repo: GitHubRepo,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Directory the asset is saved to (defaults to ~/storage/downloads/fenix)
    #[arg(
        long = "download-dir",
        env = "FENIX_FETCH_DOWNLOAD_DIR",
        value_name = "PATH",
        global = true
    )]
    pub download_dir: Option<PathBuf>,

    /// Last-download marker file (defaults to ~/.last_fenix_download_id)
    #[arg(
        long = "marker",
        env = "FENIX_FETCH_MARKER",
        value_name = "PATH",
        global = true
    )]
    pub marker: Option<PathBuf>,

    /// Name the file after the server's content-disposition instead of beta.apk
    #[arg(long = "server-filename", global = true)]
    pub server_filename: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Download the latest asset unless it was already downloaded
    Download(DownloadArgs),

    /// Download the latest asset and open the share sheet for it
    Install(InstallArgs),
}

#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// Download even if the marker says the asset was already fetched
    #[arg(long)]
    pub force: bool,

    /// Open the share sheet after downloading
    #[arg(long)]
    pub share: bool,
}

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// Only download, do not open the share sheet
    #[arg(long = "no-share")]
    pub no_share: bool,
}

fn parse_repo(s: &str) -> Result<GitHubRepo, String> {
    s.parse::<GitHubRepo>().map_err(|e| e.to_string())
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            repo: self.repo.clone(),
            api_url: self.api_url.clone(),
            download_dir: self.download_dir.clone(),
            marker: self.marker.clone(),
        }
    }

    fn naming(&self) -> FileNaming {
        if self.server_filename {
            FileNaming::ServerProvided
        } else {
            FileNaming::default()
        }
    }
}

async fn execute(cli: Cli) -> Result<Outcome> {
    let runtime = fenix_fetch::runtime::RealRuntime;
    let settings = cli.settings();
    let naming = cli.naming();

    match cli.command {
        Commands::Download(args) => {
            commands::download(runtime, settings, args.force, args.share, naming).await
        }
        Commands::Install(args) => {
            commands::install(runtime, settings, !args.no_share, naming).await
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(Outcome::Downloaded { .. }) => ExitCode::SUCCESS,
        Ok(Outcome::AlreadyDownloaded { .. }) => ExitCode::from(EXIT_ALREADY_DOWNLOADED),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
