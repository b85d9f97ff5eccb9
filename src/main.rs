use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spinctl::{cli, config, error, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Export saved tracks to a CSV file
    Export(ExportOptions),

    /// Rebuild a rolling playlist from recently liked tracks
    Rolling(RollingOptions),

    /// Create a weekly mix from followed artists' catalogs
    Mix(MixOptions),

    /// Analyze recent likes for generative discovery
    Discover(DiscoverOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Output file for the CSV export
    #[clap(long, default_value = "saved_songs.csv")]
    pub output: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RollingOptions {
    /// Number of days the rolling window covers
    #[clap(long, default_value_t = 30)]
    pub days: u32,

    /// Playlist name (defaults to "Last <days> days")
    #[clap(long)]
    pub name: Option<String>,

    /// Follow the playlist so it shows up in your library
    #[clap(long)]
    pub pin: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct MixOptions {
    /// Number of tracks to aim for
    #[clap(long, default_value_t = 16)]
    pub tracks: usize,

    /// Runtime ceiling in minutes
    #[clap(long, default_value_t = 60)]
    pub minutes: u64,

    /// Most tracks any single artist may contribute
    #[clap(long, default_value_t = 2)]
    pub per_artist: u32,

    /// Total draws before the run gives up
    #[clap(long, default_value_t = 200)]
    pub attempts: u32,

    /// Consecutive over-length rejections before stopping early
    #[clap(long, default_value_t = 10)]
    pub max_runtime_rejects: u32,

    /// Keep drawing after over-length rejections until the attempt budget
    /// runs out
    #[clap(long)]
    pub keep_trying: bool,

    /// How saved tracks are recognized: "id" or "name-artist"
    #[clap(long, default_value = "id", value_parser = utils::parse_match_mode)]
    pub match_mode: utils::SavedMatchMode,
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverOptions {
    /// How many months of recent likes to analyze
    #[clap(long, default_value_t = 3)]
    pub months: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Export(opt) => cli::export(opt.output).await,
        Command::Rolling(opt) => cli::rolling(opt.days, opt.name, opt.pin).await,
        Command::Mix(opt) => {
            cli::mix(
                opt.tracks,
                opt.minutes,
                opt.per_artist,
                opt.attempts,
                opt.max_runtime_rejects,
                opt.keep_trying,
                opt.match_mode,
            )
            .await
        }
        Command::Discover(opt) => cli::discover(opt.months).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
