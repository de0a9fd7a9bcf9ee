use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use trackctl::{
    cli, config, error, logging,
    types::{TrackDraft, TrackPatch},
    warning,
};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List and manage tracks
    Tracks(TracksOptions),

    /// Upload an MP3 or WAV file to a track
    Upload(UploadOptions),

    /// Remove the audio file from a track
    Detach(TrackId),

    /// List known genres
    Genres,

    /// Current track and playback state
    Player(PlayerOptions),

    /// Local state
    Store(StoreOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "List and manage tracks",
    args_conflicts_with_subcommands = true // disallow mixing --search with subcommands
)]
pub struct TracksOptions {
    /// Only show tracks whose title, artist or album contains this text
    #[clap(long)]
    pub search: Option<String>,

    #[command(subcommand)]
    pub command: Option<TracksSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TracksSubcommand {
    /// Show a single track
    Show(TrackId),
    /// Create a track
    Add(TrackAddOpts),
    /// Change fields of a track
    Edit(TrackEditOpts),
    /// Delete a track
    Delete(TrackId),
}

#[derive(Parser, Debug, Clone)]
pub struct TrackId {
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackAddOpts {
    #[clap(long)]
    pub title: String,
    #[clap(long)]
    pub artist: String,
    #[clap(long)]
    pub album: String,
    /// Genre label; can be repeated
    #[clap(long = "genre")]
    pub genres: Vec<String>,
    #[clap(long)]
    pub cover_image: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackEditOpts {
    pub id: String,
    #[clap(long)]
    pub title: Option<String>,
    #[clap(long)]
    pub artist: Option<String>,
    #[clap(long)]
    pub album: Option<String>,
    /// Replaces all genres; can be repeated
    #[clap(long = "genre")]
    pub genres: Option<Vec<String>>,
    #[clap(long)]
    pub cover_image: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct UploadOptions {
    pub id: String,
    pub file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayerOptions {
    #[command(subcommand)]
    pub command: PlayerSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlayerSubcommand {
    /// Start playing, optionally selecting a track first
    Play { id: Option<String> },
    /// Pause playback
    Pause,
    /// Flip between playing and paused
    Toggle,
    /// Clear the current track
    Stop,
    /// Show current track, playback flag and last error
    Status,
}

#[derive(Parser, Debug, Clone)]
pub struct StoreOptions {
    #[command(subcommand)]
    pub command: StoreSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum StoreSubcommand {
    /// Forget all cached tracks, playback state and upload records
    Clear,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = logging::init_logging() {
        warning!("Cannot initialise logging. Err: {}", e);
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Tracks(opt) => match opt.command {
            Some(TracksSubcommand::Show(t)) => cli::show_track(t.id).await,
            Some(TracksSubcommand::Add(a)) => {
                cli::add_track(TrackDraft {
                    title: a.title,
                    artist: a.artist,
                    album: a.album,
                    genres: a.genres,
                    cover_image: a.cover_image,
                })
                .await
            }
            Some(TracksSubcommand::Edit(e)) => {
                let patch = TrackPatch {
                    title: e.title,
                    artist: e.artist,
                    album: e.album,
                    genres: e.genres,
                    audio_file: None,
                    cover_image: e.cover_image.map(Some),
                };
                cli::edit_track(e.id, patch).await
            }
            Some(TracksSubcommand::Delete(t)) => cli::delete_track(t.id).await,
            None => cli::list_tracks(opt.search).await,
        },

        Command::Upload(opt) => cli::upload(opt.id, opt.file).await,
        Command::Detach(t) => cli::detach(t.id).await,
        Command::Genres => cli::genres().await,

        Command::Player(opt) => match opt.command {
            PlayerSubcommand::Play { id } => cli::play(id).await,
            PlayerSubcommand::Pause => cli::pause().await,
            PlayerSubcommand::Toggle => cli::toggle().await,
            PlayerSubcommand::Stop => cli::stop().await,
            PlayerSubcommand::Status => cli::status().await,
        },

        Command::Store(opt) => match opt.command {
            StoreSubcommand::Clear => cli::clear_store().await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
