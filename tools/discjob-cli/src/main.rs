//! discjob CLI: set up disc sessions and turn them into transcoder jobs.
//!
//! Usage:
//!   discjob init <TITLES> <SOURCE>         Create a session from probed titles
//!   discjob info <SESSION>                 Show session information
//!   discjob autoset <SESSION>              Auto-select tracks (and crop)
//!   discjob order <SESSION> <TITLE> <MOVE> Change title processing order
//!   discjob chapters <SESSION> <TITLE> ... Export, import, or reset chapter names
//!   discjob validate <SESSION>             Report validation findings
//!   discjob preview <SESSION>              Validate and print every job
//!   discjob config [--write]               Show or create config files

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use discjob_common::config::{AppConfig, LoggingConfig};
use discjob_disc_model::Preferences;

mod commands;
mod prompt;

#[derive(Parser)]
#[command(
    name = "discjob",
    about = "Plan batch transcodes of optical-disc titles",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Continue past every validation warning without asking
    #[arg(short, long, global = true)]
    yes: bool,

    /// Preferences file (defaults to the one named in the config file)
    #[arg(long, global = true)]
    preferences: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a session from a probed title list
    Init {
        /// JSON array of titles as reported by the disc probe
        titles: PathBuf,

        /// Disc image or device path
        source: PathBuf,

        /// Session file to write
        #[arg(short, long, default_value = "session.json")]
        output: PathBuf,

        /// Disc title used for the <title> filename token
        #[arg(long)]
        name: Option<String>,

        /// Destination directory (overrides the preference default)
        #[arg(short, long)]
        destination: Option<PathBuf>,
    },

    /// Show session information
    Info {
        /// Path to the session file
        session: PathBuf,
    },

    /// Auto-select audio and subtitle tracks
    Autoset {
        /// Path to the session file
        session: PathBuf,

        /// Set up one title's custom tracks instead of the disc defaults
        #[arg(long)]
        title: Option<u32>,

        /// Also copy the detected crop
        #[arg(long)]
        crop: bool,
    },

    /// Change the processing order of a title
    Order {
        /// Path to the session file
        session: PathBuf,

        /// Title number
        title: u32,

        /// Where to move it
        #[arg(value_enum)]
        movement: Movement,
    },

    /// Work with a title's chapter names
    Chapters {
        /// Path to the session file
        session: PathBuf,

        /// Title number
        title: u32,

        #[command(subcommand)]
        action: ChapterAction,
    },

    /// Report validation findings for a session
    Validate {
        /// Path to the session file
        session: PathBuf,
    },

    /// Validate a session and print the jobs it would run
    Preview {
        /// Path to the session file
        session: PathBuf,
    },

    /// Show the configuration and preferences locations
    Config {
        /// Write default files where none exist yet
        #[arg(long)]
        write: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Movement {
    Up,
    Down,
    Top,
    Bottom,
    /// Restore probe order for every title
    Natural,
}

#[derive(Subcommand)]
pub enum ChapterAction {
    /// Write chapter names as CHAPTERnnNAME= lines
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read chapter names from a file, first line to first chapter
    Import {
        /// File with CHAPTERnnNAME= lines
        file: PathBuf,
    },
    /// Restore the default chapter names
    Reset,
    /// Label the last chapter with the end-of-title text
    TitleEnd,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    discjob_common::logging::init_logging(&LoggingConfig {
        level,
        ..config.logging.clone()
    });

    let preferences_file = cli
        .preferences
        .clone()
        .unwrap_or_else(|| config.preferences_file.clone());
    let prefs = Preferences::load_or_default(&preferences_file);

    match cli.command {
        Commands::Init {
            titles,
            source,
            output,
            name,
            destination,
        } => commands::init::run(titles, source, output, name, destination, &prefs),
        Commands::Info { session } => commands::info::run(session, &prefs),
        Commands::Autoset {
            session,
            title,
            crop,
        } => commands::autoset::run(session, title, crop, &prefs),
        Commands::Order {
            session,
            title,
            movement,
        } => commands::order::run(session, title, movement),
        Commands::Chapters {
            session,
            title,
            action,
        } => commands::chapters::run(session, title, action, &prefs),
        Commands::Validate { session } => commands::validate::run(session, &prefs),
        Commands::Preview { session } => commands::preview::run(session, &prefs, &config, cli.yes),
        Commands::Config { write } => commands::config::run(&config, &preferences_file, &prefs, write),
    }
}
