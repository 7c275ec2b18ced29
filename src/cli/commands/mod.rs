//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod browse;
mod build;
mod data;
mod helpers;
mod search;
mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use quatrains::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "quatrains")]
#[command(about = "Static site, navigator and fuzzy search for the Centuries")]
#[command(version)]
pub struct Cli {
    /// Site root containing js/data, images/ and style.css (overrides config file)
    #[arg(long, short = 's', global = true)]
    site: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Read century data from a deployed site instead of the local data directory
    #[arg(long, global = true, env = "QUATRAINS_REMOTE")]
    remote: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Render the static site: home page plus one page per quatrain
    Build {
        /// Output directory (default: <site>/_site)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Absolute base URL for canonical links (also read from URL)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show one quatrain: `<century> <number>`, `C:N` or a deep link such as /c3/q007/
    Show {
        #[arg(required = true, num_args = 1..=2)]
        target: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a random quatrain
    Random,

    /// Fuzzy search across all centuries
    Search {
        /// Search terms
        query: Vec<String>,
        /// Maximum results (default from config, 10)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print the deep link for a quatrain (`<century> <number>` or C:N)
    Link {
        #[arg(required = true, num_args = 1..=2)]
        target: Vec<String>,
        /// Print the absolute URL
        #[arg(short, long)]
        absolute: bool,
    },

    /// Resolve a deep link to its century and quatrain
    Resolve { link: String },

    /// Interactive browser: select, load, next/prev, random and live search
    Browse {
        /// Quatrain to open first (C:N or deep link)
        #[arg(long)]
        start: Option<String>,
    },

    /// Set the image of every quatrain in one century file
    SetImage {
        /// Century number (1-10)
        century: u32,
        /// Image file name, relative to the image base
        image: String,
    },

    /// Validate the century data files
    Check,
}

/// Parse arguments, load settings and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
        site: cli.site,
        remote: cli.remote,
    };
    let (settings, config) = load_settings_with_options(options).await;
    if let Some(ref path) = config.source_path {
        tracing::debug!("Using config {}", path.display());
    }

    match cli.command {
        Commands::Build { output, base_url } => {
            build::cmd_build(&settings, output, base_url).await
        }
        Commands::Show { target, json } => show::cmd_show(&settings, &target, json).await,
        Commands::Random => show::cmd_random(&settings).await,
        Commands::Search { query, limit } => {
            search::cmd_search(&settings, &query.join(" "), limit).await
        }
        Commands::Link { target, absolute } => show::cmd_link(&settings, &target, absolute),
        Commands::Resolve { link } => show::cmd_resolve(&link),
        Commands::Browse { start } => browse::cmd_browse(&settings, start.as_deref()).await,
        Commands::SetImage { century, image } => data::cmd_set_image(&settings, century, &image),
        Commands::Check => data::cmd_check(&settings).await,
    }
}
