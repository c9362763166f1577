use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "timbre", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding catalog.json and similarity.json (default: ~/.local/share/timbre)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Catalog file, overriding the configured one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Similarity matrix file, overriding the configured one
    #[arg(long, global = true)]
    matrix: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Recommend songs similar to the given title
    ///
    /// Looks the title up in the catalog, ignoring case and surrounding
    /// whitespace, and lists the most similar other songs according to the
    /// precomputed similarity matrix. Equal scores are ordered by catalog
    /// position, so results are the same on every run.
    ///
    /// If the title is not in the catalog, songs whose titles contain it are
    /// suggested instead.
    Recommend {
        /// Song title to find neighbours for
        title: String,

        /// Number of recommendations (default: config default_k)
        #[arg(short)]
        k: Option<usize>,

        /// Show similarity scores
        #[arg(long)]
        scores: bool,

        /// Print recommendations as JSON
        #[arg(long)]
        json: bool,
    },
    /// List songs in the catalog
    List {
        /// Only show titles containing this text
        filter: Option<String>,

        /// Maximum number of songs to print
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show where the similarity data lives and how large it is
    Status,
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print a config value, or the whole config file
    Get {
        key: Option<String>,
    },
    /// Set a config value in the config file
    Set {
        key: String,
        value: String,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?.with_overrides(cli.data_dir, cli.catalog, cli.matrix);
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Recommend {
            title,
            k,
            scores,
            json,
        } => {
            commands::run_recommend(&config, &title, k, scores, json)?;
        }
        Commands::List { filter, limit } => {
            commands::run_list(&config, filter, limit)?;
        }
        Commands::Status => {
            commands::show_status(&config)?;
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommand::Show => commands::config::show_config(&config)?,
            ConfigCommand::Get { key } => commands::config::get_config(&config, key)?,
            ConfigCommand::Set { key, value } => commands::config::set_config(key, value)?,
            ConfigCommand::Path => commands::config::show_path()?,
            ConfigCommand::Example => commands::config::show_example()?,
            ConfigCommand::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
