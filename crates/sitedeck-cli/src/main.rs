//! SiteDeck CLI
//!
//! Command-line interface for SiteDeck - browse, search and open a curated
//! website directory.

use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sitedeck_core::{CatalogSnapshot, Config, LoadOutcome, Preferences, Store, Theme};

mod commands;
mod environment;
mod output;
mod prompt;

use environment::TerminalEnvironment;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "sitedeck")]
#[command(about = "SiteDeck - A curated website directory")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog path or URL (overrides config)
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all sites
    #[command(alias = "ls")]
    List {
        /// Group by primary tag
        #[arg(short = 't', long)]
        by_tag: bool,
    },
    /// Fuzzy search sites by title, description and tags
    Search {
        /// Search query
        query: String,
        /// Group results by primary tag
        #[arg(short = 't', long)]
        by_tag: bool,
        /// Match tolerance from 0.0 (exact) to 1.0 (anything)
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Show site details
    Show {
        /// Site ID
        id: i64,
    },
    /// List primary tags
    Tags,
    /// Show directory information
    Info,
    /// Validate the catalog
    Check,
    /// Open a site in the browser
    Open {
        /// Site ID
        id: i64,
        /// Print the cleaned URL instead of opening it
        #[arg(long)]
        print: bool,
    },
    /// Remove tracking parameters from a URL
    Clean {
        /// URL to clean
        url: String,
    },
    /// Show or set the theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    /// Show, accept or reset the external link disclaimer
    Disclaimer {
        /// Accept the disclaimer
        #[arg(long, conflicts_with = "reset")]
        accept: bool,
        /// Forget a previous acceptance
        #[arg(long)]
        reset: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ThemeCommands {
    /// Show the current theme
    Show,
    /// Set the theme (light, dark, system)
    Set {
        theme: Theme,
    },
    /// Cycle light -> dark -> system
    Toggle,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (catalog, data_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Commands that don't need the catalog or preferences
    match &cli.command {
        Commands::Config { command } => {
            return handle_config_command(command.clone(), cli.config.as_ref(), &output);
        }
        Commands::Clean { url } => return commands::link::clean(url, &output),
        _ => {}
    }

    let mut config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }
    init_logging(&config);

    let mut prefs = Preferences::open(&config.preferences_path());

    // Preference commands work without a catalog
    match cli.command {
        Commands::Theme { command } => {
            return handle_theme_command(command, &mut prefs, &output);
        }
        Commands::Disclaimer { accept, reset } => {
            return commands::prefs::disclaimer(&mut prefs, accept, reset, &output);
        }
        _ => {}
    }

    let store = Store::new(config.catalog_source());

    if matches!(cli.command, Commands::Check) {
        return commands::site::check(&store, &output).await;
    }

    let snapshot = load_catalog(&store).await?;

    match cli.command {
        Commands::List { by_tag } => commands::site::list(&snapshot, by_tag, &output),
        Commands::Search {
            query,
            by_tag,
            threshold,
        } => commands::site::search(&snapshot, query, by_tag, threshold, &output),
        Commands::Show { id } => commands::site::show(&store, &snapshot, id, &output).await,
        Commands::Tags => commands::site::tags(&snapshot, &output),
        Commands::Info => commands::site::info(&store, &snapshot, &output),
        Commands::Open { id, print } => {
            commands::link::open(&snapshot, &mut prefs, id, print, &output)
        }
        Commands::Check
        | Commands::Clean { .. }
        | Commands::Theme { .. }
        | Commands::Disclaimer { .. }
        | Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Load the catalog, turning failures into a user-facing message
///
/// Details of the failure go to the log; the message names only its kind.
async fn load_catalog(store: &Store) -> Result<Arc<CatalogSnapshot>> {
    match store.load().await {
        Ok(LoadOutcome::Applied(snapshot)) => Ok(snapshot),
        Ok(LoadOutcome::Superseded) => store
            .snapshot()
            .context("Catalog load was superseded before completing"),
        Err(e) => {
            error!("Catalog load failed: {}", e);
            bail!(
                "{} [{}]\nRun `sitedeck check` for details.",
                e.user_message(),
                e.kind()
            )
        }
    }
}

fn handle_theme_command(
    command: Option<ThemeCommands>,
    prefs: &mut Preferences,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ThemeCommands::Show) | None => {
            commands::prefs::show_theme(prefs, &TerminalEnvironment::detect(), output)
        }
        Some(ThemeCommands::Set { theme }) => commands::prefs::set_theme(prefs, theme, output),
        Some(ThemeCommands::Toggle) => commands::prefs::toggle_theme(prefs, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize logging
///
/// Only initializes if SITEDECK_LOG environment variable is set.
/// Logs to config.log_file when configured, stderr otherwise.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("SITEDECK_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "sitedeck_core={},sitedeck_cli={}",
        log_level, log_level
    ));

    match &config.log_file {
        Some(log_path) => {
            let log_file = match File::create(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
                    return;
                }
            };

            // Ignore error if already initialized
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();

            info!("Logging initialized to {:?}", log_path);
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
