//! uiconf CLI.
//!
//! Commands:
//! - `prepare`: Build, overlay and resolve a surface, print it as JSON
//! - `clear-cache`: Delete the cached pool of a surface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(
    name = "uiconf",
    about = "Prepare resolved UI component configuration",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare a surface and print its resolved component tree
    Prepare {
        /// Surface name, e.g. cms_page_listing
        surface: String,

        /// Directory holding <surface>.json and definition.json
        #[arg(short, long, env = "UICONF_SOURCE")]
        source: PathBuf,

        /// Persist built pools in this directory
        #[arg(long, env = "UICONF_CACHE_DIR")]
        cache_dir: Option<PathBuf>,

        /// JSON file of overrides: {parent: {child: fragment}}
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// JSON file of tokens substituted for `$path` arguments
        #[arg(long)]
        tokens: Option<PathBuf>,

        /// TOML options file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Delete the cached pool of a surface
    ClearCache {
        /// Surface name
        surface: String,

        /// Cache directory
        #[arg(long, env = "UICONF_CACHE_DIR")]
        cache_dir: PathBuf,

        /// TOML options file (for the cache namespace)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Prepare {
            surface,
            source,
            cache_dir,
            overrides,
            tokens,
            config,
            pretty,
        } => {
            let args = commands::prepare::PrepareArgs {
                surface,
                source,
                cache_dir,
                overrides,
                tokens,
                config,
                pretty,
            };
            println!("{}", commands::prepare::run(&args)?);
        }
        Commands::ClearCache {
            surface,
            cache_dir,
            config,
        } => commands::clear_cache::run(&surface, &cache_dir, config.as_deref())?,
    }

    Ok(())
}
