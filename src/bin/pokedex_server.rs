//! Pokedex Browser JSON-RPC Server
//!
//! Serves search, species detail and type matchup tools over stdin/stdout,
//! one JSON message per line. Logs go to stderr.

use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pokedex_browser::{logging, BrowserConfig, PokedexServer};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "pokedex-server", version, about = "Pokedex browser over line-delimited JSON-RPC")]
struct Args {
    /// Load RON data from this directory instead of the bundled dataset
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to ./pokedex.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config =
        BrowserConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }

    let repo = config
        .open_repository()
        .context("failed to open species data")?;
    info!(species = repo.len(), "server ready");

    let server = PokedexServer::new(&repo, config.search_limit);
    let stdin = io::stdin();
    server
        .run(BufReader::new(stdin.lock()), io::stdout())
        .context("stdio transport failed")?;
    Ok(())
}
