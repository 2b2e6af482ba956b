use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pokedex_browser::{
    logging, resolve_codes, species_detail, BrowserConfig, EvolutionChain, OutputFormat,
    TypeMatchup,
};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "pokedex", version, about = "Browse species, type matchups and evolution chains")]
struct Cli {
    /// Load RON data from this directory instead of the bundled dataset
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to ./pokedex.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Species whose name starts with the query
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Full detail view of one species
    Show { id: u32 },
    /// Weaknesses, resistances and immunities of one or two types
    Matchups {
        #[arg(required = true, num_args = 1..=2)]
        types: Vec<String>,
    },
    /// Evolution chains containing a species
    Chains { id: u32 },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_matchup_group(label: &str, entries: &[TypeMatchup]) {
    if entries.is_empty() {
        return;
    }
    let parts: Vec<String> = entries
        .iter()
        .map(|m| format!("{} x{}", m.attack_type, m.multiplier))
        .collect();
    println!("{}: {}", label, parts.join(", "));
}

fn format_chain(chain: &EvolutionChain) -> String {
    let mut line = String::new();
    for (i, node) in chain.species.iter().enumerate() {
        if i > 0 {
            line.push_str(&format!(" --[{}]--> ", chain.links[i - 1]));
        }
        line.push_str(&node.name);
    }
    line
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config =
        BrowserConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let repo = config
        .open_repository()
        .context("failed to open species data")?;

    match cli.command {
        Command::Search { query, limit } => {
            let hits = repo.search(&query, limit.unwrap_or(config.search_limit));
            match config.format {
                OutputFormat::Json => print_json(&hits)?,
                OutputFormat::Text => {
                    if hits.is_empty() {
                        println!("No species match '{}'", query.trim());
                    }
                    for hit in &hits {
                        let marker = if hit.oras_available { "" } else { " [post-ORAS]" };
                        if hit.display_name == hit.name {
                            println!("#{:03} {}{}", hit.id, hit.name, marker);
                        } else {
                            println!("#{:03} {} ({}){}", hit.id, hit.display_name, hit.name, marker);
                        }
                    }
                }
            }
        }
        Command::Show { id } => {
            let detail = species_detail(&repo, id)
                .with_context(|| format!("cannot show species #{}", id))?;
            match config.format {
                OutputFormat::Json => print_json(&detail)?,
                OutputFormat::Text => print!("{}", detail),
            }
        }
        Command::Matchups { types } => {
            let result = resolve_codes(&types[..])?;
            match config.format {
                OutputFormat::Json => print_json(&result)?,
                OutputFormat::Text => {
                    if result.iter().next().is_none() {
                        println!("No weaknesses, resistances or immunities");
                    }
                    print_matchup_group("Weak to", &result.weaknesses);
                    print_matchup_group("Resists", &result.resistances);
                    print_matchup_group("Immune to", &result.immunities);
                }
            }
        }
        Command::Chains { id } => {
            let detail = species_detail(&repo, id)
                .with_context(|| format!("cannot build chains for species #{}", id))?;
            match config.format {
                OutputFormat::Json => print_json(&detail.evolution.chains)?,
                OutputFormat::Text => {
                    for chain in &detail.evolution.chains {
                        println!("{}", format_chain(chain));
                    }
                }
            }
        }
    }

    Ok(())
}
