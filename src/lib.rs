//! Pokedex Browser
//!
//! Species search, detail views, type matchups and evolution chains over a
//! dataset compiled into the binary at build time.

// --- MODULE DECLARATIONS ---
pub mod config;
pub mod detail;
pub mod errors;
pub mod evolution;
pub mod logging;
pub mod repository;
pub mod search;
pub mod server;
pub mod text;
pub mod type_matchups;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    Ability,
    BaseStats,
    Dataset,
    EvolutionEdge,
    EvolutionLineage,
    EvolutionMethod,
    EvolutionNode,
    LevelMove,
    MoveCategory,
    MoveData,
    PokemonType,
    SpeciesRecord,
};

// --- From this crate's modules (`src/`) ---

// Data access.
pub use repository::{DataRepository, SearchHit, DEFAULT_SEARCH_LIMIT};

// Derived views.
pub use detail::{species_detail, SpeciesDetail};
pub use evolution::{build_chains, EvolutionChain, EvolutionDisplay};
pub use type_matchups::{resolve, resolve_codes, TypeMatchup, TypeMatchupResult};

pub use config::{BrowserConfig, OutputFormat};
pub use search::SearchSession;
pub use server::PokedexServer;

// Crate-specific error and result types.
pub use errors::{
    ConfigError, DataError, DataResult, DetailError, DetailResult, MatchupError, MatchupResult,
};
