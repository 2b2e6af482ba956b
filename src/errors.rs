use schema::PokemonType;
use std::path::PathBuf;
use thiserror::Error;

/// Caller supplied a type set the resolver cannot work with.
///
/// These are contract violations: the detail view cannot be built and the
/// request fails with this diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchupError {
    /// A species always has at least one type
    #[error("no defending types given")]
    NoTypes,
    #[error("a species has at most two types, got {0}")]
    TooManyTypes(usize),
    #[error("type {0} listed more than once")]
    DuplicateType(PokemonType),
    #[error("unknown type code: {0:?}")]
    UnknownType(String),
}

/// Errors raised while loading or querying the dataset
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data in {}: {source}", .path.display())]
    Ron {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to decode dataset: {0}")]
    Postcard(#[from] postcard::Error),
    #[error("bundled dataset is unusable: {0}")]
    Bundled(String),
    #[error("species {0} appears more than once in the dataset")]
    DuplicateSpecies(u32),
    #[error("species not found: {0}")]
    SpeciesNotFound(u32),
}

/// Errors raised while assembling a species detail view
#[derive(Debug, Error)]
pub enum DetailError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("type matchups for species {species_id}: {source}")]
    Matchup {
        species_id: u32,
        #[source]
        source: MatchupError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using DetailError
pub type DetailResult<T> = Result<T, DetailError>;

/// Type alias for Results using MatchupError
pub type MatchupResult<T> = Result<T, MatchupError>;
