use crate::errors::{ConfigError, DataResult};
use crate::repository::{DataRepository, DEFAULT_SEARCH_LIMIT};
use serde::Deserialize;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "pokedex.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Directory of RON data files; the bundled dataset is used when unset
    pub data_dir: Option<PathBuf>,
    pub search_limit: usize,
    pub format: OutputFormat,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        BrowserConfig {
            data_dir: None,
            search_limit: DEFAULT_SEARCH_LIMIT,
            format: OutputFormat::Text,
        }
    }
}

impl BrowserConfig {
    pub fn parse(contents: &str, path: &Path) -> Result<BrowserConfig, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an explicitly named config file. A missing file is an error.
    pub fn from_file(path: &Path) -> Result<BrowserConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Use `path` if given, otherwise `pokedex.toml` in the working directory
    /// when it exists, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<BrowserConfig, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(BrowserConfig::default())
                }
            }
        }
    }

    pub fn open_repository(&self) -> DataResult<Cow<'static, DataRepository>> {
        match &self.data_dir {
            Some(dir) => DataRepository::load_dir(dir).map(Cow::Owned),
            None => DataRepository::bundled().map(Cow::Borrowed),
        }
    }
}
