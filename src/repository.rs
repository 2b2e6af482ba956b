//! In-memory species repository.
//!
//! The dataset is fixed: it is bundled into the binary at compile time by the
//! build script, or loaded once from a directory of RON files. Nothing mutates
//! it after loading, so lookups hand out plain references.

use crate::errors::{DataError, DataResult};
use schema::{Dataset, EvolutionLineage, SpeciesRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

pub const DEFAULT_SEARCH_LIMIT: usize = 40;

static BUNDLED_DATASET: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/dataset.postcard"));

// Decoded on first use; the error is kept as text so every caller can see it
static BUNDLED: LazyLock<Result<DataRepository, String>> = LazyLock::new(|| {
    postcard::from_bytes::<Dataset>(BUNDLED_DATASET)
        .map_err(DataError::from)
        .and_then(DataRepository::from_dataset)
        .map_err(|e| e.to_string())
});

/// Lightweight search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub identifier: String,
    pub oras_available: bool,
}

#[derive(Debug, Clone)]
pub struct DataRepository {
    species: Vec<SpeciesRecord>, // sorted by id
    by_id: HashMap<u32, usize>,
    lineages: HashMap<u32, EvolutionLineage>,
}

impl DataRepository {
    /// The dataset compiled into this binary.
    pub fn bundled() -> DataResult<&'static DataRepository> {
        BUNDLED
            .as_ref()
            .map_err(|message| DataError::Bundled(message.clone()))
    }

    /// Load `species/*.ron` and `lineages/*.ron` from a dataset directory.
    pub fn load_dir(data_path: &Path) -> DataResult<DataRepository> {
        if !data_path.exists() {
            return Err(DataError::MissingDirectory(data_path.to_path_buf()));
        }

        let species = load_ron_files(&data_path.join("species"))?;
        let lineages = load_ron_files(&data_path.join("lineages"))?;
        info!(
            path = %data_path.display(),
            species = species.len(),
            lineages = lineages.len(),
            "loaded dataset"
        );

        DataRepository::from_dataset(Dataset { species, lineages })
    }

    /// Index a dataset. Lineage members and edges are put in display order.
    pub fn from_dataset(dataset: Dataset) -> DataResult<DataRepository> {
        let mut species = dataset.species;
        species.sort_by_key(|s| s.id);

        let mut by_id = HashMap::with_capacity(species.len());
        for (i, record) in species.iter().enumerate() {
            if by_id.insert(record.id, i).is_some() {
                return Err(DataError::DuplicateSpecies(record.id));
            }
        }

        let lineages = dataset
            .lineages
            .into_iter()
            .map(|mut lineage| {
                order_lineage(&mut lineage);
                (lineage.id, lineage)
            })
            .collect();

        Ok(DataRepository {
            species,
            by_id,
            lineages,
        })
    }

    pub fn species(&self, id: u32) -> DataResult<&SpeciesRecord> {
        self.by_id
            .get(&id)
            .map(|&i| &self.species[i])
            .ok_or(DataError::SpeciesNotFound(id))
    }

    pub fn lineage(&self, id: u32) -> Option<&EvolutionLineage> {
        self.lineages.get(&id)
    }

    pub fn all_species(&self) -> &[SpeciesRecord] {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Case-insensitive prefix search over species and form names,
    /// ordered by name then id.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&SpeciesRecord> = self
            .species
            .iter()
            .filter(|s| {
                s.name.to_lowercase().starts_with(&query)
                    || s.display_name.to_lowercase().starts_with(&query)
            })
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        matches
            .into_iter()
            .take(limit)
            .map(|s| SearchHit {
                id: s.id,
                name: s.name.clone(),
                display_name: s.display_name.clone(),
                identifier: s.identifier.clone(),
                oras_available: !s.post_oras,
            })
            .collect()
    }
}

/// Members by depth, regular forms before special ones; edges by sort order.
fn order_lineage(lineage: &mut EvolutionLineage) {
    lineage
        .nodes
        .sort_by_key(|n| (n.depth, n.is_special, n.sort_order, n.species_id));
    lineage
        .edges
        .sort_by_key(|e| (e.sort_order, e.from, e.to));
}

fn load_ron_files<T: DeserializeOwned>(dir: &Path) -> DataResult<Vec<T>> {
    if !dir.exists() {
        return Err(DataError::MissingDirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| DataError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DataError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path).map_err(|source| DataError::Io {
            path: path.clone(),
            source,
        })?;
        let item = ron::from_str(&content).map_err(|source| DataError::Ron {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "parsed data file");
        items.push(item);
    }
    Ok(items)
}
