// Bundles the RON dataset under data/ into a postcard blob in OUT_DIR, so the
// browser ships with its data and never parses RON at startup.

use schema::{Dataset, EvolutionLineage, SpeciesRecord};
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = Path::new("data");
    println!("cargo:rerun-if-changed=data");

    let mut species: Vec<SpeciesRecord> = load_ron_dir(&data_dir.join("species"))?;
    let mut lineages: Vec<EvolutionLineage> = load_ron_dir(&data_dir.join("lineages"))?;

    species.sort_by_key(|s| s.id);
    lineages.sort_by_key(|l| l.id);

    let dataset = Dataset { species, lineages };
    let bytes = postcard::to_allocvec(&dataset)?;

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    fs::write(out_dir.join("dataset.postcard"), bytes)?;

    Ok(())
}

fn load_ron_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, Box<dyn std::error::Error>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            println!("cargo:rerun-if-changed={}", path.display());
            paths.push(path);
        }
    }
    // read_dir order is platform dependent
    paths.sort();

    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path)?;
        let item: T = ron::from_str(&content)
            .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;
        items.push(item);
    }
    Ok(items)
}
