// Pokedex Browser Schema - Shared dataset definitions
// This crate contains the type chart and the dataset records that are shared
// between the main pokedex-browser crate and its build script, which bundles
// the RON data files into the binary with postcard.

// Re-export the main types
pub use pokemon_types::*;
pub use species_data::*;

pub mod pokemon_types;
pub mod species_data;
