use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn total(&self) -> u16 {
        self.hp as u16
            + self.attack as u16
            + self.defense as u16
            + self.sp_attack as u16
            + self.sp_defense as u16
            + self.speed as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A move as shown on a species page. Status moves usually have no power and
/// some never miss, so both are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub effect: String,
    /// Introduced after Omega Ruby / Alpha Sapphire (generation 7+)
    #[serde(default)]
    pub post_oras: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelMove {
    pub level: u8,
    pub move_data: MoveData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: u16,
    pub name: String,
    pub description: String,
    pub hidden: bool,
    #[serde(default)]
    pub post_oras: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: u32,
    pub identifier: String,   // slug, e.g. "charizard-mega-x"
    pub name: String,         // localized base species name
    pub display_name: String, // localized form name, same as `name` for default forms
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub abilities: Vec<Ability>,
    pub level_moves: Vec<LevelMove>,
    pub egg_moves: Vec<MoveData>,
    pub lineage: Option<u32>,
    /// Species or form that does not exist in Omega Ruby / Alpha Sapphire
    #[serde(default)]
    pub post_oras: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionMethod {
    Level(u8),
    UseItem(String),
    HeldItem(String),
    Friendship(u8),
    KnownMove(String),
    KnownMoveType(PokemonType),
    Location(String),
    TimeOfDay(String),
    Trade,
    MegaEvolution,
    Gigantamax,
    FormChange,
    Other(String),
}

impl fmt::Display for EvolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvolutionMethod::Level(level) => write!(f, "Lv. {}", level),
            EvolutionMethod::UseItem(item) => write!(f, "Use {}", item),
            EvolutionMethod::HeldItem(item) => write!(f, "Trade holding {}", item),
            EvolutionMethod::Friendship(min) => write!(f, "Friendship {}+", min),
            EvolutionMethod::KnownMove(move_name) => write!(f, "Knows {}", move_name),
            EvolutionMethod::KnownMoveType(move_type) => {
                write!(f, "Knows a {}-type move", move_type)
            }
            EvolutionMethod::Location(place) => write!(f, "Level up at {}", place),
            EvolutionMethod::TimeOfDay(time) => write!(f, "Level up during {}", time),
            EvolutionMethod::Trade => write!(f, "Trade"),
            EvolutionMethod::MegaEvolution => write!(f, "Mega Evolution"),
            EvolutionMethod::Gigantamax => write!(f, "Gigantamax"),
            EvolutionMethod::FormChange => write!(f, "Form change"),
            EvolutionMethod::Other(text) if text.trim().is_empty() => write!(f, "Evolve"),
            EvolutionMethod::Other(text) => write!(f, "{}", text),
        }
    }
}

/// One member of a lineage. Alternate forms (mega, gigantamax, regional)
/// are members too, flagged with `is_special`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub species_id: u32,
    pub name: String,
    pub depth: u8,
    pub is_special: bool,
    pub sort_order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionEdge {
    pub from: u32,
    pub to: u32,
    pub method: EvolutionMethod,
    pub sort_order: u32,
}

impl EvolutionEdge {
    /// Human-readable condition, e.g. "Lv. 16" or "Trade"
    pub fn condition(&self) -> String {
        self.method.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionLineage {
    pub id: u32,
    pub nodes: Vec<EvolutionNode>,
    pub edges: Vec<EvolutionEdge>,
}

/// Everything the browser knows, as bundled by the build script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub species: Vec<SpeciesRecord>,
    pub lineages: Vec<EvolutionLineage>,
}
