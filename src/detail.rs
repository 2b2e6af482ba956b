//! Species detail view.
//!
//! Takes the raw species record from the repository, derives the type
//! matchups and the evolution chains, and shapes everything into the record
//! the presentation layer renders.

use crate::errors::{DetailError, DetailResult};
use crate::evolution::EvolutionDisplay;
use crate::repository::DataRepository;
use crate::text::describe_or_placeholder;
use crate::type_matchups::{self, TypeMatchupResult};
use schema::{BaseStats, EvolutionNode, MoveCategory, MoveData, PokemonType, SpeciesRecord};
use serde::Serialize;
use std::fmt;

const ARTWORK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatKey {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKey {
    pub const ALL: [StatKey; 6] = [
        StatKey::Hp,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::SpecialAttack,
        StatKey::SpecialDefense,
        StatKey::Speed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatKey::Hp => "HP",
            StatKey::Attack => "Attack",
            StatKey::Defense => "Defense",
            StatKey::SpecialAttack => "Sp. Atk",
            StatKey::SpecialDefense => "Sp. Def",
            StatKey::Speed => "Speed",
        }
    }

    fn value_in(self, stats: &BaseStats) -> u8 {
        match self {
            StatKey::Hp => stats.hp,
            StatKey::Attack => stats.attack,
            StatKey::Defense => stats.defense,
            StatKey::SpecialAttack => stats.sp_attack,
            StatKey::SpecialDefense => stats.sp_defense,
            StatKey::Speed => stats.speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub key: StatKey,
    pub label: &'static str,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityView {
    pub name: String,
    pub description: String,
    pub hidden: bool,
    pub post_oras: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveView {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    pub damage_class: MoveCategory,
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub effect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    pub post_oras: bool,
}

impl MoveView {
    fn new(move_data: &MoveData, level: Option<u8>) -> Self {
        MoveView {
            name: move_data.name.clone(),
            move_type: move_data.move_type,
            damage_class: move_data.category,
            power: move_data.power,
            accuracy: move_data.accuracy,
            pp: move_data.pp,
            effect: describe_or_placeholder(&move_data.effect),
            level,
            post_oras: move_data.post_oras,
        }
    }
}

/// The full detail record for one species
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesDetail {
    pub id: u32,
    pub identifier: String,
    pub name: String,
    pub display_name: String,
    /// False for species and forms first introduced after Omega Ruby / Alpha Sapphire
    pub oras_available: bool,
    pub image: String,
    pub types: Vec<PokemonType>,
    pub stats: Vec<StatEntry>,
    pub stat_total: u16,
    pub abilities: Vec<AbilityView>,
    pub type_matchups: TypeMatchupResult,
    pub level_moves: Vec<MoveView>,
    pub egg_moves: Vec<MoveView>,
    pub evolution: EvolutionDisplay,
}

pub fn artwork_url(species_id: u32) -> String {
    format!("{}/{}.png", ARTWORK_BASE, species_id)
}

/// Six stats in canonical order
pub fn ordered_stats(stats: &BaseStats) -> Vec<StatEntry> {
    StatKey::ALL
        .iter()
        .map(|&key| StatEntry {
            key,
            label: key.label(),
            value: key.value_in(stats),
        })
        .collect()
}

/// Look up a species and build its detail view.
pub fn species_detail(repo: &DataRepository, id: u32) -> DetailResult<SpeciesDetail> {
    let record = repo.species(id)?;
    build_detail(repo, record)
}

pub fn build_detail(repo: &DataRepository, record: &SpeciesRecord) -> DetailResult<SpeciesDetail> {
    let type_matchups =
        type_matchups::resolve(&record.types).map_err(|source| DetailError::Matchup {
            species_id: record.id,
            source,
        })?;

    let mut abilities: Vec<_> = record.abilities.iter().collect();
    abilities.sort_by_key(|a| (a.hidden, a.id));

    let mut level_moves: Vec<_> = record.level_moves.iter().collect();
    level_moves.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.move_data.name.cmp(&b.move_data.name))
    });

    let mut egg_moves: Vec<_> = record.egg_moves.iter().collect();
    egg_moves.sort_by(|a, b| a.name.cmp(&b.name));

    let evolution = match record.lineage.and_then(|lineage_id| repo.lineage(lineage_id)) {
        Some(lineage) => EvolutionDisplay::from_lineage(lineage),
        // A lone species still gets a row of its own
        None => EvolutionDisplay::from_parts(&[standalone_node(record)], &[]),
    };

    Ok(SpeciesDetail {
        id: record.id,
        identifier: record.identifier.clone(),
        name: record.name.clone(),
        display_name: record.display_name.clone(),
        oras_available: !record.post_oras,
        image: artwork_url(record.id),
        types: record.types.clone(),
        stats: ordered_stats(&record.base_stats),
        stat_total: record.base_stats.total(),
        abilities: abilities
            .into_iter()
            .map(|a| AbilityView {
                name: a.name.clone(),
                description: describe_or_placeholder(&a.description),
                hidden: a.hidden,
                post_oras: a.post_oras,
            })
            .collect(),
        type_matchups,
        level_moves: level_moves
            .into_iter()
            .map(|m| MoveView::new(&m.move_data, Some(m.level)))
            .collect(),
        egg_moves: egg_moves.into_iter().map(|m| MoveView::new(m, None)).collect(),
        evolution,
    })
}

fn standalone_node(record: &SpeciesRecord) -> EvolutionNode {
    EvolutionNode {
        species_id: record.id,
        name: record.display_name.clone(),
        depth: 0,
        is_special: false,
        sort_order: record.id,
    }
}

fn fmt_optional<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

const POST_ORAS_MARKER: &str = " [post-ORAS]";

fn post_oras_marker(post_oras: bool) -> &'static str {
    if post_oras {
        POST_ORAS_MARKER
    } else {
        ""
    }
}

fn write_move_table(f: &mut fmt::Formatter<'_>, moves: &[MoveView]) -> fmt::Result {
    for m in moves {
        let level = m.level.map(|l| format!("Lv.{:<3}", l)).unwrap_or_default();
        writeln!(
            f,
            "  {}{:<16} {:<9} {:<9} Pow {:>3}  Acc {:>3}  PP {:>2}{}",
            level,
            m.name,
            m.move_type,
            m.damage_class,
            fmt_optional(m.power),
            fmt_optional(m.accuracy),
            m.pp,
            post_oras_marker(m.post_oras)
        )?;
    }
    Ok(())
}

impl fmt::Display for SpeciesDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // --- 1. Name and number ---
        writeln!(f, "{} (#{:03})", self.display_name, self.id)?;
        if !self.oras_available {
            writeln!(f, "Not available in Omega Ruby / Alpha Sapphire")?;
        }
        writeln!(f, "--------------------")?;

        // --- 2. Types ---
        let type_names: Vec<String> = self.types.iter().map(|t| t.to_string()).collect();
        writeln!(f, "Type(s): {}", type_names.join(" / "))?;
        writeln!(f, "--------------------")?;

        // --- 3. Base Stats ---
        writeln!(f, "Base Stats:")?;
        const LABEL_WIDTH: usize = 12;
        for stat in &self.stats {
            writeln!(f, "{:<LABEL_WIDTH$} : {}", stat.label, stat.value)?;
        }
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "Total", self.stat_total)?;
        writeln!(f, "--------------------")?;

        // --- 4. Abilities ---
        writeln!(f, "Abilities:")?;
        for ability in &self.abilities {
            let marker = if ability.hidden { " (hidden)" } else { "" };
            writeln!(
                f,
                "  {}{}{}: {}",
                ability.name,
                marker,
                post_oras_marker(ability.post_oras),
                ability.description
            )?;
        }
        writeln!(f, "--------------------")?;

        // --- 5. Type matchups ---
        let matchups = &self.type_matchups;
        for (label, list) in [
            ("Weak to", &matchups.weaknesses),
            ("Resists", &matchups.resistances),
            ("Immune to", &matchups.immunities),
        ] {
            if list.is_empty() {
                continue;
            }
            let entries: Vec<String> = list
                .iter()
                .map(|m| format!("{} x{}", m.attack_type, m.multiplier))
                .collect();
            writeln!(f, "{}: {}", label, entries.join(", "))?;
        }
        writeln!(f, "--------------------")?;

        // --- 6. Moves ---
        writeln!(f, "Level-up moves:")?;
        write_move_table(f, &self.level_moves)?;
        if !self.egg_moves.is_empty() {
            writeln!(f, "Egg moves:")?;
            write_move_table(f, &self.egg_moves)?;
        }
        writeln!(f, "--------------------")?;

        // --- 7. Evolution ---
        write!(f, "Evolution:")?;
        for chain in &self.evolution.chains {
            write!(f, "\n  ")?;
            for (i, node) in chain.species.iter().enumerate() {
                if i > 0 {
                    write!(f, " --[{}]--> ", chain.links[i - 1])?;
                }
                write!(f, "{}", node.name)?;
            }
        }
        Ok(())
    }
}
