//! Defensive type matchups for a species.
//!
//! Combines the type chart across every attacking type and sorts the result
//! into weaknesses, resistances and immunities. Neutral matchups are dropped.

use crate::errors::{MatchupError, MatchupResult};
use schema::PokemonType;
use serde::Serialize;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// A species has one or two types
const MAX_DEFENDING_TYPES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeMatchup {
    pub attack_type: PokemonType,
    pub multiplier: f32,
}

/// The three lists are disjoint and each follows canonical type order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeMatchupResult {
    pub weaknesses: Vec<TypeMatchup>,
    pub resistances: Vec<TypeMatchup>,
    pub immunities: Vec<TypeMatchup>,
}

impl TypeMatchupResult {
    /// Every non-neutral matchup, weaknesses first.
    pub fn iter(&self) -> impl Iterator<Item = &TypeMatchup> {
        self.weaknesses
            .iter()
            .chain(self.resistances.iter())
            .chain(self.immunities.iter())
    }
}

/// Combined multiplier of one attacking type against a full defending type set.
pub fn combined_multiplier(attacking: PokemonType, defending: &[PokemonType]) -> f32 {
    defending
        .iter()
        .map(|&t| PokemonType::type_effectiveness(attacking, t))
        .product()
}

/// Resolve the matchups for a defending type set of one or two distinct types.
pub fn resolve(defense_types: &[PokemonType]) -> MatchupResult<TypeMatchupResult> {
    validate_defense_types(defense_types)?;

    let mut result = TypeMatchupResult::default();
    for attack_type in PokemonType::iter() {
        let multiplier = combined_multiplier(attack_type, defense_types);
        let matchup = TypeMatchup {
            attack_type,
            multiplier,
        };

        if multiplier == 0.0 {
            result.immunities.push(matchup);
        } else if multiplier < 1.0 {
            result.resistances.push(matchup);
        } else if multiplier > 1.0 {
            result.weaknesses.push(matchup);
        }
    }

    Ok(result)
}

/// Parse type codes such as `"water"` and resolve them.
pub fn resolve_codes<S: AsRef<str>>(codes: &[S]) -> MatchupResult<TypeMatchupResult> {
    let types = codes
        .iter()
        .map(|code| {
            let code = code.as_ref().trim();
            PokemonType::from_str(code).map_err(|_| MatchupError::UnknownType(code.to_string()))
        })
        .collect::<MatchupResult<Vec<_>>>()?;
    resolve(&types)
}

fn validate_defense_types(defense_types: &[PokemonType]) -> MatchupResult<()> {
    if defense_types.is_empty() {
        return Err(MatchupError::NoTypes);
    }
    if defense_types.len() > MAX_DEFENDING_TYPES {
        return Err(MatchupError::TooManyTypes(defense_types.len()));
    }
    for (i, t) in defense_types.iter().enumerate() {
        if defense_types[..i].contains(t) {
            return Err(MatchupError::DuplicateType(*t));
        }
    }
    Ok(())
}
