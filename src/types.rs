//! Elemental types, type pairs and stat-related value types.

use crate::error::TeamError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed elemental categories.
///
/// The same enumeration classifies defenders (as part of a [`TypePair`])
/// and indexes attacking moves (as a column of the weakness chart).
/// Pair canonicalization uses the declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl Type {
    /// All elemental categories, in declaration order.
    pub const ALL: [Type; 18] = [
        Type::Normal,
        Type::Fire,
        Type::Water,
        Type::Electric,
        Type::Grass,
        Type::Ice,
        Type::Fighting,
        Type::Poison,
        Type::Ground,
        Type::Flying,
        Type::Psychic,
        Type::Bug,
        Type::Rock,
        Type::Ghost,
        Type::Dragon,
        Type::Dark,
        Type::Steel,
        Type::Fairy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Type::Normal => "normal",
            Type::Fire => "fire",
            Type::Water => "water",
            Type::Electric => "electric",
            Type::Grass => "grass",
            Type::Ice => "ice",
            Type::Fighting => "fighting",
            Type::Poison => "poison",
            Type::Ground => "ground",
            Type::Flying => "flying",
            Type::Psychic => "psychic",
            Type::Bug => "bug",
            Type::Rock => "rock",
            Type::Ghost => "ghost",
            Type::Dragon => "dragon",
            Type::Dark => "dark",
            Type::Steel => "steel",
            Type::Fairy => "fairy",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Type {
    type Err = TeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Type::ALL
            .into_iter()
            .find(|ty| ty.name() == lower)
            .ok_or_else(|| TeamError::UnknownType(s.to_string()))
    }
}

/// A defender's elemental classification: one or two types.
///
/// Canonicalized on construction so that the same unordered pair always
/// compares and hashes equal: a secondary type equal to the primary
/// collapses to a single type, and `primary <= secondary` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypePair {
    primary: Type,
    secondary: Option<Type>,
}

impl TypePair {
    pub fn new(first: Type, second: Option<Type>) -> Self {
        match second {
            Some(s) if s == first => Self {
                primary: first,
                secondary: None,
            },
            Some(s) if s < first => Self {
                primary: s,
                secondary: Some(first),
            },
            _ => Self {
                primary: first,
                secondary: second,
            },
        }
    }

    pub fn single(ty: Type) -> Self {
        Self::new(ty, None)
    }

    pub fn primary(self) -> Type {
        self.primary
    }

    pub fn secondary(self) -> Option<Type> {
        self.secondary
    }

    /// Whether `ty` is one of the pair's own types.
    pub fn contains(self, ty: Type) -> bool {
        self.primary == ty || self.secondary == Some(ty)
    }
}

impl fmt::Display for TypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary {
            Some(sec) => write!(f, "{}/{}", self.primary, sec),
            None => write!(f, "{}", self.primary),
        }
    }
}

pub const N_STATS: usize = 6;

/// The six base stats of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub sp_attack: f64,
    pub sp_defense: f64,
    pub speed: f64,
}

impl BaseStats {
    pub fn zero() -> Self {
        Self {
            hp: 0.0,
            attack: 0.0,
            defense: 0.0,
            sp_attack: 0.0,
            sp_defense: 0.0,
            speed: 0.0,
        }
    }

    pub fn as_array(self) -> [f64; N_STATS] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }

    pub fn total(self) -> f64 {
        self.as_array().iter().sum()
    }
}

/// Per-stat weights for the assembler's scoring function.
#[derive(Debug, Clone, PartialEq)]
pub struct StatWeights(pub [f64; N_STATS]);

impl StatWeights {
    /// Weighted sum of the six base stats.
    pub fn score(&self, stats: BaseStats) -> f64 {
        stats
            .as_array()
            .iter()
            .zip(self.0.iter())
            .map(|(stat, weight)| stat * weight)
            .sum()
    }
}

impl Default for StatWeights {
    fn default() -> Self {
        Self([1.0; N_STATS])
    }
}

impl FromStr for StatWeights {
    type Err = TeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vals: Vec<f64> = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| TeamError::InvalidWeights(s.to_string()))?;

        let weights: [f64; N_STATS] = vals
            .try_into()
            .map_err(|_| TeamError::InvalidWeights(s.to_string()))?;

        if weights.iter().any(|w| !w.is_finite()) {
            return Err(TeamError::InvalidWeights(s.to_string()));
        }

        Ok(Self(weights))
    }
}
