//! Resolution of selected type pairs to concrete creatures.

use crate::catalog::{Catalog, Creature};
use crate::error::TeamError;
use crate::types::{StatWeights, TypePair};
use rand::Rng;

/// Resolve each selected pair to the creature bearing exactly that pair
/// with the highest weighted stat sum; ties go to catalog order.
pub fn assemble_team<'a>(
    catalog: &'a Catalog,
    team_types: &[TypePair],
    weights: &StatWeights,
) -> Result<Vec<&'a Creature>, TeamError> {
    team_types
        .iter()
        .map(|&pair| best_of_pair(catalog, pair, weights))
        .collect()
}

fn best_of_pair<'a>(
    catalog: &'a Catalog,
    pair: TypePair,
    weights: &StatWeights,
) -> Result<&'a Creature, TeamError> {
    let mut best: Option<(&Creature, f64)> = None;
    for creature in catalog.creatures() {
        if creature.types != pair {
            continue;
        }
        let score = weights.score(creature.stats);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((creature, score));
        }
    }
    best.map(|(creature, _)| creature)
        .ok_or(TeamError::NoCandidate(pair))
}

/// The unoptimized path: `size` independent uniform draws from the
/// catalog. Draws may coincidentally repeat; no dedup is performed.
pub fn random_team<'a, R: Rng>(
    catalog: &'a Catalog,
    size: usize,
    rng: &mut R,
) -> Result<Vec<&'a Creature>, TeamError> {
    if size < 1 {
        return Err(TeamError::InvalidSize(size));
    }
    if catalog.is_empty() {
        return Err(TeamError::EmptyCatalog);
    }

    let creatures = catalog.creatures();
    Ok((0..size)
        .map(|_| &creatures[rng.random_range(0..creatures.len())])
        .collect())
}
