//! Greedy type-pair selection with adaptive re-scoring.

use crate::catalog::Catalog;
use crate::chart::WeaknessChart;
use crate::error::TeamError;
use crate::types::TypePair;

/// Select `size` type pairs with the strongest combined defensive profile.
///
/// Builds the weakness chart, then repeatedly picks the row with the
/// lowest total weakness and re-scores the working chart around the pick.
/// The loop runs exactly `size` iterations; rows may repeat when the
/// catalog has fewer distinct pairs than slots.
pub fn select_team_types(catalog: &Catalog, size: usize) -> Result<Vec<TypePair>, TeamError> {
    if size < 1 {
        return Err(TeamError::InvalidSize(size));
    }

    let base = WeaknessChart::build(catalog)?;
    let mut working = base.clone();

    let mut team_types = Vec::with_capacity(size);
    for i_pick in 0..size {
        let best = best_row(&working);
        let pair = base.pairs()[best];
        log::debug!(
            "pick {i_pick}: {pair} (total weakness {:.2})",
            working.total_weakness(best)
        );
        team_types.push(pair);

        update_chart(&base, &mut working, best);
    }

    Ok(team_types)
}

/// Row with the minimum total weakness; ties go to the lowest row index.
fn best_row(chart: &WeaknessChart) -> usize {
    let mut best = 0;
    let mut best_score = chart.total_weakness(0);
    for row in 1..chart.n_rows() {
        let score = chart.total_weakness(row);
        if score < best_score {
            best = row;
            best_score = score;
        }
    }
    best
}

/// Re-score the working chart after picking `picked`.
///
/// All lookups use the immutable base chart; only the working chart's
/// cells change, by elementwise addition of a delta matrix.
///
/// Step A penalizes the picked row's strongest original resistances (+2),
/// skipping columns matching the pair's own types, so re-picking the same
/// pair for coverage it already contributed scores worse. Step B rewards
/// (-1) every row that resists one of the picked row's worst attacking
/// types, unless that row's own types include one of those exposed types.
pub(crate) fn update_chart(base: &WeaknessChart, working: &mut WeaknessChart, picked: usize) {
    if base.n_cols() == 0 {
        return;
    }

    let mut delta = vec![vec![0.0; base.n_cols()]; base.n_rows()];
    let pair = base.pairs()[picked];
    let picked_row = base.row(picked);

    // Step A: suppress the picked row's strongest resistances.
    let min = picked_row.iter().copied().fold(f64::INFINITY, f64::min);
    for (col, (&ty, &val)) in base.columns().iter().zip(picked_row).enumerate() {
        if val == min && !pair.contains(ty) {
            delta[picked][col] += 2.0;
        }
    }

    // Step B: reward rows that patch the picked row's worst weaknesses.
    let max = picked_row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exposed: Vec<usize> = (0..base.n_cols())
        .filter(|&col| picked_row[col] == max)
        .collect();

    for row in 0..base.n_rows() {
        let row_pair = base.pairs()[row];
        if exposed
            .iter()
            .any(|&col| row_pair.contains(base.columns()[col]))
        {
            continue;
        }
        for &col in &exposed {
            if base.cell(row, col) < 0.0 {
                delta[row][col] -= 1.0;
            }
        }
    }

    working.apply_delta(&delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::catalog_of;
    use crate::types::Type;

    fn fire_water_grass() -> Catalog {
        // Two-column attacking universe; deviations (after the -1 shift)
        // are fire [+1, -1], water [-1, +1], grass [0, 0].
        catalog_of(
            vec![Type::Fire, Type::Water],
            &[
                (TypePair::single(Type::Fire), vec![2.0, 0.0]),
                (TypePair::single(Type::Water), vec![0.0, 2.0]),
                (TypePair::single(Type::Grass), vec![1.0, 1.0]),
            ],
        )
    }

    #[test]
    fn size_below_one_is_rejected_before_chart_work() {
        // An empty catalog would also fail, but the size check comes first.
        let catalog = catalog_of(vec![Type::Fire], &[]);
        assert_eq!(
            select_team_types(&catalog, 0).unwrap_err(),
            TeamError::InvalidSize(0)
        );
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let catalog = catalog_of(vec![Type::Fire], &[]);
        assert_eq!(
            select_team_types(&catalog, 3).unwrap_err(),
            TeamError::EmptyCatalog
        );
    }

    #[test]
    fn returns_exactly_size_pairs_from_the_row_index() {
        let catalog = fire_water_grass();
        let chart = WeaknessChart::build(&catalog).unwrap();
        for size in 1..=3 {
            let team = select_team_types(&catalog, size).unwrap();
            assert_eq!(team.len(), size);
            assert!(team.iter().all(|pair| chart.pairs().contains(pair)));
        }
    }

    #[test]
    fn selection_is_deterministic() {
        let catalog = fire_water_grass();
        let a = select_team_types(&catalog, 6).unwrap();
        let b = select_team_types(&catalog, 6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_row_chart_repeats_the_row() {
        let catalog = catalog_of(
            vec![Type::Fire, Type::Water],
            &[(TypePair::single(Type::Rock), vec![0.5, 2.0])],
        );
        let team = select_team_types(&catalog, 3).unwrap();
        assert_eq!(team, vec![TypePair::single(Type::Rock); 3]);
    }

    #[test]
    fn three_way_tie_breaks_by_row_index() {
        // All rows start with total weakness 0; the first row wins, then
        // the updater rewards the row patching its exposed weakness.
        let catalog = fire_water_grass();
        let team = select_team_types(&catalog, 2).unwrap();
        assert_eq!(
            team,
            [TypePair::single(Type::Fire), TypePair::single(Type::Water)]
        );
    }

    #[test]
    fn scenario_update_cells_after_two_picks() {
        let catalog = fire_water_grass();
        let base = WeaknessChart::build(&catalog).unwrap();
        let mut working = base.clone();

        // Pick fire (row 0). Step A: its strongest resistance is the water
        // column (not an own type), so [fire, water] gains +2. Step B: its
        // worst column is fire, which the water row resists, so
        // [water, fire] drops by 1.
        update_chart(&base, &mut working, 0);
        assert_eq!(working.row(0), [1.0, 1.0]);
        assert_eq!(working.row(1), [-2.0, 1.0]);
        assert_eq!(working.row(2), [0.0, 0.0]);

        // Water is now the best row. Picking it mirrors the adjustment.
        assert_eq!(working.total_weakness(1), -1.0);
        update_chart(&base, &mut working, 1);
        assert_eq!(working.row(0), [1.0, 0.0]);
        assert_eq!(working.row(1), [0.0, 1.0]);
        assert_eq!(working.row(2), [0.0, 0.0]);

        // Re-picking grass stays possible; the greedy order continues from
        // the updated totals (fire 1, water 1, grass 0).
        let team = select_team_types(&catalog, 3).unwrap();
        assert_eq!(team[2], TypePair::single(Type::Grass));
    }

    #[test]
    fn step_a_skips_own_type_columns() {
        // The ground row's strongest resistances sit on its own ground
        // column and on the water column; only the water cell moves.
        let catalog = catalog_of(
            vec![Type::Ground, Type::Water, Type::Fire],
            &[(TypePair::single(Type::Ground), vec![0.5, 0.5, 2.0])],
        );
        let base = WeaknessChart::build(&catalog).unwrap();
        let mut working = base.clone();

        update_chart(&base, &mut working, 0);
        assert_eq!(base.row(0), [-0.5, -0.5, 1.0]);
        assert_eq!(working.row(0), [-0.5, 1.5, 1.0]);
    }

    #[test]
    fn step_a_uses_base_values_on_repeated_picks() {
        // Updates accumulate against the original deviations, so picking
        // the same row twice applies the same +2 twice.
        let catalog = catalog_of(
            vec![Type::Fire, Type::Water],
            &[(TypePair::single(Type::Grass), vec![2.0, 0.5])],
        );
        let base = WeaknessChart::build(&catalog).unwrap();
        let mut working = base.clone();

        update_chart(&base, &mut working, 0);
        update_chart(&base, &mut working, 0);
        // Water cell: -0.5 base plus +2 per pick. The fire cell is the
        // row's maximum but not resisted by anyone, so it never moves.
        assert_eq!(working.row(0), [1.0, 3.5]);
    }

    #[test]
    fn step_b_rewards_patching_rows_only() {
        let fire = TypePair::single(Type::Fire);
        let steel = TypePair::single(Type::Steel);
        let water = TypePair::single(Type::Water);
        // Fire's worst column is water. Steel resists water and is not a
        // water type, so it gets the reward; the water row also resists
        // the water column but is excluded by its own type.
        let catalog = catalog_of(
            vec![Type::Fire, Type::Water, Type::Grass],
            &[
                (fire, vec![0.5, 2.0, 0.5]),
                (steel, vec![2.0, 0.5, 1.0]),
                (water, vec![0.5, 0.5, 2.0]),
            ],
        );
        let base = WeaknessChart::build(&catalog).unwrap();
        let mut working = base.clone();
        let steel_before = working.total_weakness(1);
        let water_before = working.total_weakness(2);

        update_chart(&base, &mut working, 0);
        assert_eq!(working.total_weakness(1), steel_before - 1.0);
        assert_eq!(working.cell(1, 1), -1.5);
        assert_eq!(working.total_weakness(2), water_before);
    }

    #[test]
    fn zero_column_chart_degenerates_to_no_op() {
        let catalog = catalog_of(
            vec![],
            &[
                (TypePair::single(Type::Fire), vec![]),
                (TypePair::single(Type::Water), vec![]),
            ],
        );
        let team = select_team_types(&catalog, 2).unwrap();
        // Every total weakness is 0 forever; the first row wins each time.
        assert_eq!(team, vec![TypePair::single(Type::Fire); 2]);
    }
}
