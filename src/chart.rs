//! Weakness chart: per-type-pair deviation from neutral effectiveness.

use crate::catalog::Catalog;
use crate::error::TeamError;
use crate::types::{Type, TypePair};
use std::collections::HashSet;

/// Matrix of deviation values, one row per distinct type pair in the
/// catalog, one column per attacking type.
///
/// A cell holds the raw effectiveness multiplier minus 1: negative means
/// the pair resists that attacking type, positive means it is vulnerable.
/// The row set is fixed at construction; the greedy loop clones the chart
/// and mutates only the cells of its working copy.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaknessChart {
    columns: Vec<Type>,
    pairs: Vec<TypePair>,
    cells: Vec<Vec<f64>>,
}

impl WeaknessChart {
    /// Build the chart from a catalog.
    ///
    /// Pairs are deduplicated in first-occurrence order; creatures sharing
    /// a pair are assumed to share a multiplier vector, so the first
    /// bearer serves as the representative.
    pub fn build(catalog: &Catalog) -> Result<Self, TeamError> {
        if catalog.is_empty() {
            return Err(TeamError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        let mut cells = Vec::new();
        for creature in catalog.creatures() {
            if seen.insert(creature.types) {
                pairs.push(creature.types);
                cells.push(creature.weaknesses.iter().map(|mult| mult - 1.0).collect());
            }
        }

        Ok(Self {
            columns: catalog.columns().to_vec(),
            pairs,
            cells,
        })
    }

    pub fn columns(&self) -> &[Type] {
        &self.columns
    }

    pub fn pairs(&self) -> &[TypePair] {
        &self.pairs
    }

    pub fn n_rows(&self) -> usize {
        self.pairs.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row]
    }

    /// Row-wise sum of deviation values; the selector's score (lower is
    /// better).
    pub fn total_weakness(&self, row: usize) -> f64 {
        self.cells[row].iter().sum()
    }

    /// Elementwise addition of a delta matrix with the chart's shape.
    pub(crate) fn apply_delta(&mut self, delta: &[Vec<f64>]) {
        for (row, delta_row) in self.cells.iter_mut().zip(delta) {
            for (cell, delta_cell) in row.iter_mut().zip(delta_row) {
                *cell += delta_cell;
            }
        }
    }
}
