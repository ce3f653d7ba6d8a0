//! Candidate catalog: creature records, CSV ingestion and filtering.

use crate::types::{BaseStats, Type, TypePair};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::{collections::HashMap, fs::File, io::Read, path::Path, str::FromStr};

/// One candidate creature from the catalog.
///
/// `weaknesses` holds the raw effectiveness multipliers taken by this
/// creature, one per attacking type in the owning catalog's column
/// universe, in column order.
#[derive(Debug, Clone, Serialize)]
pub struct Creature {
    pub no: u32,
    pub name: String,
    pub types: TypePair,
    pub stats: BaseStats,
    pub weaknesses: Vec<f64>,
    pub stage: u8,
    pub is_final: bool,
    pub is_legendary: bool,
    pub is_mythical: bool,
}

/// The candidate catalog plus its attacking-type column universe.
///
/// The universe is fixed when the catalog is built (from the CSV header)
/// and shared by every creature's multiplier vector; the optimization core
/// never recomputes it.
#[derive(Debug, Clone)]
pub struct Catalog {
    columns: Vec<Type>,
    creatures: Vec<Creature>,
}

impl Catalog {
    pub fn new(columns: Vec<Type>, creatures: Vec<Creature>) -> Self {
        Self { columns, creatures }
    }

    /// Load a catalog from a CSV file.
    ///
    /// The header must carry the fixed record columns (`no`, `name`,
    /// `type_1`, `type_2`, the six stats and the stage/flag columns) plus
    /// one `against_<type>` column per attacking type; the attacking-type
    /// universe is taken from those columns in header order.
    pub fn from_csv<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader.headers().context("failed to read CSV header")?;
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), idx))
            .collect();

        // Attacking-type universe: every against_* column, in header order.
        let mut columns = Vec::new();
        let mut column_idxs = Vec::new();
        for (idx, name) in headers.iter().enumerate() {
            if let Some(suffix) = name.strip_prefix("against_") {
                let ty: Type = suffix
                    .parse()
                    .with_context(|| format!("invalid column name {name:?}"))?;
                columns.push(ty);
                column_idxs.push(idx);
            }
        }
        if columns.is_empty() {
            bail!("CSV header has no against_* columns");
        }

        let mut creatures = Vec::new();
        for (i_rec, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("failed to read CSV record {i_rec}"))?;
            let creature = parse_record(&record, &index, &column_idxs)
                .with_context(|| format!("invalid CSV record {i_rec}"))?;
            creatures.push(creature);
        }

        Ok(Self { columns, creatures })
    }

    pub fn columns(&self) -> &[Type] {
        &self.columns
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// A new catalog keeping only the creatures matching `filter`.
    pub fn filtered(&self, filter: &Filter) -> Self {
        let creatures = self
            .creatures
            .iter()
            .filter(|creature| filter.matches(creature))
            .cloned()
            .collect();
        Self {
            columns: self.columns.clone(),
            creatures,
        }
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str> {
    let &idx = index
        .get(name)
        .with_context(|| format!("missing column {name:?}"))?;
    record
        .get(idx)
        .with_context(|| format!("missing field {name:?}"))
}

fn num<T: FromStr>(
    record: &csv::StringRecord,
    index: &HashMap<String, usize>,
    name: &str,
) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = field(record, index, name)?;
    raw.parse()
        .with_context(|| format!("invalid number {raw:?} in column {name:?}"))
}

fn flag(record: &csv::StringRecord, index: &HashMap<String, usize>, name: &str) -> Result<bool> {
    let raw = field(record, index, name)?;
    match raw {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => bail!("invalid flag {raw:?} in column {name:?}"),
    }
}

fn parse_record(
    record: &csv::StringRecord,
    index: &HashMap<String, usize>,
    column_idxs: &[usize],
) -> Result<Creature> {
    let primary: Type = field(record, index, "type_1")?.parse()?;
    let secondary = match field(record, index, "type_2")? {
        "" => None,
        raw => Some(raw.parse::<Type>()?),
    };

    let stats = BaseStats {
        hp: num(record, index, "hp")?,
        attack: num(record, index, "attack")?,
        defense: num(record, index, "defense")?,
        sp_attack: num(record, index, "sp_attack")?,
        sp_defense: num(record, index, "sp_defense")?,
        speed: num(record, index, "speed")?,
    };

    let mut weaknesses = Vec::with_capacity(column_idxs.len());
    for &idx in column_idxs {
        let raw = record.get(idx).context("missing against_* field")?;
        let mult: f64 = raw
            .parse()
            .with_context(|| format!("invalid multiplier {raw:?}"))?;
        weaknesses.push(mult);
    }

    Ok(Creature {
        no: num(record, index, "no")?,
        name: field(record, index, "name")?.to_string(),
        types: TypePair::new(primary, secondary),
        stats,
        weaknesses,
        stage: num(record, index, "stage")?,
        is_final: flag(record, index, "is_final")?,
        is_legendary: flag(record, index, "is_legendary")?,
        is_mythical: flag(record, index, "is_mythical")?,
    })
}

/// Boolean-AND row filter applied to the catalog before chart construction.
///
/// Stat thresholds are strict: a creature passes only if every stat is
/// greater than the corresponding minimum.
#[derive(Debug, Clone)]
pub struct Filter {
    pub min_stats: BaseStats,
    pub stage: Option<u8>,
    pub only_final: bool,
    pub allow_legendary: bool,
    pub allow_mythical: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            min_stats: BaseStats::zero(),
            stage: None,
            only_final: false,
            allow_legendary: true,
            allow_mythical: true,
        }
    }
}

impl Filter {
    pub fn matches(&self, creature: &Creature) -> bool {
        let stats = creature.stats.as_array();
        let mins = self.min_stats.as_array();
        if stats.iter().zip(mins.iter()).any(|(stat, min)| stat <= min) {
            return false;
        }

        if let Some(stage) = self.stage
            && creature.stage != stage
        {
            return false;
        }
        if self.only_final && !creature.is_final {
            return false;
        }
        if !self.allow_legendary && creature.is_legendary {
            return false;
        }
        if !self.allow_mythical && creature.is_mythical {
            return false;
        }

        true
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a synthetic catalog from (pair, raw multipliers) rows with
    /// placeholder stats, for chart and selector tests.
    pub(crate) fn catalog_of(columns: Vec<Type>, rows: &[(TypePair, Vec<f64>)]) -> Catalog {
        let creatures = rows
            .iter()
            .enumerate()
            .map(|(i_row, (pair, weaknesses))| Creature {
                no: i_row as u32 + 1,
                name: format!("candidate-{i_row}"),
                types: *pair,
                stats: BaseStats {
                    hp: 50.0,
                    attack: 50.0,
                    defense: 50.0,
                    sp_attack: 50.0,
                    sp_defense: 50.0,
                    speed: 50.0,
                },
                weaknesses: weaknesses.clone(),
                stage: 1,
                is_final: false,
                is_legendary: false,
                is_mythical: false,
            })
            .collect();
        Catalog::new(columns, creatures)
    }
}
