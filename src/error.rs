use crate::types::TypePair;
use thiserror::Error;

/// In-band errors of the team-building core.
///
/// I/O and parse failures at the ingestion boundary are reported as plain
/// `anyhow` errors with context instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TeamError {
    #[error("catalog contains no candidates")]
    EmptyCatalog,

    #[error("team size must be at least 1, but is {0}")]
    InvalidSize(usize),

    #[error("no candidate in the catalog has types {0}")]
    NoCandidate(TypePair),

    #[error("unknown elemental type {0:?}")]
    UnknownType(String),

    #[error("weights must be {n} comma-separated finite numbers, but are {0:?}", n = crate::types::N_STATS)]
    InvalidWeights(String),
}
