//! ft_algo — pure Fuzzy TOPSIS stages.
//!
//! Each stage consumes the complete output of its predecessor and produces a
//! new, read-only table:
//!
//! ```text
//! RatingTable ─fuzzify→ FuzzyRatingTable ─aggregate→ AggregatedTable
//!   ─normalize→ NormalizedTable ─extract_ideals→ Ideals
//!   ─compute_closeness→ Series<AlternativeId, Closeness> ─rank→ Ranking
//! ```
//!
//! No I/O, no logging, no global state. Axis order is whatever the input
//! tables carry; callers fix it once at load time.

#![forbid(unsafe_code)]

use thiserror::Error;

use ft_core::{AlternativeId, CoreError, CriterionId, ExpertId, Grade, Series, Table, Tfn};

pub mod aggregate;
pub mod closeness;
pub mod fuzzify;
pub mod ideals;
pub mod normalize;
pub mod rank;

pub use aggregate::aggregate;
pub use closeness::{compute_closeness, distance, Closeness};
pub use fuzzify::fuzzify;
pub use ideals::{extract_ideals, Ideals};
pub use normalize::{normalize, Normalized};
pub use rank::{rank, RankedAlternative, Ranking};

/// Row key of the raw and fuzzified rating tables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RatingKey {
    pub expert: ExpertId,
    pub alternative: AlternativeId,
}

impl RatingKey {
    pub fn new(expert: ExpertId, alternative: AlternativeId) -> Self {
        Self { expert, alternative }
    }
}

impl std::fmt::Display for RatingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.expert, self.alternative)
    }
}

pub type RatingTable = Table<RatingKey, CriterionId, Grade>;
pub type FuzzyRatingTable = Table<RatingKey, CriterionId, Tfn>;
pub type AggregatedTable = Table<AlternativeId, CriterionId, Tfn>;
pub type NormalizedTable = Table<AlternativeId, CriterionId, Tfn>;
pub type Weights = Series<CriterionId, f64>;

/// Engine failures. All are terminal: no stage produces partial output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopsisError {
    #[error("unknown grade {grade:?} (expert {expert}, alternative {alternative}, criterion {criterion})")]
    UnknownGrade {
        expert: ExpertId,
        alternative: AlternativeId,
        criterion: CriterionId,
        grade: Grade,
    },

    #[error("no ratings for alternative {alternative} on criterion {criterion}")]
    EmptyGroup {
        alternative: AlternativeId,
        criterion: CriterionId,
    },

    #[error("criterion {criterion} has a zero normalization scale (every upper bound is 0)")]
    DegenerateCriterion { criterion: CriterionId },

    #[error("alternative {alternative} has D+ + D- = 0; closeness is undefined")]
    DegenerateCloseness { alternative: AlternativeId },

    #[error("alternative {alternative} has a non-finite distance sum (weights too large)")]
    NonFiniteCloseness { alternative: AlternativeId },

    #[error("criterion {criterion} has no weight entry")]
    MissingWeight { criterion: CriterionId },

    #[error("nothing to evaluate: no {0}")]
    EmptyInput(&'static str),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type TopsisResult<T> = Result<T, TopsisError>;
