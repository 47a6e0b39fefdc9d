//! crates/ft_pipeline/src/validate.rs
//! Cross-table integrity checks before any computation.
//!
//! Loading only guarantees well-formed names and numeric weights. Here the
//! parameter table and the ratings sheet are checked against each other and
//! turned into the typed `RatingTable` the engine consumes:
//! - criterion order = parameter-table row order;
//! - alternatives / experts = sorted distinct names from the ratings;
//! - rating rows sorted by (expert, alternative).

use std::collections::BTreeMap;

use thiserror::Error;

use ft_algo::{RatingKey, RatingTable, TopsisError, Weights};
use ft_core::determinism::sorted_distinct;
use ft_core::{AlternativeId, CoreError, CriterionId, ExpertId, Grade, Series, Table};
use ft_io::loader::LoadedInputs;

use crate::PipelineError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("nothing to evaluate: no {0}")]
    EmptyInput(&'static str),

    #[error("criterion {criterion} listed twice in the parameter table (record {record})")]
    DuplicateCriterion { criterion: CriterionId, record: u64 },

    #[error("criterion {criterion} has an invalid weight {weight} (must be finite and >= 0)")]
    InvalidWeight { criterion: CriterionId, weight: f64 },

    #[error("criterion {criterion} has a weight but no ratings column")]
    MissingCriterionColumn { criterion: CriterionId },

    #[error("missing grade (expert {expert}, alternative {alternative}, criterion {criterion})")]
    MissingRating {
        expert: ExpertId,
        alternative: AlternativeId,
        criterion: CriterionId,
    },

    #[error("expert {expert} rated alternative {alternative} twice (records {first} and {second})")]
    DuplicateRating {
        expert: ExpertId,
        alternative: AlternativeId,
        first: u64,
        second: u64,
    },

    #[error("parameters: {0}")]
    Params(CoreError),
}

/// Inputs after integrity checks, with every axis order fixed.
#[derive(Debug, Clone)]
pub struct ValidatedInputs {
    pub criteria: Vec<CriterionId>,
    pub weights: Weights,
    pub alternatives: Vec<AlternativeId>,
    pub experts: Vec<ExpertId>,
    pub ratings: RatingTable,
}

pub fn validate(loaded: &LoadedInputs) -> Result<ValidatedInputs, PipelineError> {
    let (criteria, weights) = check_params(loaded)?;
    let sheet = &loaded.ratings;

    if sheet.records.is_empty() {
        return Err(ValidationError::EmptyInput("ratings").into());
    }

    // Every rated criterion needs a weight; reported as the engine's own error kind.
    if let Some(c) = sheet.criteria.iter().find(|c| weights.get(c).is_none()) {
        return Err(TopsisError::MissingWeight { criterion: c.clone() }.into());
    }
    // Column position in the sheet for each criterion, in parameter order.
    let mut columns = Vec::with_capacity(criteria.len());
    for c in &criteria {
        let pos = sheet
            .criteria
            .iter()
            .position(|h| h == c)
            .ok_or_else(|| ValidationError::MissingCriterionColumn { criterion: c.clone() })?;
        columns.push(pos);
    }

    let mut by_key: BTreeMap<RatingKey, (u64, Vec<Grade>)> = BTreeMap::new();
    for rec in &sheet.records {
        let mut grades = Vec::with_capacity(columns.len());
        for (crit, &pos) in criteria.iter().zip(&columns) {
            match rec.grades.get(pos).and_then(Option::as_ref) {
                Some(g) => grades.push(g.clone()),
                None => {
                    return Err(ValidationError::MissingRating {
                        expert: rec.expert.clone(),
                        alternative: rec.alternative.clone(),
                        criterion: crit.clone(),
                    }
                    .into())
                }
            }
        }
        let key = RatingKey::new(rec.expert.clone(), rec.alternative.clone());
        if let Some((first, _)) = by_key.get(&key) {
            return Err(ValidationError::DuplicateRating {
                expert: rec.expert.clone(),
                alternative: rec.alternative.clone(),
                first: *first,
                second: rec.record,
            }
            .into());
        }
        by_key.insert(key, (rec.record, grades));
    }

    let alternatives: Vec<AlternativeId> = sorted_distinct(by_key.keys().map(|k| k.alternative.clone()));
    let experts: Vec<ExpertId> = sorted_distinct(by_key.keys().map(|k| k.expert.clone()));

    // BTreeMap iteration is row-major in key order, matching the table layout.
    let rows: Vec<RatingKey> = by_key.keys().cloned().collect();
    let mut cells = by_key.into_values().flat_map(|(_, grades)| grades);
    let ratings: RatingTable = Table::try_from_fn(rows, criteria.clone(), |_, _| {
        cells.next().ok_or(CoreError::DomainOutOfRange("rating cell"))
    })
    .map_err(ValidationError::Params)?;

    tracing::debug!(
        criteria = criteria.len(),
        alternatives = alternatives.len(),
        experts = experts.len(),
        "inputs validated"
    );

    Ok(ValidatedInputs { criteria, weights, alternatives, experts, ratings })
}

fn check_params(loaded: &LoadedInputs) -> Result<(Vec<CriterionId>, Weights), ValidationError> {
    if loaded.params.is_empty() {
        return Err(ValidationError::EmptyInput("criteria"));
    }
    let mut seen: BTreeMap<&CriterionId, u64> = BTreeMap::new();
    for row in &loaded.params {
        if seen.insert(&row.criterion, row.record).is_some() {
            return Err(ValidationError::DuplicateCriterion {
                criterion: row.criterion.clone(),
                record: row.record,
            });
        }
        if !row.weight.is_finite() || row.weight < 0.0 {
            return Err(ValidationError::InvalidWeight {
                criterion: row.criterion.clone(),
                weight: row.weight,
            });
        }
    }
    let criteria: Vec<CriterionId> = loaded.params.iter().map(|r| r.criterion.clone()).collect();
    let weights = Series::from_entries(loaded.params.iter().map(|r| (r.criterion.clone(), r.weight)))
        .map_err(ValidationError::Params)?;
    Ok((criteria, weights))
}
