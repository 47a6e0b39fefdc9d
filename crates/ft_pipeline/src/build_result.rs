//! crates/ft_pipeline/src/build_result.rs
//! Assemble the canonical `result.json` payload.
//!
//! The id is `RES:<sha256>` over the canonical bytes of the body (everything
//! except `id`), so identical inputs and parameters always give the same id.
//! No timestamps live here; those belong to the run record.

use serde::{Deserialize, Serialize};

use ft_core::{AlternativeId, CriterionId, EngineParams, TiePolicy, Tfn};
use ft_io::hasher::res_id_from_canonical;
use ft_io::IoError;

use crate::{PipelineError, StageTables};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub id: CriterionId,
    pub weight: f64,
    /// Normalization divisor (largest aggregated upper bound).
    pub scale: f64,
    pub fpis: Tfn,
    pub fnis: Tfn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeResult {
    pub id: AlternativeId,
    /// Normalized TFNs in criterion order.
    pub normalized: Vec<Tfn>,
    pub d_plus: f64,
    pub d_minus: f64,
    pub cci: f64,
    pub rank: u32,
}

/// Result payload without its id; this is what gets hashed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBody {
    pub criteria: Vec<CriterionResult>,
    /// Alternatives in name order.
    pub alternatives: Vec<AlternativeResult>,
    /// Alternatives best first.
    pub ranking: Vec<AlternativeId>,
    pub tie_policy: TiePolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_seed: Option<u64>,
    pub tie_groups: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDoc {
    pub id: String,
    #[serde(flatten)]
    pub body: ResultBody,
}

pub fn build_result(stages: &StageTables, params: &EngineParams) -> Result<ResultDoc, PipelineError> {
    let norm = &stages.normalized;

    let mut criteria = Vec::with_capacity(norm.table.n_cols());
    for crit in norm.table.cols() {
        let missing = |what: &str| PipelineError::Build(format!("no {what} for criterion {crit}"));
        criteria.push(CriterionResult {
            id: crit.clone(),
            weight: *stages.weights.get(crit).ok_or_else(|| missing("weight"))?,
            scale: *norm.scale.get(crit).ok_or_else(|| missing("scale"))?,
            fpis: *stages.ideals.fpis.get(crit).ok_or_else(|| missing("FPIS"))?,
            fnis: *stages.ideals.fnis.get(crit).ok_or_else(|| missing("FNIS"))?,
        });
    }

    let mut alternatives = Vec::with_capacity(norm.table.n_rows());
    for (ri, alt) in norm.table.rows().iter().enumerate() {
        let c = stages
            .closeness
            .get(alt)
            .ok_or_else(|| PipelineError::Build(format!("no closeness for alternative {alt}")))?;
        let rank = stages
            .ranking
            .rank_of(alt)
            .ok_or_else(|| PipelineError::Build(format!("no rank for alternative {alt}")))?;
        alternatives.push(AlternativeResult {
            id: alt.clone(),
            normalized: norm.table.row(ri).map(|(_, t)| *t).collect(),
            d_plus: c.d_plus,
            d_minus: c.d_minus,
            cci: c.cci,
            rank,
        });
    }

    let body = ResultBody {
        criteria,
        alternatives,
        ranking: stages.ranking.entries.iter().map(|e| e.alternative.clone()).collect(),
        tie_policy: params.tie_policy,
        tie_seed: match params.tie_policy {
            TiePolicy::Seeded => params.tie_seed,
            TiePolicy::AlternativeOrder => None,
        },
        tie_groups: u32::try_from(stages.ranking.tie_groups)
            .map_err(|_| PipelineError::Build("tie group count overflow".into()))?,
    };

    let id = res_id_from_canonical(&body).map_err(IoError::from)?;
    Ok(ResultDoc { id, body })
}
