//! ft_pipeline — deterministic pipeline surface
//! (load → validate → fuzzify/aggregate → normalize → ideals/closeness → rank → build).
//!
//! Stages run strictly in order, each on the complete output of the previous
//! one. JSON/hashing is delegated to `ft_io`, the math to `ft_algo`.

#![forbid(unsafe_code)]

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ft_algo::{AggregatedTable, Closeness, FuzzyRatingTable, Ideals, Normalized, Ranking, RatingTable, Weights};
use ft_core::{AlternativeId, CriterionId, EngineParams, ExpertId, Series};
use ft_io::{loader::LoadedInputs, IoError};

pub mod aggregate;
pub mod build_result;
pub mod build_run_record;
pub mod normalize;
pub mod resolve_ties;
pub mod score;
pub mod validate;

pub use ft_algo::TopsisError;
pub use build_result::{AlternativeResult, CriterionResult, ResultBody, ResultDoc};
pub use build_run_record::{RunOutputs, RunRecordDoc};
pub use validate::{ValidatedInputs, ValidationError};

/// Engine identifiers (baked by the build system in real deployments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

impl EngineMeta {
    /// Compile-time identity of this crate.
    pub fn from_build_env() -> Self {
        Self {
            vendor: option_env!("FT_ENGINE_VENDOR").unwrap_or("fzt").to_string(),
            name: option_env!("FT_ENGINE_NAME").unwrap_or("fuzzy-topsis").to_string(),
            version: option_env!("FT_ENGINE_VERSION")
                .unwrap_or(env!("CARGO_PKG_VERSION"))
                .to_string(),
            build: option_env!("FT_ENGINE_BUILD").unwrap_or("dev").to_string(),
        }
    }
}

/// Pipeline context: inputs already loaded by ft_io, final engine parameters.
#[derive(Debug, Clone)]
pub struct PipelineCtx {
    pub loaded: LoadedInputs,
    pub engine_meta: EngineMeta,
    pub params: EngineParams,
    /// Pin the run timestamp (`YYYY-MM-DDTHH:MM:SSZ`); `None` uses the clock.
    pub timestamp_utc: Option<String>,
}

/// Every intermediate table of a run, kept for the per-stage sheets.
#[derive(Debug, Clone)]
pub struct StageTables {
    pub criteria: Vec<CriterionId>,
    pub alternatives: Vec<AlternativeId>,
    pub experts: Vec<ExpertId>,
    pub weights: Weights,
    pub ratings: RatingTable,
    pub fuzzy: FuzzyRatingTable,
    pub aggregated: AggregatedTable,
    pub normalized: Normalized,
    pub ideals: Ideals,
    pub closeness: Series<AlternativeId, Closeness>,
    pub ranking: Ranking,
}

#[derive(Debug, Clone)]
pub struct PipelineOutputs {
    pub result: ResultDoc,
    pub run_record: RunRecordDoc,
    pub stages: StageTables,
}

/// Single error surface for the pipeline orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("validation: {0}")]
    Validate(#[from] ValidationError),

    #[error(transparent)]
    Engine(#[from] TopsisError),

    #[error("build: {0}")]
    Build(String),
}

/// Orchestrate the pipeline with a preloaded context.
pub fn run_with_ctx(ctx: PipelineCtx) -> Result<PipelineOutputs, PipelineError> {
    ctx.params
        .validate()
        .map_err(|e| PipelineError::Validate(ValidationError::Params(e)))?;

    let v = validate::validate(&ctx.loaded)?;
    let (fuzzy, aggregated) = aggregate::fuzzify_and_aggregate(&v, &ctx.loaded.scale)?;
    let normalized = normalize::normalize_stage(&aggregated)?;
    let (ideals, closeness) = score::score_stage(&normalized, &v.weights)?;
    let ranking = resolve_ties::rank_stage(&closeness, &ctx.params)?;

    let stages = StageTables {
        criteria: v.criteria,
        alternatives: v.alternatives,
        experts: v.experts,
        weights: v.weights,
        ratings: v.ratings,
        fuzzy,
        aggregated,
        normalized,
        ideals,
        closeness,
        ranking,
    };

    let result = build_result::build_result(&stages, &ctx.params)?;
    let run_record = build_run_record::build_run_record(
        &result,
        &ctx.engine_meta,
        &ctx.loaded.digests,
        &ctx.params,
        ctx.timestamp_utc.as_deref(),
    )?;

    tracing::info!(result_id = %result.id, run_id = %run_record.id, "run complete");
    Ok(PipelineOutputs { result, run_record, stages })
}

/// Load explicit inputs and run with the given parameters.
pub fn run_from_paths(
    params_csv: &Path,
    ratings_csv: &Path,
    scale_json: Option<&Path>,
    params: EngineParams,
) -> Result<PipelineOutputs, PipelineError> {
    let loaded = ft_io::loader::load_from_paths(params_csv, ratings_csv, scale_json)?;
    run_with_ctx(PipelineCtx {
        loaded,
        engine_meta: EngineMeta::from_build_env(),
        params,
        timestamp_utc: None,
    })
}
