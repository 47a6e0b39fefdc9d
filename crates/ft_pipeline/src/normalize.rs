//! crates/ft_pipeline/src/normalize.rs
//! NORMALIZE: divide each criterion column by its largest upper bound.

use ft_algo::{AggregatedTable, Normalized};

use crate::PipelineError;

pub fn normalize_stage(aggregated: &AggregatedTable) -> Result<Normalized, PipelineError> {
    let normalized = ft_algo::normalize(aggregated)?;
    for (criterion, scale) in normalized.scale.iter() {
        tracing::debug!(%criterion, scale = *scale, "normalization scale");
    }
    tracing::info!(criteria = normalized.scale.len(), "normalized");
    Ok(normalized)
}
