//! crates/ft_pipeline/src/score.rs
//! IDEALS + CLOSENESS: FPIS/FNIS per criterion, then weighted D+, D- and CCI
//! per alternative.

use ft_algo::{Closeness, Ideals, Normalized, Weights};
use ft_core::{AlternativeId, Series};

use crate::PipelineError;

pub fn score_stage(
    normalized: &Normalized,
    weights: &Weights,
) -> Result<(Ideals, Series<AlternativeId, Closeness>), PipelineError> {
    let ideals = ft_algo::extract_ideals(&normalized.table)?;
    tracing::info!(criteria = ideals.fpis.len(), "ideals extracted");

    let closeness = ft_algo::compute_closeness(&normalized.table, &ideals, weights)?;
    for (alternative, c) in closeness.iter() {
        tracing::debug!(%alternative, d_plus = c.d_plus, d_minus = c.d_minus, cci = c.cci, "closeness");
    }
    tracing::info!(alternatives = closeness.len(), "closeness computed");
    Ok((ideals, closeness))
}
