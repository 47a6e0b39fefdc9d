//! crates/ft_pipeline/src/aggregate.rs
//! FUZZIFY + AGGREGATE: grades → TFNs → one TFN per (alternative, criterion).

use ft_algo::{AggregatedTable, FuzzyRatingTable};
use ft_core::LinguisticScale;

use crate::{PipelineError, ValidatedInputs};

pub fn fuzzify_and_aggregate(
    v: &ValidatedInputs,
    scale: &LinguisticScale,
) -> Result<(FuzzyRatingTable, AggregatedTable), PipelineError> {
    let fuzzy = ft_algo::fuzzify(&v.ratings, scale)?;
    tracing::info!(cells = fuzzy.n_rows() * fuzzy.n_cols(), grades = scale.len(), "fuzzified");

    let aggregated = ft_algo::aggregate(&fuzzy, &v.alternatives, &v.criteria)?;
    tracing::info!(
        alternatives = aggregated.n_rows(),
        criteria = aggregated.n_cols(),
        experts = v.experts.len(),
        "aggregated"
    );
    Ok((fuzzy, aggregated))
}
