//! crates/ft_pipeline/src/resolve_ties.rs
//! RANK: order by descending CCI and settle exact ties per the configured policy.
//!
//! The RNG is only consulted under `seeded`, and only inside tie groups, so an
//! untied run never depends on the seed.

use ft_algo::{Closeness, Ranking};
use ft_core::{AlternativeId, EngineParams, Series, TiePolicy};

use crate::PipelineError;

pub fn rank_stage(
    closeness: &Series<AlternativeId, Closeness>,
    params: &EngineParams,
) -> Result<Ranking, PipelineError> {
    let ranking = ft_algo::rank(closeness, params.tie_policy, params.tie_seed)?;
    if ranking.tie_groups > 0 {
        match params.tie_policy {
            TiePolicy::AlternativeOrder => tracing::warn!(
                groups = ranking.tie_groups,
                "equal closeness coefficients ordered by alternative name"
            ),
            TiePolicy::Seeded => tracing::warn!(
                groups = ranking.tie_groups,
                seed = params.tie_seed.unwrap_or_default(),
                "equal closeness coefficients ordered by seeded shuffle"
            ),
        }
    }
    tracing::info!(alternatives = ranking.entries.len(), "ranked");
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_algo::Closeness;

    fn c(cci: f64) -> Closeness {
        Closeness { d_plus: 1.0 - cci, d_minus: cci, cci }
    }

    fn alt(s: &str) -> AlternativeId {
        AlternativeId::try_from(s).unwrap()
    }

    #[test]
    fn default_policy_breaks_ties_by_name() {
        let s = Series::from_entries([(alt("B"), c(0.5)), (alt("A"), c(0.5)), (alt("C"), c(0.9))]).unwrap();
        let r = rank_stage(&s, &EngineParams::default()).unwrap();
        let order: Vec<_> = r.entries.iter().map(|e| e.alternative.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
        assert_eq!(r.tie_groups, 1);
    }

    #[test]
    fn seeded_policy_is_reproducible() {
        let s = Series::from_entries((0..8).map(|i| (alt(&format!("A{i}")), c(0.25)))).unwrap();
        let p = EngineParams { tie_policy: TiePolicy::Seeded, tie_seed: Some(42), ..EngineParams::default() };
        let a = rank_stage(&s, &p).unwrap();
        let b = rank_stage(&s, &p).unwrap();
        assert_eq!(a, b);
        let mut ranks: Vec<u32> = a.entries.iter().map(|e| e.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=8).collect::<Vec<_>>());
    }
}
