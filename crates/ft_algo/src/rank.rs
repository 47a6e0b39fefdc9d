//! Ranking by descending closeness coefficient.
//!
//! Ranks are always a permutation of `1..=N`. Alternatives with exactly equal
//! CCI form a tie group whose internal order depends on the tie policy:
//! - `alternative_order`: ascending alternative name;
//! - `seeded`: a ChaCha20 shuffle of the name-ordered group, reproducible for
//!   a fixed seed.

use ft_core::determinism::cmp_score_desc_then_key;
use ft_core::rng::TieRng;
use std::cmp::Ordering;

use ft_core::{AlternativeId, CoreError, Series, TiePolicy};

use crate::{Closeness, TopsisError, TopsisResult};

#[derive(Debug, Clone, PartialEq)]
pub struct RankedAlternative {
    pub alternative: AlternativeId,
    pub rank: u32,
    pub closeness: Closeness,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Best first.
    pub entries: Vec<RankedAlternative>,
    /// Number of groups of two or more alternatives sharing a CCI.
    pub tie_groups: usize,
}

impl Ranking {
    pub fn rank_of(&self, alt: &AlternativeId) -> Option<u32> {
        self.entries.iter().find(|e| &e.alternative == alt).map(|e| e.rank)
    }
}

pub fn rank(
    closeness: &Series<AlternativeId, Closeness>,
    policy: TiePolicy,
    tie_seed: Option<u64>,
) -> TopsisResult<Ranking> {
    if closeness.is_empty() {
        return Err(TopsisError::EmptyInput("alternatives"));
    }

    let mut order: Vec<(&AlternativeId, &Closeness)> = closeness.iter().collect();
    order.sort_by(|a, b| cmp_score_desc_then_key((a.1.cci, a.0), (b.1.cci, b.0)));

    let mut rng = match policy {
        TiePolicy::AlternativeOrder => None,
        TiePolicy::Seeded => {
            let seed = tie_seed.ok_or(TopsisError::Core(CoreError::DomainOutOfRange("tie_seed")))?;
            Some(TieRng::from_seed_u64(seed))
        }
    };

    // Walk runs of equal CCI; each run of length > 1 is one tie group.
    // A run always holds at least its first element.
    let mut tie_groups = 0usize;
    let mut start = 0usize;
    while start < order.len() {
        let cci = order[start].1.cci;
        let end = order[start + 1..]
            .iter()
            .position(|(_, c)| c.cci.total_cmp(&cci) != Ordering::Equal)
            .map_or(order.len(), |off| start + 1 + off);
        if end - start > 1 {
            tie_groups += 1;
            if let Some(rng) = rng.as_mut() {
                rng.shuffle_in_place(&mut order[start..end]);
            }
        }
        start = end;
    }

    let entries = order
        .into_iter()
        .enumerate()
        .map(|(i, (alt, c))| RankedAlternative {
            alternative: alt.clone(),
            rank: i as u32 + 1,
            closeness: *c,
        })
        .collect();
    Ok(Ranking { entries, tie_groups })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alt(s: &str) -> AlternativeId { s.parse().unwrap() }

    fn cc(rows: &[(&str, f64)]) -> Series<AlternativeId, Closeness> {
        Series::from_entries(rows.iter().map(|(a, cci)| {
            (alt(a), Closeness { d_plus: 1.0 - cci, d_minus: *cci, cci: *cci })
        }))
        .unwrap()
    }

    fn names(r: &Ranking) -> Vec<&str> {
        r.entries.iter().map(|e| e.alternative.as_str()).collect()
    }

    #[test]
    fn descending_cci() {
        let r = rank(&cc(&[("A", 0.2), ("B", 0.9), ("C", 0.5)]), TiePolicy::AlternativeOrder, None).unwrap();
        assert_eq!(names(&r), vec!["B", "C", "A"]);
        assert_eq!(r.rank_of(&alt("B")), Some(1));
        assert_eq!(r.rank_of(&alt("A")), Some(3));
        assert_eq!(r.tie_groups, 0);
    }

    #[test]
    fn ties_break_by_name_and_stay_a_permutation() {
        let r = rank(&cc(&[("Zeta", 0.5), ("Alpha", 0.5), ("Mid", 0.7)]), TiePolicy::AlternativeOrder, None)
            .unwrap();
        assert_eq!(names(&r), vec!["Mid", "Alpha", "Zeta"]);
        let ranks: Vec<u32> = r.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(r.tie_groups, 1);
    }

    #[test]
    fn seeded_policy_is_reproducible() {
        let input = cc(&[("a", 0.5), ("b", 0.5), ("c", 0.5), ("d", 0.5), ("e", 0.1)]);
        let r1 = rank(&input, TiePolicy::Seeded, Some(2024)).unwrap();
        let r2 = rank(&input, TiePolicy::Seeded, Some(2024)).unwrap();
        assert_eq!(r1, r2);
        // The non-tied alternative is unaffected.
        assert_eq!(r1.rank_of(&alt("e")), Some(5));
        let mut tied: Vec<&str> = names(&r1)[..4].to_vec();
        tied.sort_unstable();
        assert_eq!(tied, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn nan_scores_still_terminate() {
        let r = rank(&cc(&[("a", f64::NAN), ("b", f64::NAN), ("c", 0.4)]), TiePolicy::AlternativeOrder, None)
            .unwrap();
        let ranks: Vec<u32> = r.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(r.entries.len(), 3);
    }

    #[test]
    fn seeded_without_seed_fails() {
        let input = cc(&[("a", 0.5)]);
        assert!(rank(&input, TiePolicy::Seeded, None).is_err());
    }
}
