//! Determinism utilities: stable ordering for names and scores.
//!
//! This module is **I/O-free**. It provides:
//! - Stable total orders for name tokens
//! - Canonical distinct-set materialization (sorted, deduplicated)
//! - A total "score descending, then name ascending" comparator for f64 scores

use core::cmp::Ordering;
use std::collections::BTreeSet;

use crate::ids::{AlternativeId, CriterionId, ExpertId, Grade};

/* -------------------------------------------------------------------------- */
/*                               Stable Ordering                              */
/* -------------------------------------------------------------------------- */

/// Provide a **total**, stable order for values that must sort canonically.
pub trait StableOrd {
    fn stable_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! stable_ord_by_str {
    ($($t:ty),+) => {
        $(
            impl StableOrd for $t {
                #[inline]
                fn stable_cmp(&self, other: &Self) -> Ordering {
                    self.as_str().cmp(other.as_str())
                }
            }
        )+
    };
}

stable_ord_by_str!(AlternativeId, CriterionId, ExpertId, Grade);

/* -------------------------------------------------------------------------- */
/*                            Canonical sort helpers                           */
/* -------------------------------------------------------------------------- */

/// Distinct values in ascending order (byte-wise for name tokens).
pub fn sorted_distinct<T, I>(it: I) -> Vec<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    it.into_iter().collect::<BTreeSet<T>>().into_iter().collect()
}

/// Higher score first; equal scores fall back to the key's stable order.
/// Uses `f64::total_cmp`, so the order is total even for signed zeros.
#[inline]
pub fn cmp_score_desc_then_key<K: StableOrd>(a: (f64, &K), b: (f64, &K)) -> Ordering {
    match b.0.total_cmp(&a.0) {
        Ordering::Equal => a.1.stable_cmp(b.1),
        o => o,
    }
}
