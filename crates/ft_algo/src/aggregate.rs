//! Aggregation of expert judgments per (alternative, criterion).
//!
//! lower = min of lowers, mode = mean of modes, upper = max of uppers.
//! The mean is clamped into [min mode, max mode] so float rounding cannot
//! push it across a bound and break `lower <= mode <= upper`.

use std::collections::BTreeMap;

use ft_core::{AlternativeId, CriterionId, Table, Tfn};

use crate::{AggregatedTable, FuzzyRatingTable, TopsisError, TopsisResult};

pub fn aggregate(
    fuzzy: &FuzzyRatingTable,
    alternatives: &[AlternativeId],
    criteria: &[CriterionId],
) -> TopsisResult<AggregatedTable> {
    if alternatives.is_empty() {
        return Err(TopsisError::EmptyInput("alternatives"));
    }
    if criteria.is_empty() {
        return Err(TopsisError::EmptyInput("criteria"));
    }

    // Row positions per alternative, in table row order.
    let mut groups: BTreeMap<&AlternativeId, Vec<usize>> = BTreeMap::new();
    for (ri, key) in fuzzy.rows().iter().enumerate() {
        groups.entry(&key.alternative).or_default().push(ri);
    }

    Table::try_from_fn(alternatives.to_vec(), criteria.to_vec(), |alt, crit| {
        let empty = || TopsisError::EmptyGroup {
            alternative: alt.clone(),
            criterion: crit.clone(),
        };
        let rows = groups.get(alt).ok_or_else(empty)?;
        let ci = fuzzy.col_pos(crit).ok_or_else(empty)?;
        combine(rows.iter().map(|&ri| fuzzy.at(ri, ci))).ok_or_else(empty)?
    })
}

/// min/mean/max over a group; `None` for an empty group.
fn combine<'a, I>(group: I) -> Option<TopsisResult<Tfn>>
where
    I: IntoIterator<Item = &'a Tfn>,
{
    let mut n = 0usize;
    let mut lower = f64::INFINITY;
    let mut upper = f64::NEG_INFINITY;
    let mut mode_sum = 0.0f64;
    let mut mode_min = f64::INFINITY;
    let mut mode_max = f64::NEG_INFINITY;
    for t in group {
        n += 1;
        lower = lower.min(t.lower());
        upper = upper.max(t.upper());
        mode_sum += t.mode();
        mode_min = mode_min.min(t.mode());
        mode_max = mode_max.max(t.mode());
    }
    if n == 0 {
        return None;
    }
    let mode = (mode_sum / n as f64).clamp(mode_min, mode_max);
    Some(Tfn::new(lower, mode, upper).map_err(TopsisError::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RatingKey;
    use ft_core::CoreError;

    fn alt(s: &str) -> AlternativeId { s.parse().unwrap() }
    fn crit(s: &str) -> CriterionId { s.parse().unwrap() }
    fn tfn(l: f64, m: f64, u: f64) -> Tfn { Tfn::new(l, m, u).unwrap() }

    fn fuzzy(rows: Vec<(&str, &str, Tfn)>) -> FuzzyRatingTable {
        let keys: Vec<RatingKey> = rows
            .iter()
            .map(|(e, a, _)| RatingKey::new(e.parse().unwrap(), alt(a)))
            .collect();
        Table::try_from_fn::<CoreError, _>(keys, vec![crit("Cost")], |k, _| {
            Ok(rows
                .iter()
                .find(|(e, a, _)| k.expert.as_str() == *e && k.alternative.as_str() == *a)
                .map(|(_, _, t)| *t)
                .unwrap())
        })
        .unwrap()
    }

    #[test]
    fn identical_judgments_aggregate_to_themselves() {
        let a = tfn(0.75, 0.9, 1.0);
        let f = fuzzy(vec![("E1", "X", a), ("E2", "X", a)]);
        let agg = aggregate(&f, &[alt("X")], &[crit("Cost")]).unwrap();
        assert_eq!(*agg.get(&alt("X"), &crit("Cost")).unwrap(), a);
    }

    #[test]
    fn min_mean_max() {
        let f = fuzzy(vec![
            ("E1", "X", tfn(0.75, 0.9, 1.0)),
            ("E2", "X", tfn(0.0, 0.1, 0.3)),
            ("E1", "Y", tfn(0.3, 0.5, 0.75)),
        ]);
        let agg = aggregate(&f, &[alt("X"), alt("Y")], &[crit("Cost")]).unwrap();
        let x = agg.get(&alt("X"), &crit("Cost")).unwrap();
        assert_eq!(x.lower(), 0.0);
        assert!((x.mode() - 0.5).abs() < 1e-12);
        assert_eq!(x.upper(), 1.0);
        assert_eq!(agg.get(&alt("Y"), &crit("Cost")).unwrap().to_array(), [0.3, 0.5, 0.75]);
    }

    #[test]
    fn unrated_alternative_is_empty_group() {
        let f = fuzzy(vec![("E1", "X", tfn(0.1, 0.3, 0.5))]);
        let err = aggregate(&f, &[alt("X"), alt("W")], &[crit("Cost")]).unwrap_err();
        assert_eq!(err, TopsisError::EmptyGroup { alternative: alt("W"), criterion: crit("Cost") });
    }

    #[test]
    fn unknown_criterion_is_empty_group() {
        let f = fuzzy(vec![("E1", "X", tfn(0.1, 0.3, 0.5))]);
        let err = aggregate(&f, &[alt("X")], &[crit("Risk")]).unwrap_err();
        assert!(matches!(err, TopsisError::EmptyGroup { .. }));
    }

    #[test]
    fn empty_axes_rejected() {
        let f = fuzzy(vec![("E1", "X", tfn(0.1, 0.3, 0.5))]);
        assert_eq!(aggregate(&f, &[], &[crit("Cost")]), Err(TopsisError::EmptyInput("alternatives")));
        assert_eq!(aggregate(&f, &[alt("X")], &[]), Err(TopsisError::EmptyInput("criteria")));
    }
}
