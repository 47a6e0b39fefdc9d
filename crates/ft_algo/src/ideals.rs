//! Fuzzy positive/negative ideal solutions (FPIS/FNIS).
//!
//! Per criterion, FPIS is the normalized cell with the largest mode and FNIS
//! the one with the smallest. The whole TFN is carried, not just the mode.
//! Ties keep the first alternative in row order.

use ft_core::{CriterionId, Series, Tfn};

use crate::{NormalizedTable, TopsisError, TopsisResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Ideals {
    pub fpis: Series<CriterionId, Tfn>,
    pub fnis: Series<CriterionId, Tfn>,
}

pub fn extract_ideals(normalized: &NormalizedTable) -> TopsisResult<Ideals> {
    if normalized.n_rows() == 0 {
        return Err(TopsisError::EmptyInput("alternatives"));
    }
    let mut fpis = Vec::with_capacity(normalized.n_cols());
    let mut fnis = Vec::with_capacity(normalized.n_cols());
    for (ci, crit) in normalized.cols().iter().enumerate() {
        let mut column = normalized.column(ci).map(|(_, t)| *t);
        let first = column.next().ok_or(TopsisError::EmptyInput("alternatives"))?;
        let (best, worst) = column.fold((first, first), |(best, worst), t| {
            // Strict comparisons: an equal mode never displaces an earlier row.
            let best = if t.mode() > best.mode() { t } else { best };
            let worst = if t.mode() < worst.mode() { t } else { worst };
            (best, worst)
        });
        fpis.push((crit.clone(), best));
        fnis.push((crit.clone(), worst));
    }
    Ok(Ideals {
        fpis: Series::from_entries(fpis)?,
        fnis: Series::from_entries(fnis)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::{AlternativeId, CoreError, Table};

    fn alt(s: &str) -> AlternativeId { s.parse().unwrap() }
    fn crit(s: &str) -> CriterionId { s.parse().unwrap() }

    fn norm(cells: &[(&str, [f64; 3])]) -> NormalizedTable {
        let rows = cells.iter().map(|(a, _)| alt(a)).collect();
        Table::try_from_fn::<CoreError, _>(rows, vec![crit("Q")], |r, _| {
            let (_, v) = cells.iter().find(|(a, _)| r.as_str() == *a).unwrap();
            Tfn::new(v[0], v[1], v[2])
        })
        .unwrap()
    }

    #[test]
    fn picks_extremes_by_mode() {
        let n = norm(&[
            ("A", [0.3, 0.5, 0.8]),
            ("B", [0.6, 0.9, 1.0]),
            ("C", [0.0, 0.1, 0.3]),
        ]);
        let ideals = extract_ideals(&n).unwrap();
        assert_eq!(ideals.fpis.get(&crit("Q")).unwrap().to_array(), [0.6, 0.9, 1.0]);
        assert_eq!(ideals.fnis.get(&crit("Q")).unwrap().to_array(), [0.0, 0.1, 0.3]);
    }

    #[test]
    fn mode_ties_keep_first_row() {
        // Same mode, different spread: the earlier row wins both ways.
        let n = norm(&[("A", [0.4, 0.5, 0.6]), ("B", [0.1, 0.5, 1.0])]);
        let ideals = extract_ideals(&n).unwrap();
        assert_eq!(ideals.fpis.get(&crit("Q")).unwrap().to_array(), [0.4, 0.5, 0.6]);
        assert_eq!(ideals.fnis.get(&crit("Q")).unwrap().to_array(), [0.4, 0.5, 0.6]);
    }
}
