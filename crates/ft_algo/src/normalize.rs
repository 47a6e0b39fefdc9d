//! Benefit-type normalization.
//!
//! `scale[c]` is the largest upper bound in column `c`; every cell of that
//! column is divided component-wise by it, so the column maximum becomes 1.

use ft_core::{CriterionId, Series};

use crate::{AggregatedTable, NormalizedTable, TopsisError, TopsisResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub table: NormalizedTable,
    /// Per-criterion divisor, in column order.
    pub scale: Series<CriterionId, f64>,
}

pub fn normalize(aggregated: &AggregatedTable) -> TopsisResult<Normalized> {
    if aggregated.n_rows() == 0 {
        return Err(TopsisError::EmptyInput("alternatives"));
    }

    let mut divisors = Vec::with_capacity(aggregated.n_cols());
    for (ci, crit) in aggregated.cols().iter().enumerate() {
        let max_upper = aggregated
            .column(ci)
            .map(|(_, t)| t.upper())
            .fold(f64::NEG_INFINITY, f64::max);
        if max_upper <= 0.0 {
            return Err(TopsisError::DegenerateCriterion { criterion: crit.clone() });
        }
        divisors.push(max_upper);
    }

    let table = aggregated.try_map(|_, crit, t| {
        // Column positions of the source table line up with `divisors`.
        let ci = aggregated.col_pos(crit).ok_or(TopsisError::EmptyInput("criteria"))?;
        t.div_scalar(divisors[ci]).map_err(TopsisError::from)
    })?;

    let scale = Series::from_entries(aggregated.cols().iter().cloned().zip(divisors))?;
    Ok(Normalized { table, scale })
}
