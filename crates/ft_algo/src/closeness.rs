//! Weighted vertex distances and the closeness coefficient.
//!
//! ```text
//! D+  = Σ_c w[c] · d(n[a][c], FPIS[c])
//! D-  = Σ_c w[c] · d(n[a][c], FNIS[c])
//! CCI = D- / (D+ + D-)
//! ```

use ft_core::{AlternativeId, Series, Tfn};

use crate::{Ideals, NormalizedTable, TopsisError, TopsisResult, Weights};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Closeness {
    pub d_plus: f64,
    pub d_minus: f64,
    pub cci: f64,
}

/// Vertex distance between two TFNs.
#[inline]
pub fn distance(u: &Tfn, v: &Tfn) -> f64 {
    u.vertex_distance(v)
}

/// Closeness per alternative, in row order of `normalized`.
pub fn compute_closeness(
    normalized: &NormalizedTable,
    ideals: &Ideals,
    weights: &Weights,
) -> TopsisResult<Series<AlternativeId, Closeness>> {
    // Resolve per-column inputs once; a missing weight fails before any math.
    let mut columns = Vec::with_capacity(normalized.n_cols());
    for crit in normalized.cols() {
        let w = *weights
            .get(crit)
            .ok_or_else(|| TopsisError::MissingWeight { criterion: crit.clone() })?;
        let (pos, neg) = match (ideals.fpis.get(crit), ideals.fnis.get(crit)) {
            (Some(p), Some(n)) => (*p, *n),
            _ => return Err(TopsisError::EmptyInput("ideal solution")),
        };
        columns.push((w, pos, neg));
    }

    let mut out = Vec::with_capacity(normalized.n_rows());
    for (ri, alt) in normalized.rows().iter().enumerate() {
        let (mut d_plus, mut d_minus) = (0.0f64, 0.0f64);
        for ((_, cell), (w, pos, neg)) in normalized.row(ri).zip(columns.iter()) {
            d_plus += w * distance(cell, pos);
            d_minus += w * distance(cell, neg);
        }
        let total = d_plus + d_minus;
        if !total.is_finite() {
            return Err(TopsisError::NonFiniteCloseness { alternative: alt.clone() });
        }
        if total == 0.0 {
            return Err(TopsisError::DegenerateCloseness { alternative: alt.clone() });
        }
        let cci = d_minus / total;
        if !cci.is_finite() {
            return Err(TopsisError::NonFiniteCloseness { alternative: alt.clone() });
        }
        out.push((alt.clone(), Closeness { d_plus, d_minus, cci }));
    }
    Ok(Series::from_entries(out)?)
}
