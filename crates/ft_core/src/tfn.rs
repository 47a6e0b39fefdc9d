//! crates/ft_core/src/tfn.rs
//! Triangular fuzzy numbers.
//!
//! A `Tfn` is an immutable `(lower, mode, upper)` triple with
//! `lower <= mode <= upper`, all finite. The only ways to obtain one are the
//! checked constructor and the operations below, so every `Tfn` in the engine
//! satisfies the ordering invariant.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct Tfn {
    lower: f64,
    mode: f64,
    upper: f64,
}

impl Tfn {
    pub fn new(lower: f64, mode: f64, upper: f64) -> Result<Self, CoreError> {
        if !(lower.is_finite() && mode.is_finite() && upper.is_finite()) {
            return Err(CoreError::NonFinite);
        }
        if !(lower <= mode && mode <= upper) {
            return Err(CoreError::UnorderedTfn { lower, mode, upper });
        }
        Ok(Self { lower, mode, upper })
    }

    /// For literals already known to be ordered and finite.
    pub(crate) fn from_ordered(lower: f64, mode: f64, upper: f64) -> Self {
        debug_assert!(lower <= mode && mode <= upper);
        Self { lower, mode, upper }
    }

    #[inline] pub fn lower(&self) -> f64 { self.lower }
    #[inline] pub fn mode(&self) -> f64 { self.mode }
    #[inline] pub fn upper(&self) -> f64 { self.upper }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.lower, self.mode, self.upper]
    }

    /// Component-wise division by a strictly positive, finite scalar.
    /// Ordering is preserved because division by a positive number is monotone.
    pub fn div_scalar(&self, divisor: f64) -> Result<Self, CoreError> {
        if !(divisor.is_finite() && divisor > 0.0) {
            return Err(CoreError::BadDivisor(divisor));
        }
        Tfn::new(self.lower / divisor, self.mode / divisor, self.upper / divisor)
    }

    /// Vertex distance: RMS of the component differences.
    ///
    /// `sqrt(((l1-l2)^2 + (m1-m2)^2 + (u1-u2)^2) / 3)`
    pub fn vertex_distance(&self, other: &Tfn) -> f64 {
        let dl = self.lower - other.lower;
        let dm = self.mode - other.mode;
        let du = self.upper - other.upper;
        ((dl * dl + dm * dm + du * du) / 3.0).sqrt()
    }
}

impl TryFrom<[f64; 3]> for Tfn {
    type Error = CoreError;
    fn try_from(v: [f64; 3]) -> Result<Self, Self::Error> {
        Tfn::new(v[0], v[1], v[2])
    }
}

impl From<Tfn> for [f64; 3] {
    fn from(t: Tfn) -> [f64; 3] {
        t.to_array()
    }
}

impl fmt::Display for Tfn {
    /// Honors the formatter precision, e.g. `{:.3}` → `(0.750, 0.900, 1.000)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.p$}, {:.p$}, {:.p$})", self.lower, self.mode, self.upper, p = p),
            None => write!(f, "({}, {}, {})", self.lower, self.mode, self.upper),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_enforces_order() {
        assert!(Tfn::new(0.1, 0.3, 0.5).is_ok());
        assert!(Tfn::new(0.5, 0.5, 0.5).is_ok());
        assert!(matches!(Tfn::new(0.5, 0.3, 0.9), Err(CoreError::UnorderedTfn { .. })));
        assert_eq!(Tfn::new(f64::NAN, 0.3, 0.9), Err(CoreError::NonFinite));
        assert_eq!(Tfn::new(0.0, 0.3, f64::INFINITY), Err(CoreError::NonFinite));
    }

    #[test]
    fn distance_identity_and_symmetry() {
        let a = Tfn::new(0.75, 0.9, 1.0).unwrap();
        let b = Tfn::new(0.0, 0.1, 0.3).unwrap();
        assert_eq!(a.vertex_distance(&a), 0.0);
        assert_eq!(a.vertex_distance(&b), b.vertex_distance(&a));
    }

    #[test]
    fn distance_known_value() {
        let a = Tfn::new(0.0, 0.0, 0.0).unwrap();
        let b = Tfn::new(1.0, 1.0, 1.0).unwrap();
        assert!((a.vertex_distance(&b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn div_scalar_rejects_zero() {
        let a = Tfn::new(0.2, 0.4, 0.8).unwrap();
        assert_eq!(a.div_scalar(0.0), Err(CoreError::BadDivisor(0.0)));
        let n = a.div_scalar(0.8).unwrap();
        assert_eq!(n.upper(), 1.0);
        assert!((n.lower() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn display_respects_precision() {
        let a = Tfn::new(0.75, 0.9, 1.0).unwrap();
        assert_eq!(format!("{a:.3}"), "(0.750, 0.900, 1.000)");
    }

    #[test]
    fn serde_as_triple() {
        let a: Tfn = serde_json::from_str("[0.3,0.5,0.75]").unwrap();
        assert_eq!(a.mode(), 0.5);
        assert_eq!(serde_json::to_string(&a).unwrap(), "[0.3,0.5,0.75]");
        assert!(serde_json::from_str::<Tfn>("[0.9,0.5,0.75]").is_err());
    }
}
