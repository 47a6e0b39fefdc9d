//! ft_core — Core types, domains, ordering helpers, and deterministic RNG.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`ft_io`, `ft_algo`, `ft_pipeline`, `ft_report`, `ft_cli`).
//!
//! - Name tokens: `AlternativeId`, `CriterionId`, `ExpertId`, `Grade`
//! - Triangular fuzzy numbers (`Tfn`) and the `LinguisticScale`
//! - Typed `Table<R, C, V>` / `Series<K, V>` with fixed axis order
//! - Engine parameters: `TiePolicy`, `EngineParams`
//! - Deterministic ordering helpers
//! - Seedable RNG (ChaCha20) for **ties only**

#![forbid(unsafe_code)]

pub mod determinism;
pub mod ids;
pub mod rng;
pub mod scale;
pub mod table;
pub mod tfn;
pub mod variables;

pub mod errors {
    use core::fmt;

    /// Error set for core-domain validation & construction.
    #[derive(Clone, Debug, PartialEq)]
    pub enum CoreError {
        /// A TFN component is NaN or infinite.
        NonFinite,
        /// `lower <= mode <= upper` does not hold.
        UnorderedTfn { lower: f64, mode: f64, upper: f64 },
        /// Linguistic scale TFNs must sit in the non-negative half-line.
        NegativeComponent(String),
        /// A scale must define at least one grade.
        EmptyScale,
        /// Division by a zero, negative, or non-finite scalar.
        BadDivisor(f64),
        /// The same key appeared twice on a table axis or series.
        DuplicateKey(String),
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::NonFinite => write!(f, "non-finite fuzzy number component"),
                CoreError::UnorderedTfn { lower, mode, upper } => {
                    write!(f, "fuzzy number must satisfy lower <= mode <= upper, got ({lower}, {mode}, {upper})")
                }
                CoreError::NegativeComponent(g) => write!(f, "negative component in scale grade {g}"),
                CoreError::EmptyScale => write!(f, "empty linguistic scale"),
                CoreError::BadDivisor(d) => write!(f, "invalid divisor: {d}"),
                CoreError::DuplicateKey(k) => write!(f, "duplicate key: {k}"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub use errors::CoreError;
pub use ids::{AlternativeId, CriterionId, ExpertId, Grade, IdError};
pub use scale::{LinguisticScale, UnknownGrade};
pub use table::{Series, Table};
pub use tfn::Tfn;
pub use variables::{EngineParams, TiePolicy};
