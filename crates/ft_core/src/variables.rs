//! variables.rs
//! Engine parameters with safe defaults and explicit wire tokens.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ------------ Macros ------------

/// Define a serde'd enum with explicit wire tokens, plus `as_str`/`FromStr`
/// over the same tokens so CLI flags and JSON agree.
macro_rules! serde_enum {
    ($(#[$m:meta])* $name:ident => { $($variant:ident = $token:literal),+ $(,)? }) => {
        $(#[$m])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self { $($name::$variant => $token,)+ }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    _ => Err(CoreError::DomainOutOfRange(stringify!($name))),
                }
            }
        }
    };
}

// ------------ Canonical enums (wire tokens explicit) ------------

serde_enum!(
    /// How alternatives with exactly equal CCI are ordered.
    TiePolicy => {
        AlternativeOrder = "alternative_order",
        Seeded           = "seeded"
    }
);

impl Default for TiePolicy {
    fn default() -> Self {
        TiePolicy::AlternativeOrder
    }
}

// ------------ Params ------------

pub const DEFAULT_PRECISION: u8 = 3;
pub const MAX_PRECISION: u8 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineParams {
    #[serde(default)]
    pub tie_policy: TiePolicy,
    /// Required iff `tie_policy == seeded`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_seed: Option<u64>,
    /// Decimal places for rendered tables (not used in computation).
    #[serde(default = "default_precision")]
    pub precision: u8,
}

fn default_precision() -> u8 {
    DEFAULT_PRECISION
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            tie_policy: TiePolicy::default(),
            tie_seed: None,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl EngineParams {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.precision > MAX_PRECISION {
            return Err(CoreError::DomainOutOfRange("precision"));
        }
        match (self.tie_policy, self.tie_seed) {
            (TiePolicy::Seeded, None) => Err(CoreError::DomainOutOfRange("tie_seed")),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = EngineParams::default();
        assert_eq!(p.tie_policy, TiePolicy::AlternativeOrder);
        assert_eq!(p.precision, 3);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn seeded_requires_seed() {
        let mut p = EngineParams { tie_policy: TiePolicy::Seeded, ..EngineParams::default() };
        assert_eq!(p.validate(), Err(CoreError::DomainOutOfRange("tie_seed")));
        p.tie_seed = Some(7);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn precision_bounded() {
        let p = EngineParams { precision: 12, ..EngineParams::default() };
        assert_eq!(p.validate(), Err(CoreError::DomainOutOfRange("precision")));
    }

    #[test]
    fn wire_tokens() {
        assert_eq!("seeded".parse::<TiePolicy>(), Ok(TiePolicy::Seeded));
        assert!("random".parse::<TiePolicy>().is_err());
        let p: EngineParams = serde_json::from_str(r#"{"tie_policy":"seeded","tie_seed":9}"#).unwrap();
        assert_eq!(p.tie_seed, Some(9));
        assert_eq!(p.precision, 3);
        assert_eq!(TiePolicy::AlternativeOrder.to_string(), "alternative_order");
    }
}
