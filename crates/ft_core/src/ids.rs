//! crates/ft_core/src/ids.rs
//! Name tokens for the decision domain: alternatives, criteria, experts, grades.
//! Names come from user-authored tables, so the shape check is looser than a
//! registry token: trimmed, non-empty, bounded, no control characters.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors returned when validating or parsing names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdError {
    Empty,
    TooLong,
    ControlChar,
    Untrimmed,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::Empty => write!(f, "name must not be empty"),
            IdError::TooLong => write!(f, "name longer than {MAX_NAME_LEN} bytes"),
            IdError::ControlChar => write!(f, "name contains control characters"),
            IdError::Untrimmed => write!(f, "name has leading or trailing whitespace"),
        }
    }
}

impl std::error::Error for IdError {}

const MAX_NAME_LEN: usize = 256;

/// Shape check shared by every name token.
#[inline]
pub fn check_name(s: &str) -> Result<(), IdError> {
    if s.is_empty() {
        return Err(IdError::Empty);
    }
    if s.len() > MAX_NAME_LEN {
        return Err(IdError::TooLong);
    }
    if s.chars().any(char::is_control) {
        return Err(IdError::ControlChar);
    }
    if s.trim() != s {
        return Err(IdError::Untrimmed);
    }
    Ok(())
}

macro_rules! name_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }

            /// Trim surrounding whitespace, then validate.
            pub fn parse_trimmed(s: &str) -> Result<Self, IdError> { s.trim().parse() }

            /// For compile-time literals known to pass `check_name`.
            #[allow(dead_code)]
            pub(crate) fn from_static(s: &'static str) -> Self { $name(s.to_owned()) }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = IdError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                check_name(s)?;
                Ok($name(s.to_owned()))
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;
            fn try_from(value: String) -> Result<Self, Self::Error> {
                check_name(&value)?;
                Ok($name(value))
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(v: $name) -> String { v.0 }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str { &self.0 }
        }
    };
}

name_newtype!(
    /// A decision alternative (row of the aggregated table).
    AlternativeId
);
name_newtype!(
    /// A criterion (column), keyed by the parameter-table name.
    CriterionId
);
name_newtype!(
    /// An expert supplying ratings.
    ExpertId
);
name_newtype!(
    /// A linguistic grade symbol such as `A` or `F`.
    Grade
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        let a: AlternativeId = "Site North".parse().unwrap();
        assert_eq!(a.as_str(), "Site North");
        assert!(CriterionId::try_from("Cost").is_ok());
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!("".parse::<ExpertId>(), Err(IdError::Empty));
        assert_eq!(" E1".parse::<ExpertId>(), Err(IdError::Untrimmed));
        assert_eq!("E\t1".parse::<ExpertId>(), Err(IdError::ControlChar));
        assert_eq!("x".repeat(300).parse::<ExpertId>(), Err(IdError::TooLong));
    }

    #[test]
    fn parse_trimmed_strips_whitespace() {
        let g = Grade::parse_trimmed("  B ").unwrap();
        assert_eq!(g.as_str(), "B");
        assert_eq!(Grade::parse_trimmed("   "), Err(IdError::Empty));
    }

    #[test]
    fn serde_is_transparent_and_validating() {
        let c: CriterionId = serde_json::from_str("\"Quality\"").unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"Quality\"");
        assert!(serde_json::from_str::<CriterionId>("\"\"").is_err());
    }
}
