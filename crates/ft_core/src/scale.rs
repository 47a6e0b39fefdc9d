//! crates/ft_core/src/scale.rs
//! Linguistic scale: grade symbol → TFN. Configured once, lookup only.

use std::collections::BTreeMap;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::Grade;
use crate::tfn::Tfn;

/// Lookup miss. Callers attach the rating context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGrade {
    pub grade: Grade,
}

impl fmt::Display for UnknownGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown grade {:?}", self.grade.as_str())
    }
}

impl std::error::Error for UnknownGrade {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Grade, Tfn>", into = "BTreeMap<Grade, Tfn>")]
pub struct LinguisticScale {
    grades: BTreeMap<Grade, Tfn>,
}

impl LinguisticScale {
    /// Build a scale; at least one grade, no negative components, no duplicates.
    pub fn new<I>(entries: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (Grade, Tfn)>,
    {
        let mut grades = BTreeMap::new();
        for (g, t) in entries {
            if t.lower() < 0.0 {
                return Err(CoreError::NegativeComponent(g.to_string()));
            }
            if grades.insert(g.clone(), t).is_some() {
                return Err(CoreError::DuplicateKey(g.to_string()));
            }
        }
        if grades.is_empty() {
            return Err(CoreError::EmptyScale);
        }
        Ok(Self { grades })
    }

    pub fn lookup(&self, grade: &Grade) -> Result<Tfn, UnknownGrade> {
        self.grades
            .get(grade)
            .copied()
            .ok_or_else(|| UnknownGrade { grade: grade.clone() })
    }

    pub fn contains(&self, grade: &Grade) -> bool {
        self.grades.contains_key(grade)
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    /// Grades in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&Grade, &Tfn)> {
        self.grades.iter()
    }
}

impl Default for LinguisticScale {
    /// Five-grade scale A (best) through F (worst).
    fn default() -> Self {
        const FIVE: [(&str, [f64; 3]); 5] = [
            ("A", [0.75, 0.9, 1.0]),
            ("B", [0.5, 0.75, 0.9]),
            ("C", [0.3, 0.5, 0.75]),
            ("D", [0.1, 0.3, 0.5]),
            ("F", [0.0, 0.1, 0.3]),
        ];
        let grades = FIVE
            .iter()
            .map(|(g, [l, m, u])| (Grade::from_static(*g), Tfn::from_ordered(*l, *m, *u)))
            .collect();
        Self { grades }
    }
}

impl TryFrom<BTreeMap<Grade, Tfn>> for LinguisticScale {
    type Error = CoreError;
    fn try_from(m: BTreeMap<Grade, Tfn>) -> Result<Self, Self::Error> {
        LinguisticScale::new(m)
    }
}

impl From<LinguisticScale> for BTreeMap<Grade, Tfn> {
    fn from(s: LinguisticScale) -> Self {
        s.grades
    }
}
