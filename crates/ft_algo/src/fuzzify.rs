//! Fuzzification: raw grade per cell → TFN from the configured scale.

use ft_core::LinguisticScale;

use crate::{FuzzyRatingTable, RatingTable, TopsisError, TopsisResult};

/// Look up every rating cell in `scale`. The first unknown grade aborts with
/// its full (expert, alternative, criterion) context.
pub fn fuzzify(ratings: &RatingTable, scale: &LinguisticScale) -> TopsisResult<FuzzyRatingTable> {
    ratings.try_map(|key, criterion, grade| {
        scale.lookup(grade).map_err(|miss| TopsisError::UnknownGrade {
            expert: key.expert.clone(),
            alternative: key.alternative.clone(),
            criterion: criterion.clone(),
            grade: miss.grade,
        })
    })
}
