//! Candidate model search over a chronological holdout split

use crate::error::Result;
use crate::features::FeatureSet;
use crate::metrics::r2_score;
use crate::models::{FittedCurve, ModelKind};
use crate::utils::train_test_split;

/// Polynomial candidates scoring below this R² are penalized
const PENALTY_THRESHOLD: f64 = 0.7;
/// Penalty factor applied to under-threshold polynomial scores
const PENALTY_FACTOR: f64 = 0.8;
/// Minimum series length for a reliable holdout split
const MIN_SEARCH_LEN: usize = 20;

/// Search the fixed candidate set and return the family with the best
/// penalized holdout score, together with its name.
///
/// Series with fewer than 20 points skip the search and fall back to
/// linear; a holdout that small cannot validate the comparison. Ties
/// favor the earliest-evaluated candidate, so linear wins exact ties.
/// If every candidate fails to fit, linear is returned.
pub fn select_best_model(features: &FeatureSet, test_fraction: f64) -> (ModelKind, String) {
    if features.len() < MIN_SEARCH_LEN {
        return (ModelKind::Linear, "linear".to_string());
    }

    let (train, test) = match train_test_split(features, test_fraction) {
        Ok(split) => split,
        Err(_) => return (ModelKind::Linear, "linear".to_string()),
    };

    let candidates = [
        ("linear", ModelKind::Linear),
        ("polynomial_2", ModelKind::Polynomial(2)),
        ("polynomial_3", ModelKind::Polynomial(3)),
    ];

    let mut best_score = f64::NEG_INFINITY;
    let mut best: Option<(ModelKind, &str)> = None;

    for (name, kind) in candidates {
        let score = match holdout_score(kind, &train, &test) {
            Ok(score) => apply_overfit_penalty(name, score),
            Err(_) => continue,
        };

        if score > best_score {
            best_score = score;
            best = Some((kind, name));
        }
    }

    match best {
        Some((kind, name)) => (kind, name.to_string()),
        None => (ModelKind::Linear, "linear".to_string()),
    }
}

/// Fit a candidate on the training segment and score its predictions on
/// the holdout segment with R².
pub fn holdout_score(kind: ModelKind, train: &FeatureSet, test: &FeatureSet) -> Result<f64> {
    let fitted = kind.fit(train)?;
    let predicted = fitted.predict(&test.offsets)?;
    r2_score(&test.values, &predicted)
}

/// Discount under-threshold polynomial scores so higher-degree curves
/// only win when their gain is decisive. Applies regardless of the
/// score's sign.
pub fn apply_overfit_penalty(name: &str, score: f64) -> f64 {
    if name.starts_with("polynomial") && score < PENALTY_THRESHOLD {
        score * PENALTY_FACTOR
    } else {
        score
    }
}
