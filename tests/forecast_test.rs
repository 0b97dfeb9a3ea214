use chrono::{Duration, NaiveDate};
use forecast_cases::models::FittedCurve;
use forecast_cases::selection::{apply_overfit_penalty, holdout_score};
use forecast_cases::utils::train_test_split;
use forecast_cases::{
    forecast, forecast_linear, CaseSeries, FeatureSet, ForecastError, ModelKind, ModelType,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

// Helper to build a daily series from raw cumulative counts
fn series_from(values: &[f64]) -> CaseSeries {
    let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    let pairs = values
        .iter()
        .enumerate()
        .map(|(i, v)| (start + Duration::days(i as i64), *v))
        .collect();

    CaseSeries::new(pairs).unwrap()
}

// Helper for a linearly rising series: values[i] = base + slope * i
fn linear_series(len: usize, base: f64, slope: f64) -> CaseSeries {
    let values: Vec<f64> = (0..len).map(|i| base + slope * i as f64).collect();
    series_from(&values)
}

#[rstest]
#[case(ModelType::Auto)]
#[case(ModelType::Linear)]
#[case(ModelType::Polynomial)]
fn test_short_series_rejected_for_any_model(#[case] model_type: ModelType) {
    let series = linear_series(9, 100.0, 10.0);

    let result = forecast(&series, 7, model_type);
    assert!(matches!(
        result.unwrap_err(),
        ForecastError::InsufficientData(_)
    ));
}

#[test]
fn test_zero_horizon_rejected() {
    let series = linear_series(30, 100.0, 10.0);

    let result = forecast(&series, 0, ModelType::Linear);
    assert!(matches!(
        result.unwrap_err(),
        ForecastError::InsufficientData(_)
    ));
}

#[test]
fn test_constant_series_shortcut() {
    let series = series_from(&[100.0; 10]);

    let result = forecast(&series, 5, ModelType::Auto).unwrap();

    assert_eq!(result.model_name, "constant");
    assert_eq!(result.predictions, vec![100.0; 5]);
    assert_eq!(result.mae, 0.0);
    assert_eq!(result.fit_quality, 1.0);
    assert_eq!(result.confidence_lower, vec![95.0; 5]);
    assert_eq!(result.confidence_upper, vec![105.0; 5]);
}

#[test]
fn test_auto_selects_best_penalized_holdout_score() {
    // Convex growth; the quadratic candidate should beat the line
    let values: Vec<f64> = (0..30).map(|i| 2.0 + 0.5 * (i * i) as f64).collect();
    let series = series_from(&values);

    let result = forecast(&series, 7, ModelType::Auto).unwrap();
    assert!(
        ["linear", "polynomial_2", "polynomial_3"].contains(&result.model_name.as_str()),
        "unexpected model: {}",
        result.model_name
    );

    // Recompute each candidate's penalized score over the same split
    let features = FeatureSet::from_series(&series).unwrap();
    let (train, test) = train_test_split(&features, 0.2).unwrap();

    let candidates = [
        ("linear", ModelKind::Linear),
        ("polynomial_2", ModelKind::Polynomial(2)),
        ("polynomial_3", ModelKind::Polynomial(3)),
    ];
    let mut scores = Vec::new();
    for (name, kind) in candidates {
        let score = apply_overfit_penalty(name, holdout_score(kind, &train, &test).unwrap());
        scores.push((name, score));
    }

    let selected = scores
        .iter()
        .find(|(name, _)| *name == result.model_name)
        .unwrap()
        .1;
    for (name, score) in &scores {
        assert!(
            selected >= *score,
            "{} scored {} above the selected {}",
            name,
            score,
            selected
        );
    }
}

#[test]
fn test_predictions_and_lower_bounds_non_negative() {
    // Falling counts drive the linear projection below zero
    let values: Vec<f64> = (0..12).map(|i| 550.0 - 50.0 * i as f64).collect();
    let series = series_from(&values);

    let result = forecast(&series, 5, ModelType::Linear).unwrap();

    assert!(result.predictions.iter().all(|p| *p >= 0.0));
    assert!(result.confidence_lower.iter().all(|l| *l >= 0.0));
}

#[test]
fn test_forecast_is_deterministic() {
    let mut values: Vec<f64> = (0..23).map(|i| 1000.0 + 25.0 * i as f64).collect();
    let last = *values.last().unwrap();
    values.extend((1..=7).map(|i| last + 50.0 * i as f64));
    let series = series_from(&values);

    let first = forecast(&series, 7, ModelType::Auto).unwrap();
    let second = forecast(&series, 7, ModelType::Auto).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_trend_correction_inert_below_fourteen_points() {
    // Slope break that would trigger the correction on a longer series
    let values = [
        100.0, 110.0, 120.0, 130.0, 140.0, 180.0, 220.0, 260.0, 300.0, 340.0, 380.0, 420.0,
    ];
    let series = series_from(&values);

    let result = forecast(&series, 5, ModelType::Linear).unwrap();

    // Expected: the raw full-series linear projection, clipped only
    let features = FeatureSet::from_series(&series).unwrap();
    let fitted = ModelKind::Linear.fit(&features).unwrap();
    let last_offset = features.offsets[features.len() - 1];
    let future_offsets: Vec<i64> = (1..=5).map(|i| last_offset + i).collect();
    let expected: Vec<f64> = fitted
        .predict(&future_offsets)
        .unwrap()
        .into_iter()
        .map(|p| p.max(0.0))
        .collect();

    assert_eq!(result.predictions, expected);
}

#[test]
fn test_linear_series_continues_slope() {
    // 30 daily points rising from 1000 at 50/day, no noise
    let series = linear_series(30, 1000.0, 50.0);

    let result = forecast(&series, 7, ModelType::Linear).unwrap();

    assert_eq!(result.model_name, "linear");
    assert!(result.mae < 1e-6);
    assert!(result.fit_quality > 0.999999);
    for (i, prediction) in result.predictions.iter().enumerate() {
        let expected = 1000.0 + 50.0 * (29 + i + 1) as f64;
        assert!(
            (prediction - expected).abs() < 1e-6,
            "step {}: {} vs {}",
            i,
            prediction,
            expected
        );
    }
}

#[test]
fn test_slope_break_diverges_from_naive_projection() {
    // First 23 points at slope 25, last 7 at slope 50
    let mut values: Vec<f64> = (0..23).map(|i| 1000.0 + 25.0 * i as f64).collect();
    let last = *values.last().unwrap();
    values.extend((1..=7).map(|i| last + 50.0 * i as f64));
    let series = series_from(&values);

    let result = forecast(&series, 7, ModelType::Linear).unwrap();

    // Naive projection: full-series linear fit, no correction
    let features = FeatureSet::from_series(&series).unwrap();
    let fitted = ModelKind::Linear.fit(&features).unwrap();
    let last_offset = features.offsets[features.len() - 1];
    let future_offsets: Vec<i64> = (1..=7).map(|i| last_offset + i).collect();
    let naive = fitted.predict(&future_offsets).unwrap();

    let recent = forecast_cases::trend::index_slope(&values[values.len() - 7..]).unwrap();
    let overall = forecast_cases::trend::index_slope(&values).unwrap();
    let adjustment = recent - overall;
    assert!(adjustment > 0.0);

    for (i, (corrected, naive)) in result.predictions.iter().zip(&naive).enumerate() {
        let divergence = corrected - naive;
        assert!(divergence > 0.0, "step {} did not diverge upward", i);
        assert!(
            (divergence - adjustment * (i + 1) as f64).abs() < 1e-6,
            "step {}: divergence {} not proportional to step index",
            i,
            divergence
        );
    }
}

#[rstest]
#[case("auto", ModelType::Auto)]
#[case("linear", ModelType::Linear)]
#[case("polynomial", ModelType::Polynomial)]
#[case("POLYNOMIAL", ModelType::Polynomial)]
#[case("quadratic", ModelType::Linear)]
#[case("", ModelType::Linear)]
fn test_model_type_parsing(#[case] input: &str, #[case] expected: ModelType) {
    assert_eq!(ModelType::from(input), expected);
}

#[test]
fn test_polynomial_degree_sized_by_series_length() {
    // 10 points: degree 10/5 = 2
    let short = linear_series(10, 50.0, 5.0);
    let result = forecast(&short, 3, ModelType::Polynomial).unwrap();
    assert_eq!(result.model_name, "polynomial_2");

    // 30 points: degree capped at 3
    let long = linear_series(30, 50.0, 5.0);
    let result = forecast(&long, 3, ModelType::Polynomial).unwrap();
    assert_eq!(result.model_name, "polynomial_3");
}

#[test]
fn test_simplified_entry_point_is_linear() {
    let series = linear_series(20, 200.0, 10.0);

    let (dates, predictions) = forecast_linear(&series, 7).unwrap();
    assert_eq!(dates.len(), 7);
    assert_eq!(predictions.len(), 7);

    let enhanced = forecast(&series, 7, ModelType::Linear).unwrap();
    assert_eq!(dates, enhanced.dates);
    for (simple, full) in predictions.iter().zip(&enhanced.predictions) {
        assert!((simple - full).abs() < 1e-9);
    }

    let short = linear_series(9, 200.0, 10.0);
    assert!(matches!(
        forecast_linear(&short, 7).unwrap_err(),
        ForecastError::InsufficientData(_)
    ));
}

#[test]
fn test_fit_quality_floored_at_zero() {
    // Sawtooth values fit a line worse than the mean would
    let values = [
        500.0, 100.0, 480.0, 90.0, 460.0, 80.0, 440.0, 70.0, 420.0, 60.0, 400.0, 50.0,
    ];
    let series = series_from(&values);

    let result = forecast(&series, 3, ModelType::Linear).unwrap();
    assert!(result.fit_quality >= 0.0);
}
