use chrono::{Duration, NaiveDate};
use forecast_cases::trend::detect_trend_changes;
use forecast_cases::{forecast, CaseSeries, ForecastError, ModelType, SeriesLoader};
use std::io::Write;
use tempfile::NamedTempFile;

// Helper function to create a per-country CSV extract; rows are written
// out of order on purpose.
fn create_sample_extract() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "date,total_cases").unwrap();
    writeln!(file, "2021-03-03,1150").unwrap();
    writeln!(file, "2021-03-01,1000").unwrap();
    writeln!(file, "2021-03-02,1070").unwrap();
    for day in 4..=30 {
        writeln!(file, "2021-03-{:02},{}", day, 1000 + 75 * (day - 1)).unwrap();
    }

    file
}

#[test]
fn test_full_forecast_workflow() {
    // 1. Create a sample extract
    let extract = create_sample_extract();
    let file_path = extract.path().to_str().unwrap();

    // 2. Load the series; rows come back sorted by date
    let series = SeriesLoader::from_csv(file_path).unwrap();
    assert_eq!(series.len(), 30);
    let dates = series.dates();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());

    // 3. Check the quality report on a well-behaved series
    let quality = series.quality_report();
    assert_eq!(quality.total_points, 30);
    assert!(quality.consistent);
    assert_eq!(quality.zero_values, 0);
    assert_eq!(quality.negative_values, 0);
    assert_eq!(quality.significant_decreases, 0);

    // 4. Forecast a week ahead with auto selection
    let result = forecast(&series, 7, ModelType::Auto).unwrap();
    assert_eq!(result.predictions.len(), 7);
    assert_eq!(result.dates.len(), 7);
    assert_eq!(result.dates[0], NaiveDate::from_ymd_opt(2021, 3, 31).unwrap());
    assert!(result.predictions.iter().all(|p| *p >= 0.0));
    assert!(result.fit_quality >= 0.0);

    // 5. Serialize the payload the way the dashboard's API layer does
    let payload = serde_json::to_value(&result).unwrap();
    for field in [
        "dates",
        "predictions",
        "confidence_lower",
        "confidence_upper",
        "mae",
        "fit_quality",
        "model_name",
    ] {
        assert!(payload.get(field).is_some(), "missing field {}", field);
    }

    // 6. Test error handling
    let invalid_path = "/nonexistent/path.csv";
    let result = SeriesLoader::from_csv(invalid_path);
    assert!(result.is_err());

    let error = result.unwrap_err();
    assert!(matches!(error, ForecastError::IoError(_)));
}

#[test]
fn test_loader_rejects_missing_columns() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "country,population").unwrap();
    writeln!(file, "FR,67000000").unwrap();

    let result = SeriesLoader::from_csv(file.path().to_str().unwrap());
    assert!(matches!(
        result.unwrap_err(),
        ForecastError::DataError(_)
    ));
}

#[test]
fn test_quality_report_flags_reporting_corrections() {
    let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    let mut values = vec![5000.0, 5200.0, 5400.0, 5600.0, 5800.0];
    // A correction wipes out several days of counts
    values.extend([3500.0, 3700.0, 3900.0, 4100.0, 4300.0]);

    let pairs = values
        .iter()
        .enumerate()
        .map(|(i, v)| (start + Duration::days(i as i64), *v))
        .collect();
    let series = CaseSeries::new(pairs).unwrap();

    let quality = series.quality_report();
    assert!(!quality.consistent);
    assert_eq!(quality.significant_decreases, 1);
}

#[test]
fn test_quality_report_tolerates_small_dips() {
    let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    let values = [100.0, 120.0, 115.0, 130.0, 150.0, 145.0, 160.0];

    let pairs = values
        .iter()
        .enumerate()
        .map(|(i, v)| (start + Duration::days(i as i64), *v))
        .collect();
    let series = CaseSeries::new(pairs).unwrap();

    // Not monotonic, but no dip reaches the correction threshold
    let quality = series.quality_report();
    assert!(quality.consistent);
    assert_eq!(quality.significant_decreases, 0);
}

#[test]
fn test_trend_change_detection() {
    // Flat for three weeks, then a sharp ramp
    let mut values = vec![1000.0; 21];
    values.extend((1..=21).map(|i| 1000.0 + 400.0 * i as f64));

    let change_points = detect_trend_changes(&values, 7);
    assert!(!change_points.is_empty());
    // The detected points sit around the ramp onset, not in the flat part
    assert!(change_points.iter().all(|i| *i >= 14));

    // Too short for the rolling window: no change points
    let short = vec![1000.0; 13];
    assert!(detect_trend_changes(&short, 7).is_empty());
}

#[test]
fn test_empty_series_rejected() {
    assert!(matches!(
        CaseSeries::new(Vec::new()).unwrap_err(),
        ForecastError::DataError(_)
    ));
}
