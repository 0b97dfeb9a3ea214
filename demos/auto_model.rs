use chrono::{Duration, NaiveDate};
use forecast_cases::{forecast, CaseSeries, ModelType};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Cases: Automatic Model Selection");
    println!("=========================================\n");

    // A series with accelerating growth: the selector should prefer a
    // polynomial over the plain line
    println!("Creating sample data...");
    let series = create_accelerating_series();
    println!("Sample data created: {} daily points\n", series.len());

    println!("Running auto model selection...");
    let result = forecast(&series, 7, ModelType::Auto)?;

    println!("Selected model: {}", result.model_name);
    println!("In-sample MAE:  {:.2}", result.mae);
    println!("Fit quality:    {:.4}\n", result.fit_quality);

    println!("Forecast with 95% confidence bounds:");
    for i in 0..result.predictions.len() {
        println!(
            "  {}: {:.0}  [{:.0}, {:.0}]",
            result.dates[i], result.predictions[i], result.confidence_lower[i], result.confidence_upper[i]
        );
    }

    // The quality report the dashboard shows next to the chart
    let quality = series.quality_report();
    println!(
        "\nData quality: {} points from {} to {}, consistent: {}",
        quality.total_points, quality.date_range.0, quality.date_range.1, quality.consistent
    );

    Ok(())
}

fn create_accelerating_series() -> CaseSeries {
    let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    let pairs = (0..40)
        .map(|i| (start + Duration::days(i), 2000.0 + 3.0 * (i * i) as f64))
        .collect();

    CaseSeries::new(pairs).unwrap()
}
