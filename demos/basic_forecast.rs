use chrono::{Duration, NaiveDate};
use forecast_cases::{forecast_linear, CaseSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Cases: Basic Linear Forecast");
    println!("=====================================\n");

    // Create a synthetic cumulative series: 30 days, ~60 new cases a day
    println!("Creating sample data...");
    let series = create_sample_series();
    println!("Sample data created: {} daily points\n", series.len());

    // Project a week ahead with the simplified linear entry point
    println!("Forecasting 7 days ahead...");
    let (dates, predictions) = forecast_linear(&series, 7)?;

    for (date, prediction) in dates.iter().zip(&predictions) {
        println!("  {}: {:.0} cumulative cases", date, prediction);
    }

    println!("\nForecasting complete!");
    Ok(())
}

fn create_sample_series() -> CaseSeries {
    let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    let pairs = (0..30)
        .map(|i| {
            let wobble = if i % 3 == 0 { 12.0 } else { -8.0 };
            (
                start + Duration::days(i),
                4000.0 + 60.0 * i as f64 + wobble,
            )
        })
        .collect();

    CaseSeries::new(pairs).unwrap()
}
