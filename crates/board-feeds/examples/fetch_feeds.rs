//! Example: fetch a forecast and a quote and print them.
//!
//! # Running
//!
//! ```bash
//! WEATHER_KEY=... FINNHUB_TOKEN=... cargo run -p board-feeds --example fetch_feeds -- Chemnitz AAPL
//! ```

use board_feeds::{FeedError, FinanceClient, FinanceConfig, WeatherClient, WeatherConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut args = std::env::args().skip(1);
    let city = args.next().unwrap_or_else(|| "Chemnitz".to_string());
    let symbol = args.next().unwrap_or_else(|| "AAPL".to_string());

    let weather = WeatherClient::new(WeatherConfig {
        api_key: std::env::var("WEATHER_KEY").unwrap_or_default(),
        ..WeatherConfig::default()
    });
    let finance = FinanceClient::new(FinanceConfig {
        api_key: std::env::var("FINNHUB_TOKEN").unwrap_or_default(),
        ..FinanceConfig::default()
    });

    println!("Weather for {city}");
    match weather.forecast(&city).await {
        Ok(report) => {
            println!("  {}: {}", report.location.name, report.current.condition.text);
            println!("  Now: {:.1}°C", report.current.temp_c);
            if let Some(today) = report.today() {
                println!("  Min/Max: {:.1}°C / {:.1}°C", today.mintemp_c, today.maxtemp_c);
            }
        }
        Err(FeedError::MissingApiKey(_)) => println!("  (set WEATHER_KEY)"),
        Err(e) => println!("  error: {e}"),
    }

    println!();
    println!("Quote for {symbol}");
    match finance.quote(&symbol).await {
        Ok(quote) => {
            println!("  Price:  ${:.2}", quote.current_price);
            println!("  Change: {:+.2}%", quote.percent_change);
        }
        Err(FeedError::MissingApiKey(_)) => println!("  (set FINNHUB_TOKEN)"),
        Err(e) => println!("  error: {e}"),
    }
}
