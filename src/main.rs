use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use hamro_weather::{
    insight, CurrentConditions, DailySample, DashboardService, HamroWeatherConfig,
    HamroWeatherError, PreferencesStore, Sample, Theme, Units,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Parsed command-line options
struct CliOptions {
    query: Option<String>,
    coords: Option<(f64, f64)>,
    units: Option<Units>,
    theme: Option<Theme>,
    no_insight: bool,
    clear_history: bool,
}

fn print_usage() {
    println!("Hamro Weather v{}", hamro_weather::VERSION);
    println!();
    println!("Usage: hamro-weather [OPTIONS] [PLACE]");
    println!();
    println!("Options:");
    println!("  --coords LAT,LON   Use a coordinate instead of a place name");
    println!("  --imperial         Fahrenheit and mph");
    println!("  --metric           Celsius and m/s (default)");
    println!("  --theme THEME      Persist theme preference (light|dark)");
    println!("  --no-insight       Skip the AI weather insight");
    println!("  --clear-history    Forget remembered searches");
    println!();
    println!("Environment: OWM_API_KEY (required), GEMINI_API_KEY (optional)");
}

fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions {
        query: None,
        coords: None,
        units: None,
        theme: None,
        no_insight: false,
        clear_history: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--coords" => {
                let value = iter
                    .next()
                    .ok_or_else(|| HamroWeatherError::validation("--coords expects LAT,LON"))?;
                options.coords = Some(parse_coords(value)?);
            }
            "--imperial" => options.units = Some(Units::Imperial),
            "--metric" => options.units = Some(Units::Metric),
            "--theme" => {
                let value = iter
                    .next()
                    .ok_or_else(|| HamroWeatherError::validation("--theme expects light|dark"))?;
                options.theme = Some(match value.as_str() {
                    "light" => Theme::Light,
                    "dark" => Theme::Dark,
                    other => {
                        return Err(HamroWeatherError::validation(format!(
                            "Unknown theme: {other}"
                        ))
                        .into())
                    }
                });
            }
            "--no-insight" => options.no_insight = true,
            "--clear-history" => options.clear_history = true,
            other if other.starts_with("--") => {
                return Err(
                    HamroWeatherError::validation(format!("Unknown option: {other}")).into(),
                );
            }
            place => {
                // Multi-word place names arrive as separate arguments
                match &mut options.query {
                    Some(query) => {
                        query.push(' ');
                        query.push_str(place);
                    }
                    None => options.query = Some(place.to_string()),
                }
            }
        }
    }

    Ok(options)
}

/// Parse a coordinate pair like "27.7172,85.3240"
fn parse_coords(input: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 2 {
        return Err(HamroWeatherError::validation("Coordinates must be in format 'lat,lon'").into());
    }

    let lat = parts[0]
        .parse::<f64>()
        .with_context(|| format!("Invalid latitude: {}", parts[0]))?;
    let lon = parts[1]
        .parse::<f64>()
        .with_context(|| format!("Invalid longitude: {}", parts[1]))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(HamroWeatherError::validation(format!(
            "Latitude must be between -90 and 90, got: {lat}"
        ))
        .into());
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(HamroWeatherError::validation(format!(
            "Longitude must be between -180 and 180, got: {lon}"
        ))
        .into());
    }

    Ok((lat, lon))
}

fn format_local_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string()
}

fn aqi_label(aqi: u8) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Fair",
        3 => "Moderate",
        4 => "Poor",
        5 => "Very Poor",
        _ => "Unknown",
    }
}

fn render_current(current: &CurrentConditions, units: Units, theme: Theme) {
    let sample = &current.sample;
    let description = sample
        .primary_condition()
        .map(|c| c.description.as_str())
        .unwrap_or("unknown");
    let symbol = units.temperature_symbol();

    println!(
        "Hamro Weather — {}, {} ({} theme)",
        current.name,
        current.country,
        match theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    );
    println!();

    for alert in &current.alerts {
        println!(
            "  [{}] {} — {} ({})",
            alert.severity.banner_label(),
            alert.event,
            alert.description,
            alert.sender_name
        );
    }
    if !current.alerts.is_empty() {
        println!();
    }

    println!("  {description}, {:.1}{symbol} (feels like {:.1}{symbol})", sample.temp, sample.feels_like);
    println!(
        "  Low {:.1}{symbol} / High {:.1}{symbol}   Humidity {}%   Wind {}",
        sample.temp_min,
        sample.temp_max,
        sample.humidity,
        sample.format_wind(units)
    );
    println!(
        "  Sunrise {}   Sunset {}",
        format_local_time(current.sunrise),
        format_local_time(current.sunset)
    );

    if let Some(uv) = sample.uv_index {
        println!("  UV index: {uv:.1}");
    }
    if let Some(aqi) = sample.aqi {
        print!("  Air quality: {} ({aqi}/5)", aqi_label(aqi));
        if let Some(pollutants) = &sample.pollutants {
            print!(
                "   PM2.5 {:.1} µg/m³   PM10 {:.1} µg/m³",
                pollutants.pm2_5, pollutants.pm10
            );
        }
        println!();
    }
    println!();
}

fn render_forecast(days: &[DailySample], units: Units) {
    if days.is_empty() {
        return;
    }
    let symbol = units.temperature_symbol();

    println!("5-Day Forecast:");
    for day in days {
        let sample: &Sample = &day.sample;
        let description = sample
            .primary_condition()
            .map(|c| c.description.as_str())
            .unwrap_or("unknown");

        let mut extras = String::new();
        if let Some(uv) = sample.uv_index {
            extras.push_str(&format!("   UV {uv:.1}"));
        }
        if let Some(aqi) = sample.aqi {
            extras.push_str(&format!("   AQI {}", aqi_label(aqi)));
        }

        println!(
            "  {}  {:>5.1}{symbol} / {:<5.1}{symbol}  {}{}",
            day.date.format("%a %b %d"),
            sample.temp_min,
            sample.temp_max,
            description,
            extras
        );
    }
    println!();
}

async fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    let config = HamroWeatherConfig::from_env()?;
    let store = PreferencesStore::open(&config.storage.path)?;

    if options.clear_history {
        store.clear_history().await?;
        println!("Search history cleared.");
    }

    if let Some(theme) = options.theme {
        store.set_theme(theme).await?;
    }
    let theme = store.theme().await?.unwrap_or(Theme::Light);

    let units = match options.units {
        Some(units) => {
            store.set_units(units).await?;
            units
        }
        None => store.units().await?.unwrap_or(Units::Metric),
    };

    if options.query.is_none() && options.coords.is_none() {
        print_usage();
        let history = store.history().await?;
        if !history.is_empty() {
            println!();
            println!("Recent searches: {}", history.join(", "));
        }
        return Ok(());
    }

    let service = DashboardService::new(&config)?;
    let token = service.tracker().begin();

    let current = match (&options.query, options.coords) {
        (_, Some((lat, lon))) => service.current_by_coords(lat, lon, units).await?,
        (Some(query), None) => service.current_by_query(query, units).await?,
        (None, None) => unreachable!("handled above"),
    };

    // A newer request would supersede this one; render only the latest.
    if !service.tracker().is_current(token) {
        debug!("Discarding superseded dashboard response");
        return Ok(());
    }

    store.record_search(&current.name).await?;

    // The insight runs in the background with its own error boundary while
    // the forecast is fetched and rendered.
    let insight_task = (!options.no_insight).then(|| {
        let insight_config = config.insight.clone();
        let insight_current = current.clone();
        tokio::spawn(
            async move { insight::weather_insight(&insight_config, &insight_current).await },
        )
    });

    let forecast = service
        .forecast(current.coord.lat, current.coord.lon, units)
        .await?;

    render_current(&current, units, theme);
    render_forecast(&forecast, units);

    if let Some(task) = insight_task {
        match task.await {
            Ok(text) => println!("Insight: {text}"),
            Err(e) => warn!("Insight task failed: {}", e),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        let message = match e.downcast_ref::<HamroWeatherError>() {
            Some(err) => err.user_message(),
            None => e.to_string(),
        };
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}
