//! Speed Advisor - Main Entry Point

use advisor::{init_logging, AdviceRequest, Advisor};
use clap::{Parser, ValueEnum};
use settings::{AdminSettings, SettingsStore};
use speed_rules::{RoadSurface, TimeOfDay};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use weather_source::{ClientConfig, Location, OfflineSource, OpenMeteoClient, WeatherSource};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoadArg {
    #[value(alias = "paved")]
    Asphalt,
    #[value(alias = "unpaved")]
    Gravel,
}

impl From<RoadArg> for RoadSurface {
    fn from(arg: RoadArg) -> Self {
        match arg {
            RoadArg::Asphalt => RoadSurface::Paved,
            RoadArg::Gravel => RoadSurface::Unpaved,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TimeArg {
    Day,
    Night,
}

impl From<TimeArg> for TimeOfDay {
    fn from(arg: TimeArg) -> Self {
        match arg {
            TimeArg::Day => TimeOfDay::Day,
            TimeArg::Night => TimeOfDay::Night,
        }
    }
}

/// Recommend a maximum safe speed for current road and weather conditions
#[derive(Debug, Parser)]
#[command(name = "speed-advisor", version, about)]
struct Cli {
    /// Road surface
    #[arg(long, value_enum)]
    road: Option<RoadArg>,

    /// Time of day
    #[arg(long, value_enum)]
    time: Option<TimeArg>,

    /// Use simulated weather instead of Open-Meteo
    #[arg(long)]
    offline: bool,

    /// Latitude for the weather lookup
    #[arg(long, allow_hyphen_values = true, default_value_t = Location::COMODORO_RIVADAVIA.latitude)]
    lat: f64,

    /// Longitude for the weather lookup
    #[arg(long, allow_hyphen_values = true, default_value_t = Location::COMODORO_RIVADAVIA.longitude)]
    lon: f64,

    /// Admin settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full advice as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;

    info!("=== Speed Advisor v{} ===", env!("CARGO_PKG_VERSION"));

    let admin = AdminSettings::load(cli.config.as_deref())?;
    let source: Arc<dyn WeatherSource> = if cli.offline {
        Arc::new(OfflineSource::new())
    } else {
        Arc::new(OpenMeteoClient::new(ClientConfig::default())?)
    };
    let advisor = Advisor::new(source, SettingsStore::with_defaults(admin));

    let request = AdviceRequest {
        road_surface: cli.road.map(Into::into),
        time_of_day: cli.time.map(Into::into),
        offline: cli.offline,
        location: Location::new(cli.lat, cli.lon),
    };
    let advice = advisor.recommend(&request).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&advice)?);
    } else {
        println!(
            "Temperature: {:.1} °C  Precipitation: {:.1} mm  Weather: {}{}",
            advice.weather.temperature_c,
            advice.weather.precipitation_mm,
            advice.weather.category,
            if advice.weather_fallback { " (simulated)" } else { "" }
        );
        println!("Max speed: {} km/h", advice.decision.max_speed_kmh);
        println!("Reason: {}", advice.decision.reason());
    }

    Ok(())
}
