//! Awan: scheduled weather posts for Bluesky.
//!
//! Reads its configuration from the environment (or flags), authenticates
//! with the PDS, then runs the daily scheduler loop until killed.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod daemon;

#[derive(Parser)]
#[command(name = "awan")]
#[command(about = "Scheduled weather posts for Bluesky", long_about = None)]
pub struct Cli {
    /// PDS URL
    #[arg(long, env = "AWAN_PDS_URL", default_value = "https://bsky.social")]
    pub pds_url: String,

    /// Account handle
    #[arg(long, env = "AWAN_HANDLE")]
    pub handle: String,

    /// App password
    #[arg(long, env = "AWAN_APP_PASSWORD")]
    pub app_password: String,

    /// Latitude of the reported location
    #[arg(long, env = "AWAN_LATITUDE", allow_hyphen_values = true)]
    pub latitude: f64,

    /// Longitude of the reported location
    #[arg(long, env = "AWAN_LONGITUDE", allow_hyphen_values = true)]
    pub longitude: f64,

    /// Location name used in the post text
    #[arg(long, env = "AWAN_LOCATION_NAME")]
    pub location_name: String,

    /// Daily schedule as comma-separated label=HH:MM pairs (24-hour)
    #[arg(
        long,
        env = "AWAN_SCHEDULE",
        default_value = "pagi=08:00,siang=12:00,sore=17:00,malam=20:00"
    )]
    pub schedule: String,

    /// Open-Meteo base URL
    #[arg(long, env = "AWAN_WEATHER_URL", default_value = awan_weather::DEFAULT_BASE_URL)]
    pub weather_url: String,

    /// Seconds between schedule scans
    #[arg(long, default_value = "30")]
    pub poll_interval: u64,

    /// Seconds between retry attempts within a firing
    #[arg(long, default_value = "30")]
    pub retry_pause: u64,

    /// Cap on retry attempts per firing; retries forever if unset
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "awan=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    daemon::run(cli).await
}
