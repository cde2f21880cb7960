//! Daemon wiring: schedule parsing, collaborator construction, shutdown.

use std::sync::Arc;
use std::time::Duration;

use miette::Result;
use tokio::sync::watch;
use tracing::{error, info};

use awan_bsky::BskyClient;
use awan_scheduler::{
    Producer, Publisher, RetryExecutor, RetryPolicy, ScheduleTable, SchedulerLoop, SystemClock,
};
use awan_weather::{OpenMeteoClient, render};

use crate::Cli;

/// Run the daemon until killed or interrupted.
pub async fn run(cli: Cli) -> Result<()> {
    let entries = parse_schedule_arg(&cli.schedule)?;
    let schedule = ScheduleTable::parse(entries).map_err(|e| miette::miette!("{}", e))?;
    info!(slots = schedule.len(), "schedule loaded");

    let bsky = Arc::new(BskyClient::new(&cli.pds_url));
    bsky.login(&cli.handle, &cli.app_password)
        .await
        .map_err(|e| miette::miette!("{}", e))?;
    info!(handle = %cli.handle, "authenticated with PDS");

    let weather = Arc::new(OpenMeteoClient::new(&cli.weather_url));

    let latitude = cli.latitude;
    let longitude = cli.longitude;
    let location_name = cli.location_name.clone();
    let producer: Producer = Box::new(move || {
        let weather = Arc::clone(&weather);
        let location_name = location_name.clone();
        Box::pin(async move {
            let current = weather
                .current(latitude, longitude)
                .await
                .map_err(|e| e.to_string())?;
            render(&current, &location_name).map_err(|e| e.to_string())
        })
    });

    let publisher: Publisher = Box::new(move |text: String| {
        let bsky = Arc::clone(&bsky);
        Box::pin(async move { bsky.publish(&text).await.map_err(|e| e.to_string()) })
    });

    let executor = RetryExecutor::new(RetryPolicy {
        pause: Duration::from_secs(cli.retry_pause),
        max_attempts: cli.max_attempts,
    });
    let mut scheduler = SchedulerLoop::new(SystemClock, schedule, executor)
        .with_poll_interval(Duration::from_secs(cli.poll_interval));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            return;
        }
        info!("ctrl-c received, shutting down");
        let _ = shutdown_tx.send(true);
    });

    scheduler.run(shutdown_rx, producer, publisher).await;
    Ok(())
}

/// Split an `AWAN_SCHEDULE`-style value into `(label, time)` pairs.
/// Time validation itself happens in [`ScheduleTable::parse`].
fn parse_schedule_arg(raw: &str) -> Result<Vec<(String, String)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.split_once('=')
                .map(|(label, time)| (label.trim().to_string(), time.trim().to_string()))
                .ok_or_else(|| {
                    miette::miette!("invalid schedule entry {:?}, expected label=HH:MM", part)
                })
        })
        .collect()
}
