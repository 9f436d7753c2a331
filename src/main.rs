use std::net::SocketAddr;
use std::sync::Arc;

use football_reminder_bot::config::Config;
use football_reminder_bot::football_data::FootballData;
use football_reminder_bot::jobs::{AppContext, keep_alive, run_report};
use football_reminder_bot::model::date_range::ReportMode;
use football_reminder_bot::scheduler::Scheduler;
use football_reminder_bot::server::{self, ServerState};
use football_reminder_bot::telegram::Telegram;
use football_reminder_bot::translations::Translations;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .try_init();

    let config = Config::from_env()?;
    let translations = Translations::load(&config.leagues_file, &config.teams_file)?;

    let telegram = Arc::new(Telegram::new(config.telegram_token.clone(), config.telegram_chat_id.clone()));
    let ctx = AppContext {
        source: Arc::new(FootballData::new(&config.football_api_url, config.football_api_key.clone())),
        notifier: telegram.clone(),
        translations: Arc::new(translations),
        team_ids: config.team_ids.clone(),
    };
    info!(team_ids = ?ctx.team_ids, "Configured teams");

    let mut scheduler = Scheduler::new();
    if let Some(schedule) = config.weekly_schedule {
        let ctx = ctx.clone();
        scheduler.add_cron("weekly_report", schedule, move |fired_at| {
            let outcome = run_report(&ctx, ReportMode::Weekly, fired_at.date_naive());
            info!(outcome = ?outcome, "Weekly report finished");
        });
    }
    if let Some(schedule) = config.daily_schedule {
        let ctx = ctx.clone();
        scheduler.add_cron("daily_report", schedule, move |fired_at| {
            let outcome = run_report(&ctx, ReportMode::Daily, fired_at.date_naive());
            info!(outcome = ?outcome, "Daily report finished");
        });
    }
    if let Some(period) = config.keepalive_interval {
        let self_url = config.self_url.clone();
        scheduler.add_interval("keep_alive", period, move || {
            // Failures are logged inside keep_alive
            let _ = keep_alive(&self_url);
        });
    }

    if scheduler.is_empty() {
        warn!("No jobs scheduled, only the HTTP routes are active");
    }

    let app = server::router(ServerState { notifier: telegram });
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Football bot listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    scheduler.shutdown();
    Ok(())
}
