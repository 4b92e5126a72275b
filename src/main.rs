// Main entry point - Dependency injection and dashboard lifecycle
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crate::application::dashboard_service::{DashboardService, DashboardSettings};
use crate::infrastructure::config::load_telemetry_config;
use crate::infrastructure::http_repository::HttpTelemetryRepository;
use crate::presentation::shell;
use crate::presentation::view::DashboardView;

// All state mutation interleaves on one executor thread; the fetch is the
// only suspension point.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_telemetry_config()?;
    let settings = DashboardSettings {
        poll_interval: Duration::from_millis(config.telemetry.poll_interval_ms),
        clock_interval: Duration::from_millis(config.telemetry.clock_interval_ms),
    };

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpTelemetryRepository::new(
        config.telemetry.endpoint.clone(),
    ));

    // Create service (application layer) and activate the dashboard
    let service = DashboardService::new(repository, settings);

    println!(
        "Polling {} every {}ms",
        config.telemetry.endpoint, config.telemetry.poll_interval_ms
    );
    let dashboard = service.activate();

    // Render loop (presentation layer) until Ctrl-C, then release the timers
    let mut render_timer = tokio::time::interval(settings.clock_interval);
    loop {
        tokio::select! {
            _ = render_timer.tick() => {
                let state = dashboard.snapshot().await;
                let view = DashboardView::from_state(&state);
                print!("\x1b[2J\x1b[H{}", shell::render(&view));
                let _ = std::io::stdout().flush();
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    dashboard.deactivate();

    Ok(())
}
