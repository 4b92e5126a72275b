// Dashboard lifecycle - owns the poll and clock timers
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::application::dashboard_state::TelemetryDashboardState;
use crate::application::telemetry_repository::TelemetryRepository;

/// Poll and clock cadence for an active dashboard.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSettings {
    pub poll_interval: Duration,
    pub clock_interval: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(5000),
            clock_interval: Duration::from_millis(1000),
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn TelemetryRepository>,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, settings: DashboardSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Creates fresh dashboard state and starts the poll and clock tasks.
    /// The returned handle owns both; deactivating (or dropping) it stops
    /// them. Repeated activate/deactivate cycles each get their own state
    /// and timers.
    pub fn activate(&self) -> ActiveDashboard {
        let state = Arc::new(RwLock::new(TelemetryDashboardState::new(Local::now())));
        let (active_tx, active_rx) = watch::channel(true);

        let poll_task = tokio::spawn(poll_loop(
            self.repository.clone(),
            state.clone(),
            self.settings.poll_interval,
            active_rx.clone(),
        ));
        let clock_task = tokio::spawn(clock_loop(
            state.clone(),
            self.settings.clock_interval,
            active_rx,
        ));

        ActiveDashboard {
            state,
            active: active_tx,
            poll_task,
            clock_task,
        }
    }
}

/// A running dashboard: both timers, the state they mutate, and the active
/// flag that in-flight fetches check before applying a late response.
pub struct ActiveDashboard {
    state: Arc<RwLock<TelemetryDashboardState>>,
    active: watch::Sender<bool>,
    poll_task: JoinHandle<()>,
    clock_task: JoinHandle<()>,
}

impl ActiveDashboard {
    /// Clones the current state for the presentational shell.
    pub async fn snapshot(&self) -> TelemetryDashboardState {
        self.state.read().await.clone()
    }

    /// Cancels all future ticks. Safe to call more than once; fetches still
    /// in flight see the lowered flag and discard their response.
    pub fn deactivate(&self) {
        let _ = self.active.send(false);
        self.poll_task.abort();
        self.clock_task.abort();
    }
}

impl Drop for ActiveDashboard {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// Fixed-rate poll driver. Each tick spawns its own fetch so a slow or
/// failed fetch never delays the next tick; overlapping fetches are
/// possible and whichever response resolves last is applied last.
async fn poll_loop(
    repository: Arc<dyn TelemetryRepository>,
    state: Arc<RwLock<TelemetryDashboardState>>,
    poll_interval: Duration,
    mut active: watch::Receiver<bool>,
) {
    let mut ticker = interval(poll_interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let repository = repository.clone();
                let state = state.clone();
                let active = active.clone();
                tokio::spawn(async move {
                    match repository.fetch_samples().await {
                        Ok(samples) => {
                            // Responses landing after deactivation must not
                            // resurrect state.
                            if !*active.borrow() {
                                return;
                            }
                            state.write().await.apply_fetch_result(&samples);
                        }
                        Err(e) => tracing::warn!("sensor poll failed: {}", e),
                    }
                });
            }
            changed = active.changed() => {
                if changed.is_err() || !*active.borrow() {
                    break;
                }
            }
        }
    }
}

async fn clock_loop(
    state: Arc<RwLock<TelemetryDashboardState>>,
    clock_interval: Duration,
    mut active: watch::Receiver<bool>,
) {
    let mut ticker = interval(clock_interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                state.write().await.tick(Local::now());
            }
            changed = active.changed() => {
                if changed.is_err() || !*active.borrow() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::telemetry_repository::FetchError;
    use crate::domain::daypart::DerivedState;
    use crate::domain::sample::Sample;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    enum PollScript {
        Ready(Vec<Sample>),
        Slow(Duration, Vec<Sample>),
        Fail,
    }

    /// Serves one scripted step per poll; once the script runs out every
    /// poll returns an empty result.
    struct ScriptedRepository {
        script: Mutex<VecDeque<PollScript>>,
    }

    impl ScriptedRepository {
        fn new(script: Vec<PollScript>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
            })
        }
    }

    #[async_trait]
    impl TelemetryRepository for ScriptedRepository {
        async fn fetch_samples(&self) -> Result<Vec<Sample>, FetchError> {
            let step = self.script.lock().unwrap().pop_front();
            match step {
                Some(PollScript::Ready(samples)) => Ok(samples),
                Some(PollScript::Slow(delay, samples)) => {
                    tokio::time::sleep(delay).await;
                    Ok(samples)
                }
                Some(PollScript::Fail) => {
                    Err(FetchError::Network(anyhow::anyhow!("connection refused")))
                }
                None => Ok(Vec::new()),
            }
        }
    }

    fn batch(start_minute: u32, count: usize) -> Vec<Sample> {
        (0..count)
            .map(|i| {
                let minute = start_minute + i as u32;
                Sample::new(
                    Utc.with_ymd_and_hms(2024, 5, 1, 10, minute, 0).unwrap(),
                    20.0 + minute as f64,
                    40.0,
                    55.0,
                    800.0,
                )
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn first_poll_fires_immediately_on_activation() {
        let repository = ScriptedRepository::new(vec![PollScript::Ready(batch(0, 3))]);
        let service = DashboardService::new(repository, DashboardSettings::default());
        let dashboard = service.activate();

        tokio::time::sleep(Duration::from_millis(10)).await;

        let state = dashboard.snapshot().await;
        assert_eq!(state.window().len(), 3);
        assert_eq!(state.latest(), &batch(0, 3)[2]);
        dashboard.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn empty_poll_leaves_state_untouched() {
        let repository = ScriptedRepository::new(vec![
            PollScript::Ready(batch(0, 5)),
            PollScript::Ready(Vec::new()),
        ]);
        let service = DashboardService::new(repository, DashboardSettings::default());
        let dashboard = service.activate();

        tokio::time::sleep(Duration::from_millis(10)).await;
        let before = dashboard.snapshot().await;

        tokio::time::sleep(Duration::from_secs(5)).await;
        let after = dashboard.snapshot().await;

        assert_eq!(after.latest(), before.latest());
        assert_eq!(after.window(), before.window());
        assert_eq!(after.chart(), before.chart());
        dashboard.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_poll_mutates_nothing_and_keeps_the_schedule() {
        let repository =
            ScriptedRepository::new(vec![PollScript::Fail, PollScript::Ready(batch(10, 2))]);
        let service = DashboardService::new(repository, DashboardSettings::default());
        let dashboard = service.activate();

        tokio::time::sleep(Duration::from_millis(10)).await;
        let state = dashboard.snapshot().await;
        assert!(state.window().is_empty());
        assert_eq!(state.latest().temperature, 10.0);

        // The next tick is due at activation + 5s regardless of the failure.
        tokio::time::sleep(Duration::from_secs(5)).await;
        let state = dashboard.snapshot().await;
        assert_eq!(state.window().len(), 2);
        assert_eq!(state.latest(), &batch(10, 2)[1]);
        dashboard.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_fetches_apply_in_resolution_order() {
        // Tick 1 resolves at t=12s, tick 2 at t=6s: the slower, staler
        // response lands last and wins.
        let stale = batch(0, 4);
        let fresh = batch(30, 2);
        let repository = ScriptedRepository::new(vec![
            PollScript::Slow(Duration::from_secs(12), stale.clone()),
            PollScript::Slow(Duration::from_secs(1), fresh.clone()),
        ]);
        let service = DashboardService::new(repository, DashboardSettings::default());
        let dashboard = service.activate();

        tokio::time::sleep(Duration::from_secs(7)).await;
        assert_eq!(dashboard.snapshot().await.latest(), &fresh[1]);

        tokio::time::sleep(Duration::from_secs(6)).await;
        let state = dashboard.snapshot().await;
        assert_eq!(state.latest(), &stale[3]);
        assert_eq!(state.window(), &stale[..]);
        dashboard.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn deactivation_discards_in_flight_responses() {
        let repository = ScriptedRepository::new(vec![PollScript::Slow(
            Duration::from_secs(10),
            batch(0, 1),
        )]);
        let service = DashboardService::new(repository, DashboardSettings::default());
        let dashboard = service.activate();

        tokio::time::sleep(Duration::from_millis(10)).await;
        dashboard.deactivate();

        tokio::time::sleep(Duration::from_secs(15)).await;
        assert!(dashboard.snapshot().await.window().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn deactivate_is_idempotent_and_stops_both_tasks() {
        let repository = ScriptedRepository::new(Vec::new());
        let service = DashboardService::new(repository, DashboardSettings::default());
        let dashboard = service.activate();

        tokio::time::sleep(Duration::from_millis(10)).await;
        dashboard.deactivate();
        dashboard.deactivate();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(dashboard.poll_task.is_finished());
        assert!(dashboard.clock_task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn each_activation_starts_from_fresh_state() {
        let repository = ScriptedRepository::new(vec![PollScript::Ready(batch(0, 3))]);
        let service = DashboardService::new(repository, DashboardSettings::default());

        let first = service.activate();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(first.snapshot().await.window().len(), 3);
        first.deactivate();

        let second = service.activate();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(second.snapshot().await.window().is_empty());
        second.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn clock_ticks_keep_derived_state_consistent() {
        let repository = ScriptedRepository::new(Vec::new());
        let service = DashboardService::new(repository, DashboardSettings::default());
        let dashboard = service.activate();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let state = dashboard.snapshot().await;
        assert_eq!(state.derived(), &DerivedState::at(&state.clock()));
        dashboard.deactivate();
    }
}
