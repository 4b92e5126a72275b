// Dashboard state record - the single mutation point for telemetry state
use chrono::{DateTime, Local};

use crate::domain::chart::ChartSeries;
use crate::domain::daypart::DerivedState;
use crate::domain::sample::{Sample, SampleStore};

/// Everything the dashboard shell reads. Owned by the composition layer and
/// mutated only through [`apply_fetch_result`](Self::apply_fetch_result)
/// (poll ticks) and [`tick`](Self::tick) (clock ticks); the two touch
/// disjoint fields, so no ordering between them matters.
#[derive(Debug, Clone)]
pub struct TelemetryDashboardState {
    store: SampleStore,
    chart: ChartSeries,
    clock: DateTime<Local>,
    derived: DerivedState,
    notifications: Vec<String>,
}

impl TelemetryDashboardState {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            store: SampleStore::default(),
            chart: ChartSeries::default(),
            derived: DerivedState::at(&now),
            clock: now,
            notifications: Vec::new(),
        }
    }

    /// Applies one successful poll. An empty result is "nothing new" and
    /// leaves everything untouched; a non-empty result replaces the store
    /// and rebuilds the chart projection from the new window.
    pub fn apply_fetch_result(&mut self, samples: &[Sample]) {
        if samples.is_empty() {
            return;
        }
        self.store = self.store.apply_fetch(samples);
        self.chart = ChartSeries::from_window(&self.store.window);
    }

    /// Advances the wall clock and recomputes the time-derived state.
    pub fn tick(&mut self, now: DateTime<Local>) {
        self.clock = now;
        self.derived = DerivedState::at(&now);
    }

    pub fn latest(&self) -> &Sample {
        &self.store.latest
    }

    pub fn window(&self) -> &[Sample] {
        &self.store.window
    }

    pub fn chart(&self) -> &ChartSeries {
        &self.chart
    }

    pub fn clock(&self) -> DateTime<Local> {
        self.clock
    }

    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    /// Passthrough list for out-of-scope producers; nothing writes to it
    /// here.
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }
}
