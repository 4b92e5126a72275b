// Read-only snapshot handed to the presentational shell
use crate::application::dashboard_state::TelemetryDashboardState;
use crate::domain::chart::ChartSeries;
use crate::domain::daypart::{Greeting, UiMode};
use crate::domain::sample::Sample;

/// Current values for the shell to render. The shell never feeds anything
/// back except activate/deactivate.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub latest: Sample,
    pub chart: ChartSeries,
    pub mode: UiMode,
    pub greeting: Greeting,
    pub background: &'static str,
    pub clock: String,
    pub date: String,
    pub notifications: Vec<String>,
}

impl DashboardView {
    pub fn from_state(state: &TelemetryDashboardState) -> Self {
        let derived = state.derived();
        Self {
            latest: state.latest().clone(),
            chart: state.chart().clone(),
            mode: derived.mode,
            greeting: derived.greeting,
            background: derived.background,
            clock: derived.clock.clone(),
            date: derived.date.clone(),
            notifications: state.notifications().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone, Utc};

    #[test]
    fn view_mirrors_the_state_record() {
        let mut state =
            TelemetryDashboardState::new(Local.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap());
        state.apply_fetch_result(&[Sample::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            21.5,
            40.0,
            55.0,
            800.0,
        )]);

        let view = DashboardView::from_state(&state);

        assert_eq!(view.latest.temperature, 21.5);
        assert_eq!(view.chart.labels.len(), 1);
        assert_eq!(view.mode, UiMode::Sunrise);
        assert_eq!(view.greeting, Greeting::Morning);
        assert_eq!(view.clock, "06:00:00");
        assert!(view.notifications.is_empty());
    }
}
