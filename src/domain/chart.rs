// Chart-ready projections of the sample window
use chrono::{DateTime, Local, Utc};

use super::sample::Sample;

/// Parallel arrays consumed by the line charts. Every vector stays
/// index-aligned with the window it was built from; an empty window yields
/// all-empty arrays, the valid "no data yet" state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub temperatures: Vec<f64>,
    pub humidities: Vec<f64>,
    pub soil_moistures: Vec<f64>,
}

impl ChartSeries {
    /// Fixed display bounds for the soil moisture chart.
    pub const SOIL_MOISTURE_Y_MIN: f64 = 0.0;
    pub const SOIL_MOISTURE_Y_MAX: f64 = 100.0;

    pub fn from_window(window: &[Sample]) -> Self {
        Self {
            labels: window.iter().map(|s| time_label(&s.timestamp)).collect(),
            temperatures: window.iter().map(|s| s.temperature).collect(),
            humidities: window.iter().map(|s| s.humidity).collect(),
            soil_moistures: window.iter().map(|s| s.soil_moisture).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Time-of-day label for one sample, rendered in local time.
fn time_label(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}
