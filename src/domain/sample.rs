// Sensor reading domain models
use chrono::{DateTime, Utc};

/// Most recent samples kept around for charting.
pub const WINDOW_CAPACITY: usize = 20;

/// One timestamped reading from the sensor gateway. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub lux: f64,
}

impl Sample {
    pub fn new(
        timestamp: DateTime<Utc>,
        temperature: f64,
        humidity: f64,
        soil_moisture: f64,
        lux: f64,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            soil_moisture,
            lux,
        }
    }

    /// Reading shown before the first successful fetch.
    pub fn placeholder() -> Self {
        Self {
            timestamp: DateTime::UNIX_EPOCH,
            temperature: 10.0,
            humidity: 0.0,
            soil_moisture: 0.0,
            lux: 0.0,
        }
    }
}

/// Latest reading plus the bounded window behind the charts.
///
/// The window always holds the last `min(WINDOW_CAPACITY, fetch length)`
/// samples of the most recent non-empty fetch, in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStore {
    pub latest: Sample,
    pub window: Vec<Sample>,
}

impl Default for SampleStore {
    fn default() -> Self {
        Self {
            latest: Sample::placeholder(),
            window: Vec::new(),
        }
    }
}

impl SampleStore {
    /// Applies one poll result. An empty result leaves the store untouched;
    /// a non-empty result replaces the window wholesale with the tail of the
    /// fetch and takes its last element as the latest reading. There is no
    /// partial-update path.
    pub fn apply_fetch(&self, raw: &[Sample]) -> SampleStore {
        match raw.last() {
            None => self.clone(),
            Some(last) => {
                let start = raw.len().saturating_sub(WINDOW_CAPACITY);
                SampleStore {
                    latest: last.clone(),
                    window: raw[start..].to_vec(),
                }
            }
        }
    }
}
