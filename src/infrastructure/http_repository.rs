// HTTP adapter for the sensor gateway
use crate::application::telemetry_repository::{FetchError, TelemetryRepository};
use crate::domain::sample::Sample;
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct HttpTelemetryRepository {
    client: reqwest::Client,
    endpoint: String,
}

/// One element of the gateway's JSON array, before validation.
#[derive(Debug, Deserialize)]
struct RawSample {
    timestamp: String,
    temperature: f64,
    humidity: f64,
    soil_moisture: f64,
    lux: f64,
}

impl RawSample {
    fn validate(self) -> Result<Sample, FetchError> {
        let timestamp = parse_timestamp(&self.timestamp)?;
        Ok(Sample::new(
            timestamp,
            self.temperature,
            self.humidity,
            self.soil_moisture,
            self.lux,
        ))
    }
}

/// The gateway serves ISO-8601 timestamps, with or without a zone suffix;
/// zone-less values are taken as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, FetchError> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|t| t.and_utc())
        .map_err(|e| FetchError::MalformedResponse(anyhow!("bad timestamp {raw:?}: {e}")))
}

impl HttpTelemetryRepository {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl TelemetryRepository for HttpTelemetryRepository {
    async fn fetch_samples(&self) -> Result<Vec<Sample>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(anyhow!(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(anyhow!(
                "sensor gateway returned {}",
                status
            )));
        }

        let raw: Vec<RawSample> = response
            .json()
            .await
            .map_err(|e| FetchError::MalformedResponse(anyhow!(e)))?;

        raw.into_iter().map(RawSample::validate).collect()
    }
}
