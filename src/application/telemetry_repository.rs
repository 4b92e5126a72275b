// Repository trait for sensor gateway access
use crate::domain::sample::Sample;
use async_trait::async_trait;
use thiserror::Error;

/// Failure of one poll. Both variants stay contained inside the polling
/// path: logged and discarded, never surfaced to the view.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("telemetry request failed: {0}")]
    Network(#[source] anyhow::Error),
    #[error("malformed telemetry payload: {0}")]
    MalformedResponse(#[source] anyhow::Error),
}

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// One poll of the sensor gateway: the full sample history in ascending
    /// order, possibly empty when nothing has been recorded yet.
    async fn fetch_samples(&self) -> Result<Vec<Sample>, FetchError>;
}
