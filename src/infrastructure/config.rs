use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub endpoint: String,
    pub poll_interval_ms: u64,
    pub clock_interval_ms: u64,
}

/// Defaults mirror the sensor gateway's stock deployment; a
/// `config/telemetry.toml` next to the binary overrides them.
pub fn load_telemetry_config() -> anyhow::Result<TelemetryConfig> {
    let settings = config::Config::builder()
        .set_default("telemetry.endpoint", "http://localhost:5000/api/sensor_data")?
        .set_default("telemetry.poll_interval_ms", 5000_i64)?
        .set_default("telemetry.clock_interval_ms", 1000_i64)?
        .add_source(config::File::with_name("config/telemetry").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
