// Domain layer - pure telemetry types and transforms
pub mod chart;
pub mod daypart;
pub mod sample;
