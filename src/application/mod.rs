// Application layer - use cases and dashboard composition
pub mod dashboard_service;
pub mod dashboard_state;
pub mod telemetry_repository;
