use chrono::Duration;
use thiserror::Error;

pub mod alerts;
pub mod geofence;
pub mod ingest;
pub mod speed;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("vehicle not found or not owned by caller")]
    Unauthorized,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Alerting knobs, loaded once from config and passed into every evaluation.
/// Time never comes from the wall clock inside the processor; the orchestrator
/// stamps `now` once per request.
#[derive(Debug, Clone)]
pub struct AlertPolicy {
    /// Ceiling applied when a vehicle has no configured speed limit, km/h.
    pub default_speed_limit_kmh: f64,
    /// Multiplier over the limit past which a speed alert is "high".
    pub high_severity_factor: f64,
    /// Trailing window inside which a second alert of the same kind for the
    /// same vehicle is suppressed.
    pub dedup_window: Duration,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            default_speed_limit_kmh: 120.0,
            high_severity_factor: 1.3,
            dedup_window: Duration::minutes(5),
        }
    }
}
