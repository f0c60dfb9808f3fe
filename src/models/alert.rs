use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Speed,
    GeofenceEnter,
    GeofenceExit,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::GeofenceEnter => "geofence_enter",
            Self::GeofenceExit => "geofence_exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Candidate alert handed to the deduplicator. Becomes a row in `alerts` only
/// if no alert of the same (vehicle, type) exists inside the dedup window.
#[derive(Debug)]
pub struct AlertDraft {
    pub vehicle_id: Uuid,
    pub owner_id: Uuid,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: String,
    pub latitude: f64,
    pub longitude: f64,
}
