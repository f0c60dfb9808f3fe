use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One circular region watched for a vehicle. Rows are managed by the
/// management API; this service only reads the active ones.
#[derive(Debug, FromRow)]
pub struct Geofence {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub name: String,
    pub center_lat: f64,
    pub center_lng: f64,
    /// meters
    pub radius_m: f64,
    pub alert_on_enter: bool,
    pub alert_on_exit: bool,
}

/// A recorded boundary crossing. Append-only; consecutive events for the same
/// (geofence, vehicle) pair always alternate type.
#[derive(Debug, FromRow)]
#[allow(dead_code)]
pub struct GeofenceEvent {
    pub id: i64,
    pub geofence_id: Uuid,
    pub vehicle_id: Uuid,
    pub event_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeofenceEventType {
    Enter,
    Exit,
}

impl GeofenceEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Exit => "exit",
        }
    }
}
