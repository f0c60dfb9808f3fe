use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Body of `POST /location/update`, reported by the tracker app every ~10s.
#[derive(Debug, Deserialize)]
pub struct LocationUpdate {
    pub vehicle_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    /// km/h
    pub speed: f64,
    pub heading: Option<f64>,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub is_moving: bool,
}

impl LocationUpdate {
    /// Range checks, applied before any persistence attempt.
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude out of range: {}", self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!("longitude out of range: {}", self.longitude));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(format!("invalid speed: {}", self.speed));
        }
        Ok(())
    }
}

/// One stored row of `location_history`. Immutable once written.
#[derive(Debug, Serialize, FromRow)]
pub struct LocationPing {
    pub id: i64,
    pub vehicle_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub heading: Option<f64>,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub is_moving: bool,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tracker_payload() {
        let payload = r#"
        {
            "vehicle_id": "7b0f7a49-1d54-4c0e-9a6e-2f1f4c9e8d21",
            "latitude": 20.652494,
            "longitude": -100.391404,
            "speed": 63.5,
            "heading": 182.0,
            "accuracy": 4.8,
            "altitude": 1820.3,
            "is_moving": true
        }
        "#;

        let update: LocationUpdate = serde_json::from_str(payload).unwrap();
        assert_eq!(update.latitude, 20.652494);
        assert_eq!(update.longitude, -100.391404);
        assert_eq!(update.speed, 63.5);
        assert!(update.is_moving);
        assert!(update.validate().is_ok());
    }

    #[test]
    fn parses_payload_without_optional_fields() {
        let payload = r#"
        {
            "vehicle_id": "7b0f7a49-1d54-4c0e-9a6e-2f1f4c9e8d21",
            "latitude": 0.0,
            "longitude": 0.0,
            "speed": 0.0,
            "is_moving": false
        }
        "#;

        let update: LocationUpdate = serde_json::from_str(payload).unwrap();
        assert_eq!(update.heading, None);
        assert_eq!(update.accuracy, None);
        assert_eq!(update.altitude, None);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let mut update = LocationUpdate {
            vehicle_id: Uuid::new_v4(),
            latitude: 91.0,
            longitude: 0.0,
            speed: 10.0,
            heading: None,
            accuracy: None,
            altitude: None,
            is_moving: true,
        };
        assert!(update.validate().is_err());

        update.latitude = 45.0;
        update.longitude = -180.5;
        assert!(update.validate().is_err());

        update.longitude = -100.0;
        update.speed = -1.0;
        assert!(update.validate().is_err());

        update.speed = 80.0;
        assert!(update.validate().is_ok());
    }
}
