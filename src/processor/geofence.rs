use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use super::{alerts, AlertPolicy};
use crate::db::queries;
use crate::geo;
use crate::models::alert::{AlertDraft, AlertType, Severity};
use crate::models::geofence::{Geofence, GeofenceEventType};

/// Edge-triggered transition rule. `was_inside` is the stored membership, or
/// `None` when the pair has never produced an event (treated as outside).
pub fn transition(is_inside: bool, was_inside: Option<bool>) -> Option<GeofenceEventType> {
    match (is_inside, was_inside.unwrap_or(false)) {
        (true, false) => Some(GeofenceEventType::Enter),
        (false, true) => Some(GeofenceEventType::Exit),
        _ => None,
    }
}

/// Checks the ping against every active geofence of the vehicle, appending a
/// transition event and upserting the current-state row whenever the
/// membership sense flips. Repeated pings on the same side of the boundary
/// write nothing.
///
/// The caller holds the vehicle row lock, so the state read and the event
/// write cannot interleave with another ping for the same vehicle.
pub async fn process(
    tx: &mut Transaction<'_, Postgres>,
    vehicle_id: Uuid,
    owner_id: Uuid,
    latitude: f64,
    longitude: f64,
    policy: &AlertPolicy,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    let geofences: Vec<Geofence> = sqlx::query_as(queries::SELECT_ACTIVE_GEOFENCES)
        .bind(vehicle_id)
        .fetch_all(&mut **tx)
        .await?;

    for geofence in &geofences {
        let distance =
            geo::haversine_distance(latitude, longitude, geofence.center_lat, geofence.center_lng);
        let is_inside = distance <= geofence.radius_m;

        let was_inside: Option<bool> = sqlx::query_scalar(queries::SELECT_GEOFENCE_STATE)
            .bind(geofence.id)
            .bind(vehicle_id)
            .fetch_optional(&mut **tx)
            .await?;

        let Some(event_type) = transition(is_inside, was_inside) else {
            continue;
        };

        sqlx::query(queries::INSERT_GEOFENCE_EVENT)
            .bind(geofence.id)
            .bind(vehicle_id)
            .bind(event_type.as_str())
            .bind(latitude)
            .bind(longitude)
            .bind(now)
            .execute(&mut **tx)
            .await?;

        sqlx::query(queries::UPSERT_GEOFENCE_STATE)
            .bind(geofence.id)
            .bind(vehicle_id)
            .bind(is_inside)
            .bind(now)
            .execute(&mut **tx)
            .await?;

        info!(
            vehicle_id = %vehicle_id,
            geofence = %geofence.name,
            event = event_type.as_str(),
            distance_m = distance,
            "geofence transition"
        );

        let (wants_alert, alert_type, message) = match event_type {
            GeofenceEventType::Enter => (
                geofence.alert_on_enter,
                AlertType::GeofenceEnter,
                format!("Vehicle entered geofence: {}", geofence.name),
            ),
            GeofenceEventType::Exit => (
                geofence.alert_on_exit,
                AlertType::GeofenceExit,
                format!("Vehicle exited geofence: {}", geofence.name),
            ),
        };

        if wants_alert {
            let draft = AlertDraft {
                vehicle_id,
                owner_id,
                alert_type,
                severity: Severity::Medium,
                message,
                latitude,
                longitude,
            };
            alerts::try_raise(tx, &draft, policy.dedup_window, now).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_distance;

    #[test]
    fn first_ping_inside_enters() {
        assert_eq!(transition(true, None), Some(GeofenceEventType::Enter));
    }

    #[test]
    fn first_ping_outside_is_silent() {
        assert_eq!(transition(false, None), None);
    }

    #[test]
    fn staying_on_one_side_writes_nothing() {
        assert_eq!(transition(true, Some(true)), None);
        assert_eq!(transition(false, Some(false)), None);
    }

    #[test]
    fn crossing_out_exits_only_after_enter() {
        assert_eq!(transition(false, Some(true)), Some(GeofenceEventType::Exit));
        // never previously inside: leaving range is not an exit
        assert_eq!(transition(false, Some(false)), None);
    }

    // Feed a ping sequence through the rule, carrying state forward the way
    // the engine does, and collect the produced events.
    fn run_sequence(memberships: &[bool]) -> Vec<GeofenceEventType> {
        let mut state: Option<bool> = None;
        let mut events = Vec::new();
        for &inside in memberships {
            if let Some(event) = transition(inside, state) {
                events.push(event);
                state = Some(inside);
            }
        }
        events
    }

    #[test]
    fn continuous_inside_produces_single_enter() {
        let events = run_sequence(&[true, true, true, true]);
        assert_eq!(events, vec![GeofenceEventType::Enter]);
    }

    #[test]
    fn inside_outside_inside_alternates() {
        let events = run_sequence(&[true, false, true]);
        assert_eq!(
            events,
            vec![
                GeofenceEventType::Enter,
                GeofenceEventType::Exit,
                GeofenceEventType::Enter,
            ]
        );
    }

    #[test]
    fn membership_boundary_is_inclusive() {
        let radius = 500.0;
        // ~400 m and ~600 m north of the center at (10, 10)
        let near = haversine_distance(10.0036, 10.0, 10.0, 10.0);
        let far = haversine_distance(10.0054, 10.0, 10.0, 10.0);
        assert!(near <= radius, "expected inside, distance {near}");
        assert!(far > radius, "expected outside, distance {far}");

        let events = run_sequence(&[far <= radius, near <= radius, far <= radius]);
        assert_eq!(
            events,
            vec![GeofenceEventType::Enter, GeofenceEventType::Exit]
        );
    }
}
