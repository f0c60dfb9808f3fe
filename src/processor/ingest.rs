use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use super::{geofence, speed, AlertPolicy, ProcessError};
use crate::db::{queries, DbPool};
use crate::models::location::{LocationPing, LocationUpdate};
use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Handles one ping end to end: ownership check, durable write, derived
/// status, then alerting.
///
/// The ping insert and the status update commit as one transaction. Alerting
/// runs in a second transaction afterwards; if it fails the ping stays
/// committed and the failure is only logged, so a transient alerting bug never
/// loses location data.
pub async fn process_update(
    pool: &DbPool,
    caller_user_id: Uuid,
    update: &LocationUpdate,
    policy: &AlertPolicy,
) -> Result<(), ProcessError> {
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let vehicle: Option<Vehicle> = sqlx::query_as(queries::SELECT_VEHICLE_FOR_OWNER)
        .bind(update.vehicle_id)
        .bind(caller_user_id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(vehicle) = vehicle else {
        // tx drops without commit: no side effects on the unauthorized path
        return Err(ProcessError::Unauthorized);
    };

    sqlx::query(queries::INSERT_LOCATION_PING)
        .bind(update.vehicle_id)
        .bind(update.latitude)
        .bind(update.longitude)
        .bind(update.speed)
        .bind(update.heading)
        .bind(update.accuracy)
        .bind(update.altitude)
        .bind(update.is_moving)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    let status = VehicleStatus::from_motion(update.is_moving);
    sqlx::query(queries::UPDATE_VEHICLE_STATUS)
        .bind(update.vehicle_id)
        .bind(status.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        vehicle_id = %update.vehicle_id,
        speed = update.speed,
        status = status.as_str(),
        "location recorded"
    );

    if let Err(e) = run_alerting(pool, &vehicle, update, policy, now).await {
        error!(
            vehicle_id = %update.vehicle_id,
            "alert evaluation failed after ping was recorded: {e}"
        );
    }

    Ok(())
}

/// Speed and geofence evaluation for one ping. The vehicle row lock taken up
/// front serializes this section per vehicle, across service instances: two
/// concurrent pings cannot both read the same geofence state or both pass the
/// alert dedup check.
async fn run_alerting(
    pool: &DbPool,
    vehicle: &Vehicle,
    update: &LocationUpdate,
    policy: &AlertPolicy,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(queries::LOCK_VEHICLE)
        .bind(vehicle.id)
        .execute(&mut *tx)
        .await?;

    speed::evaluate(&mut tx, vehicle, update, policy, now).await?;
    geofence::process(
        &mut tx,
        vehicle.id,
        vehicle.owner_id,
        update.latitude,
        update.longitude,
        policy,
        now,
    )
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Most recent ping for a vehicle, if any.
pub async fn latest_ping(
    pool: &DbPool,
    vehicle_id: Uuid,
) -> Result<Option<LocationPing>, sqlx::Error> {
    sqlx::query_as(queries::SELECT_LATEST_PING)
        .bind(vehicle_id)
        .fetch_optional(pool)
        .await
}

/// Ping history in ascending timestamp order, optionally bounded, capped at
/// 5000 rows.
pub async fn ping_history(
    pool: &DbPool,
    vehicle_id: Uuid,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<Vec<LocationPing>, sqlx::Error> {
    sqlx::query_as(queries::SELECT_PING_HISTORY)
        .bind(vehicle_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
}
