pub const SELECT_VEHICLE_FOR_OWNER: &str = r#"
SELECT id, owner_id, speed_limit FROM vehicles WHERE id = $1 AND owner_id = $2;
"#;

pub const LOCK_VEHICLE: &str = r#"
SELECT id FROM vehicles WHERE id = $1 FOR UPDATE;
"#;

pub const INSERT_LOCATION_PING: &str = r#"
INSERT INTO location_history
    (vehicle_id, latitude, longitude, speed, heading, accuracy, altitude, is_moving, timestamp)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9);
"#;

pub const UPDATE_VEHICLE_STATUS: &str = r#"
UPDATE vehicles SET status = $2 WHERE id = $1;
"#;

pub const SELECT_ACTIVE_GEOFENCES: &str = r#"
SELECT id, vehicle_id, name, center_lat, center_lng, radius_m, alert_on_enter, alert_on_exit
FROM geofences
WHERE vehicle_id = $1 AND is_active = TRUE;
"#;

pub const SELECT_GEOFENCE_STATE: &str = r#"
SELECT is_inside FROM geofence_current_state WHERE geofence_id = $1 AND vehicle_id = $2;
"#;

pub const UPSERT_GEOFENCE_STATE: &str = r#"
INSERT INTO geofence_current_state (geofence_id, vehicle_id, is_inside, updated_at)
VALUES ($1, $2, $3, $4)
ON CONFLICT (geofence_id, vehicle_id) DO UPDATE
SET is_inside = $3,
    updated_at = $4;
"#;

pub const INSERT_GEOFENCE_EVENT: &str = r#"
INSERT INTO geofence_events (geofence_id, vehicle_id, event_type, latitude, longitude, timestamp)
VALUES ($1, $2, $3, $4, $5, $6);
"#;

pub const INSERT_ALERT_DEDUPED: &str = r#"
INSERT INTO alerts
    (id, vehicle_id, owner_id, alert_type, severity, message, latitude, longitude, timestamp, is_read)
SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE
WHERE NOT EXISTS (
    SELECT 1 FROM alerts
    WHERE vehicle_id = $2 AND alert_type = $4 AND timestamp > $10
);
"#;

pub const SELECT_LATEST_PING: &str = r#"
SELECT id, vehicle_id, latitude, longitude, speed, heading, accuracy, altitude, is_moving, timestamp
FROM location_history
WHERE vehicle_id = $1
ORDER BY timestamp DESC
LIMIT 1;
"#;

pub const SELECT_PING_HISTORY: &str = r#"
SELECT id, vehicle_id, latitude, longitude, speed, heading, accuracy, altitude, is_moving, timestamp
FROM location_history
WHERE vehicle_id = $1
  AND ($2::timestamptz IS NULL OR timestamp >= $2)
  AND ($3::timestamptz IS NULL OR timestamp <= $3)
ORDER BY timestamp ASC
LIMIT 5000;
"#;
