use chrono::{DateTime, Duration, Utc};
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::queries;
use crate::models::alert::AlertDraft;

/// Inserts the alert unless one of the same (vehicle, type) already exists
/// with a timestamp inside the trailing dedup window. Returns whether a row
/// was created; suppression is silent by design.
///
/// The check and the insert are one conditional statement, and callers hold
/// the per-vehicle row lock for the whole alerting transaction, so two
/// concurrent pings cannot both pass the window check.
pub async fn try_raise(
    tx: &mut Transaction<'_, Postgres>,
    draft: &AlertDraft,
    window: Duration,
    now: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let cutoff = now - window;

    let result = sqlx::query(queries::INSERT_ALERT_DEDUPED)
        .bind(Uuid::new_v4())
        .bind(draft.vehicle_id)
        .bind(draft.owner_id)
        .bind(draft.alert_type.as_str())
        .bind(draft.severity.as_str())
        .bind(&draft.message)
        .bind(draft.latitude)
        .bind(draft.longitude)
        .bind(now)
        .bind(cutoff)
        .execute(&mut **tx)
        .await?;

    let created = result.rows_affected() > 0;
    if created {
        info!(
            vehicle_id = %draft.vehicle_id,
            alert_type = draft.alert_type.as_str(),
            severity = draft.severity.as_str(),
            "alert raised"
        );
    } else {
        debug!(
            vehicle_id = %draft.vehicle_id,
            alert_type = draft.alert_type.as_str(),
            "alert suppressed by dedup window"
        );
    }
    Ok(created)
}
