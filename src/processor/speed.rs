use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

use super::{alerts, AlertPolicy};
use crate::models::alert::{AlertDraft, AlertType, Severity};
use crate::models::location::LocationUpdate;
use crate::models::vehicle::Vehicle;

/// Severity of a speed reading against a limit, or `None` when no violation.
/// Both thresholds are strict: speed equal to the limit does not alert, and
/// speed equal to `factor * limit` stays "medium".
pub fn classify(speed_kmh: f64, limit_kmh: f64, high_factor: f64) -> Option<Severity> {
    if speed_kmh <= limit_kmh {
        return None;
    }
    if speed_kmh > limit_kmh * high_factor {
        Some(Severity::High)
    } else {
        Some(Severity::Medium)
    }
}

pub fn violation_message(speed_kmh: f64, limit_kmh: f64) -> String {
    format!(
        "Speed alert: {:.1} km/h exceeds limit of {} km/h",
        speed_kmh, limit_kmh
    )
}

/// Checks the ping against the vehicle's limit (or the policy default) and
/// hands a violation to the deduplicator.
pub async fn evaluate(
    tx: &mut Transaction<'_, Postgres>,
    vehicle: &Vehicle,
    update: &LocationUpdate,
    policy: &AlertPolicy,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    let limit = vehicle
        .speed_limit
        .unwrap_or(policy.default_speed_limit_kmh);

    let Some(severity) = classify(update.speed, limit, policy.high_severity_factor) else {
        return Ok(());
    };

    let draft = AlertDraft {
        vehicle_id: vehicle.id,
        owner_id: vehicle.owner_id,
        alert_type: AlertType::Speed,
        severity,
        message: violation_message(update.speed, limit),
        latitude: update.latitude,
        longitude: update.longitude,
    };

    alerts::try_raise(tx, &draft, policy.dedup_window, now).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_alert_at_or_below_limit() {
        assert_eq!(classify(100.0, 120.0, 1.3), None);
        assert_eq!(classify(120.0, 120.0, 1.3), None);
    }

    #[test]
    fn medium_between_limit_and_high_threshold() {
        assert_eq!(classify(130.0, 120.0, 1.3), Some(Severity::Medium));
        // 1.3 * 120 = 156; equal stays medium, strictly above is high
        assert_eq!(classify(156.0, 120.0, 1.3), Some(Severity::Medium));
    }

    #[test]
    fn high_above_factor_times_limit() {
        assert_eq!(classify(156.1, 120.0, 1.3), Some(Severity::High));
        assert_eq!(classify(170.0, 120.0, 1.3), Some(Severity::High));
    }

    #[test]
    fn message_names_speed_and_limit() {
        let msg = violation_message(130.0, 120.0);
        assert!(msg.contains("130.0"), "{msg}");
        assert!(msg.contains("120"), "{msg}");

        let msg = violation_message(87.26, 80.0);
        assert!(msg.contains("87.3"), "{msg}");
    }
}
