use anyhow::Result;
use chrono::Duration;
use dotenvy::dotenv;
use std::env;

use crate::processor::AlertPolicy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_host: String,
    pub http_port: u16,
    pub database_url: String,
    pub log_level: String,
    pub default_speed_limit_kmh: f64,
    pub speed_alert_high_factor: f64,
    pub alert_dedup_window_secs: i64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let http_host = env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        let db_host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let db_name = env::var("DB_DATABASE").unwrap_or_else(|_| "fleetwatch".to_string());
        let db_user = env::var("DB_USER").unwrap_or_else(|_| "fleetwatch".to_string());
        let db_pwd = env::var("DB_PWD").unwrap_or_else(|_| "fleetwatch".to_string());

        let database_url = format!(
            "postgres://{}:{}@{}:{}/{}",
            db_user, db_pwd, db_host, db_port, db_name
        );

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let default_speed_limit_kmh = env::var("DEFAULT_SPEED_LIMIT_KMH")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .unwrap_or(120.0);
        let speed_alert_high_factor = env::var("SPEED_ALERT_HIGH_FACTOR")
            .unwrap_or_else(|_| "1.3".to_string())
            .parse()
            .unwrap_or(1.3);
        let alert_dedup_window_secs = env::var("ALERT_DEDUP_WINDOW_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);

        Ok(Self {
            http_host,
            http_port,
            database_url,
            log_level,
            default_speed_limit_kmh,
            speed_alert_high_factor,
            alert_dedup_window_secs,
        })
    }

    pub fn alert_policy(&self) -> AlertPolicy {
        AlertPolicy {
            default_speed_limit_kmh: self.default_speed_limit_kmh,
            high_severity_factor: self.speed_alert_high_factor,
            dedup_window: Duration::seconds(self.alert_dedup_window_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_defaults() {
        let policy = AlertPolicy::default();
        assert_eq!(policy.default_speed_limit_kmh, 120.0);
        assert_eq!(policy.high_severity_factor, 1.3);
        assert_eq!(policy.dedup_window, Duration::minutes(5));
    }
}
