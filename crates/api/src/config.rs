use std::time::Duration;

use mindtwin_core::settings::{
    EngineSettings, DEFAULT_ANOMALY_THRESHOLD, DEFAULT_MAINTENANCE_LOOKAHEAD_HOURS,
    DEFAULT_OPTIMIZER_HORIZON_MINUTES, DEFAULT_TELEMETRY_LIMIT,
};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the backend telemetry source.
    pub backend_base_url: String,
    /// Timeout for a single telemetry fetch in seconds (default: `5`).
    pub telemetry_timeout_secs: u64,
    /// Scoring defaults handed to the evaluators.
    pub engine: EngineSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
            backend_base_url: "http://localhost:3000".to_string(),
            telemetry_timeout_secs: 5,
            engine: EngineSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `5000`                  |
    /// | `CORS_ORIGINS`                | `*`                     |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `BACKEND_BASE_URL`            | `http://localhost:3000` |
    /// | `TELEMETRY_LIMIT`             | `250`                   |
    /// | `TELEMETRY_TIMEOUT_SECS`      | `5`                     |
    /// | `ANOMALY_THRESHOLD`           | `0.7`                   |
    /// | `MAINTENANCE_LOOKAHEAD_HOURS` | `72`                    |
    /// | `OPTIMIZER_HORIZON_MINUTES`   | `30`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend_base_url = std::env::var("BACKEND_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into());

        let telemetry_timeout_secs: u64 = std::env::var("TELEMETRY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("TELEMETRY_TIMEOUT_SECS must be a valid u64");

        let engine = EngineSettings {
            anomaly_threshold: std::env::var("ANOMALY_THRESHOLD")
                .map(|v| v.parse().expect("ANOMALY_THRESHOLD must be a valid f64"))
                .unwrap_or(DEFAULT_ANOMALY_THRESHOLD),
            maintenance_lookahead_hours: std::env::var("MAINTENANCE_LOOKAHEAD_HOURS")
                .map(|v| {
                    v.parse()
                        .expect("MAINTENANCE_LOOKAHEAD_HOURS must be a valid u32")
                })
                .unwrap_or(DEFAULT_MAINTENANCE_LOOKAHEAD_HOURS),
            optimizer_horizon_minutes: std::env::var("OPTIMIZER_HORIZON_MINUTES")
                .map(|v| {
                    v.parse()
                        .expect("OPTIMIZER_HORIZON_MINUTES must be a valid u32")
                })
                .unwrap_or(DEFAULT_OPTIMIZER_HORIZON_MINUTES),
            telemetry_limit: std::env::var("TELEMETRY_LIMIT")
                .map(|v| v.parse().expect("TELEMETRY_LIMIT must be a valid u32"))
                .unwrap_or(DEFAULT_TELEMETRY_LIMIT),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            backend_base_url,
            telemetry_timeout_secs,
            engine,
        }
    }

    pub fn telemetry_timeout(&self) -> Duration {
        Duration::from_secs(self.telemetry_timeout_secs)
    }

    /// Whether CORS is open to any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        let origins = parse_origins(" http://a.test , ,http://b.test");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn wildcard_origin_is_detected() {
        let config = ServerConfig::default();
        assert!(config.allows_any_origin());

        let config = ServerConfig {
            cors_origins: vec!["http://localhost:5173".into()],
            ..ServerConfig::default()
        };
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn defaults_match_engine_settings() {
        let config = ServerConfig::default();
        assert_eq!(config.engine.anomaly_threshold, 0.7);
        assert_eq!(config.engine.maintenance_lookahead_hours, 72);
        assert_eq!(config.engine.optimizer_horizon_minutes, 30);
        assert_eq!(config.engine.telemetry_limit, 250);
        assert_eq!(config.telemetry_timeout(), Duration::from_secs(5));
    }
}
