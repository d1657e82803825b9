//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Poll interval for attendance/status-sensitive views
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(15);
/// Poll interval for notifications
pub const NOTIFICATION_POLL_INTERVAL: Duration = Duration::from_secs(60);
/// Consecutive 401 responses tolerated before the session is torn down
pub const UNAUTHORIZED_LOGOUT_THRESHOLD: u32 = 3;

/// Client configuration for connecting to the HR backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ATTENDO_API_URL | http://localhost:5000/api | REST base URL |
/// | ATTENDO_TIMEOUT_SECS | 30 | Request timeout |
/// | ATTENDO_WORK_DIR | ./.attendo | Token storage directory |
/// | ATTENDO_TOKEN | (none) | Pre-issued bearer token |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted session token
    pub work_dir: PathBuf,

    /// Interval for attendance status polling
    pub status_poll_interval: Duration,

    /// Interval for notification polling
    pub notification_poll_interval: Duration,

    /// Consecutive 401s before forced logout
    pub unauthorized_threshold: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            work_dir: PathBuf::from(".attendo"),
            status_poll_interval: STATUS_POLL_INTERVAL,
            notification_poll_interval: NOTIFICATION_POLL_INTERVAL,
            unauthorized_threshold: UNAUTHORIZED_LOGOUT_THRESHOLD,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("ATTENDO_API_URL").unwrap_or_else(|_| "http://localhost:5000/api".into()),
        );
        config.timeout = std::env::var("ATTENDO_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        if let Ok(dir) = std::env::var("ATTENDO_WORK_DIR") {
            config.work_dir = PathBuf::from(dir);
        }
        config.token = std::env::var("ATTENDO_TOKEN").ok().filter(|t| !t.is_empty());
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the token storage directory
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Override both poll intervals
    pub fn with_poll_intervals(mut self, status: Duration, notifications: Duration) -> Self {
        self.status_poll_interval = status;
        self.notification_poll_interval = notifications;
        self
    }

    /// Path of the persisted token file
    pub fn token_path(&self) -> PathBuf {
        self.work_dir.join("token")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000/api")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.status_poll_interval, Duration::from_secs(15));
        assert_eq!(config.notification_poll_interval, Duration::from_secs(60));
        assert_eq!(config.unauthorized_threshold, 3);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("http://hr.local/api")
            .with_token("abc")
            .with_timeout(5)
            .with_work_dir("/tmp/attendo");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.token_path(), PathBuf::from("/tmp/attendo/token"));
    }
}
