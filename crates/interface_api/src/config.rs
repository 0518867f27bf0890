//! API configuration

use serde::Deserialize;

use domain_identity::AdminAllowList;

/// API configuration
///
/// Read from `API_*` environment variables; `API_ADMIN_EMAILS` is a
/// comma-separated list.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// Log level
    pub log_level: String,
    /// Comma-separated emails granted the admin role at registration and login
    pub admin_emails: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 7 * 24 * 3600,
            database_url: "postgres://localhost/inkdex".to_string(),
            db_max_connections: 10,
            log_level: "info".to_string(),
            admin_emails: String::new(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The normalized admin allow-list
    pub fn admin_allow_list(&self) -> AdminAllowList {
        AdminAllowList::from_csv(&self.admin_emails)
    }
}
