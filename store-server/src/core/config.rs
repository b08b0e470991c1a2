/// Default SMS gateway (Africa's Talking sandbox)
pub const DEFAULT_SMS_API_URL: &str = "https://api.sandbox.africastalking.com/version1/messaging";

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_PATH | store.db | SQLite database file |
/// | HTTP_PORT | 8000 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | default log level (RUST_LOG wins) |
/// | LOG_DIR | - | daily rolling log directory |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
/// | NOTIFY_TIMEOUT_MS | 5000 | outbound SMS/email timeout |
/// | SMS_API_URL | Africa's Talking sandbox | SMS gateway |
/// | AT_USERNAME / AT_API_KEY | - | SMS credentials |
/// | EMAIL_API_URL / EMAIL_API_KEY | - | HTTP mail API |
/// | DEFAULT_FROM_EMAIL | noreply@localhost | sender address |
/// | ADMIN_EMAIL | - | order summary recipient |
///
/// A channel whose settings are missing stays disabled; orders are still
/// accepted.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub http_port: u16,
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub request_timeout_ms: u64,
    pub notify_timeout_ms: u64,

    // === Notifications ===
    pub sms_api_url: String,
    pub at_username: Option<String>,
    pub at_api_key: Option<String>,
    pub email_api_url: Option<String>,
    pub email_api_key: Option<String>,
    pub default_from_email: String,
    pub admin_email: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "store.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: optional("LOG_DIR"),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            notify_timeout_ms: std::env::var("NOTIFY_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            sms_api_url: optional("SMS_API_URL").unwrap_or_else(|| DEFAULT_SMS_API_URL.into()),
            at_username: optional("AT_USERNAME"),
            at_api_key: optional("AT_API_KEY"),
            email_api_url: optional("EMAIL_API_URL"),
            email_api_key: optional("EMAIL_API_KEY"),
            default_from_email: optional("DEFAULT_FROM_EMAIL")
                .unwrap_or_else(|| "noreply@localhost".into()),
            admin_email: optional("ADMIN_EMAIL"),
        }
    }

    /// Configuration for tests: given database file, no notification channels
    pub fn with_database(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            http_port: 0,
            environment: "test".into(),
            log_level: "debug".into(),
            log_dir: None,
            request_timeout_ms: 30000,
            notify_timeout_ms: 5000,
            sms_api_url: DEFAULT_SMS_API_URL.into(),
            at_username: None,
            at_api_key: None,
            email_api_url: None,
            email_api_key: None,
            default_from_email: "noreply@localhost".into(),
            admin_email: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Set and non-empty
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
