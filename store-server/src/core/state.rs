//! Server state shared by every handler

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::notify::{EmailSender, HttpEmailSender, HttpSmsSender, Notifier, SmsSender};

/// Cheap to clone; all members are handles
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub notifier: Notifier,
}

impl ServerState {
    pub fn new(config: Config, db: DbService, notifier: Notifier) -> Self {
        Self {
            config,
            db,
            notifier,
        }
    }

    /// Open the database (applying migrations) and build the notifier
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        let notifier = build_notifier(config)?;
        Ok(Self::new(config.clone(), db, notifier))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}

fn build_notifier(config: &Config) -> Result<Notifier> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(config.notify_timeout_ms))
        .build()
        .map_err(|e| ServerError::Config(format!("failed to build HTTP client: {e}")))?;

    let sms: Option<Arc<dyn SmsSender>> = match (&config.at_username, &config.at_api_key) {
        (Some(username), Some(api_key)) => Some(Arc::new(HttpSmsSender::new(
            client.clone(),
            config.sms_api_url.clone(),
            username.clone(),
            api_key.clone(),
        ))),
        _ => {
            tracing::warn!("SMS notifications disabled: AT_USERNAME / AT_API_KEY not set");
            None
        }
    };

    let email: Option<Arc<dyn EmailSender>> = match (&config.email_api_url, &config.email_api_key)
    {
        (Some(url), Some(api_key)) => Some(Arc::new(HttpEmailSender::new(
            client,
            url.clone(),
            api_key.clone(),
            config.default_from_email.clone(),
        ))),
        _ => {
            tracing::warn!("Email notifications disabled: EMAIL_API_URL / EMAIL_API_KEY not set");
            None
        }
    };

    if config.admin_email.is_none() {
        tracing::warn!("ADMIN_EMAIL not set, order summaries will not be emailed");
    }

    Ok(Notifier::new(sms, email, config.admin_email.clone()))
}
