//! SMS over an Africa's Talking style HTTP gateway
//!
//! Form POST of `username`, `to`, `message` with the key in the `apiKey`
//! header.

use super::{NotificationError, SmsSender, check_response};
use async_trait::async_trait;

pub struct HttpSmsSender {
    client: reqwest::Client,
    url: String,
    username: String,
    api_key: String,
}

impl HttpSmsSender {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            username: username.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SmsSender for HttpSmsSender {
    async fn send(&self, to_phone: &str, message: &str) -> Result<(), NotificationError> {
        let resp = self
            .client
            .post(&self.url)
            .header("apiKey", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("username", self.username.as_str()),
                ("to", to_phone),
                ("message", message),
            ])
            .send()
            .await?;

        let body = check_response(resp).await?;
        tracing::debug!(to = %to_phone, response = %body, "SMS gateway response");
        Ok(())
    }
}
