//! Email over an HTTP mail API
//!
//! JSON POST of `from`, `to`, `subject`, `text` with a bearer key.

use super::{EmailSender, NotificationError, check_response};
use async_trait::async_trait;
use serde::Serialize;

pub struct HttpEmailSender {
    client: reqwest::Client,
    url: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpEmailSender {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(
        &self,
        to_address: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&OutgoingEmail {
                from: &self.from,
                to: to_address,
                subject,
                text: body,
            })
            .send()
            .await?;

        check_response(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_posts_json_with_bearer_key() {
        let captured: Arc<Mutex<Vec<(String, serde_json::Value)>>> = Arc::default();
        let seen = captured.clone();
        let app = Router::new().route(
            "/send",
            post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                let seen = seen.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    seen.lock().unwrap().push((auth, body));
                    StatusCode::ACCEPTED
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let sender = HttpEmailSender::new(
            reqwest::Client::new(),
            format!("http://{addr}/send"),
            "mail-key",
            "noreply@localhost",
        );
        sender
            .send("admin@example.com", "Subject", "Body text")
            .await
            .unwrap();

        let seen = captured.lock().unwrap();
        let (auth, body) = &seen[0];
        assert_eq!(auth, "Bearer mail-key");
        assert_eq!(body["from"], "noreply@localhost");
        assert_eq!(body["to"], "admin@example.com");
        assert_eq!(body["subject"], "Subject");
        assert_eq!(body["text"], "Body text");
    }
}
