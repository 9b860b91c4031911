//! MessageBird Messages REST API client.

use crate::error::MessageBirdError;
use crate::types::{Balance, ErrorResponse, MessageRequest, MessageResponse};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Public REST endpoint.
pub const DEFAULT_API_URL: &str = "https://rest.messagebird.com";

/// REST client for sending messages through MessageBird.
#[derive(Clone)]
pub struct MessageBirdClient {
    client: Client,
    base_url: String,
    access_key: SecretString,
}

impl MessageBirdClient {
    /// Create a new client against the given endpoint.
    pub fn new(
        base_url: impl Into<String>,
        access_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, MessageBirdError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            access_key,
        })
    }

    fn auth_header(&self) -> String {
        format!("AccessKey {}", self.access_key.expose_secret())
    }

    /// Submit one SMS to one recipient.
    ///
    /// `originator` is the number the recipient sees as the sender.
    #[instrument(skip(self, body))]
    pub async fn send_message(
        &self,
        originator: &str,
        recipient: &str,
        body: &str,
    ) -> Result<MessageResponse, MessageBirdError> {
        let url = format!("{}/messages", self.base_url);
        let request = MessageRequest {
            originator: originator.to_string(),
            recipients: vec![recipient.to_string()],
            body: body.to_string(),
        };

        debug!(url = %url, "Submitting message");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.auth_header())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(MessageBirdError::Unauthorized);
        }
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body_text)
                .ok()
                .and_then(|e| e.errors.into_iter().next())
                .map(|e| e.description)
                .unwrap_or(body_text);
            warn!(status = %status, message = %message, "Message submission rejected");

            return Err(MessageBirdError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let message: MessageResponse = response.json().await?;
        debug!(id = %message.id, "Message accepted");
        Ok(message)
    }

    /// Fetch the account balance.
    #[instrument(skip(self))]
    pub async fn balance(&self) -> Result<Balance, MessageBirdError> {
        let url = format!("{}/balance", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(MessageBirdError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MessageBirdError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.json().await?)
    }

    /// Check the API is reachable and the access key is accepted.
    pub async fn health_check(&self) -> bool {
        self.balance().await.is_ok()
    }
}
