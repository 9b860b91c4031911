//! Outbound notification seam.
//!
//! The notifier returns a result value which callers inspect and log; the
//! triggering operation completes either way. The ride record is the source
//! of truth, delivery is advisory.

use async_trait::async_trait;
use messagebird_client::{MessageBirdClient, MessageBirdError};
use thiserror::Error;

/// Delivery failure reported by a notifier.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The carrier answered and refused the message.
    #[error("carrier rejected message: {0}")]
    Rejected(String),

    /// The carrier could not be reached.
    #[error("carrier unreachable: {0}")]
    Unreachable(String),
}

/// Sends one text to one recipient, shown as coming from `originator`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        originator: &str,
        recipient: &str,
        body: &str,
    ) -> Result<(), TransportError>;

    /// Whether the underlying transport looks reachable.
    async fn health_check(&self) -> bool {
        true
    }
}

#[async_trait]
impl Notifier for MessageBirdClient {
    async fn send(
        &self,
        originator: &str,
        recipient: &str,
        body: &str,
    ) -> Result<(), TransportError> {
        self.send_message(originator, recipient, body)
            .await
            .map(|_| ())
            .map_err(TransportError::from)
    }

    async fn health_check(&self) -> bool {
        MessageBirdClient::health_check(self).await
    }
}

impl From<MessageBirdError> for TransportError {
    fn from(err: MessageBirdError) -> Self {
        match err {
            MessageBirdError::Http(e) => TransportError::Unreachable(e.to_string()),
            MessageBirdError::Unauthorized => {
                TransportError::Rejected("authentication failed".to_string())
            }
            MessageBirdError::Api { status, message } => {
                TransportError::Rejected(format!("{} - {}", status, message))
            }
            MessageBirdError::Json(e) => TransportError::Rejected(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_maps_to_rejected() {
        let err = TransportError::from(MessageBirdError::Api {
            status: 422,
            message: "no (correct) recipients found".into(),
        });

        assert!(matches!(err, TransportError::Rejected(_)));
        assert_eq!(
            err.to_string(),
            "carrier rejected message: 422 - no (correct) recipients found"
        );
    }

    #[test]
    fn test_unauthorized_maps_to_rejected() {
        let err = TransportError::from(MessageBirdError::Unauthorized);
        assert!(matches!(err, TransportError::Rejected(_)));
    }
}
