//! MessageBird REST API client for outbound SMS.

mod client;
mod error;
mod types;

pub use client::{MessageBirdClient, DEFAULT_API_URL};
pub use error::MessageBirdError;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> MessageBirdClient {
        MessageBirdClient::new(
            mock_server.uri(),
            SecretString::new("test-key".into()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let mock_server = MockServer::start().await;

        let expected_body = serde_json::json!({
            "originator": "31970901",
            "recipients": ["31970111"],
            "body": "David Driver will pick you up at 2024-01-01T10:00."
        });

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("Authorization", "AccessKey test-key"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "e8077d803532c0b5937c639b60216938",
                "href": "https://rest.messagebird.com/messages/e8077d803532c0b5937c639b60216938"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client
            .send_message(
                "31970901",
                "31970111",
                "David Driver will pick you up at 2024-01-01T10:00.",
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, "e8077d803532c0b5937c639b60216938");
    }

    #[tokio::test]
    async fn test_send_message_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.send_message("31970901", "31970111", "hello").await;

        assert!(matches!(result, Err(MessageBirdError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_send_message_api_error_uses_description() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "errors": [{
                    "code": 9,
                    "description": "no (correct) recipients found",
                    "parameter": "recipient"
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.send_message("31970901", "bogus", "hello").await;

        match result {
            Err(MessageBirdError::Api { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "no (correct) recipients found");
            }
            other => panic!("expected Api error, got {:?}", other.map(|m| m.id)),
        }
    }

    #[tokio::test]
    async fn test_send_message_api_error_falls_back_to_raw_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.send_message("31970901", "31970111", "hello").await;

        match result {
            Err(MessageBirdError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Api error, got {:?}", other.map(|m| m.id)),
        }
    }

    #[tokio::test]
    async fn test_balance() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/balance"))
            .and(header("Authorization", "AccessKey test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "payment": "prepaid",
                "type": "credits",
                "amount": 42.5
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let balance = client.balance().await.unwrap();

        assert_eq!(balance.payment, "prepaid");
        assert_eq!(balance.balance_type, "credits");
        assert!((balance.amount - 42.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_health_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/balance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "payment": "prepaid",
                "type": "credits",
                "amount": 1.0
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/balance"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(!client.health_check().await);
    }
}
