//! Remote client for the StartGG GraphQL endpoint.
//!
//! Issues one operation per call and classifies the response envelope as
//! success-with-data, application error, or transport error. No schema is
//! assumed at this layer; narrowing the `data` object is the validator's job.

use reqwest::Client;
use serde_json::{Map, Value, json};
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::config::Config;
use crate::constants::{ERROR_BODY_EXCERPT_MAX_CHARS, HTTP_POOL_MAX_IDLE_PER_HOST};
use crate::error::AppError;

/// Creates a properly configured HTTP client with connection pooling and a
/// bounded per-request timeout. A timed-out call surfaces as a
/// transport-class failure rather than hanging the refresh cycle.
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// Creates an HTTP client for testing with default timeout
#[cfg(test)]
pub fn create_test_http_client() -> Client {
    create_http_client_with_timeout(crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS)
        .expect("Failed to create test HTTP client")
}

fn excerpt(text: &str) -> String {
    text.chars().take(ERROR_BODY_EXCERPT_MAX_CHARS).collect()
}

/// Executes a single GraphQL operation and returns the `data` object
/// unchanged.
///
/// Classification, in order:
/// - network timeout / connect failure -> `NetworkTimeout` / `NetworkConnection`
/// - non-2xx status -> `Transport` with status code and a truncated body excerpt
/// - top-level `errors` -> `Application` carrying that field verbatim
/// - top-level `errorId` -> `Application` carrying `{errorId, message}`
/// - missing or non-object `data` -> `Protocol`
#[instrument(skip(client, config, query))]
pub async fn execute(
    client: &Client,
    config: &Config,
    query: &str,
) -> Result<Map<String, Value>, AppError> {
    debug!("Executing GraphQL operation against {}", config.api_url);

    let response = match client
        .post(&config.api_url)
        .header("Accept", "application/json")
        .bearer_auth(&config.api_token)
        .json(&json!({ "query": query }))
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            error!("Request failed for URL {}: {}", config.api_url, e);
            return if e.is_timeout() {
                Err(AppError::network_timeout(&config.api_url))
            } else if e.is_connect() {
                Err(AppError::network_connection(&config.api_url, e.to_string()))
            } else {
                Err(AppError::ApiFetch(e))
            };
        }
    };

    let status = response.status();
    let body = response.text().await.map_err(AppError::ApiFetch)?;
    debug!("Response status: {status}, body length: {} bytes", body.len());

    if !status.is_success() {
        error!(
            "HTTP {} from StartGG API: {}",
            status.as_u16(),
            excerpt(&body)
        );
        return Err(AppError::transport(status.as_u16(), excerpt(&body)));
    }

    let parsed: Value = serde_json::from_str(&body)
        .map_err(|e| AppError::protocol(format!("response body is not valid JSON: {e}")))?;

    let Value::Object(mut envelope) = parsed else {
        return Err(AppError::protocol("non-object response from StartGG API"));
    };

    // GraphQL-level errors come back with a 200 status
    if let Some(errors) = envelope.get("errors")
        && !errors.is_null()
    {
        return Err(AppError::application(errors.to_string()));
    }

    // Service-specific error code, distinct from the `errors` array
    if let Some(error_id) = envelope.get("errorId")
        && !error_id.is_null()
    {
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error from StartGG API");
        return Err(AppError::application(format!(
            "{{\"errorId\":{error_id},\"message\":\"{message}\"}}"
        )));
    }

    match envelope.remove("data") {
        Some(Value::Object(data)) => Ok(data),
        Some(_) => Err(AppError::protocol("data field is not an object")),
        None => Err(AppError::protocol("no data in response from StartGG API")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_config(url: &str) -> Config {
        Config {
            api_token: "test-token".to_string(),
            api_url: url.to_string(),
            log_file_path: None,
            http_timeout_seconds: crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }

    #[tokio::test]
    async fn test_execute_returns_data_object() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"currentUser": {"id": 1}}})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = mock_config(&mock_server.uri());

        let data = execute(&client, &config, "{currentUser{id}}").await.unwrap();
        assert_eq!(data["currentUser"]["id"], json!(1));
    }

    #[tokio::test]
    async fn test_execute_non_2xx_is_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = mock_config(&mock_server.uri());

        let err = execute(&client, &config, "{}").await.unwrap_err();
        match err {
            AppError::Transport { status, excerpt } => {
                assert_eq!(status, 500);
                assert!(excerpt.contains("upstream exploded"));
            }
            other => panic!("Expected Transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_execute_errors_field_is_application_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"errors": [{"message": "Syntax Error"}], "data": null}),
            ))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = mock_config(&mock_server.uri());

        let err = execute(&client, &config, "{}").await.unwrap_err();
        match err {
            AppError::Application { details } => assert!(details.contains("Syntax Error")),
            other => panic!("Expected Application error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_execute_error_id_is_application_error_with_default_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errorId": 1006})))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = mock_config(&mock_server.uri());

        let err = execute(&client, &config, "{}").await.unwrap_err();
        match err {
            AppError::Application { details } => {
                assert!(details.contains("1006"));
                assert!(details.contains("Unknown error from StartGG API"));
            }
            other => panic!("Expected Application error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_execute_missing_data_is_protocol_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"extensions": {}})))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = mock_config(&mock_server.uri());

        let err = execute(&client, &config, "{}").await.unwrap_err();
        assert!(matches!(err, AppError::Protocol { .. }));
    }

    #[tokio::test]
    async fn test_execute_non_object_data_is_protocol_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [1, 2, 3]})))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = mock_config(&mock_server.uri());

        let err = execute(&client, &config, "{}").await.unwrap_err();
        assert!(matches!(err, AppError::Protocol { .. }));
    }

    #[tokio::test]
    async fn test_execute_non_object_body_is_protocol_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("just a string")))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let config = mock_config(&mock_server.uri());

        let err = execute(&client, &config, "{}").await.unwrap_err();
        assert!(matches!(err, AppError::Protocol { .. }));
    }
}
