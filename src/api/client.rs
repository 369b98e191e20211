//! The HTTP client for the livestock API.

use std::{sync::Arc, time::Duration};

use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::Error;

use super::{
    envelope::{parse_list_payload, parse_payload},
    models::{AnimalSummary, Transaction, TransactionPayload, TransactionSummary},
    session::ApiSession,
};

/// The settings needed to construct an [ApiClient].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// The base URL of the livestock API, e.g. "https://api.example.farm/v1".
    pub base_url: String,
    /// The URL of the CSRF token endpoint, if the API requires one.
    pub csrf_url: Option<String>,
    /// The bearer token identifying this deployment to the API.
    pub bearer_token: Option<String>,
}

/// Client for the remote livestock API, cheap to clone.
///
/// Every operation fetches fresh data; there is no cache and no retry. Errors
/// are logged here and returned to the caller, which decides how to surface
/// them.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<ApiSession>,
}

impl ApiClient {
    /// Create a client for the API at `config.base_url`.
    pub fn new(config: ApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            session: Arc::new(ApiSession::new(config.bearer_token, config.csrf_url)),
        }
    }

    /// List the animals known to the API.
    pub async fn fetch_animals(&self) -> Result<Vec<AnimalSummary>, Error> {
        let value = self
            .send(Method::GET, "/animals", None)
            .await
            .inspect_err(|error| tracing::error!("could not fetch animals: {error}"))?;

        parse_list_payload(value)
    }

    /// Fetch all transactions recorded for `animal_id`.
    ///
    /// Returns an empty list when the animal has no transactions.
    pub async fn fetch_transactions(&self, animal_id: &str) -> Result<Vec<Transaction>, Error> {
        let path = format!("/animals/{animal_id}/transactions");

        let value = self.send(Method::GET, &path, None).await.inspect_err(
            |error| tracing::error!("could not fetch transactions for animal {animal_id}: {error}"),
        )?;

        parse_list_payload(value)
    }

    /// Fetch the server-computed summary for `animal_id`.
    pub async fn fetch_transaction_summary(
        &self,
        animal_id: &str,
    ) -> Result<TransactionSummary, Error> {
        let path = format!("/animals/{animal_id}/transactions/summary");

        let value = self.send(Method::GET, &path, None).await.inspect_err(
            |error| tracing::error!("could not fetch the summary for animal {animal_id}: {error}"),
        )?;

        parse_payload(value)
    }

    /// Fetch a single transaction.
    ///
    /// # Errors
    /// Returns [Error::NotFound] when the API answers 404.
    pub async fn get_transaction(
        &self,
        animal_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction, Error> {
        let path = format!("/animals/{animal_id}/transactions/{transaction_id}");

        let value = self.send(Method::GET, &path, None).await.inspect_err(
            |error| tracing::error!("could not fetch transaction {transaction_id}: {error}"),
        )?;

        parse_payload(value)
    }

    /// Create a transaction for `animal_id` and return it as stored.
    pub async fn create_transaction(
        &self,
        animal_id: &str,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error> {
        let path = format!("/animals/{animal_id}/transactions");

        let value = self
            .send(Method::POST, &path, Some(payload))
            .await
            .inspect_err(|error| {
                tracing::error!("could not create a transaction for animal {animal_id}: {error}")
            })?;

        parse_payload(value)
    }

    /// Partially update a transaction; `None` fields are left untouched
    /// server-side.
    pub async fn update_transaction(
        &self,
        animal_id: &str,
        transaction_id: &str,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error> {
        let path = format!("/animals/{animal_id}/transactions/{transaction_id}");

        let value = self
            .send(Method::PATCH, &path, Some(payload))
            .await
            .inspect_err(|error| {
                tracing::error!("could not update transaction {transaction_id}: {error}")
            })?;

        parse_payload(value)
    }

    /// Delete a transaction. An empty response body is tolerated.
    pub async fn delete_transaction(
        &self,
        animal_id: &str,
        transaction_id: &str,
    ) -> Result<(), Error> {
        let path = format!("/animals/{animal_id}/transactions/{transaction_id}");

        self.send(Method::DELETE, &path, None)
            .await
            .inspect_err(|error| {
                tracing::error!("could not delete transaction {transaction_id}: {error}")
            })?;

        Ok(())
    }

    /// Issue a request with the session headers and read the response body.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&TransactionPayload>,
    ) -> Result<Value, Error> {
        let mut builder = self
            .http
            .request(method, format!("{}{path}", self.base_url));

        if let Some(token) = self.session.bearer_token() {
            builder = builder.bearer_auth(token);
        }

        if let Some(csrf_token) = self.session.csrf_token(&self.http).await {
            builder = builder.header("X-XSRF-TOKEN", csrf_token);
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| Error::ApiRequest(error.to_string()))?;

        read_response(response).await
    }
}

/// Map a response to its JSON payload or the matching [Error].
///
/// An empty 2xx body (e.g. from DELETE) becomes `Value::Null`.
async fn read_response(response: reqwest::Response) -> Result<Value, Error> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound);
    }

    let body = response
        .text()
        .await
        .map_err(|error| Error::ApiRequest(error.to_string()))?;

    if !status.is_success() {
        return Err(error_from_body(status, &body));
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body)
        .map_err(|error| Error::ApiRequest(format!("invalid JSON in response body: {error}")))
}

/// Build the error for a non-2xx response.
///
/// A 4xx body with a structured `errors` map becomes [Error::Validation];
/// otherwise the server's `message`/`error` string (or the canonical status
/// reason) is carried in [Error::ApiStatus].
fn error_from_body(status: StatusCode, body: &str) -> Error {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if status.is_client_error()
            && let Some(field_errors) = value.get("errors").and_then(Value::as_object)
        {
            let field_errors = field_errors
                .iter()
                .map(|(field, messages)| (field.clone(), first_message(messages)))
                .collect();

            return Error::Validation(field_errors);
        }

        if let Some(message) = value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(Value::as_str)
        {
            return Error::ApiStatus {
                status: status.as_u16(),
                message: message.to_owned(),
            };
        }
    }

    Error::ApiStatus {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned(),
    }
}

/// Validation messages arrive either as a string or a list of strings per
/// field; either way the first message is what gets displayed.
fn first_message(messages: &Value) -> String {
    match messages {
        Value::String(message) => message.clone(),
        Value::Array(messages) => messages
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod client_tests {
    use serde_json::json;

    use crate::{
        Error,
        api::{ApiConfig, TransactionPayload},
    };

    use super::ApiClient;

    fn test_client(server: &mockito::Server) -> ApiClient {
        ApiClient::new(ApiConfig {
            base_url: server.url(),
            csrf_url: None,
            bearer_token: Some("test-token".to_owned()),
        })
    }

    #[tokio::test]
    async fn fetch_transactions_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/animals/goat-7/transactions")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"id": "txn-1", "total_amount": 12.5}]}"#)
            .create_async()
            .await;

        let transactions = test_client(&server)
            .fetch_transactions("goat-7")
            .await
            .unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, "txn-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn csrf_token_is_fetched_and_attached() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/csrf")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "csrf-abc"}"#)
            .create_async()
            .await;
        let mock = server
            .mock("GET", "/animals/goat-7/transactions")
            .match_header("x-xsrf-token", "csrf-abc")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = ApiClient::new(ApiConfig {
            base_url: server.url(),
            csrf_url: Some(format!("{}/csrf", server.url())),
            bearer_token: None,
        });

        let transactions = client.fetch_transactions("goat-7").await.unwrap();

        assert!(transactions.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn csrf_fetch_failure_does_not_block_the_request() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/csrf")
            .with_status(500)
            .create_async()
            .await;
        let mock = server
            .mock("GET", "/animals/goat-7/transactions")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = ApiClient::new(ApiConfig {
            base_url: server.url(),
            csrf_url: Some(format!("{}/csrf", server.url())),
            bearer_token: None,
        });

        assert!(client.fetch_transactions("goat-7").await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_transaction_maps_404_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/animals/goat-7/transactions/missing")
            .with_status(404)
            .create_async()
            .await;

        let result = test_client(&server)
            .get_transaction("goat-7", "missing")
            .await;

        assert_eq!(result, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn validation_errors_surface_as_a_field_map() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/animals/goat-7/transactions")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"message": "The given data was invalid.",
                    "errors": {"price": ["The price must be a number."],
                               "buyer_name": "The buyer name is required."}}"#,
            )
            .create_async()
            .await;

        let result = test_client(&server)
            .create_transaction("goat-7", &TransactionPayload::default())
            .await;

        let Err(Error::Validation(field_errors)) = result else {
            panic!("expected a validation error, got {result:?}");
        };
        assert_eq!(field_errors["price"], "The price must be a number.");
        assert_eq!(field_errors["buyer_name"], "The buyer name is required.");
    }

    #[tokio::test]
    async fn server_error_carries_the_api_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/animals/goat-7/transactions/summary")
            .with_status(503)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "summary backend unavailable"}"#)
            .create_async()
            .await;

        let result = test_client(&server).fetch_transaction_summary("goat-7").await;

        assert_eq!(
            result,
            Err(Error::ApiStatus {
                status: 503,
                message: "summary backend unavailable".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn delete_tolerates_an_empty_response_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/animals/goat-7/transactions/txn-1")
            .with_status(204)
            .create_async()
            .await;

        let result = test_client(&server)
            .delete_transaction("goat-7", "txn-1")
            .await;

        assert_eq!(result, Ok(()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_omits_unset_fields_from_the_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/animals/goat-7/transactions/txn-1")
            .match_body(mockito::Matcher::Json(json!({"price": 150.0})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"id": "txn-1", "price": 150.0, "total_amount": 172.5}}"#)
            .create_async()
            .await;

        let payload = TransactionPayload {
            price: Some(150.0),
            ..Default::default()
        };

        let updated = test_client(&server)
            .update_transaction("goat-7", "txn-1", &payload)
            .await
            .unwrap();

        assert_eq!(updated.price, Some(150.0));
        mock.assert_async().await;
    }
}
