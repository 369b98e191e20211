//! The endpoint for creating a new transaction.

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    api::ApiClient,
    endpoints::{self, format_endpoint},
};

use super::form::TransactionForm;

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The client for the livestock API.
    pub api: ApiClient,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Path(animal_id): Path<String>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let payload = form.into_payload();

    if let Err(error) = state.api.create_transaction(&animal_id, &payload).await {
        tracing::error!("could not create a transaction for animal {animal_id}: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(format_endpoint(endpoints::TRANSACTIONS_VIEW, &[&animal_id])),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod create_endpoint_tests {
    use axum::{
        Form,
        body::Body,
        extract::{Path, State},
        http::{Response, StatusCode},
    };
    use axum_htmx::HX_REDIRECT;
    use serde_json::json;

    use crate::api::{ApiClient, ApiConfig};

    use super::{CreateTransactionState, TransactionForm, create_transaction_endpoint};

    fn test_state(server: &mockito::Server) -> CreateTransactionState {
        CreateTransactionState {
            api: ApiClient::new(ApiConfig {
                base_url: server.url(),
                csrf_url: None,
                bearer_token: None,
            }),
        }
    }

    #[tokio::test]
    async fn successful_create_redirects_to_the_transactions_view() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/animals/goat-7/transactions")
            .match_body(mockito::Matcher::Json(json!({
                "transaction_type": "sale",
                "price": 1200.5,
                "tax_amount": 180.25,
                "total_amount": 1380.75,
                "buyer_name": "M. Weatherby",
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"id": "txn-9", "total_amount": 1380.75}}"#)
            .create_async()
            .await;

        let form = TransactionForm {
            transaction_type: "sale".to_owned(),
            price: "1200.50".to_owned(),
            tax_amount: "180.25".to_owned(),
            buyer_name: "M. Weatherby".to_owned(),
            ..Default::default()
        };

        let response =
            create_transaction_endpoint(State(test_state(&server)), Path("goat-7".to_owned()), Form(form))
                .await;

        assert_redirects_to(response, "/animals/goat-7/transactions");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn validation_failure_answers_with_an_alert() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/animals/goat-7/transactions")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors": {"price": ["The price must be a number."]}}"#)
            .create_async()
            .await;

        let response = create_transaction_endpoint(
            State(test_state(&server)),
            Path("goat-7".to_owned()),
            Form(TransactionForm::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(HX_REDIRECT).is_none());

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body).to_string();
        assert!(text.contains("price: The price must be a number."));
    }

    #[track_caller]
    fn assert_redirects_to(response: Response<Body>, expected: &str) {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(location, expected);
    }
}
