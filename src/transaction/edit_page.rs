//! The page for editing an existing transaction.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState,
    api::ApiClient,
    endpoints::{self, format_endpoint},
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    render,
};

use super::form::{SubmitMethod, transaction_form_view};

/// The state needed to render the edit page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The client for the livestock API.
    pub api: ApiClient,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Renders the page for editing a transaction, prefilled with its current
/// field values.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path((animal_id, transaction_id)): Path<(String, String)>,
) -> Response {
    let transaction = match state.api.get_transaction(&animal_id, &transaction_id).await {
        Ok(transaction) => transaction,
        Err(error) => return error.into_response(),
    };

    let transactions_route = format_endpoint(endpoints::TRANSACTIONS_VIEW, &[&animal_id]);
    let update_route = format_endpoint(
        endpoints::UPDATE_TRANSACTION,
        &[&animal_id, &transaction_id],
    );

    let nav_bar = NavBar::new(endpoints::ANIMALS_VIEW)
        .with_animal_link(&transactions_route, "Transactions")
        .into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE) {
            h1 class="text-2xl font-semibold mb-4" { "Edit Transaction" }

            (transaction_form_view(&update_route, SubmitMethod::Patch, Some(&transaction)))
        }
    };

    render(StatusCode::OK, base("Edit Transaction", &[], &content))
}

#[cfg(test)]
mod edit_page_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use scraper::{Html, Selector};

    use crate::api::{ApiClient, ApiConfig};

    use super::{EditTransactionPageState, get_edit_transaction_page};

    fn test_state(server: &mockito::Server) -> EditTransactionPageState {
        EditTransactionPageState {
            api: ApiClient::new(ApiConfig {
                base_url: server.url(),
                csrf_url: None,
                bearer_token: None,
            }),
        }
    }

    #[tokio::test]
    async fn form_is_prefilled_and_patches_the_update_route() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/animals/goat-7/transactions/txn-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": {"id": "txn-1", "transaction_type": "sale",
                    "price": "1200.50", "total_amount": 1380.57,
                    "seller_name": "R. Dickson", "buyer_name": "M. Weatherby"}}"#,
            )
            .create_async()
            .await;

        let response = get_edit_transaction_page(
            State(test_state(&server)),
            Path(("goat-7".to_owned(), "txn-1".to_owned())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document = Html::parse_document(&String::from_utf8_lossy(&body));

        let form_selector =
            Selector::parse("form[hx-patch=\"/animals/goat-7/transactions/txn-1\"]").unwrap();
        assert!(document.select(&form_selector).next().is_some());

        let price_selector = Selector::parse("input[name=\"price\"][value=\"1200.5\"]").unwrap();
        assert!(document.select(&price_selector).next().is_some());

        let seller_selector =
            Selector::parse("input[name=\"seller_name\"][value=\"R. Dickson\"]").unwrap();
        assert!(document.select(&seller_selector).next().is_some());
    }

    #[tokio::test]
    async fn missing_transaction_renders_the_not_found_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/animals/goat-7/transactions/missing")
            .with_status(404)
            .create_async()
            .await;

        let response = get_edit_transaction_page(
            State(test_state(&server)),
            Path(("goat-7".to_owned(), "missing".to_owned())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
