//! The endpoint for updating an existing transaction.

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

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionState {
    /// The client for the livestock API.
    pub api: ApiClient,
}

impl FromRef<AppState> for UpdateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for updating a transaction, redirects to the transactions
/// view on success.
///
/// The update is a partial merge: fields the form leaves blank are omitted
/// from the payload and therefore left untouched server-side.
pub async fn update_transaction_endpoint(
    State(state): State<UpdateTransactionState>,
    Path((animal_id, transaction_id)): Path<(String, String)>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let payload = form.into_payload();

    if let Err(error) = state
        .api
        .update_transaction(&animal_id, &transaction_id, &payload)
        .await
    {
        tracing::error!("could not update transaction {transaction_id}: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(format_endpoint(endpoints::TRANSACTIONS_VIEW, &[&animal_id])),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
