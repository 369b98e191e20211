//! The endpoint for deleting a transaction.

use axum::{
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

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The client for the livestock API.
    pub api: ApiClient,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for deleting a transaction, redirects to the transactions
/// view on success.
///
/// A successful delete is followed by a summary refetch so the remote system
/// recomputes its aggregates before the page reloads. The refetch is best
/// effort: if it fails the delete still stands and the redirect proceeds, and
/// the summary view may briefly count the deleted transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path((animal_id, transaction_id)): Path<(String, String)>,
) -> Response {
    if let Err(error) = state
        .api
        .delete_transaction(&animal_id, &transaction_id)
        .await
    {
        tracing::error!("could not delete transaction {transaction_id}: {error}");

        return error.into_alert_response();
    }

    if let Err(error) = state.api.fetch_transaction_summary(&animal_id).await {
        tracing::warn!(
            "summary refetch after deleting transaction {transaction_id} failed: {error}"
        );
    }

    (
        HxRedirect(format_endpoint(endpoints::TRANSACTIONS_VIEW, &[&animal_id])),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
