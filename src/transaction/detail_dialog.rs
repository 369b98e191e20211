//! The detail-disclosure dialog: a partial showing one long text field of one
//! transaction in full.
//!
//! The partial is swapped into the page's single `#modal` slot, so opening a
//! dialog replaces whatever dialog was open before and closing simply clears
//! the slot.

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::Response,
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    api::{ApiClient, Transaction},
    endpoints::{self, format_endpoint},
    format::{format_date, humanize_field, type_label},
    html::LINK_STYLE,
    render,
};

use super::list_view::LONG_TEXT_FIELDS;

/// The query parameters for the detail dialog.
#[derive(Debug, Deserialize)]
pub struct DetailDialogQuery {
    /// The snake_case name of the field to display.
    pub field: String,
}

/// The state needed to serve the detail dialog.
#[derive(Debug, Clone)]
pub struct DetailDialogState {
    /// The client for the livestock API.
    pub api: ApiClient,
}

impl FromRef<AppState> for DetailDialogState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Serves the dialog partial for one field of one transaction.
///
/// Requests for a field that is not disclosable, or that the transaction does
/// not have, answer 404.
pub async fn get_detail_dialog(
    State(state): State<DetailDialogState>,
    Path((animal_id, transaction_id)): Path<(String, String)>,
    Query(query): Query<DetailDialogQuery>,
) -> Response {
    let transaction = match state.api.get_transaction(&animal_id, &transaction_id).await {
        Ok(transaction) => transaction,
        Err(error) => return error.into_alert_response(),
    };

    let Some(content) = field_content(&transaction, &query.field) else {
        tracing::warn!(
            "requested the detail dialog for missing field {} of transaction {transaction_id}",
            query.field
        );
        return Error::NotFound.into_alert_response();
    };

    render(
        StatusCode::OK,
        dialog_view(&animal_id, &transaction, &query.field, content),
    )
}

/// Look up a disclosable field's content on the transaction.
fn field_content<'a>(transaction: &'a Transaction, field: &str) -> Option<&'a str> {
    LONG_TEXT_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .and_then(|(_, accessor)| accessor(transaction))
}

/// The dialog markup: the full text, a copy-to-clipboard action, and a link
/// to the edit page.
fn dialog_view(
    animal_id: &str,
    transaction: &Transaction,
    field: &str,
    content: &str,
) -> Markup {
    let field_label = humanize_field(field);
    let edit_route = format_endpoint(
        endpoints::EDIT_TRANSACTION_VIEW,
        &[animal_id, &transaction.id],
    );

    // Clipboard writes can be rejected (insecure context, permissions), so
    // both outcomes land in the toast.
    let copy_script = format!(
        "const toast = document.getElementById('dialog-copy-toast'); \
         navigator.clipboard.writeText(document.getElementById('dialog-full-text').textContent) \
           .then(() => {{ toast.textContent = 'Copied {field_label} to the clipboard.'; }}) \
           .catch(() => {{ toast.textContent = 'Could not copy to the clipboard.'; }}); \
         toast.classList.remove('hidden');"
    );

    html! {
        div
            class="fixed inset-0 z-40 flex items-center justify-center bg-black/50 p-4"
        {
            div
                class="w-full max-w-lg bg-white dark:bg-gray-800 rounded-lg shadow-lg p-6
                    text-gray-900 dark:text-white"
                role="dialog"
                aria-modal="true"
            {
                header class="flex items-center gap-2 mb-2" {
                    h2 class="text-lg font-semibold" { (field_label) }

                    span class="text-sm text-gray-600 dark:text-gray-400" {
                        (type_label(&transaction.transaction_type))
                        " on "
                        (format_date(&transaction.transaction_date))
                    }

                    button
                        type="button"
                        class="ms-auto font-bold cursor-pointer"
                        onclick="document.getElementById('modal').innerHTML = ''"
                    {
                        "×"
                    }
                }

                p
                    id="dialog-full-text"
                    class="whitespace-pre-wrap max-h-96 overflow-y-auto mb-4"
                {
                    (content)
                }

                p
                    id="dialog-copy-toast"
                    class="hidden text-sm text-green-700 dark:text-green-400 mb-2"
                    role="status"
                {}

                footer class="flex gap-4" {
                    button
                        type="button"
                        class=(LINK_STYLE)
                        onclick=(copy_script)
                    {
                        "Copy to clipboard"
                    }

                    a href=(edit_route) class=(LINK_STYLE) { "Edit" }
                }
            }
        }
    }
}
