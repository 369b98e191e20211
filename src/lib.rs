//! Herdbook is a web app for browsing and managing the financial records of
//! a livestock operation.
//!
//! All domain data lives in a remote livestock API; this library fetches it
//! per request and directly serves HTML pages.

#![warn(missing_docs)]

use std::{collections::BTreeMap, net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use maud::Markup;
use tokio::signal;

mod alert;
mod animal;
mod api;
mod app_state;
mod endpoints;
mod format;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod transaction;

pub use api::{ApiClient, ApiConfig};
pub use app_state::AppState;
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::{
    alert::AlertTemplate, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// Wrap maud markup in a response with the given status code.
#[inline]
pub(crate) fn render(status_code: StatusCode, markup: Markup) -> Response {
    (status_code, markup).into_response()
}

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A request to the livestock API failed before a response was received,
    /// or the response body was not valid JSON.
    ///
    /// The string is a best-effort description for the server logs. When
    /// communicating with the application client this error is replaced with
    /// a general message indicating the remote API could not be reached.
    #[error("request to the livestock API failed: {0}")]
    ApiRequest(String),

    /// The livestock API answered with a non-2xx status code.
    ///
    /// Carries the server-provided message when the response body contained
    /// one, otherwise the canonical reason for the status code.
    #[error("the livestock API returned status {status}: {message}")]
    ApiStatus {
        /// The HTTP status code of the response.
        status: u16,
        /// The server-provided error message, or the canonical status reason.
        message: String,
    },

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error occurs when the remote API answers 404 or when
    /// a detail dialog is requested for a field that does not exist.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The livestock API rejected a create or update with a structured
    /// field-to-message map of validation errors.
    #[error("the livestock API rejected the submitted fields")]
    Validation(BTreeMap<String, String>),

    /// The livestock API answered 2xx but the payload did not have any of the
    /// accepted shapes.
    #[error("unexpected payload from the livestock API: {0}")]
    UnexpectedPayload(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::ApiRequest(message) => {
                tracing::error!("could not reach the livestock API: {message}");
                InternalServerError {
                    description: "Could not reach the livestock API.",
                    fix: "Check that the API server is running and try again.",
                }
                .into_response()
            }
            Error::ApiStatus { status, message } => {
                tracing::error!("the livestock API returned status {status}: {message}");
                InternalServerError {
                    description: "The livestock API reported an error.",
                    fix: "Try again later or check the server logs.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::NotFound => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Transaction not found",
                    "Try refreshing the page to see if the transaction has already been deleted.",
                )
                .into_html(),
            ),
            Error::Validation(field_errors) => {
                let details = field_errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect::<Vec<_>>()
                    .join("; ");

                render(
                    StatusCode::BAD_REQUEST,
                    AlertTemplate::error("The livestock API rejected the form", &details)
                        .into_html(),
                )
            }
            Error::ApiStatus { status, message } => {
                tracing::error!("the livestock API returned status {status}: {message}");
                render(
                    StatusCode::BAD_GATEWAY,
                    AlertTemplate::error("The livestock API reported an error", &message)
                        .into_html(),
                )
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    AlertTemplate::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    )
                    .into_html(),
                )
            }
        }
    }
}
