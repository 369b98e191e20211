//! The page served when a request fails for a reason the user cannot fix,
//! most often because the livestock API misbehaved.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The 500 page, parameterized so callers can hint at what broke.
pub struct InternalServerError<'a> {
    /// What went wrong, in user-facing terms.
    pub description: &'a str,
    /// What the user or operator can do about it.
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Something went wrong while preparing this page.",
            fix: "Try again in a moment, or check the server logs.",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_view("Internal Server Error", "500", self.description, self.fix),
        )
            .into_response()
    }
}

/// Renders the 500 page with its default text.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
