//! Implements a struct that holds the state of the server.

use crate::api::ApiClient;

/// The state shared by all route handlers.
///
/// Handlers that only need part of the state define their own substate with a
/// `FromRef<AppState>` impl, so tests can construct just what they exercise.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the remote livestock API that owns all domain data.
    pub api: ApiClient,
}

impl AppState {
    /// Create a new [AppState] around a livestock API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}
