//! The session shared by every livestock API call.
//!
//! The API expects a bearer token on every request and an `X-XSRF-TOKEN`
//! header sourced from a separate CSRF endpoint. The CSRF token is short
//! lived but not single use, so instead of a pre-flight fetch per request the
//! session caches it and refreshes only when stale. Fetch failures are logged
//! and the request proceeds without the header; the API treats it as
//! best-effort.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// How long a fetched CSRF token is considered fresh.
const CSRF_TOKEN_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    fetched_at: Instant,
}

/// Holds the bearer token and the cached CSRF token for the API client.
#[derive(Debug)]
pub(super) struct ApiSession {
    bearer_token: Option<String>,
    csrf_url: Option<String>,
    csrf_token: Mutex<Option<CachedToken>>,
}

impl ApiSession {
    pub(super) fn new(bearer_token: Option<String>, csrf_url: Option<String>) -> Self {
        Self {
            bearer_token,
            csrf_url,
            csrf_token: Mutex::new(None),
        }
    }

    /// The configured bearer token, if any.
    pub(super) fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// The current CSRF token, refreshed via `http` when missing or stale.
    ///
    /// Returns `None` when no CSRF endpoint is configured or the fetch fails;
    /// the caller should proceed without the header.
    pub(super) async fn csrf_token(&self, http: &reqwest::Client) -> Option<String> {
        let csrf_url = self.csrf_url.as_deref()?;

        let mut cached = self.csrf_token.lock().await;

        if let Some(token) = cached.as_ref()
            && token.fetched_at.elapsed() < CSRF_TOKEN_TTL
        {
            return Some(token.token.clone());
        }

        match fetch_csrf_token(http, csrf_url).await {
            Some(token) => {
                *cached = Some(CachedToken {
                    token: token.clone(),
                    fetched_at: Instant::now(),
                });
                Some(token)
            }
            None => {
                // Keep serving a stale token rather than nothing.
                cached.as_ref().map(|token| token.token.clone())
            }
        }
    }
}

/// Fetch a fresh token from the CSRF endpoint.
///
/// The endpoint either returns `{"token": "..."}` (or `{"csrf_token": ...}`)
/// or sets an `XSRF-TOKEN` cookie; both conventions are accepted.
async fn fetch_csrf_token(http: &reqwest::Client, csrf_url: &str) -> Option<String> {
    let response = match http.get(csrf_url).send().await {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!("could not fetch CSRF token from {csrf_url}: {error}");
            return None;
        }
    };

    if let Some(token) = token_from_cookie(&response) {
        return Some(token);
    }

    match response.json::<serde_json::Value>().await {
        Ok(body) => {
            let token = body
                .get("token")
                .or_else(|| body.get("csrf_token"))
                .and_then(|token| token.as_str())
                .map(str::to_owned);

            if token.is_none() {
                tracing::warn!("CSRF endpoint {csrf_url} answered without a token");
            }

            token
        }
        Err(error) => {
            tracing::warn!("could not parse CSRF response from {csrf_url}: {error}");
            None
        }
    }
}

fn token_from_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let (name, rest) = cookie.split_once('=')?;

            if name.trim() != "XSRF-TOKEN" {
                return None;
            }

            let token = rest.split(';').next()?.trim();

            (!token.is_empty()).then(|| token.to_owned())
        })
}
