//! The page listing the animals known to the livestock API.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    api::{AnimalSummary, ApiClient},
    endpoints::{self, format_endpoint},
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    render,
};

/// The state needed to render the animals index.
#[derive(Debug, Clone)]
pub struct AnimalsPageState {
    /// The client for the livestock API.
    pub api: ApiClient,
}

impl FromRef<AppState> for AnimalsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Renders the animals index, linking each animal to its transactions page.
pub async fn get_animals_page(State(state): State<AnimalsPageState>) -> Response {
    let animals = match state.api.fetch_animals().await {
        Ok(animals) => animals,
        Err(error) => return error.into_response(),
    };

    let nav_bar = NavBar::new(endpoints::ANIMALS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-4xl" {
                h1 class="text-2xl font-semibold mb-4" { "Animals" }

                @if animals.is_empty() {
                    p class="text-gray-600 dark:text-gray-400" {
                        "No animals are registered with the livestock API yet."
                    }
                } @else {
                    div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4" {
                        @for animal in &animals {
                            (animal_card(animal))
                        }
                    }
                }
            }
        }
    };

    render(StatusCode::OK, base("Animals", &[], &content))
}

fn animal_card(animal: &AnimalSummary) -> Markup {
    let transactions_route = format_endpoint(endpoints::TRANSACTIONS_VIEW, &[&animal.id]);

    html! {
        a href=(transactions_route) class=(format!("{CARD_STYLE} block hover:shadow-lg")) {
            h2 class="text-lg font-semibold" { (animal.name) }

            p class="text-sm text-gray-600 dark:text-gray-400" {
                @if let Some(species) = &animal.species {
                    (species)
                }

                @if let Some(tag_number) = &animal.tag_number {
                    " · Tag " (tag_number)
                }
            }
        }
    }
}

#[cfg(test)]
mod animals_page_tests {
    use axum::{extract::State, http::StatusCode};
    use scraper::{Html, Selector};

    use crate::api::{ApiClient, ApiConfig};

    use super::{AnimalsPageState, get_animals_page};

    fn test_state(server: &mockito::Server) -> AnimalsPageState {
        AnimalsPageState {
            api: ApiClient::new(ApiConfig {
                base_url: server.url(),
                csrf_url: None,
                bearer_token: None,
            }),
        }
    }

    #[tokio::test]
    async fn animals_link_to_their_transactions_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/animals")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": [
                    {"id": "goat-7", "name": "Daisy", "species": "Goat", "tag_number": "A-117"},
                    {"id": "cow-3", "name": "Bess", "species": "Cattle"}
                ]}"#,
            )
            .create_async()
            .await;

        let response = get_animals_page(State(test_state(&server))).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document = Html::parse_document(&String::from_utf8_lossy(&body));

        for href in ["/animals/goat-7/transactions", "/animals/cow-3/transactions"] {
            let selector = Selector::parse(&format!("a[href=\"{href}\"]")).unwrap();
            assert!(
                document.select(&selector).next().is_some(),
                "missing link to {href}"
            );
        }
    }

    #[tokio::test]
    async fn empty_index_shows_a_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/animals")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let response = get_animals_page(State(test_state(&server))).await;

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        assert!(text.contains("No animals are registered"));
    }
}
