//! The page for recording a new transaction.

use axum::{extract::Path, http::StatusCode, response::Response};
use maud::html;

use crate::{
    endpoints::{self, format_endpoint},
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    render,
};

use super::form::{SubmitMethod, transaction_form_view};

/// Renders the page for recording a new transaction for an animal.
pub async fn get_new_transaction_page(Path(animal_id): Path<String>) -> Response {
    let transactions_route = format_endpoint(endpoints::TRANSACTIONS_VIEW, &[&animal_id]);
    let create_route = format_endpoint(endpoints::CREATE_TRANSACTION, &[&animal_id]);

    let nav_bar = NavBar::new(endpoints::ANIMALS_VIEW)
        .with_animal_link(&transactions_route, "Transactions")
        .into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE) {
            h1 class="text-2xl font-semibold mb-4" { "New Transaction" }

            (transaction_form_view(&create_route, SubmitMethod::Post, None))
        }
    };

    render(StatusCode::OK, base("New Transaction", &[], &content))
}

#[cfg(test)]
mod new_transaction_page_tests {
    use axum::extract::Path;
    use scraper::{Html, Selector};

    use super::get_new_transaction_page;

    async fn render_page() -> Html {
        let response = get_new_transaction_page(Path("goat-7".to_owned())).await;
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read the response body");

        Html::parse_document(&String::from_utf8_lossy(&body))
    }

    #[tokio::test]
    async fn form_posts_to_the_create_route() {
        let document = render_page().await;

        let selector =
            Selector::parse("form[hx-post=\"/animals/goat-7/transactions\"]").unwrap();

        assert!(document.select(&selector).next().is_some());
    }

    #[tokio::test]
    async fn form_has_the_amount_and_date_inputs() {
        let document = render_page().await;

        for name in ["price", "tax_amount", "deposit_amount"] {
            let selector =
                Selector::parse(&format!("input[type=\"number\"][name=\"{name}\"]")).unwrap();
            assert!(
                document.select(&selector).next().is_some(),
                "missing number input {name}"
            );
        }

        let date_selector =
            Selector::parse("input[type=\"date\"][name=\"transaction_date\"]").unwrap();
        assert!(document.select(&date_selector).next().is_some());
    }

    #[tokio::test]
    async fn form_has_a_submit_button() {
        let document = render_page().await;

        let selector = Selector::parse("form button[type=\"submit\"]").unwrap();

        assert!(document.select(&selector).next().is_some());
    }
}
