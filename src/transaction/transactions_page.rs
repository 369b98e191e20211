//! The transactions page: one animal's records as either a card list or a
//! summary dashboard, selected by the `view` query parameter.

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState,
    api::{ApiClient, TransactionSummary},
    endpoints::{self, format_endpoint},
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    render,
};

use super::{
    aggregate::{recent_window, sanitize_trends, status_slices},
    cards::{overview_cards_view, recent_transactions_view, status_legend_view, summary_empty_view},
    charts::{build_summary_charts, charts_script, charts_view},
    list_view::transaction_cards_view,
};

/// Which of the two renderings of the page is active.
///
/// The underlying data is fetched for both regardless, so switching is a
/// plain navigation with no extra round-trip to the livestock API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One card per transaction.
    #[default]
    List,
    /// Aggregate cards, charts, and the recent-transactions panel.
    Summary,
}

/// The query parameters accepted by the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsPageQuery {
    /// The active view; defaults to the list view when absent.
    #[serde(default)]
    pub view: ViewMode,
}

/// The state needed to render the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The client for the livestock API.
    pub api: ApiClient,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Renders the transactions page for one animal.
///
/// The transaction list and the summary are fetched concurrently and both are
/// always fetched, whichever view is active.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Path(animal_id): Path<String>,
    Query(query): Query<TransactionsPageQuery>,
) -> Response {
    let (transactions, summary) = tokio::join!(
        state.api.fetch_transactions(&animal_id),
        state.api.fetch_transaction_summary(&animal_id),
    );

    let transactions = match transactions {
        Ok(transactions) => transactions,
        Err(error) => return error.into_response(),
    };
    let summary = match summary {
        Ok(summary) => summary,
        Err(error) => return error.into_response(),
    };

    let transactions_route = format_endpoint(endpoints::TRANSACTIONS_VIEW, &[&animal_id]);
    let nav_bar = NavBar::new(endpoints::ANIMALS_VIEW)
        .with_animal_link(&transactions_route, "Transactions")
        .into_html();

    let (body, head_elements) = match query.view {
        ViewMode::List => (transaction_cards_view(&animal_id, &transactions), vec![]),
        ViewMode::Summary => summary_view(&animal_id, &summary),
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-4xl" {
                header class="flex flex-wrap items-center gap-4 mb-4" {
                    h1 class="text-2xl font-semibold" { "Transactions" }

                    (view_toggle(&animal_id, query.view))

                    span class="ms-auto" {
                        (link(
                            &format_endpoint(endpoints::NEW_TRANSACTION_VIEW, &[&animal_id]),
                            "New Transaction",
                        ))
                    }
                }

                (body)
            }
        }
    };

    render(
        StatusCode::OK,
        base("Transactions", &head_elements, &content),
    )
}

/// The links that switch between the list and summary views.
fn view_toggle(animal_id: &str, active: ViewMode) -> Markup {
    let base_route = format_endpoint(endpoints::TRANSACTIONS_VIEW, &[animal_id]);

    let tab = |mode: ViewMode, query: &str, label: &str| {
        let style = if mode == active {
            "px-3 py-1 rounded bg-blue-600 text-white"
        } else {
            "px-3 py-1 rounded text-blue-600 dark:text-blue-500 hover:underline"
        };

        html!( a href=(format!("{base_route}{query}")) class=(style) { (label) } )
    };

    html! {
        div class="flex gap-1" role="group" {
            (tab(ViewMode::List, "?view=list", "List"))
            (tab(ViewMode::Summary, "?view=summary", "Summary"))
        }
    }
}

/// Assembles the summary view, or its empty state when the summary covers no
/// transactions.
fn summary_view(animal_id: &str, summary: &TransactionSummary) -> (Markup, Vec<HeadElement>) {
    if summary.overview.total_transactions == 0 {
        return (summary_empty_view(animal_id), vec![]);
    }

    let slices = status_slices(
        &summary.status_distribution,
        summary.overview.total_transactions,
    );
    let trend_points = sanitize_trends(&summary.monthly_trends);
    let charts = build_summary_charts(&slices, &trend_points);

    let body = html! {
        (overview_cards_view(&summary.overview))
        (charts_view(&charts))

        div class="grid grid-cols-1 xl:grid-cols-2 gap-4" {
            (status_legend_view(&slices))
            (recent_transactions_view(
                animal_id,
                recent_window(&summary.recent_transactions),
            ))
        }
    };

    let head_elements = vec![
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
    ];

    (body, head_elements)
}
