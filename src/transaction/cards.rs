//! Card components for the transaction summary view: the overview statistic
//! cards, the status-distribution legend, and the compact recent-transactions
//! panel.

use maud::{Markup, html};

use crate::{
    api::{RecentTransaction, SummaryOverview},
    endpoints::{self, format_endpoint},
    format::{
        TransactionStatus, TruncationContext, format_currency, format_date, needs_truncation,
        truncate, type_badge_class, type_label,
    },
    html::CARD_STYLE,
};

use super::aggregate::StatusSlice;

/// Renders the overview statistic cards from the summary's pre-aggregated
/// headline numbers.
pub(super) fn overview_cards_view(overview: &SummaryOverview) -> Markup {
    let stats = [
        ("Total Value", format_currency(overview.total_value)),
        ("Average Value", format_currency(overview.average_value)),
        ("Highest Value", format_currency(overview.highest_value)),
        ("Lowest Value", format_currency(overview.lowest_value)),
        ("Transactions", overview.total_transactions.to_string()),
        ("Completed", overview.completed_transactions.to_string()),
        ("Pending Amount", format_currency(overview.pending_amount)),
    ];

    html! {
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-4 gap-4" {
                @for (label, value) in stats {
                    div class=(CARD_STYLE) {
                        p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
                        p class="text-xl font-semibold" { (value) }
                    }
                }
            }
        }
    }
}

/// Renders the status-distribution legend: one row per status with a colored
/// dot, the count, and the percentage (always one decimal place).
pub(super) fn status_legend_view(slices: &[StatusSlice]) -> Markup {
    html! {
        section class=(CARD_STYLE) {
            h3 class="text-lg font-semibold mb-2" { "By Status" }

            ul class="space-y-2" {
                @for slice in slices {
                    li class="flex items-center gap-2 text-sm" {
                        span
                            class="inline-block w-3 h-3 rounded-full"
                            style=(format!("background-color: {}", slice.status.chart_color()))
                        {}

                        span class="flex-1" { (slice.status.label()) }

                        span class="text-gray-600 dark:text-gray-400" {
                            (slice.count) " (" (format!("{:.1}", slice.percentage)) "%)"
                        }
                    }
                }
            }
        }
    }
}

/// Renders the compact recent-transactions panel.
///
/// `recent` must already be capped by the caller; this view renders whatever
/// it is given, in the given order.
pub(super) fn recent_transactions_view(animal_id: &str, recent: &[RecentTransaction]) -> Markup {
    html! {
        section class=(CARD_STYLE) {
            h3 class="text-lg font-semibold mb-2" { "Recent Transactions" }

            @if recent.is_empty() {
                p class="text-sm text-gray-600 dark:text-gray-400" {
                    "No recent transactions."
                }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700" {
                    @for entry in recent {
                        li class="py-2 flex items-center gap-3" {
                            span class=(type_badge_class()) {
                                (type_label(&entry.transaction_type))
                            }

                            (status_badge(&entry.transaction_status))

                            span class="flex-1 text-sm text-gray-600 dark:text-gray-400" {
                                (format_date(&entry.transaction_date))

                                @if let Some(details) = &entry.details {
                                    " · "
                                    (truncate(details, TruncationContext::Condensed))

                                    @if needs_truncation(details, TruncationContext::Condensed) {
                                        " "
                                        (detail_dialog_button(animal_id, &entry.id, "details"))
                                    }
                                }
                            }

                            span class="text-sm font-medium" {
                                (format_currency(entry.total_amount))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The empty state shown instead of the charts when the summary covers zero
/// transactions.
pub(super) fn summary_empty_view(animal_id: &str) -> Markup {
    let new_transaction_route =
        format_endpoint(endpoints::NEW_TRANSACTION_VIEW, &[animal_id]);

    html! {
        section class="w-full max-w-md mx-auto text-center py-12" {
            h2 class="text-xl font-semibold mb-2" { "No Data to Summarize" }

            p class="text-gray-600 dark:text-gray-400 mb-4" {
                "Once transactions are recorded for this animal, their summary will appear here."
            }

            (crate::html::link(&new_transaction_route, "Add First Transaction"))
        }
    }
}

/// A status badge with the color for the normalized status bucket.
pub(super) fn status_badge(raw_status: &str) -> Markup {
    let status = TransactionStatus::parse(raw_status);

    html!( span class=(status.badge_class()) { (status.label()) } )
}

/// A small button that opens the detail-disclosure dialog for one field of
/// one transaction. The dialog partial is swapped into the single `#modal`
/// slot, replacing whatever dialog was open before.
pub(super) fn detail_dialog_button(animal_id: &str, transaction_id: &str, field: &str) -> Markup {
    let dialog_route = format!(
        "{}?field={field}",
        format_endpoint(
            endpoints::TRANSACTION_DETAIL_DIALOG,
            &[animal_id, transaction_id],
        )
    );

    html!(
        button
            type="button"
            class="text-blue-600 hover:text-blue-500 dark:text-blue-500 underline cursor-pointer"
            hx-get=(dialog_route)
            hx-target="#modal"
            hx-swap="innerHTML"
        {
            "Read more"
        }
    )
}

#[cfg(test)]
mod cards_tests {
    use scraper::{Html, Selector};

    use crate::api::{RecentTransaction, SummaryOverview};

    use super::{overview_cards_view, recent_transactions_view, summary_empty_view};

    #[test]
    fn overview_cards_show_formatted_amounts() {
        let overview = SummaryOverview {
            total_value: 5000.0,
            average_value: 1250.0,
            highest_value: 2000.0,
            lowest_value: 500.0,
            total_transactions: 4,
            completed_transactions: 3,
            pending_amount: 750.25,
        };

        let rendered = overview_cards_view(&overview).into_string();

        assert!(rendered.contains("$5,000.00"));
        assert!(rendered.contains("$750.25"));
        assert!(rendered.contains("Completed"));
    }

    #[test]
    fn empty_state_links_to_the_new_transaction_page() {
        let rendered = summary_empty_view("goat-7").into_string();
        let document = Html::parse_fragment(&rendered);

        let selector = Selector::parse("a[href=\"/animals/goat-7/transactions/new\"]").unwrap();

        assert!(rendered.contains("No Data to Summarize"));
        assert!(document.select(&selector).next().is_some());
    }

    #[test]
    fn long_details_get_a_read_more_button() {
        let recent = vec![RecentTransaction {
            id: "txn-1".to_owned(),
            transaction_type: "sale".to_owned(),
            transaction_status: "completed".to_owned(),
            total_amount: 1200.0,
            transaction_date: "2024-03-12T00:00:00Z".to_owned(),
            details: Some("x".repeat(40)),
        }];

        let rendered = recent_transactions_view("goat-7", &recent).into_string();

        assert!(rendered.contains("Read more"));
        assert!(rendered.contains(&format!("{}...", "x".repeat(30))));
    }

    #[test]
    fn short_details_are_shown_in_full() {
        let recent = vec![RecentTransaction {
            id: "txn-1".to_owned(),
            transaction_type: "sale".to_owned(),
            transaction_status: "completed".to_owned(),
            total_amount: 1200.0,
            transaction_date: "2024-03-12T00:00:00Z".to_owned(),
            details: Some("Sold at auction".to_owned()),
        }];

        let rendered = recent_transactions_view("goat-7", &recent).into_string();

        assert!(rendered.contains("12 Mar 2024 · Sold at auction"));
        assert!(!rendered.contains("Read more"));
    }
}
