//! HTML rendering for the per-record card layout of the transactions page.

use maud::{Markup, html};

use crate::{
    api::{Transaction, TransactionDocument},
    endpoints::{self, format_endpoint},
    format::{
        TruncationContext, format_currency, format_date, needs_truncation, truncate,
        type_badge_class, type_label,
    },
    html::{BUTTON_DELETE_STYLE, CARD_STYLE, LINK_STYLE, link},
};

use super::cards::{detail_dialog_button, status_badge};

/// The number of documents shown on a card before the rest are tucked behind
/// the per-card disclosure.
const DOCUMENT_PREVIEW_LIMIT: usize = 3;

/// The long-text fields of a transaction, paired with their accessors.
///
/// Shared by the card renderer and the detail dialog so both always agree on
/// which fields are disclosable.
pub(super) const LONG_TEXT_FIELDS: [(&str, fn(&Transaction) -> Option<&str>); 4] = [
    ("details", |transaction| transaction.details.as_deref()),
    ("delivery_instructions", |transaction| {
        transaction.delivery_instructions.as_deref()
    }),
    ("terms_and_conditions", |transaction| {
        transaction.terms_and_conditions.as_deref()
    }),
    ("special_conditions", |transaction| {
        transaction.special_conditions.as_deref()
    }),
];

/// Renders the card list, or the empty state when there are no transactions.
pub(super) fn transaction_cards_view(animal_id: &str, transactions: &[Transaction]) -> Markup {
    if transactions.is_empty() {
        return empty_list_view(animal_id);
    }

    html! {
        section class="w-full space-y-4" {
            @for transaction in transactions {
                (transaction_card(animal_id, transaction))
            }
        }
    }
}

/// The empty state shown when an animal has no transactions at all.
fn empty_list_view(animal_id: &str) -> Markup {
    let new_transaction_route = format_endpoint(endpoints::NEW_TRANSACTION_VIEW, &[animal_id]);

    html! {
        section class="w-full max-w-md mx-auto text-center py-12" {
            h2 class="text-xl font-semibold mb-2" { "No Transactions Recorded" }

            p class="text-gray-600 dark:text-gray-400 mb-4" {
                "Record this animal's first sale, purchase or service to get started."
            }

            (link(&new_transaction_route, "Add First Transaction"))
        }
    }
}

/// One transaction card: an always-visible header and primary fields, plus an
/// accordion for the secondary fields.
///
/// Both the accordion and the documents disclosure are native `<details>`
/// elements, so the expanded/collapsed state lives with the card itself and
/// is necessarily keyed per transaction.
fn transaction_card(animal_id: &str, transaction: &Transaction) -> Markup {
    let edit_route = format_endpoint(
        endpoints::EDIT_TRANSACTION_VIEW,
        &[animal_id, &transaction.id],
    );
    let delete_route = format_endpoint(
        endpoints::DELETE_TRANSACTION,
        &[animal_id, &transaction.id],
    );

    html! {
        article class=(CARD_STYLE) {
            header class="flex flex-wrap items-center gap-2 mb-2" {
                span class=(type_badge_class()) { (type_label(&transaction.transaction_type)) }
                (status_badge(&transaction.transaction_status))

                span class="text-sm text-gray-600 dark:text-gray-400" {
                    (format_date(&transaction.transaction_date))
                }

                span class="ms-auto text-lg font-semibold" {
                    (format_currency(transaction.total_amount)) " " (transaction.currency)
                }
            }

            dl class="grid grid-cols-2 sm:grid-cols-3 gap-x-4 gap-y-1 text-sm mb-2" {
                (amount_entry("Price", transaction.price))
                (amount_entry("Tax", transaction.tax_amount))
                (amount_entry("Deposit", transaction.deposit_amount))
                (amount_entry("Balance Due", transaction.balance_due))

                dt class="text-gray-600 dark:text-gray-400" { "Seller" }
                dd { (transaction.seller_name) }

                dt class="text-gray-600 dark:text-gray-400" { "Buyer" }
                dd { (transaction.buyer_name) }
            }

            @if let Some(details) = &transaction.details {
                p class="text-sm mb-2" {
                    (truncate(details, TruncationContext::FullList))

                    @if needs_truncation(details, TruncationContext::FullList) {
                        " "
                        (detail_dialog_button(animal_id, &transaction.id, "details"))
                    }
                }
            }

            details class="text-sm" {
                summary class="cursor-pointer text-gray-600 dark:text-gray-400" {
                    "Terms, contacts and documents"
                }

                div class="mt-2 space-y-2" {
                    (secondary_fields(animal_id, transaction))
                    (contacts(transaction))
                    (documents_view(&transaction.documents))
                }
            }

            footer class="flex gap-4 mt-3" {
                a href=(edit_route) class=(LINK_STYLE) { "Edit" }

                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_route)
                    hx-confirm="Delete this transaction? This cannot be undone."
                {
                    "Delete"
                }
            }
        }
    }
}

fn amount_entry(label: &str, amount: Option<f64>) -> Markup {
    html! {
        @if let Some(amount) = amount {
            dt class="text-gray-600 dark:text-gray-400" { (label) }
            dd { (format_currency(amount)) }
        }
    }
}

/// The secondary long-text fields, each independently truncated and
/// disclosable in the shared dialog.
///
/// These only show once the accordion is expanded, so they get the longer
/// record-detail excerpt rather than the card-face cut.
fn secondary_fields(animal_id: &str, transaction: &Transaction) -> Markup {
    html! {
        @for (field, accessor) in LONG_TEXT_FIELDS.iter().skip(1) {
            @if let Some(text) = accessor(transaction) {
                div {
                    p class="font-medium" { (crate::format::humanize_field(field)) }

                    p {
                        (truncate(text, TruncationContext::RecordDetail))

                        @if needs_truncation(text, TruncationContext::RecordDetail) {
                            " "
                            (detail_dialog_button(animal_id, &transaction.id, field))
                        }
                    }
                }
            }
        }

        @if let Some(delivery_date) = &transaction.delivery_date {
            p { "Delivery: " (format_date(delivery_date)) }
        }

        @if let Some(payment_due_date) = &transaction.payment_due_date {
            p { "Payment due: " (format_date(payment_due_date)) }
        }

        @if let Some(insurance_amount) = transaction.insurance_amount {
            p { "Insurance: " (format_currency(insurance_amount)) }
        }
    }
}

fn contacts(transaction: &Transaction) -> Markup {
    let seller_contact = contact_line(
        &transaction.seller_email,
        &transaction.seller_phone,
        &transaction.seller_company,
    );
    let buyer_contact = contact_line(
        &transaction.buyer_email,
        &transaction.buyer_phone,
        &transaction.buyer_company,
    );

    html! {
        @if let Some(contact) = seller_contact {
            p { "Seller contact: " (contact) }
        }

        @if let Some(contact) = buyer_contact {
            p { "Buyer contact: " (contact) }
        }
    }
}

fn contact_line(
    email: &Option<String>,
    phone: &Option<String>,
    company: &Option<String>,
) -> Option<String> {
    let parts: Vec<&str> = [email, phone, company]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// The document list, with everything beyond the preview limit behind a
/// per-card disclosure.
fn documents_view(documents: &[TransactionDocument]) -> Markup {
    if documents.is_empty() {
        return html! {};
    }

    let (preview, rest) = documents.split_at(documents.len().min(DOCUMENT_PREVIEW_LIMIT));

    html! {
        div {
            p class="font-medium" { "Documents" }

            ul class="list-disc list-inside" {
                @for document in preview {
                    li { (document_link(document)) }
                }
            }

            @if !rest.is_empty() {
                details {
                    summary class="cursor-pointer text-gray-600 dark:text-gray-400" {
                        "Show all " (documents.len()) " documents"
                    }

                    ul class="list-disc list-inside" {
                        @for document in rest {
                            li { (document_link(document)) }
                        }
                    }
                }
            }
        }
    }
}

fn document_link(document: &TransactionDocument) -> Markup {
    html! {
        a href=(document.url) class=(LINK_STYLE) target="_blank" rel="noopener" {
            (document.name)
        }
    }
}
