//! The shared transaction form: the markup used by both the new and edit
//! pages, and the normalization of the submitted fields into an API payload.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    api::{Transaction, TransactionPayload},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The transaction types offered by the form.
const TRANSACTION_TYPES: [&str; 5] = ["sale", "purchase", "transfer", "service", "lease"];

/// The status choices offered by the form.
const TRANSACTION_STATUSES: [&str; 5] =
    ["pending", "processing", "completed", "cancelled", "refunded"];

/// The raw form fields as submitted by the browser.
///
/// Everything arrives as a string; [TransactionForm::into_payload] does the
/// normalization the remote API expects.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    #[serde(default)]
    pub transaction_type: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub tax_amount: String,
    #[serde(default)]
    pub deposit_amount: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub transaction_date: String,
    #[serde(default)]
    pub delivery_date: String,
    #[serde(default)]
    pub payment_due_date: String,
    #[serde(default)]
    pub transaction_status: String,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_email: String,
    #[serde(default)]
    pub seller_phone: String,
    #[serde(default)]
    pub seller_company: String,
    #[serde(default)]
    pub buyer_name: String,
    #[serde(default)]
    pub buyer_email: String,
    #[serde(default)]
    pub buyer_phone: String,
    #[serde(default)]
    pub buyer_company: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub delivery_instructions: String,
    #[serde(default)]
    pub terms_and_conditions: String,
    #[serde(default)]
    pub special_conditions: String,
}

impl TransactionForm {
    /// Normalize the submitted fields into the payload the API expects.
    ///
    /// Blank fields become `None` (the API rejects empty strings where it
    /// expects null), numeric fields are parsed, and `total_amount` is
    /// computed as price plus tax whenever a price was given.
    pub fn into_payload(self) -> TransactionPayload {
        let price = parse_amount(&self.price);
        let tax_amount = parse_amount(&self.tax_amount);
        let total_amount = price.map(|price| price + tax_amount.unwrap_or(0.0));

        TransactionPayload {
            transaction_type: non_blank(self.transaction_type),
            price,
            tax_amount,
            total_amount,
            deposit_amount: parse_amount(&self.deposit_amount),
            currency: non_blank(self.currency),
            transaction_date: non_blank(self.transaction_date),
            delivery_date: non_blank(self.delivery_date),
            payment_due_date: non_blank(self.payment_due_date),
            transaction_status: non_blank(self.transaction_status),
            seller_name: non_blank(self.seller_name),
            seller_email: non_blank(self.seller_email),
            seller_phone: non_blank(self.seller_phone),
            seller_company: non_blank(self.seller_company),
            buyer_name: non_blank(self.buyer_name),
            buyer_email: non_blank(self.buyer_email),
            buyer_phone: non_blank(self.buyer_phone),
            buyer_company: non_blank(self.buyer_company),
            details: non_blank(self.details),
            delivery_instructions: non_blank(self.delivery_instructions),
            terms_and_conditions: non_blank(self.terms_and_conditions),
            special_conditions: non_blank(self.special_conditions),
        }
    }
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

/// The htmx verb the form submits with.
pub(super) enum SubmitMethod {
    Post,
    Patch,
}

/// Renders the transaction form, prefilled from `transaction` when editing.
pub(super) fn transaction_form_view(
    submit_route: &str,
    method: SubmitMethod,
    transaction: Option<&Transaction>,
) -> Markup {
    let submit_label = match transaction {
        Some(_) => "Save Changes",
        None => "Record Transaction",
    };

    html! {
        form
            class="w-full max-w-2xl space-y-4"
            hx-post=[matches!(method, SubmitMethod::Post).then_some(submit_route)]
            hx-patch=[matches!(method, SubmitMethod::Patch).then_some(submit_route)]
        {
            div class="grid grid-cols-1 sm:grid-cols-2 gap-4" {
                (select_input(
                    "transaction_type",
                    "Type",
                    &TRANSACTION_TYPES,
                    transaction.map(|t| t.transaction_type.as_str()),
                ))
                (select_input(
                    "transaction_status",
                    "Status",
                    &TRANSACTION_STATUSES,
                    transaction.map(|t| t.transaction_status.as_str()),
                ))

                (amount_input("price", "Price", transaction.and_then(|t| t.price)))
                (amount_input("tax_amount", "Tax", transaction.and_then(|t| t.tax_amount)))
                (amount_input(
                    "deposit_amount",
                    "Deposit",
                    transaction.and_then(|t| t.deposit_amount),
                ))
                (text_input(
                    "currency",
                    "Currency",
                    transaction.map(|t| t.currency.as_str()),
                ))

                (date_input(
                    "transaction_date",
                    "Transaction Date",
                    transaction.map(|t| t.transaction_date.as_str()),
                ))
                (date_input(
                    "delivery_date",
                    "Delivery Date",
                    transaction.and_then(|t| t.delivery_date.as_deref()),
                ))
                (date_input(
                    "payment_due_date",
                    "Payment Due",
                    transaction.and_then(|t| t.payment_due_date.as_deref()),
                ))
            }

            fieldset class="grid grid-cols-1 sm:grid-cols-2 gap-4" {
                legend class="text-lg font-semibold mb-2" { "Seller" }

                (text_input("seller_name", "Name", transaction.map(|t| t.seller_name.as_str())))
                (text_input(
                    "seller_email",
                    "Email",
                    transaction.and_then(|t| t.seller_email.as_deref()),
                ))
                (text_input(
                    "seller_phone",
                    "Phone",
                    transaction.and_then(|t| t.seller_phone.as_deref()),
                ))
                (text_input(
                    "seller_company",
                    "Company",
                    transaction.and_then(|t| t.seller_company.as_deref()),
                ))
            }

            fieldset class="grid grid-cols-1 sm:grid-cols-2 gap-4" {
                legend class="text-lg font-semibold mb-2" { "Buyer" }

                (text_input("buyer_name", "Name", transaction.map(|t| t.buyer_name.as_str())))
                (text_input(
                    "buyer_email",
                    "Email",
                    transaction.and_then(|t| t.buyer_email.as_deref()),
                ))
                (text_input(
                    "buyer_phone",
                    "Phone",
                    transaction.and_then(|t| t.buyer_phone.as_deref()),
                ))
                (text_input(
                    "buyer_company",
                    "Company",
                    transaction.and_then(|t| t.buyer_company.as_deref()),
                ))
            }

            (text_area("details", "Details", transaction.and_then(|t| t.details.as_deref())))
            (text_area(
                "delivery_instructions",
                "Delivery Instructions",
                transaction.and_then(|t| t.delivery_instructions.as_deref()),
            ))
            (text_area(
                "terms_and_conditions",
                "Terms and Conditions",
                transaction.and_then(|t| t.terms_and_conditions.as_deref()),
            ))
            (text_area(
                "special_conditions",
                "Special Conditions",
                transaction.and_then(|t| t.special_conditions.as_deref()),
            ))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}

fn text_input(name: &str, label: &str, value: Option<&str>) -> Markup {
    html! {
        div {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }
            input
                type="text"
                id=(name)
                name=(name)
                class=(FORM_TEXT_INPUT_STYLE)
                value=[value];
        }
    }
}

fn amount_input(name: &str, label: &str, value: Option<f64>) -> Markup {
    html! {
        div {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }
            input
                type="number"
                id=(name)
                name=(name)
                min="0"
                step="0.01"
                class=(FORM_TEXT_INPUT_STYLE)
                value=[value];
        }
    }
}

fn date_input(name: &str, label: &str, value: Option<&str>) -> Markup {
    // Date inputs only accept the YYYY-MM-DD part of an ISO-8601 timestamp.
    // A value that cannot be cut cleanly is passed through unchanged, like
    // unparseable dates elsewhere.
    let value = value.map(|value| value.get(..10).unwrap_or(value));

    html! {
        div {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }
            input
                type="date"
                id=(name)
                name=(name)
                class=(FORM_TEXT_INPUT_STYLE)
                value=[value];
        }
    }
}

fn text_area(name: &str, label: &str, value: Option<&str>) -> Markup {
    html! {
        div {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }
            textarea id=(name) name=(name) rows="3" class=(FORM_TEXT_INPUT_STYLE) {
                @if let Some(value) = value { (value) }
            }
        }
    }
}

fn select_input(name: &str, label: &str, options: &[&str], selected: Option<&str>) -> Markup {
    html! {
        div {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }
            select id=(name) name=(name) class=(FORM_TEXT_INPUT_STYLE) {
                @for option in options {
                    option
                        value=(option)
                        selected[selected == Some(option)]
                    {
                        (crate::format::type_label(option))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod form_tests {
    use crate::api::Transaction;

    use super::{SubmitMethod, TransactionForm, transaction_form_view};

    fn test_transaction(transaction_date: &str) -> Transaction {
        serde_json::from_value(serde_json::json!({
            "id": "txn-1",
            "total_amount": 100.0,
            "transaction_date": transaction_date,
        }))
        .unwrap()
    }

    #[test]
    fn date_input_keeps_only_the_date_part_of_a_timestamp() {
        let transaction = test_transaction("2024-03-12T09:30:00Z");

        let rendered =
            transaction_form_view("/submit", SubmitMethod::Patch, Some(&transaction)).into_string();

        assert!(rendered.contains("value=\"2024-03-12\""));
    }

    #[test]
    fn date_input_passes_through_a_date_it_cannot_cut_cleanly() {
        // A multi-byte character straddles the cut point.
        let transaction = test_transaction("2024-03-1é later");

        let rendered =
            transaction_form_view("/submit", SubmitMethod::Patch, Some(&transaction)).into_string();

        assert!(rendered.contains("value=\"2024-03-1é later\""));
    }

    #[test]
    fn blank_fields_become_none() {
        let form = TransactionForm {
            details: "   ".to_owned(),
            seller_name: String::new(),
            buyer_name: "M. Weatherby".to_owned(),
            ..Default::default()
        };

        let payload = form.into_payload();

        assert_eq!(payload.details, None);
        assert_eq!(payload.seller_name, None);
        assert_eq!(payload.buyer_name, Some("M. Weatherby".to_owned()));
    }

    #[test]
    fn amounts_are_parsed_and_total_is_price_plus_tax() {
        let form = TransactionForm {
            price: "1200.50".to_owned(),
            tax_amount: "180.25".to_owned(),
            ..Default::default()
        };

        let payload = form.into_payload();

        assert_eq!(payload.price, Some(1200.50));
        assert_eq!(payload.tax_amount, Some(180.25));
        assert_eq!(payload.total_amount, Some(1380.75));
    }

    #[test]
    fn unparseable_amount_becomes_none() {
        let form = TransactionForm {
            price: "a handshake".to_owned(),
            ..Default::default()
        };

        let payload = form.into_payload();

        assert_eq!(payload.price, None);
        assert_eq!(payload.total_amount, None);
    }

    #[test]
    fn total_omits_tax_when_only_price_is_given() {
        let form = TransactionForm {
            price: "100".to_owned(),
            ..Default::default()
        };

        assert_eq!(form.into_payload().total_amount, Some(100.0));
    }
}
