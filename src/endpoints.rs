//! The application's route URIs.
//!
//! For routes that take parameters, e.g., '/animals/{animal_id}/transactions',
//! use [format_endpoint].

/// The root route which redirects to the animals index.
pub const ROOT: &str = "/";
/// The page listing the animals known to the livestock API.
pub const ANIMALS_VIEW: &str = "/animals";
/// The page displaying an animal's transactions, as a list or a summary.
pub const TRANSACTIONS_VIEW: &str = "/animals/{animal_id}/transactions";
/// The page for recording a new transaction for an animal.
pub const NEW_TRANSACTION_VIEW: &str = "/animals/{animal_id}/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str =
    "/animals/{animal_id}/transactions/{transaction_id}/edit";
/// The partial for the detail-disclosure dialog of a long text field.
pub const TRANSACTION_DETAIL_DIALOG: &str =
    "/animals/{animal_id}/transactions/{transaction_id}/detail";
/// The route to create a transaction (POST).
pub const CREATE_TRANSACTION: &str = "/animals/{animal_id}/transactions";
/// The route to update a transaction (PATCH).
pub const UPDATE_TRANSACTION: &str = "/animals/{animal_id}/transactions/{transaction_id}";
/// The route to delete a transaction (DELETE).
pub const DELETE_TRANSACTION: &str = "/animals/{animal_id}/transactions/{transaction_id}";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameters in `endpoint_path` with `params`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in '/animals/{animal_id}/transactions', '{animal_id}' is the
/// parameter.
///
/// Parameters beyond the ones in `endpoint_path` are ignored; parameters in
/// `endpoint_path` beyond the ones supplied are left as-is.
pub fn format_endpoint(endpoint_path: &str, params: &[&str]) -> String {
    let mut result = String::with_capacity(endpoint_path.len());
    let mut remaining = endpoint_path;
    let mut params = params.iter();

    while let Some(param_start) = remaining.find('{') {
        let Some(param_len) = remaining[param_start..].find('}') else {
            break;
        };

        result.push_str(&remaining[..param_start]);

        match params.next() {
            Some(param) => result.push_str(param),
            None => result.push_str(&remaining[param_start..param_start + param_len + 1]),
        }

        remaining = &remaining[param_start + param_len + 1..];
    }

    result.push_str(remaining);
    result
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::ANIMALS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION_DETAIL_DIALOG);
        assert_endpoint_is_valid_uri(endpoints::CREATE_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::UPDATE_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::DELETE_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/animals/{animal_id}/transactions", &["17"]);

        assert_eq!(formatted_path, "/animals/17/transactions");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn replaces_multiple_parameters_in_order() {
        let formatted_path = format_endpoint(
            "/animals/{animal_id}/transactions/{transaction_id}/edit",
            &["goat-7", "txn-42"],
        );

        assert_eq!(formatted_path, "/animals/goat-7/transactions/txn-42/edit");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/animals", &["17"]);

        assert_eq!(formatted_path, "/animals");
    }

    #[test]
    fn leaves_unfilled_parameters_untouched() {
        let formatted_path =
            format_endpoint("/animals/{animal_id}/transactions/{transaction_id}", &["1"]);

        assert_eq!(formatted_path, "/animals/1/transactions/{transaction_id}");
    }
}
