//! Normalization of the livestock API's response envelopes.
//!
//! The API is inconsistent about how it wraps payloads: depending on the
//! endpoint (and the framework version behind it), a list of transactions may
//! arrive as a bare array, as `{"data": [...]}`, or as
//! `{"data": {"data": [...]}}`. Callers should never have to care, so the
//! unwrapping happens in one place.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Error;

/// The deepest nesting of `data` wrappers observed from the API.
const MAX_ENVELOPE_DEPTH: usize = 2;

/// Peel `data` wrappers off `value` until the actual payload is reached.
///
/// At most [MAX_ENVELOPE_DEPTH] layers are removed; anything without a `data`
/// key is returned as-is.
pub(crate) fn unwrap_envelope(mut value: Value) -> Value {
    for _ in 0..MAX_ENVELOPE_DEPTH {
        match value {
            Value::Object(mut map) if map.contains_key("data") => {
                value = map.remove("data").unwrap_or(Value::Null);
            }
            other => return other,
        }
    }

    value
}

/// Unwrap the envelope around `value` and deserialize the payload.
///
/// # Errors
/// Returns [Error::UnexpectedPayload] when the unwrapped payload does not
/// deserialize into `T`.
pub(crate) fn parse_payload<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    let payload = unwrap_envelope(value);

    serde_json::from_value(payload).map_err(|error| Error::UnexpectedPayload(error.to_string()))
}

/// Like [parse_payload] for list endpoints, where a `null` payload (an empty
/// envelope) means an empty list rather than a malformed one.
pub(crate) fn parse_list_payload<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, Error> {
    match unwrap_envelope(value) {
        Value::Null => Ok(Vec::new()),
        payload => serde_json::from_value(payload)
            .map_err(|error| Error::UnexpectedPayload(error.to_string())),
    }
}

#[cfg(test)]
mod envelope_tests {
    use serde_json::{Value, json};

    use crate::api::Transaction;

    use super::{parse_list_payload, unwrap_envelope};

    fn transactions_json() -> Value {
        json!([
            {"id": "txn-1", "transaction_type": "sale", "total_amount": 1200.0},
            {"id": "txn-2", "transaction_type": "purchase", "total_amount": 350.5},
        ])
    }

    #[test]
    fn bare_array_is_returned_as_is() {
        let parsed: Vec<Transaction> = parse_list_payload(transactions_json()).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, "txn-1");
    }

    #[test]
    fn single_data_wrapper_is_unwrapped() {
        let wrapped = json!({"data": transactions_json()});

        let parsed: Vec<Transaction> = parse_list_payload(wrapped).unwrap();

        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn double_data_wrapper_is_unwrapped() {
        let wrapped = json!({"data": {"data": transactions_json()}});

        let parsed: Vec<Transaction> = parse_list_payload(wrapped).unwrap();

        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn all_three_shapes_yield_the_identical_list() {
        let bare: Vec<Transaction> = parse_list_payload(transactions_json()).unwrap();
        let single: Vec<Transaction> =
            parse_list_payload(json!({"data": transactions_json()})).unwrap();
        let double: Vec<Transaction> =
            parse_list_payload(json!({"data": {"data": transactions_json()}})).unwrap();

        assert_eq!(bare, single);
        assert_eq!(single, double);
    }

    #[test]
    fn empty_envelope_is_an_empty_list() {
        let parsed: Vec<Transaction> = parse_list_payload(json!({"data": null})).unwrap();

        assert!(parsed.is_empty());
    }

    #[test]
    fn object_without_data_key_is_untouched() {
        let summary = json!({"overview": {}, "currency": "NZD"});

        assert_eq!(unwrap_envelope(summary.clone()), summary);
    }
}
