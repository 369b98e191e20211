//! Shared, pure formatting utilities: currency and date strings, long-text
//! truncation, and normalization of the free-form status/type strings the
//! livestock API returns.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

/// Where a long text field is being displayed, which decides how much of it
/// is shown before truncation.
///
/// The thresholds are deliberately kept in one table so they cannot drift
/// apart between near-identical views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationContext {
    /// The full-page transaction list.
    FullList,
    /// Condensed, animal-scoped panels such as the recent transactions list.
    Condensed,
    /// Record detail views with room for longer excerpts.
    RecordDetail,
}

impl TruncationContext {
    fn max_graphemes(self) -> usize {
        match self {
            TruncationContext::FullList => 50,
            TruncationContext::Condensed => 30,
            TruncationContext::RecordDetail => 150,
        }
    }
}

/// Truncate `text` for display in the given `context`.
///
/// Text at or under the threshold is returned unchanged. Longer text is cut
/// to exactly the threshold (in graphemes, so multi-byte text is never split
/// mid-character) with a literal `"..."` appended. No word-boundary
/// awareness; the cut can land mid-word.
pub fn truncate(text: &str, context: TruncationContext) -> String {
    let max_graphemes = context.max_graphemes();

    if text.graphemes(true).count() <= max_graphemes {
        return text.to_owned();
    }

    let truncated: String = text.graphemes(true).take(max_graphemes).collect();
    format!("{truncated}...")
}

/// Whether `text` would be truncated in the given `context`, i.e. whether a
/// detail-disclosure affordance should be offered.
pub fn needs_truncation(text: &str, context: TruncationContext) -> bool {
    text.graphemes(true).count() > context.max_graphemes()
}

/// The normalized status of a transaction.
///
/// The API sends status as a free-form string; comparison is case- and
/// whitespace-insensitive. Anything unrecognized lands in [Unknown]
/// rather than failing, since an odd status must never block rendering.
///
/// [Unknown]: TransactionStatus::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// The transaction has settled.
    Completed,
    /// Payment or delivery is outstanding.
    Pending,
    /// The transaction was called off.
    Cancelled,
    /// The transaction is being processed by the counterparty.
    Processing,
    /// The transaction was reversed and money returned.
    Refunded,
    /// Any status string this application does not recognize.
    Unknown,
}

impl TransactionStatus {
    /// Parse a raw status string from the API.
    ///
    /// Emits a warning naming the raw string when it is not recognized; this
    /// is the only development-facing signal for unexpected upstream data.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "completed" => TransactionStatus::Completed,
            "pending" => TransactionStatus::Pending,
            "cancelled" => TransactionStatus::Cancelled,
            "processing" => TransactionStatus::Processing,
            "refunded" => TransactionStatus::Refunded,
            "" | "unknown" => TransactionStatus::Unknown,
            _ => {
                tracing::warn!("unrecognized transaction status {raw:?}");
                TransactionStatus::Unknown
            }
        }
    }

    /// The display label for the status.
    pub fn label(self) -> &'static str {
        match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Cancelled => "Cancelled",
            TransactionStatus::Processing => "Processing",
            TransactionStatus::Refunded => "Refunded",
            TransactionStatus::Unknown => "Unknown",
        }
    }

    /// The badge style for the status, one distinct color per bucket.
    pub fn badge_class(self) -> &'static str {
        match self {
            TransactionStatus::Completed => {
                "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full \
                text-green-800 bg-green-100 dark:bg-green-900 dark:text-green-300"
            }
            TransactionStatus::Pending => {
                "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full \
                text-yellow-800 bg-yellow-100 dark:bg-yellow-900 dark:text-yellow-300"
            }
            TransactionStatus::Cancelled => {
                "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full \
                text-red-800 bg-red-100 dark:bg-red-900 dark:text-red-300"
            }
            TransactionStatus::Processing => {
                "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full \
                text-blue-800 bg-blue-100 dark:bg-blue-900 dark:text-blue-300"
            }
            TransactionStatus::Refunded => {
                "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full \
                text-purple-800 bg-purple-100 dark:bg-purple-900 dark:text-purple-300"
            }
            TransactionStatus::Unknown => {
                "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full \
                text-gray-800 bg-gray-100 dark:bg-gray-700 dark:text-gray-300"
            }
        }
    }

    /// The color used for this status in the distribution pie chart.
    pub fn chart_color(self) -> &'static str {
        match self {
            TransactionStatus::Completed => "#22c55e",
            TransactionStatus::Pending => "#eab308",
            TransactionStatus::Cancelled => "#ef4444",
            TransactionStatus::Processing => "#3b82f6",
            TransactionStatus::Refunded => "#a855f7",
            TransactionStatus::Unknown => "#6b7280",
        }
    }
}

/// The badge style for a transaction type (sale, purchase, transfer, ...).
///
/// Types are open-ended upstream, so unlike statuses there is no fixed
/// bucket list; everything gets the same neutral badge.
pub fn type_badge_class() -> &'static str {
    "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full \
    text-blue-800 bg-blue-100 dark:bg-blue-900 dark:text-blue-300"
}

/// Capitalize a transaction type string for display, e.g. "sale" -> "Sale".
pub fn type_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Unknown".to_owned(),
    }
}

/// Turn a snake_case field name into a title-cased label, e.g.
/// "terms_and_conditions" -> "Terms And Conditions".
pub fn humanize_field(field: &str) -> String {
    field
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an ISO-8601 date-time string from the API as "12 Mar 2024".
///
/// The raw string is returned unchanged if it cannot be parsed, so a
/// malformed upstream date degrades to an ugly label instead of an error.
pub fn format_date(raw: &str) -> String {
    let format = format_description!("[day padding:none] [month repr:short] [year]");

    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|datetime| datetime.format(&format).ok())
        .unwrap_or_else(|| raw.to_owned())
}

/// Format a number as a currency string with two decimal places.
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}



#[cfg(test)]
mod label_tests {
    use super::{format_date, humanize_field, type_label};

    #[test]
    fn humanize_field_title_cases_snake_case() {
        assert_eq!(humanize_field("terms_and_conditions"), "Terms And Conditions");
        assert_eq!(humanize_field("details"), "Details");
        assert_eq!(humanize_field("delivery_instructions"), "Delivery Instructions");
    }

    #[test]
    fn type_label_capitalizes() {
        assert_eq!(type_label("sale"), "Sale");
        assert_eq!(type_label(" lease "), "Lease");
        assert_eq!(type_label(""), "Unknown");
    }

    #[test]
    fn format_date_renders_rfc3339() {
        assert_eq!(format_date("2024-03-12T09:30:00Z"), "12 Mar 2024");
    }

    #[test]
    fn format_date_passes_through_unparseable_input() {
        assert_eq!(format_date("yesterday-ish"), "yesterday-ish");
        assert_eq!(format_date(""), "");
    }
}
