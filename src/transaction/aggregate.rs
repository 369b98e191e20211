//! Derived views over a [TransactionSummary]: status-distribution slices,
//! the recency-capped panel, and defensively coerced chart series.
//!
//! Everything here is pure computation over already-fetched data.

use std::collections::BTreeMap;

use crate::{
    api::{MonthlyTrend, RecentTransaction},
    format::TransactionStatus,
};

/// The number of entries shown in the compact recent-transactions panel.
pub(super) const RECENT_TRANSACTIONS_LIMIT: usize = 5;

/// One entry of the status distribution, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct StatusSlice {
    /// The normalized status bucket, which decides styling.
    pub status: TransactionStatus,
    /// The raw label as reported by the API.
    pub raw_label: String,
    /// The number of transactions with this status.
    pub count: u32,
    /// This slice's share of all transactions, in percent.
    pub percentage: f64,
}

/// The percentage `count` is of `total`, rounded to one decimal place.
///
/// One decimal place is the single rounding rule for every render of the
/// distribution. A zero `total` yields `0.0`.
pub(super) fn status_percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }

    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Turn the raw status distribution into render-ready slices.
///
/// Slices keep the map's label order (alphabetical), so re-renders are
/// stable regardless of the API's key order.
pub(super) fn status_slices(
    distribution: &BTreeMap<String, u32>,
    total_transactions: u32,
) -> Vec<StatusSlice> {
    distribution
        .iter()
        .map(|(raw_label, &count)| StatusSlice {
            status: TransactionStatus::parse(raw_label),
            raw_label: raw_label.clone(),
            count,
            percentage: status_percentage(count, total_transactions),
        })
        .collect()
}

/// The compact window of the summary's recent transactions.
///
/// The list is assumed pre-sorted most-recent-first by the server; this only
/// caps it to [RECENT_TRANSACTIONS_LIMIT] entries, preserving input order.
pub(super) fn recent_window(recent: &[RecentTransaction]) -> &[RecentTransaction] {
    &recent[..recent.len().min(RECENT_TRANSACTIONS_LIMIT)]
}

/// One coerced point of the monthly trend series.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct TrendPoint {
    pub month: String,
    pub transaction_count: f64,
    pub total_amount: f64,
}

/// Coerce the raw trend entries into complete points for the chart layer.
///
/// A missing month becomes `"Unknown"` and missing or unparseable numeric
/// fields become zero, so one malformed entry never blanks the whole chart.
pub(super) fn sanitize_trends(trends: &[MonthlyTrend]) -> Vec<TrendPoint> {
    trends
        .iter()
        .map(|trend| TrendPoint {
            month: trend
                .month
                .clone()
                .filter(|month| !month.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_owned()),
            transaction_count: trend.transaction_count.unwrap_or(0.0),
            total_amount: trend.total_amount.unwrap_or(0.0),
        })
        .collect()
}
