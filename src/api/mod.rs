//! The data-access layer for the remote livestock API.
//!
//! This module contains everything related to talking to the system of
//! record:
//! - Typed models for transactions, summaries and animals
//! - Envelope normalization for the API's inconsistent response shapes
//! - A session holding the bearer token and a refresh-if-stale CSRF token
//! - The HTTP client with the fetch/create/update/delete operations

mod client;
mod envelope;
mod models;
mod session;

pub use client::{ApiClient, ApiConfig};
pub use models::{
    AnimalSummary, MonthlyTrend, RecentTransaction, SummaryOverview, Transaction,
    TransactionDocument, TransactionPayload, TransactionSummary,
};
