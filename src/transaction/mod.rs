//! Transaction browsing and management.
//!
//! This module contains everything related to an animal's transactions:
//! - The transactions page with its list and summary views
//! - The aggregation and chart generation behind the summary view
//! - The new/edit pages and the create/update/delete endpoints
//! - The detail-disclosure dialog for long text fields

mod aggregate;
mod cards;
mod charts;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod detail_dialog;
mod edit_endpoint;
mod edit_page;
mod form;
mod list_view;
mod transactions_page;

pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use detail_dialog::get_detail_dialog;
pub use edit_endpoint::update_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use transactions_page::get_transactions_page;
