//! Tax summary aggregation — the rollup the tax-prep workspace consumes.
//!
//! Preparer-verified extracted fields and client-self-reported entries are
//! merged into six income buckets, four withholding buckets, a deduction
//! list and dependents, with double-count suppression so a single
//! transaction is never counted twice toward total income.

mod builder;
mod fetch;
mod report;
mod types;

pub use builder::{build_summary, parse_amount, CLIENT_REPORTED_SOURCE};
pub use fetch::{fetch_summary_inputs, summary_for_client};
pub use report::{format_currency, render_summary_report};
pub use types::*;
