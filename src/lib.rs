//! Taxfolio — backend core of a tax-document portal for preparers and
//! their clients.
//!
//! Documents are registered by filename, classified into tax-form types,
//! scaffolded with the structured fields a preparer is expected to fill
//! in, and rolled up per client and tax year into a categorized summary.

pub mod api;
pub mod classify;
pub mod config;
pub mod db;
pub mod fields;
pub mod models;
pub mod pipeline;
pub mod summary;
