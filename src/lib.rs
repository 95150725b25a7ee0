//! Batch credit card fraud screening.
//!
//! Tables of 30-feature transactions are checked against the feature schema,
//! scored by a binary classifier in one batch, and summarised as a fraud report.

pub mod api;
pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod schema;
pub mod scoring;
