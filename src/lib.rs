//! Swipeable prediction-market feed: Gamma ingestion with a sample-data
//! fallback, derived price statistics, and the HTTP surface that serves them.

pub mod config;
pub mod data;
pub mod monitoring;
pub mod stats;
pub mod view;
pub mod web;
