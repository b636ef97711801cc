// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling starting from a seed URL
// - Optional same-site restriction (www.example.com == example.com)
// - Configurable depth limit and page limit
// - Cancellation between and during fetches
// - Failed pages are recorded, never fatal
// =============================================================================

mod config;
pub mod domain;
mod traversal;

pub use config::CrawlConfig;
pub use traversal::{CrawlOutcome, CrawlResult, Crawler, PageRecord};
