// src/fetch/mod.rs
// =============================================================================
// This module downloads web pages.
//
// The crawler never talks to reqwest directly. It only knows the PageFetcher
// trait, so tests can hand it an in-memory web instead of the real one.
//
// Every failure is a typed FetchError value. The crawler records it next to
// the URL and moves on; nothing here is allowed to abort a crawl.
// =============================================================================

mod http;

pub use http::{FetchConfig, HttpFetcher, DEFAULT_TIMEOUT_SECS};

use async_trait::async_trait;
use thiserror::Error;

/// A successfully downloaded and decoded HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: String,
    /// Value of the Content-Type header
    pub content_type: String,
    /// Charset declared in the Content-Type header, lower-cased
    pub charset: Option<String>,
    /// The decoded HTML
    pub body: String,
}

/// Why a page could not be turned into HTML text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("unsupported content type: {0:?}")]
    UnsupportedContentType(String),

    #[error("could not decode body: {0}")]
    Decode(String),
}

/// Something that can turn a URL into HTML
///
/// Implementations must give up after their own timeout; the crawler
/// awaits one fetch at a time and has no deadline of its own.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
