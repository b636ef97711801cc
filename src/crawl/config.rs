// src/crawl/config.rs
// =============================================================================
// Crawl settings, with a builder so call sites only name what they change.
// =============================================================================

/// Default cap on fetch attempts per crawl
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Settings for one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Link hops allowed beyond the seed (0 = only the seed page)
    pub max_depth: usize,

    /// Only follow links on the seed's registrable domain
    pub internal_only: bool,

    /// Stop after this many fetch attempts, failures included
    ///
    /// The seed is always attempted, so 0 behaves like 1.
    pub max_pages: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            internal_only: true,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl CrawlConfig {
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::default()
    }
}

/// Builder for CrawlConfig
#[derive(Debug, Default)]
pub struct CrawlConfigBuilder {
    config: CrawlConfig,
}

impl CrawlConfigBuilder {
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn internal_only(mut self, internal_only: bool) -> Self {
        self.config.internal_only = internal_only;
        self
    }

    /// Values below 1 are raised to 1
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages.max(1);
        self
    }

    pub fn build(self) -> CrawlConfig {
        self.config
    }
}
