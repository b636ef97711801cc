// src/crawl/traversal.rs
// =============================================================================
// This module implements the crawl itself: a depth-first walk over the link
// graph, starting at a seed URL.
//
// How it works:
// 1. Put the seed on a stack
// 2. Pop a URL; skip it if we already tried it
// 3. Mark it visited *before* fetching, so a failure is never retried
// 4. Fetch; if the exact same body was already seen under another URL,
//    note the duplicate and move on
// 5. Otherwise normalize and keep the text
// 6. If we may go deeper, push its links in reverse so the first link is
//    popped next
// 7. Repeat until the stack is empty, the page limit is hit, or we are
//    cancelled
//
// Popping the first link first gives exactly the order a recursive crawl
// would produce: a page, then everything under its first link, then
// everything under its second link, and so on.
//
// A page that fails to download is recorded and logged, and the walk simply
// carries on with the next URL on the stack.
// =============================================================================

use super::config::CrawlConfig;
use super::domain::registrable_domain;
use crate::fetch::{FetchError, PageFetcher};
use crate::text::html::normalize;
use std::collections::{HashMap, HashSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use xxhash_rust::xxh3::xxh3_64;

// A URL waiting on the stack
#[derive(Debug, Clone)]
struct CrawlItem {
    url: String,
    depth: usize, // link hops from the seed
}

/// What happened to one visited URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRecord {
    Fetched {
        url: String,
        depth: usize,
        text: String,
    },
    /// Same body as a page fetched earlier; adds no text and no links
    Duplicate {
        url: String,
        depth: usize,
        same_as: String,
    },
    Failed {
        url: String,
        depth: usize,
        reason: FetchError,
    },
}

/// Why the crawl stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Every reachable page within the depth limit was tried
    #[default]
    Completed,
    /// `max_pages` fetch attempts were made
    PageLimitReached,
    /// The cancellation token fired
    Cancelled,
}

/// Everything one crawl produced
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    /// Every URL a fetch was attempted for (plus any passed in up front)
    pub visited: HashSet<String>,
    /// One record per fetch attempt, in traversal order
    pub records: Vec<PageRecord>,
    pub outcome: CrawlOutcome,
}

impl CrawlResult {
    /// Text of each successfully fetched page, in traversal order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(|record| match record {
            PageRecord::Fetched { text, .. } => Some(text.as_str()),
            PageRecord::Duplicate { .. } | PageRecord::Failed { .. } => None,
        })
    }

    /// All page texts joined into one document
    pub fn corpus(&self) -> String {
        self.texts().collect::<Vec<_>>().join("\n")
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &FetchError)> {
        self.records.iter().filter_map(|record| match record {
            PageRecord::Failed { url, reason, .. } => Some((url.as_str(), reason)),
            PageRecord::Fetched { .. } | PageRecord::Duplicate { .. } => None,
        })
    }

    /// (url, url of the page it repeats) for every duplicate body
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records.iter().filter_map(|record| match record {
            PageRecord::Duplicate { url, same_as, .. } => Some((url.as_str(), same_as.as_str())),
            PageRecord::Fetched { .. } | PageRecord::Failed { .. } => None,
        })
    }
}

/// Walks the link graph from a seed URL
pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
    cancel: CancellationToken,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Stops the crawl (between or during fetches) once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Crawls from `seed_url` with a fresh visited set
    pub async fn crawl(&self, seed_url: &str) -> CrawlResult {
        self.crawl_from(seed_url, HashSet::new()).await
    }

    /// Crawls from `seed_url`, treating everything in `visited` as done
    ///
    /// If the seed itself is already in `visited` nothing is fetched.
    pub async fn crawl_from(&self, seed_url: &str, visited: HashSet<String>) -> CrawlResult {
        let seed_domain = registrable_domain(seed_url);

        let mut result = CrawlResult {
            visited,
            ..CrawlResult::default()
        };
        let mut attempts = 0;
        // The seed is always attempted, even with a zero page limit
        let max_pages = self.config.max_pages.max(1);

        // xxh3 of each body -> first URL it was served from
        let mut seen_bodies: HashMap<u64, String> = HashMap::new();

        let mut stack = vec![CrawlItem {
            url: seed_url.to_string(),
            depth: 0,
        }];

        while let Some(item) = stack.pop() {
            // A sibling branch may have reached this URL since it was pushed
            if result.visited.contains(&item.url) {
                debug!("Already visited: {}", item.url);
                continue;
            }

            if self.cancel.is_cancelled() {
                result.outcome = CrawlOutcome::Cancelled;
                break;
            }

            if attempts >= max_pages {
                warn!(
                    "Page limit of {} reached, {} URL(s) left unvisited",
                    max_pages,
                    stack.len() + 1
                );
                result.outcome = CrawlOutcome::PageLimitReached;
                break;
            }

            attempts += 1;
            result.visited.insert(item.url.clone());

            info!("Crawling [depth {}]: {}", item.depth, item.url);

            let fetched = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                fetched = self.fetcher.fetch(&item.url) => Some(fetched),
            };

            let Some(fetched) = fetched else {
                info!("Crawl cancelled while fetching {}", item.url);
                result.outcome = CrawlOutcome::Cancelled;
                break;
            };

            let page = match fetched {
                Ok(page) => page,
                Err(reason) => {
                    warn!("Failed to fetch {}: {}", item.url, reason);
                    result.records.push(PageRecord::Failed {
                        url: item.url,
                        depth: item.depth,
                        reason,
                    });
                    continue;
                }
            };

            debug!(
                "Fetched {} ({}, charset {}, {} bytes)",
                page.url,
                page.content_type,
                page.charset.as_deref().unwrap_or("default"),
                page.body.len()
            );

            // "/b" and "/b#top" (or "/" and "/index.html") often serve the
            // same bytes; counting them twice would skew the ranking
            let body_hash = xxh3_64(page.body.as_bytes());
            if let Some(first_url) = seen_bodies.get(&body_hash) {
                info!("Skipping {}: same content as {}", item.url, first_url);
                result.records.push(PageRecord::Duplicate {
                    url: item.url,
                    depth: item.depth,
                    same_as: first_url.clone(),
                });
                continue;
            }
            seen_bodies.insert(body_hash, item.url.clone());

            let normalized = normalize(&page.body, &item.url);

            if item.depth < self.config.max_depth {
                let children: Vec<String> = normalized
                    .links
                    .into_iter()
                    .filter(|link| self.should_follow(link, seed_domain.as_deref()))
                    .filter(|link| !result.visited.contains(link))
                    .collect();

                debug!("{} link(s) to follow from {}", children.len(), item.url);

                // Reversed, so the first link on the page is popped first
                for link in children.into_iter().rev() {
                    stack.push(CrawlItem {
                        url: link,
                        depth: item.depth + 1,
                    });
                }
            }

            result.records.push(PageRecord::Fetched {
                url: item.url,
                depth: item.depth,
                text: normalized.text,
            });
        }

        info!(
            "Crawl finished: {} page(s) visited, {} failed, {} duplicate(s)",
            result.records.len(),
            result.failures().count(),
            result.duplicates().count()
        );

        result
    }

    // With internal_only, a link is followed only if it is on the seed's site
    fn should_follow(&self, link: &str, seed_domain: Option<&str>) -> bool {
        if !self.config.internal_only {
            return true;
        }
        match (seed_domain, registrable_domain(link)) {
            (Some(seed), Some(domain)) => seed == domain,
            _ => false,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec as a stack instead of a recursive async fn?
//    - An async fn can't call itself without boxing its future
//    - A deep site could also overflow the real stack
//    - push/pop on a Vec gives the same visiting order with neither problem
//
// 2. Why is `visited` updated before the fetch?
//    - If the fetch fails we never want to try that URL again
//    - Links seen later in the walk are filtered against it right away
//
// 3. What does tokio::select! with `biased;` do here?
//    - It waits for whichever finishes first: the fetch or Ctrl-C
//    - `biased` checks the branches top to bottom, so cancellation wins
//      a tie and a cancelled crawl never starts processing one more page
//
// 4. Why hash the body instead of storing it?
//    - A u64 per page is all we need to spot an exact repeat
//    - xxh3 is fast enough that hashing costs nothing next to the download
//
// 5. Why is Crawler generic over F instead of holding Box<dyn PageFetcher>?
//    - Tests pass an in-memory fake, main() passes HttpFetcher
//    - Both are known at compile time, so no boxing is needed
// -----------------------------------------------------------------------------
