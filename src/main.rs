// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so stdout only carries results)
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the results as a table or JSON
// 5. Exit with proper code (0 = success, 2 = error)
//
// A crawl where every page failed is still a success: it just has no words.
// Only bad input (an unparseable URL, an unreadable stopword file) exits 2.
// =============================================================================

mod cli;   // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the traversal engine and domain rules
mod fetch; // src/fetch/ - downloading pages
mod text;  // src/text/ - HTML to text, word ranking, stopwords

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, WordsArgs};
use crawl::{CrawlConfig, CrawlOutcome, CrawlResult, Crawler, PageRecord};
use fetch::{FetchConfig, HttpFetcher, PageFetcher};
use serde::Serialize;
use std::time::Duration;
use text::{is_content_word, rank, StopWords, WordCount};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins if set; otherwise our own crate logs at info (debug with -v)
// and everything else only at warn
fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "warn,adjutant=debug"
    } else {
        "warn,adjutant=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Words(args) => handle_words(args).await,
        Commands::Text { url, timeout } => handle_text(&url, timeout).await,
    }
}

// Handles the 'words' subcommand: crawl, rank, print
async fn handle_words(args: WordsArgs) -> Result<i32> {
    Url::parse(&args.url).with_context(|| format!("Invalid URL '{}'", args.url))?;

    // The stoplist is built once here and only ever borrowed afterwards
    let mut stopwords = StopWords::for_languages(&args.languages);
    if let Some(path) = &args.stopwords_file {
        stopwords
            .extend_from_file(path)
            .with_context(|| format!("Could not read stopwords from {}", path.display()))?;
    }
    info!("Loaded {} stopword(s)", stopwords.len());

    let fetcher = build_fetcher(args.timeout)?;
    let config = CrawlConfig::builder()
        .max_depth(args.depth)
        .internal_only(!args.external)
        .max_pages(args.max_pages)
        .build();

    info!(
        "Crawling {} (depth {}, {} links only)",
        args.url,
        config.max_depth,
        if config.internal_only { "internal" } else { "all" }
    );

    let crawler = Crawler::new(fetcher, config).with_cancellation(cancel_on_ctrl_c());
    let result = crawler.crawl(&args.url).await;

    match result.outcome {
        CrawlOutcome::Completed => {}
        CrawlOutcome::PageLimitReached => warn!("Stopped early: page limit reached"),
        CrawlOutcome::Cancelled => warn!("Stopped early: cancelled, ranking what we have"),
    }

    let corpus = result.corpus();
    info!("Collected {} characters of text", corpus.chars().count());

    // The ranker keeps every word; picking the interesting ones is our job
    let words: Vec<WordCount> = rank(&corpus, &stopwords)
        .into_iter()
        .filter(|w| is_content_word(&w.word, args.min_length))
        .take(args.top)
        .collect();

    if args.json {
        print_json(&args.url, &result, &words)?;
    } else {
        print_table(&result, &words);
    }

    Ok(0)
}

// Handles the 'text' subcommand: one page, no crawling
async fn handle_text(url: &str, timeout: u64) -> Result<i32> {
    Url::parse(url).with_context(|| format!("Invalid URL '{}'", url))?;

    let fetcher = build_fetcher(timeout)?;
    let page = fetcher
        .fetch(url)
        .await
        .with_context(|| format!("Could not fetch {}", url))?;

    let normalized = text::normalize(&page.body, url);
    println!("{}", normalized.text);
    Ok(0)
}

fn build_fetcher(timeout_secs: u64) -> Result<HttpFetcher> {
    let config = FetchConfig {
        timeout: Duration::from_secs(timeout_secs),
        ..FetchConfig::default()
    };
    HttpFetcher::new(config).context("Failed to create HTTP client")
}

// Cancels the returned token on the first Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let handle = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, finishing up");
            handle.cancel();
        }
    });
    token
}

#[derive(Serialize)]
struct WordsReport<'a> {
    seed: &'a str,
    outcome: &'static str,
    pages: Vec<PageSummary<'a>>,
    words: &'a [WordCount],
}

#[derive(Serialize)]
struct PageSummary<'a> {
    url: &'a str,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    duplicate_of: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn outcome_name(outcome: CrawlOutcome) -> &'static str {
    match outcome {
        CrawlOutcome::Completed => "completed",
        CrawlOutcome::PageLimitReached => "page_limit_reached",
        CrawlOutcome::Cancelled => "cancelled",
    }
}

fn print_json(seed: &str, result: &CrawlResult, words: &[WordCount]) -> Result<()> {
    let pages = result
        .records
        .iter()
        .map(|record| match record {
            PageRecord::Fetched { url, depth, .. } => PageSummary {
                url,
                depth: *depth,
                duplicate_of: None,
                error: None,
            },
            PageRecord::Duplicate { url, depth, same_as } => PageSummary {
                url,
                depth: *depth,
                duplicate_of: Some(same_as.as_str()),
                error: None,
            },
            PageRecord::Failed { url, depth, reason } => PageSummary {
                url,
                depth: *depth,
                duplicate_of: None,
                error: Some(reason.to_string()),
            },
        })
        .collect();

    let report = WordsReport {
        seed,
        outcome: outcome_name(result.outcome),
        pages,
        words,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

// Prints the ranking as a human-readable table
fn print_table(result: &CrawlResult, words: &[WordCount]) {
    println!("{:<6} {:<30} {:>8}", "RANK", "WORD", "COUNT");
    println!("{}", "=".repeat(46));

    for (rank, entry) in words.iter().enumerate() {
        println!("{:<6} {:<30} {:>8}", rank + 1, entry.word, entry.count);
    }

    println!();

    let failed = result.failures().count();
    let duplicates = result.duplicates().count();
    println!("📊 Summary:");
    println!("   📄 Pages fetched: {}", result.records.len() - failed - duplicates);
    println!("   🔁 Duplicate pages skipped: {}", duplicates);
    println!("   ❌ Pages failed: {}", failed);
    println!("   🔤 Words shown: {}", words.len());
}
