// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is described by the structs
// and enums below, and clap generates the parsing, --help and --version.
// =============================================================================

use crate::fetch::DEFAULT_TIMEOUT_SECS;
use crate::text::Language;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "adjutant",
    version,
    about = "Crawl a website and list the words it uses most",
    long_about = "adjutant crawls a website from a starting page, collects the visible text of \
                  every page it reaches, and ranks the words in it by frequency after removing \
                  common stopwords."
)]
pub struct Cli {
    /// Log every request and link decision
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a site and rank the words on it
    ///
    /// Example: adjutant words https://example.com --depth 2
    Words(WordsArgs),

    /// Fetch a single page and print its plain text
    ///
    /// Example: adjutant text https://example.com/about
    Text {
        /// Page URL (e.g., https://example.com/about)
        url: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
}

#[derive(Args, Debug)]
pub struct WordsArgs {
    /// Seed URL to start crawling from (e.g., https://example.com)
    pub url: String,

    /// How many link hops to follow beyond the seed page
    ///
    /// Depth 0 = just the seed page
    /// Depth 1 = seed page + the pages it links to
    /// etc.
    #[arg(short, long, default_value_t = 1)]
    pub depth: usize,

    /// Also follow links to other domains
    #[arg(long)]
    pub external: bool,

    /// Stop after this many pages, whatever the depth
    #[arg(long, default_value_t = crate::crawl::CrawlConfig::default().max_pages)]
    pub max_pages: usize,

    /// Number of words to print
    #[arg(long, default_value_t = 50)]
    pub top: usize,

    /// Only print alphabetic words at least this long
    #[arg(long, default_value_t = 3)]
    pub min_length: usize,

    /// Stopword languages to remove (repeatable)
    #[arg(long = "language", value_enum, default_values_t = [Language::English, Language::Dutch])]
    pub languages: Vec<Language>,

    /// Extra stopwords, one per line
    #[arg(long)]
    pub stopwords_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_words_defaults() {
        let cli = Cli::parse_from(["adjutant", "words", "https://example.com"]);
        let Commands::Words(args) = cli.command else {
            panic!("expected the words subcommand");
        };
        assert_eq!(args.url, "https://example.com");
        assert_eq!(args.depth, 1);
        assert!(!args.external);
        assert_eq!(args.top, 50);
        assert_eq!(args.min_length, 3);
        assert_eq!(args.timeout, 60);
        assert_eq!(args.languages, vec![Language::English, Language::Dutch]);
    }

    #[test]
    fn test_words_flags() {
        let cli = Cli::parse_from([
            "adjutant",
            "-v",
            "words",
            "https://example.com",
            "--depth",
            "0",
            "--external",
            "--language",
            "english",
            "--json",
        ]);
        assert!(cli.verbose);
        let Commands::Words(args) = cli.command else {
            panic!("expected the words subcommand");
        };
        assert_eq!(args.depth, 0);
        assert!(args.external);
        assert!(args.json);
        assert_eq!(args.languages, vec![Language::English]);
    }
}
