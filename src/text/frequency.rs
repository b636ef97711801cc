// src/text/frequency.rs
// =============================================================================
// Word counting and ranking.
//
// How it works:
// 1. Lower-case the text and split it into words (Unicode word boundaries)
// 2. Count each word, remembering the order words were first seen
// 3. Drop stopwords
// 4. Sort by count, most frequent first; equal counts keep first-seen order
//
// Step 4 never looks at hash order, so the same text always ranks the same.
// =============================================================================

use super::stopwords::StopWords;
use serde::Serialize;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// One line of the ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Splits text into lower-cased words
///
/// Punctuation and whitespace are never returned as tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase().unicode_words().map(str::to_string).collect()
}

/// Word counts in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    // (word, count) in the order each word first appeared
    entries: Vec<(String, usize)>,
    // word -> position in `entries`
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for token in tokens {
            table.add(token.into());
        }
        table
    }

    fn add(&mut self, word: String) {
        match self.index.get(&word) {
            Some(&position) => {
                if let Some(entry) = self.entries.get_mut(position) {
                    entry.1 += 1;
                }
            }
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push((word, 1));
            }
        }
    }

    /// Removes every stopword entirely (not just zeroing it)
    ///
    /// Running this twice changes nothing the second time.
    pub fn remove_stopwords(&mut self, stopwords: &StopWords) {
        self.entries.retain(|(word, _)| !stopwords.contains(word));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, (word, _))| (word.clone(), position))
            .collect();
    }

    /// Most frequent first, ties in first-seen order
    pub fn ranked(&self) -> Vec<WordCount> {
        let mut ranked: Vec<WordCount> = self
            .entries
            .iter()
            .map(|(word, count)| WordCount {
                word: word.clone(),
                count: *count,
            })
            .collect();

        // sort_by is stable, so entries with equal counts stay in first-seen order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

/// Tokenizes, counts, removes stopwords and ranks in one go
pub fn rank(text: &str, stopwords: &StopWords) -> Vec<WordCount> {
    let mut table = FrequencyTable::from_tokens(tokenize(text));
    table.remove_stopwords(stopwords);
    table.ranked()
}

/// Caller-side filter for "interesting" words
///
/// Keeps purely alphabetic words of at least `min_len` characters, which
/// throws away numbers, contractions and leftovers like "s" or "ll".
pub fn is_content_word(word: &str, min_len: usize) -> bool {
    word.chars().count() >= min_len && word.chars().all(char::is_alphabetic)
}
