// src/text/stopwords.rs
// =============================================================================
// Stopwords are very common words ("the", "and", "de", "het") that say
// nothing about what a site is about. They are removed before ranking.
//
// The list is built once in main() and handed to the ranker by reference.
// The built-in lists are the NLTK English and Dutch lists; extra words can
// be loaded from a plain text file.
// =============================================================================

use clap::ValueEnum;
use std::collections::HashSet;
use std::path::Path;

const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

const DUTCH: &[&str] = &[
    "de", "en", "van", "ik", "te", "dat", "die", "in", "een", "hij", "het", "niet", "zijn", "is",
    "was", "op", "aan", "met", "als", "voor", "had", "er", "maar", "om", "hem", "dan", "zou",
    "of", "wat", "mijn", "men", "dit", "zo", "door", "over", "ze", "zich", "bij", "ook", "tot",
    "je", "mij", "uit", "der", "daar", "haar", "naar", "heb", "hoe", "heeft", "hebben", "deze",
    "u", "want", "nog", "zal", "me", "zij", "nu", "ge", "geen", "omdat", "iets", "worden",
    "toch", "al", "waren", "veel", "meer", "doen", "toen", "moet", "ben", "zonder", "kan", "hun",
    "dus", "alles", "onder", "ja", "eens", "hier", "wie", "werd", "altijd", "doch", "wordt",
    "wezen", "kunnen", "ons", "zelf", "tegen", "na", "reeds", "wil", "kon", "niets", "uw",
    "iemand", "geweest", "andere", "wij",
];

/// Languages with a built-in stopword list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    English,
    Dutch,
}

impl Language {
    fn words(self) -> &'static [&'static str] {
        match self {
            Language::English => ENGLISH,
            Language::Dutch => DUTCH,
        }
    }
}

/// A set of lower-cased words to leave out of the ranking
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Builds the union of the built-in lists for `languages`
    pub fn for_languages(languages: &[Language]) -> Self {
        let mut stopwords = Self::default();
        for language in languages {
            stopwords.extend(language.words().iter().copied());
        }
        stopwords
    }

    /// Adds words, lower-casing them
    pub fn extend<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        self.words
            .extend(words.into_iter().map(|w| w.trim().to_lowercase()).filter(|w| !w.is_empty()));
    }

    /// Adds the words of a file: one per line, `#` starts a comment
    pub fn extend_from_file(&mut self, path: &Path) -> std::io::Result<()> {
        let contents = std::fs::read_to_string(path)?;
        self.extend(
            contents
                .lines()
                .map(|line| line.split('#').next().unwrap_or("")),
        );
        Ok(())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}
