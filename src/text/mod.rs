// src/text/mod.rs
// =============================================================================
// Everything that happens to a page after it has been downloaded:
// - html: HTML -> visible text + outgoing links
// - frequency: text -> ranked word counts
// - stopwords: the words the ranking leaves out
// =============================================================================

pub mod frequency;
pub mod html;
pub mod stopwords;

pub use frequency::{is_content_word, rank, WordCount};
pub use html::normalize;
pub use stopwords::{Language, StopWords};
