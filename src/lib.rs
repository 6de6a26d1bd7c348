// Re-export main components
pub mod api;
pub mod corpus;
pub mod engine;
pub mod index;
pub mod loader;
pub mod ranking;
pub mod tokenizer;

// Re-export commonly used types
pub use corpus::{Corpus, Query, TokenSet};
pub use engine::{Answer, QaEngine, QaOptions};
pub use index::{compute_idfs, IdfTable};
pub use ranking::{top_files, top_sentences, RankError, SentenceScore};
pub use tokenizer::Tokenizer;

// Re-export error types
pub use anyhow::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    #[test]
    fn test_basic_workflow() -> Result<()> {
        let tokenizer = Tokenizer::new();
        let texts = [
            ("mars.txt", "Mars is the fourth planet from the Sun. Mars has two moons, Phobos and Deimos."),
            ("venus.txt", "Venus is the second planet from the Sun. Venus is the hottest planet."),
        ];

        // Document pass
        let files: Corpus = texts
            .iter()
            .map(|(name, text)| (name.to_string(), tokenizer.analyze(text)))
            .collect();
        let file_idfs = compute_idfs(&files);
        let query = tokenizer.analyze_unique("How many moons does Mars have?");
        let top = top_files(&query, &files, &file_idfs, NonZeroUsize::MIN);
        assert_eq!(top, vec!["mars.txt"]);

        // Sentence pass
        let sentences: Corpus = tokenizer::split_sentences(texts[0].1)
            .map(|s| (s.to_string(), tokenizer.analyze(s)))
            .filter(|(_, tokens)| !tokens.is_empty())
            .collect();
        let sentence_idfs = compute_idfs(&sentences);
        let best = top_sentences(&query, &sentences, &sentence_idfs, NonZeroUsize::MIN)?;
        assert_eq!(best, vec!["Mars has two moons, Phobos and Deimos."]);

        Ok(())
    }
}
