use crate::corpus::Query;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

lazy_static::lazy_static! {
    // NLTK English stopword list
    static ref STOPWORDS: HashSet<&'static str> = {
        [
            "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
            "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
            "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
            "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
            "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
            "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
            "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
            "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
            "between", "into", "through", "during", "before", "after", "above", "below",
            "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
            "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
            "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
            "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t",
            "can", "will", "just", "don", "don't", "should", "should've", "now", "d", "ll",
            "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
            "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
            "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
            "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn",
            "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
        ]
        .iter()
        .copied()
        .collect()
    };

    static ref ABBREVIATIONS: HashSet<&'static str> = {
        [
            "mr", "mrs", "ms", "dr", "prof", "st", "sr", "jr", "vs", "etc", "e.g", "i.e",
            "cf", "al", "approx", "dept", "fig", "gen", "gov", "lt", "mt", "capt", "col",
            "sgt", "rev", "hon", "u.s", "u.k",
        ]
        .iter()
        .copied()
        .collect()
    };
}

/// Possessive and contraction endings
const CLITICS: &[&str] = &["n't", "'s", "'m", "'d", "'ll", "'re", "'ve"];

/// Turns raw text into normalized tokens: lowercased, punctuation dropped,
/// English stopwords removed, optionally stemmed.
///
/// Documents and queries must go through the same `Tokenizer`, since the
/// rankers compare tokens by exact equality.
pub struct Tokenizer {
    stemmer: Option<Stemmer>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self { stemmer: None }
    }

    /// A tokenizer that also reduces words to their English stem
    pub fn stemming() -> Self {
        Self {
            stemmer: Some(Stemmer::create(Algorithm::English)),
        }
    }

    pub fn is_stemming(&self) -> bool {
        self.stemmer.is_some()
    }

    /// Split text into words on Unicode word boundaries
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_string).collect()
    }

    /// Convert tokens to lowercase, folding typographic apostrophes so
    /// contractions line up with the stopword list
    fn lowercase_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .map(|t| t.to_lowercase().replace('\u{2019}', "'"))
            .collect()
    }

    /// Strip possessive and contraction endings (`turing's` -> `turing`).
    /// Contractions that are stopwords as a whole are left for the stopword
    /// filter.
    fn clitic_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .map(|t| {
                if STOPWORDS.contains(t.as_str()) {
                    return t;
                }
                match CLITICS.iter().find_map(|clitic| t.strip_suffix(clitic)) {
                    // can't
                    Some("ca") => "can".to_string(),
                    Some(stem) if !stem.is_empty() => stem.to_string(),
                    _ => t,
                }
            })
            .collect()
    }

    /// Remove tokens made only of punctuation or symbols
    fn punctuation_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| t.chars().any(char::is_alphanumeric))
            .collect()
    }

    /// Remove stopwords
    fn stopword_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !STOPWORDS.contains(t.as_str()))
            .collect()
    }

    /// Apply stemming, if enabled
    fn stemmer_filter(&self, tokens: Vec<String>) -> Vec<String> {
        match &self.stemmer {
            Some(stemmer) => tokens
                .into_iter()
                .map(|t| stemmer.stem(&t).to_string())
                .collect(),
            None => tokens,
        }
    }

    /// Full analysis pipeline
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let tokens = self.lowercase_filter(tokens);
        let tokens = self.clitic_filter(tokens);
        let tokens = self.punctuation_filter(tokens);
        let tokens = self.stopword_filter(tokens);
        self.stemmer_filter(tokens)
    }

    /// Analyze and collapse duplicates (for queries)
    pub fn analyze_unique(&self, text: &str) -> Query {
        self.analyze(text).into_iter().collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a document into sentences.
///
/// Lines are treated as separate passages, then each passage is cut on Unicode
/// sentence boundaries. A piece ending in an abbreviation or a single initial
/// (`Dr.`, `e.g.`, `J.`) is joined with the piece after it. Sentences are
/// trimmed; blank ones are dropped.
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').flat_map(split_passage)
}

fn split_passage(passage: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = None;

    for (offset, piece) in passage.split_sentence_bound_indices() {
        let begin = *start.get_or_insert(offset);
        if ends_with_abbreviation(piece) {
            continue;
        }
        push_trimmed(&mut sentences, &passage[begin..offset + piece.len()]);
        start = None;
    }
    if let Some(begin) = start {
        push_trimmed(&mut sentences, &passage[begin..]);
    }

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, sentence: &'a str) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}

fn ends_with_abbreviation(piece: &str) -> bool {
    let Some(word) = piece.split_whitespace().last() else {
        return false;
    };
    let Some(stem) = word.strip_suffix('.') else {
        return false;
    };
    let stem = stem.trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut chars = stem.chars();
    let single_initial = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());
    single_initial || ABBREVIATIONS.contains(stem.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("Hello, World! This is a test.");
        assert_eq!(tokens, vec!["Hello", "World", "This", "is", "a", "test"]);
    }

    #[test]
    fn test_analyze() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.analyze("The Quick brown fox jumps over the lazy dog!");
        assert_eq!(tokens, vec!["quick", "brown", "fox", "jumps", "lazy", "dog"]);
    }

    #[test]
    fn test_contractions_are_stopwords() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.analyze("You don't know, wouldn\u{2019}t you?").contains(&"know".to_string()));
        assert_eq!(tokenizer.analyze("You don't, wouldn\u{2019}t you?"), Vec::<String>::new());
    }

    #[test]
    fn test_repeats_are_kept() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.analyze("Python, python and PYTHON.");
        assert_eq!(tokens, vec!["python", "python", "python"]);
    }

    #[test]
    fn test_analyze_unique() {
        let tokenizer = Tokenizer::new();
        let query = tokenizer.analyze_unique("What is a neural network in a network?");
        assert_eq!(query.len(), 2);
        assert!(query.contains("neural"));
        assert!(query.contains("network"));
    }

    #[test]
    fn test_stemming() {
        let tokenizer = Tokenizer::stemming();
        assert!(tokenizer.is_stemming());
        let tokens = tokenizer.analyze("Running runs");
        assert_eq!(tokens, vec!["run", "run"]);
        assert!(!Tokenizer::default().is_stemming());
    }

    #[test]
    fn test_possessives_match_the_name() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.analyze("Python's creator").contains(&"python".to_string()));
        assert_eq!(
            tokenizer.analyze("Turing\u{2019}s machine was Python's ancestor."),
            vec!["turing", "machine", "python", "ancestor"]
        );
    }

    #[test]
    fn test_contraction_endings() {
        let tokenizer = Tokenizer::new();
        // Stopword contractions go away whole; other endings are split off
        assert_eq!(tokenizer.analyze("They can't stop, you'll see."), vec!["stop", "see"]);
        assert_eq!(tokenizer.analyze("Rock'n'roll at five o'clock"), vec!["rock'n'roll", "five", "o'clock"]);
        assert_eq!(tokenizer.analyze("The students' teacher'd left"), vec!["students", "teacher", "left"]);
    }

    #[test]
    fn test_split_sentences_keeps_abbreviations() {
        let text = "Dr. Smith met Mr. Jones at noon. It rained.";
        let sentences: Vec<&str> = split_sentences(text).collect();
        assert_eq!(sentences, vec!["Dr. Smith met Mr. Jones at noon.", "It rained."]);
    }

    #[test]
    fn test_split_sentences_keeps_initials() {
        let text = "The Hobbit was written by J. R. R. Tolkien. Fruits, e.g. Apples, are sweet. St. Louis is a city.";
        let sentences: Vec<&str> = split_sentences(text).collect();
        assert_eq!(
            sentences,
            vec![
                "The Hobbit was written by J. R. R. Tolkien.",
                "Fruits, e.g. Apples, are sweet.",
                "St. Louis is a city."
            ]
        );
    }

    #[test]
    fn test_split_sentences() {
        let text = "First sentence here. Second one?\n\nA new passage without a stop\nLast!";
        let sentences: Vec<&str> = split_sentences(text).collect();
        assert_eq!(
            sentences,
            vec!["First sentence here.", "Second one?", "A new passage without a stop", "Last!"]
        );
    }
}
