use crate::corpus::Corpus;
use std::collections::{HashMap, HashSet};

/// Inverse document frequency per token: `ln(N / df)`.
///
/// Holds exactly the vocabulary of the corpus it was built from. There is no
/// way to insert into or patch a table; build a new one when the corpus changes.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    weights: HashMap<String, f64>,
    unit_count: usize,
}

impl IdfTable {
    /// Get the IDF weight of a token, if it occurs anywhere in the corpus
    pub fn get(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of units the table was computed over
    pub fn unit_count(&self) -> usize {
        self.unit_count
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(token, idf)| (token.as_str(), *idf))
    }
}

/// Compute the IDF of every token appearing in `corpus`.
///
/// A unit counts once towards a token's document frequency no matter how often
/// the token repeats inside it. An empty corpus yields an empty table.
pub fn compute_idfs(corpus: &Corpus) -> IdfTable {
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();

    for tokens in corpus.values() {
        let unique_tokens: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for token in unique_tokens {
            *doc_freq.entry(token).or_insert(0) += 1;
        }
    }

    // df >= 1 for every entry, so the ratio is >= 1 and the log is >= 0
    let total_units = corpus.len() as f64;
    let weights = doc_freq
        .into_iter()
        .map(|(token, df)| (token.to_string(), (total_units / df as f64).ln()))
        .collect();

    IdfTable {
        weights,
        unit_count: corpus.len(),
    }
}
