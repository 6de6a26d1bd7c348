use std::collections::{BTreeMap, BTreeSet};

/// Normalized tokens of one unit (a document or a sentence), in text order.
/// Repeats are kept: term frequency depends on them.
pub type TokenSet = Vec<String>;

/// Unit identifier -> tokens.
///
/// A `BTreeMap` so that every pass over the corpus visits units in identifier
/// order, which keeps rankings with tied scores reproducible.
pub type Corpus = BTreeMap<String, TokenSet>;

/// Normalized query terms, duplicates collapsed.
pub type Query = BTreeSet<String>;

/// Build a corpus from `(identifier, tokens)` pairs.
pub fn corpus_from<I, K, T>(units: I) -> Corpus
where
    I: IntoIterator<Item = (K, Vec<T>)>,
    K: Into<String>,
    T: Into<String>,
{
    units
        .into_iter()
        .map(|(id, tokens)| (id.into(), tokens.into_iter().map(Into::into).collect()))
        .collect()
}

/// Build a query from raw terms.
pub fn query_from<I, T>(terms: I) -> Query
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    terms.into_iter().map(Into::into).collect()
}
