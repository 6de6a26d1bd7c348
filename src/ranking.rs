use crate::corpus::{Corpus, Query};
use crate::index::IdfTable;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    /// Density is undefined for a unit without tokens; callers must filter
    /// those out before ranking.
    #[error("unit {id:?} has no tokens")]
    EmptyUnit { id: String },
}

/// TF-IDF score of one document
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    pub doc_id: String,
    pub score: f64,
}

impl ScoredDocument {
    pub fn new(doc_id: String, score: f64) -> Self {
        Self { doc_id, score }
    }
}

/// Score a document: sum over query terms of `tf * idf`.
///
/// `tf` counts exact token matches. Terms unknown to `idfs` add nothing.
pub fn tf_idf_score(query: &Query, tokens: &[String], idfs: &IdfTable) -> f64 {
    query
        .iter()
        .filter_map(|term| idfs.get(term).map(|idf| (term, idf)))
        .map(|(term, idf)| {
            let tf = tokens.iter().filter(|token| *token == term).count();
            tf as f64 * idf
        })
        .sum()
}

/// Score every document in `corpus`, highest first.
///
/// Equal scores keep corpus (identifier) order.
pub fn rank_files(query: &Query, corpus: &Corpus, idfs: &IdfTable) -> Vec<ScoredDocument> {
    let mut scored_docs: Vec<ScoredDocument> = corpus
        .iter()
        .map(|(doc_id, tokens)| ScoredDocument::new(doc_id.clone(), tf_idf_score(query, tokens, idfs)))
        .collect();

    // Sort by score descending
    scored_docs.sort_by(|a, b| b.score.total_cmp(&a.score));

    scored_docs
}

/// Identifiers of the `n` documents most relevant to `query` by TF-IDF
pub fn top_files(query: &Query, corpus: &Corpus, idfs: &IdfTable, n: NonZeroUsize) -> Vec<String> {
    rank_files(query, corpus, idfs)
        .into_iter()
        .take(n.get())
        .map(|sd| sd.doc_id)
        .collect()
}

/// Score of one sentence.
///
/// Ordered by `idf_sum`, then by `density`. Both compare with
/// [`f64::total_cmp`], so the order is total.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SentenceScore {
    /// Sum of the IDF of each query term present in the sentence
    pub idf_sum: f64,
    /// Matched query terms over sentence length
    pub density: f64,
}

impl Ord for SentenceScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.idf_sum
            .total_cmp(&other.idf_sum)
            .then_with(|| self.density.total_cmp(&other.density))
    }
}

impl PartialOrd for SentenceScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SentenceScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SentenceScore {}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredSentence {
    pub sentence: String,
    pub score: SentenceScore,
}

/// Score a sentence against the query.
///
/// Presence counts, repetition does not. A matched term missing from `idfs`
/// still raises density but adds nothing to `idf_sum`. `tokens` must not be
/// empty.
pub fn sentence_score(query: &Query, tokens: &[String], idfs: &IdfTable) -> SentenceScore {
    let present: HashSet<&str> = tokens.iter().map(String::as_str).collect();

    let mut idf_sum = 0.0;
    let mut matched = 0usize;
    for term in query.iter().filter(|term| present.contains(term.as_str())) {
        matched += 1;
        idf_sum += idfs.get(term).unwrap_or(0.0);
    }

    SentenceScore {
        idf_sum,
        density: matched as f64 / tokens.len() as f64,
    }
}

/// Score every sentence in `corpus`, best first.
///
/// Fails on the first sentence without tokens, before anything is scored.
pub fn rank_sentences(
    query: &Query,
    corpus: &Corpus,
    idfs: &IdfTable,
) -> Result<Vec<ScoredSentence>, RankError> {
    if let Some((id, _)) = corpus.iter().find(|(_, tokens)| tokens.is_empty()) {
        return Err(RankError::EmptyUnit { id: id.clone() });
    }

    let mut scored: Vec<ScoredSentence> = corpus
        .iter()
        .map(|(sentence, tokens)| ScoredSentence {
            sentence: sentence.clone(),
            score: sentence_score(query, tokens, idfs),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));

    Ok(scored)
}

/// The `n` best sentences for `query`, matched IDF first, query term density
/// breaking ties
pub fn top_sentences(
    query: &Query,
    corpus: &Corpus,
    idfs: &IdfTable,
    n: NonZeroUsize,
) -> Result<Vec<String>, RankError> {
    Ok(rank_sentences(query, corpus, idfs)?
        .into_iter()
        .take(n.get())
        .map(|ss| ss.sentence)
        .collect())
}
