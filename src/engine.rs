use crate::corpus::Corpus;
use crate::index::{compute_idfs, IdfTable};
use crate::loader::load_files;
use crate::ranking::{rank_files, rank_sentences, ScoredDocument, ScoredSentence};
use crate::tokenizer::{split_sentences, Tokenizer};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::Path;

/// How many documents and sentences to keep at each ranking stage
#[derive(Debug, Clone, Copy)]
pub struct QaOptions {
    pub file_matches: NonZeroUsize,
    pub sentence_matches: NonZeroUsize,
}

impl Default for QaOptions {
    fn default() -> Self {
        Self {
            file_matches: NonZeroUsize::MIN,
            sentence_matches: NonZeroUsize::MIN,
        }
    }
}

/// Result of answering one question
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    /// Normalized query terms the question reduced to
    pub query: Vec<String>,
    pub files: Vec<ScoredDocument>,
    pub sentences: Vec<ScoredSentence>,
}

impl Answer {
    /// The best sentence, if any
    pub fn best(&self) -> Option<&str> {
        self.sentences.first().map(|ss| ss.sentence.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub total_documents: usize,
    pub vocabulary: usize,
}

/// Question answering over a fixed set of documents.
///
/// Document tokens and the document IDF table are computed once at
/// construction and never change afterwards.
pub struct QaEngine {
    files: BTreeMap<String, String>,
    file_words: Corpus,
    file_idfs: IdfTable,
    tokenizer: Tokenizer,
}

impl QaEngine {
    /// Build an engine from file name -> raw text
    pub fn new(files: BTreeMap<String, String>, tokenizer: Tokenizer) -> Self {
        let file_words: Corpus = files
            .iter()
            .map(|(name, text)| (name.clone(), tokenizer.analyze(text)))
            .collect();
        let file_idfs = compute_idfs(&file_words);

        tracing::info!(
            documents = file_words.len(),
            vocabulary = file_idfs.len(),
            stemming = tokenizer.is_stemming(),
            "built document index"
        );

        Self {
            files,
            file_words,
            file_idfs,
            tokenizer,
        }
    }

    /// Build an engine from every file in a directory
    pub fn from_dir<P: AsRef<Path>>(dir: P, tokenizer: Tokenizer) -> Result<Self> {
        let files = load_files(dir)?;
        Ok(Self::new(files, tokenizer))
    }

    /// Answer a question: rank documents, then rank the sentences of the best
    /// documents.
    pub fn answer(&self, question: &str, options: &QaOptions) -> Result<Answer> {
        let query = self.tokenizer.analyze_unique(question);
        if query.is_empty() {
            tracing::debug!("question has no searchable terms");
        }

        let mut files = rank_files(&query, &self.file_words, &self.file_idfs);
        files.truncate(options.file_matches.get());

        let sentences = self.sentence_corpus(&files);
        let sentence_idfs = compute_idfs(&sentences);
        tracing::debug!(
            files = files.len(),
            sentences = sentences.len(),
            vocabulary = sentence_idfs.len(),
            "ranking sentences"
        );

        let mut ranked = rank_sentences(&query, &sentences, &sentence_idfs)?;
        ranked.truncate(options.sentence_matches.get());

        Ok(Answer {
            query: query.into_iter().collect(),
            files,
            sentences: ranked,
        })
    }

    /// Tokenize the sentences of the given documents, skipping sentences that
    /// reduce to no tokens. Identical sentences collapse into one unit.
    fn sentence_corpus(&self, files: &[ScoredDocument]) -> Corpus {
        let mut sentences = Corpus::new();
        for doc in files {
            let Some(text) = self.files.get(&doc.doc_id) else {
                continue;
            };
            for sentence in split_sentences(text) {
                let tokens = self.tokenizer.analyze(sentence);
                if !tokens.is_empty() {
                    sentences.insert(sentence.to_string(), tokens);
                }
            }
        }
        sentences
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_documents: self.file_words.len(),
            vocabulary: self.file_idfs.len(),
        }
    }

    /// Get total document count
    pub fn document_count(&self) -> usize {
        self.files.len()
    }
}
