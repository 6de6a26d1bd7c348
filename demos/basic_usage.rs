use quizzer::{QaEngine, QaOptions, Tokenizer};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

fn main() -> anyhow::Result<()> {
    println!("=== Quizzer Basic Usage Example ===\n");

    let files: BTreeMap<String, String> = [
        (
            "rust.txt",
            "Rust is a systems programming language that runs blazingly fast, prevents segfaults, and guarantees thread safety.\n\
             Rust 1.0 was released in May 2015.",
        ),
        (
            "go.txt",
            "Go is an open source programming language that makes it easy to build simple, reliable, and efficient software.\n\
             Go was designed at Google by Robert Griesemer, Rob Pike, and Ken Thompson.",
        ),
        (
            "python.txt",
            "Python is a programming language that lets you work quickly and integrate systems more effectively.\n\
             Python was created by Guido van Rossum.",
        ),
    ]
    .into_iter()
    .map(|(name, text)| (name.to_string(), text.to_string()))
    .collect();

    let engine = QaEngine::new(files, Tokenizer::new());
    println!("Indexed {} documents\n", engine.document_count());

    // Example 1: single best sentence
    let question = "Who designed Go?";
    println!("--- {} ---", question);
    let answer = engine.answer(question, &QaOptions::default())?;
    println!("Query terms: {:?}", answer.query);
    if let Some(best) = answer.best() {
        println!("Answer: {}\n", best);
    }

    // Example 2: several documents and sentences with scores
    let question = "When was Rust released?";
    println!("--- {} ---", question);
    let options = QaOptions {
        file_matches: NonZeroUsize::new(2).unwrap_or(NonZeroUsize::MIN),
        sentence_matches: NonZeroUsize::new(3).unwrap_or(NonZeroUsize::MIN),
    };
    let answer = engine.answer(question, &options)?;
    for doc in &answer.files {
        println!("file {} score={:.4}", doc.doc_id, doc.score);
    }
    for scored in &answer.sentences {
        println!(
            "  idf={:.4} density={:.4}  {}",
            scored.score.idf_sum, scored.score.density, scored.sentence
        );
    }

    Ok(())
}
