use anyhow::{Context, Result};
use clap::Parser;
use quizzer::api::create_router;
use quizzer::{QaEngine, QaOptions, Tokenizer};
use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Answer questions from a directory of text documents", long_about = None)]
struct Args {
    /// Directory holding the corpus, one document per file
    corpus: PathBuf,

    /// Number of top documents to search for sentences
    #[arg(long, default_value_t = NonZeroUsize::MIN)]
    files: NonZeroUsize,

    /// Number of sentences to print
    #[arg(long, default_value_t = NonZeroUsize::MIN)]
    sentences: NonZeroUsize,

    /// Reduce words to their English stem before matching
    #[arg(long)]
    stem: bool,

    /// Print the full ranked answer as JSON
    #[arg(long)]
    json: bool,

    /// Serve questions over HTTP on this address instead of reading stdin
    #[arg(long)]
    serve: Option<SocketAddr>,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let tokenizer = if args.stem { Tokenizer::stemming() } else { Tokenizer::new() };
    let options = QaOptions {
        file_matches: args.files,
        sentence_matches: args.sentences,
    };

    let start = Instant::now();
    let engine = QaEngine::from_dir(&args.corpus, tokenizer)?;
    tracing::info!(documents = engine.document_count(), elapsed = ?start.elapsed(), "corpus ready");

    match args.serve {
        Some(addr) => serve(engine, options, addr),
        None => ask_once(&engine, &options, args.json),
    }
}

/// Read one question from stdin and print the answer
fn ask_once(engine: &QaEngine, options: &QaOptions, json: bool) -> Result<()> {
    eprint!("Query: ");
    io::stderr().flush()?;

    let mut question = String::new();
    io::stdin()
        .lock()
        .read_line(&mut question)
        .context("Failed to read query from stdin")?;

    let answer = engine.answer(question.trim(), options)?;

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &answer)?;
        writeln!(out)?;
        return Ok(());
    }

    if answer.query.is_empty() {
        tracing::warn!("query has no searchable terms after removing stopwords");
        return Ok(());
    }

    for scored in &answer.sentences {
        writeln!(out, "{}", scored.sentence)?;
    }
    Ok(())
}

fn serve(engine: QaEngine, options: QaOptions, addr: SocketAddr) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async move {
        let app = create_router(Arc::new(engine), options);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(%addr, "server listening");
        axum::serve(listener, app).await?;
        Ok(())
    })
}
