//! # Lexical RAG Demo
//!
//! Seeds the built-in EOP overview, ingests any files or directories given on
//! the command line, then prints the augmentation block for each query.
//!
//! Run: `cargo run -p eop-rag-demos --bin rag_lexical -- docs/ -q "evidence chain"`
//!
//! Chunking can be tuned with `EOP_RAG_CHUNK_SIZE`, `EOP_RAG_CHUNK_OVERLAP`
//! and `EOP_RAG_TOP_K`. Log verbosity follows `RUST_LOG`.

use std::path::PathBuf;

use eop_rag::{RagConfig, RetrievalEngine};
use tracing_subscriber::EnvFilter;

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|value| value.parse::<usize>().ok())
}

fn config_from_env() -> anyhow::Result<RagConfig> {
    let defaults = RagConfig::default();
    let config = RagConfig::builder()
        .max_chunk_size(env_usize("EOP_RAG_CHUNK_SIZE").unwrap_or(defaults.max_chunk_size))
        .chunk_overlap(env_usize("EOP_RAG_CHUNK_OVERLAP").unwrap_or(defaults.chunk_overlap))
        .max_retrieved_chunks(env_usize("EOP_RAG_TOP_K").unwrap_or(defaults.max_retrieved_chunks))
        .build()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // -- 1. Split arguments into document paths and queries ---------------
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut queries: Vec<String> = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "-q" || arg == "--query" {
            let Some(query) = args.next() else {
                anyhow::bail!("{arg} requires a value");
            };
            queries.push(query);
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    if queries.is_empty() {
        queries.push("provenance tracking".to_string());
        queries.push("xyz123".to_string());
    }

    // -- 2. Build and initialize the engine -------------------------------
    let engine = RetrievalEngine::builder()
        .config(config_from_env()?)
        .with_builtin_documents()
        .build()?;
    engine.initialize().await?;

    // -- 3. Ingest user documents -----------------------------------------
    for path in &paths {
        if path.is_dir() {
            for (name, count) in engine.ingest_dir(path).await? {
                println!("  {name} → {count} chunk(s)");
            }
        } else {
            let count = engine.ingest_file(path).await?;
            println!("  {} → {count} chunk(s)", path.display());
        }
    }

    println!("{}", serde_json::to_string_pretty(&engine.get_status().await)?);

    // -- 4. Query ------------------------------------------------------------
    for query in &queries {
        println!("\nQuery: \"{query}\"");
        let enhanced = engine.get_enhanced_context(query).await;
        println!("  {}", enhanced.message);
        if !enhanced.context.is_empty() {
            println!("{}", enhanced.context);
        }
    }

    Ok(())
}
