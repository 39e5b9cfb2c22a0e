use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::loader::{build_index, load_noise_words, read_document, tokens};
use search_core::{index_document, normalize, MasterIndex, NoiseWords, Occurrence};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a keyword index over text documents and run two-keyword searches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// File listing the documents to index, whitespace separated
    #[arg(long, conflicts_with = "dir", required_unless_present = "dir")]
    docs: Option<PathBuf>,
    /// Index every .txt file under this directory instead of a document list
    #[arg(long)]
    dir: Option<PathBuf>,
    /// File of noise words, whitespace separated
    #[arg(long)]
    noise: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and print every keyword with its occurrences
    Build {
        #[command(flatten)]
        source: Source,
        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Build the index and print documents matching either keyword
    Search {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        kw1: String,
        #[arg(long)]
        kw2: String,
        /// Maximum number of documents returned
        #[arg(long, default_value_t = search_core::query::TOP_RESULTS)]
        limit: usize,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct BuildReport<'a> {
    keywords: usize,
    index: BTreeMap<&'a str, &'a [Occurrence]>,
}

#[derive(Serialize)]
struct SearchReport<'a> {
    kw1: &'a str,
    kw2: &'a str,
    results: Option<Vec<&'a str>>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { source, json } => {
            let (index, _) = load(&source)?;
            print_index(&index, json)
        }
        Commands::Search { source, kw1, kw2, limit, json } => {
            let (index, noise) = load(&source)?;
            run_search(&index, &noise, &kw1, &kw2, limit.max(1), json)
        }
    }
}

fn load(source: &Source) -> Result<(MasterIndex, NoiseWords)> {
    match (&source.docs, &source.dir) {
        (Some(docs), _) => build_index(docs, &source.noise)
            .with_context(|| format!("building index from {}", docs.display())),
        (None, Some(dir)) => index_dir(dir, &source.noise),
        (None, None) => anyhow::bail!("either --docs or --dir is required"),
    }
}

fn index_dir(dir: &Path, noise_file: &Path) -> Result<(MasterIndex, NoiseWords)> {
    let noise = load_noise_words(noise_file)?;
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("walking {}", dir.display()))?;
        let p = entry.path();
        if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
            files.push(p.to_path_buf());
        }
    }
    files.sort();

    let mut index = MasterIndex::new();
    for file in &files {
        let name = file.strip_prefix(dir).unwrap_or(file).to_string_lossy().into_owned();
        let text = read_document(file)?;
        index.merge(index_document(&name, tokens(&text), &noise));
    }
    tracing::info!(documents = files.len(), keywords = index.len(), dir = %dir.display(), "indexed directory");
    Ok((index, noise))
}

fn print_index(index: &MasterIndex, json: bool) -> Result<()> {
    let sorted: BTreeMap<&str, &[Occurrence]> = index.iter().collect();
    if json {
        let report = BuildReport { keywords: index.len(), index: sorted };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("{}", index.len());
    for (keyword, occs) in sorted {
        let list: Vec<String> = occs.iter().map(Occurrence::to_string).collect();
        println!("{keyword} -> [{}]", list.join(", "));
    }
    Ok(())
}

fn run_search(index: &MasterIndex, noise: &NoiseWords, kw1: &str, kw2: &str, limit: usize, json: bool) -> Result<()> {
    println!("{}", render_search(index, noise, kw1, kw2, limit, json)?);
    Ok(())
}

fn render_search(index: &MasterIndex, noise: &NoiseWords, kw1: &str, kw2: &str, limit: usize, json: bool) -> Result<String> {
    // the core looks keywords up verbatim, so bring them to indexed form
    let key1 = normalize(kw1, noise).unwrap_or_default();
    let key2 = normalize(kw2, noise).unwrap_or_default();
    let results = index.search(&key1, &key2, limit);
    tracing::debug!(kw1 = %key1, kw2 = %key2, matched = results.is_some(), "search");

    if json {
        let report = SearchReport { kw1, kw2, results };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(match results {
        Some(docs) => docs.join("\n"),
        None => "no results".to_string(),
    })
}
