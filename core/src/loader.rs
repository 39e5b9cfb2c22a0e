use crate::document::index_document;
use crate::error::{IndexError, Result};
use crate::index::MasterIndex;
use crate::{DocName, NoiseWords};
use std::fs;
use std::path::{Path, PathBuf};

/// Split document text into raw tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| IndexError::input_unavailable(path, e))
}

/// Noise words, whitespace separated, kept as written.
pub fn load_noise_words<P: AsRef<Path>>(path: P) -> Result<NoiseWords> {
    let text = read_document(path)?;
    let words = tokens(&text).map(str::to_string).collect();
    Ok(words)
}

/// Document names, whitespace separated, in file order.
pub fn load_document_list<P: AsRef<Path>>(path: P) -> Result<Vec<DocName>> {
    let text = read_document(path)?;
    let names = tokens(&text).map(str::to_string).collect();
    Ok(names)
}

/// Index every document named in `docs_file`.
///
/// Relative names resolve against the directory holding `docs_file` and are
/// used verbatim as document identifiers. Any unreadable input fails the
/// whole build.
pub fn build_index<P: AsRef<Path>, Q: AsRef<Path>>(docs_file: P, noise_file: Q) -> Result<(MasterIndex, NoiseWords)> {
    let noise_words = load_noise_words(noise_file)?;
    let docs_file = docs_file.as_ref();
    let names = load_document_list(docs_file)?;
    let base = docs_file.parent().unwrap_or_else(|| Path::new(""));

    let mut index = MasterIndex::new();
    for name in &names {
        let text = read_document(resolve(base, name))?;
        index.merge(index_document(name, tokens(&text), &noise_words));
    }
    tracing::info!(
        documents = names.len(),
        keywords = index.len(),
        noise_words = noise_words.len(),
        "index built"
    );
    Ok((index, noise_words))
}

fn resolve(base: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() { path.to_path_buf() } else { base.join(path) }
}
