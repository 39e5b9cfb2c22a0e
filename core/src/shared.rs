use crate::index::MasterIndex;
use crate::keyword::normalize;
use crate::{KeywordMap, NoiseWords, Occurrence};
use parking_lot::RwLock;

/// A [`MasterIndex`] that many readers can query while merges stay serialized.
///
/// The index and the noise words it was built with sit under one lock, so a
/// query never sees a list halfway through an insertion, nor keywords
/// normalized against a different build. Reads hand back owned data.
#[derive(Debug, Default)]
pub struct SharedIndex {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    index: MasterIndex,
    noise_words: NoiseWords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct IndexStats {
    pub keywords: usize,
    pub occurrences: usize,
}

impl SharedIndex {
    pub fn new(index: MasterIndex, noise_words: NoiseWords) -> Self {
        Self { inner: RwLock::new(Inner { index, noise_words }) }
    }

    pub fn merge(&self, kws: KeywordMap) {
        self.inner.write().index.merge(kws);
    }

    /// Swap in a freshly built index together with its noise words.
    pub fn replace(&self, index: MasterIndex, noise_words: NoiseWords) {
        *self.inner.write() = Inner { index, noise_words };
    }

    pub fn top_five(&self, kw1: &str, kw2: &str) -> Option<Vec<String>> {
        to_owned(self.inner.read().index.top_five(kw1, kw2))
    }

    pub fn search(&self, kw1: &str, kw2: &str, limit: usize) -> Option<Vec<String>> {
        to_owned(self.inner.read().index.search(kw1, kw2, limit))
    }

    /// Search with raw query words, normalized against the current noise words.
    /// A word that is not a keyword matches nothing.
    pub fn query(&self, raw1: &str, raw2: &str, limit: usize) -> Option<Vec<String>> {
        let inner = self.inner.read();
        let key1 = normalize(raw1, &inner.noise_words).unwrap_or_default();
        let key2 = normalize(raw2, &inner.noise_words).unwrap_or_default();
        to_owned(inner.index.search(&key1, &key2, limit))
    }

    pub fn occurrences(&self, keyword: &str) -> Option<Vec<Occurrence>> {
        self.inner.read().index.occurrences(keyword).map(<[Occurrence]>::to_vec)
    }

    /// Occurrences of a raw word after normalization.
    pub fn lookup(&self, raw: &str) -> Option<Vec<Occurrence>> {
        let inner = self.inner.read();
        let key = normalize(raw, &inner.noise_words)?;
        inner.index.occurrences(&key).map(<[Occurrence]>::to_vec)
    }

    pub fn stats(&self) -> IndexStats {
        let inner = self.inner.read();
        IndexStats { keywords: inner.index.len(), occurrences: inner.index.total_occurrences() }
    }
}

fn to_owned(docs: Option<Vec<&str>>) -> Option<Vec<String>> {
    docs.map(|d| d.into_iter().map(str::to_string).collect())
}
