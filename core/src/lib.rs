use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub mod document;
pub mod error;
pub mod index;
pub mod keyword;
pub mod loader;
pub mod query;
pub mod shared;

pub use document::index_document;
pub use error::IndexError;
pub use index::{insert_last_occurrence, MasterIndex};
pub use keyword::normalize;
pub use shared::SharedIndex;

/// Opaque document identifier chosen by the caller, e.g. the file name.
pub type DocName = String;

/// Words excluded from indexing.
pub type NoiseWords = HashSet<String>;

/// One document's keywords, each with its single occurrence in that document.
pub type KeywordMap = HashMap<String, Occurrence>;

/// How many times a keyword occurs in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub document: DocName,
    pub frequency: u32,
}

impl Occurrence {
    pub fn new(document: impl Into<DocName>, frequency: u32) -> Self {
        Self { document: document.into(), frequency }
    }
}

impl std::fmt::Display for Occurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.document, self.frequency)
    }
}
