use crate::{KeywordMap, Occurrence};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Keyword to occurrence lists across every merged document.
///
/// Each list holds at most one occurrence per document and is kept in
/// non-increasing frequency order; equal frequencies stay in merge order.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MasterIndex {
    keywords: HashMap<String, Vec<Occurrence>>,
}

impl MasterIndex {
    pub fn new() -> Self { Self::default() }

    /// Fold one document's keywords into the index.
    pub fn merge(&mut self, kws: KeywordMap) {
        for (keyword, occurrence) in kws {
            match self.keywords.entry(keyword) {
                Entry::Occupied(mut entry) => {
                    let occs = entry.get_mut();
                    occs.push(occurrence);
                    let mids = insert_last_occurrence(occs);
                    tracing::trace!(keyword = %entry.key(), ?mids, "placed occurrence");
                }
                Entry::Vacant(entry) => {
                    entry.insert(vec![occurrence]);
                }
            }
        }
    }

    pub fn occurrences(&self, keyword: &str) -> Option<&[Occurrence]> {
        self.keywords.get(keyword).map(Vec::as_slice)
    }

    pub fn contains(&self, keyword: &str) -> bool { self.keywords.contains_key(keyword) }

    /// Number of distinct keywords.
    pub fn len(&self) -> usize { self.keywords.len() }

    pub fn is_empty(&self) -> bool { self.keywords.is_empty() }

    /// Total occurrences over all keyword lists.
    pub fn total_occurrences(&self) -> usize { self.keywords.values().map(Vec::len).sum() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Occurrence])> {
        self.keywords.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Move the last occurrence of `occs` to its place by frequency.
///
/// `occs[..len - 1]` must already be in non-increasing frequency order. The
/// slot is found by binary search over that prefix; a tie lands after the
/// last entry of equal frequency. Returns the midpoints probed, in order, or
/// `None` when the list has fewer than two elements.
pub fn insert_last_occurrence(occs: &mut [Occurrence]) -> Option<Vec<usize>> {
    if occs.len() < 2 {
        return None;
    }
    let last = occs.len() - 1;
    let target = occs[last].frequency;

    let mut mids = Vec::new();
    let mut lo = 0;
    let mut hi = last - 1;
    loop {
        let mid = lo + (hi - lo) / 2;
        mids.push(mid);
        if occs[mid].frequency >= target {
            lo = mid + 1;
            if lo > hi {
                break;
            }
        } else {
            // mid == lo means hi would drop below lo
            if mid == lo {
                break;
            }
            hi = mid - 1;
        }
    }

    occs[lo..].rotate_right(1);
    Some(mids)
}
