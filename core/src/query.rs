use crate::index::MasterIndex;
use crate::Occurrence;

/// Result size of [`MasterIndex::top_five`].
pub const TOP_RESULTS: usize = 5;

impl MasterIndex {
    /// Documents containing `kw1` or `kw2`, best five first.
    ///
    /// Keywords are looked up as given; callers normalize them first.
    /// `None` means neither keyword is indexed, which is distinct from a
    /// match with fewer than five documents.
    pub fn top_five(&self, kw1: &str, kw2: &str) -> Option<Vec<&str>> {
        self.search(kw1, kw2, TOP_RESULTS)
    }

    /// Like [`top_five`](Self::top_five) with an arbitrary result limit.
    ///
    /// Both lists are walked in frequency order; `kw1` wins ties and a
    /// document already taken is skipped while its cursor still advances.
    pub fn search(&self, kw1: &str, kw2: &str, limit: usize) -> Option<Vec<&str>> {
        let results = match (self.occurrences(kw1), self.occurrences(kw2)) {
            (None, None) => return None,
            (Some(only), None) | (None, Some(only)) => {
                only.iter().take(limit).map(|o| o.document.as_str()).collect()
            }
            (Some(first), Some(second)) => merge_ranked(first, second, limit),
        };
        Some(results)
    }
}

fn merge_ranked<'a>(first: &'a [Occurrence], second: &'a [Occurrence], limit: usize) -> Vec<&'a str> {
    let mut results: Vec<&str> = Vec::with_capacity(limit);
    let (mut i, mut j) = (0, 0);

    while results.len() < limit && i < first.len() && j < second.len() {
        let next = if first[i].frequency >= second[j].frequency {
            i += 1;
            &first[i - 1]
        } else {
            j += 1;
            &second[j - 1]
        };
        push_unique(&mut results, &next.document);
    }

    // at most one of these still has entries
    for occ in first[i..].iter().chain(&second[j..]) {
        if results.len() >= limit {
            break;
        }
        push_unique(&mut results, &occ.document);
    }
    results
}

fn push_unique<'a>(results: &mut Vec<&'a str>, document: &'a str) {
    if !results.contains(&document) {
        results.push(document);
    }
}
