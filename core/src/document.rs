use crate::keyword::normalize;
use crate::{KeywordMap, NoiseWords, Occurrence};

/// Count keyword occurrences in one document.
///
/// Each distinct keyword gets exactly one [`Occurrence`] bound to `document`,
/// whose frequency is the number of tokens that normalized to it.
pub fn index_document<I, S>(document: &str, tokens: I, noise_words: &NoiseWords) -> KeywordMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut keywords = KeywordMap::new();
    for token in tokens {
        let Some(keyword) = normalize(token.as_ref(), noise_words) else { continue };
        keywords
            .entry(keyword)
            .and_modify(|occ| occ.frequency += 1)
            .or_insert_with(|| Occurrence::new(document, 1));
    }
    tracing::debug!(document, keywords = keywords.len(), "indexed document");
    keywords
}
