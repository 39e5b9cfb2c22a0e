use crate::NoiseWords;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TRAILING_PUNCT: Regex = Regex::new(r"[.,?:;!]+$").expect("valid regex");
}

/// Turn a raw whitespace-delimited token into a keyword.
///
/// The token is lowercased and a trailing run of `. , ? : ; !` is removed.
/// Returns `None` when what remains is empty, holds anything other than
/// letters, or is a noise word.
pub fn normalize(token: &str, noise_words: &NoiseWords) -> Option<String> {
    let lowered = token.to_lowercase();
    let word = TRAILING_PUNCT.replace(&lowered, "");
    if word.is_empty() || !word.chars().all(char::is_alphabetic) {
        return None;
    }
    if noise_words.contains(&*word) {
        return None;
    }
    Some(word.into_owned())
}
