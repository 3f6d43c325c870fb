//! Coin Resolver
//!
//! Turns a free-text question into a [`CoinId`]:
//!
//! ```text
//! "What’s ETH price?"
//!   → normalize quotes      "What's ETH price?"
//!   → lower-case            "what's eth price?"
//!   → drop noise phrases    "  eth  ?"
//!   → drop punctuation      "  eth   "
//!   → first token           "eth"
//! ```
//!
//! Never fails. When nothing is left the result is the empty identifier,
//! which downstream treats as "not found".

use crate::model::CoinId;

/// Phrases removed from the lower-cased query. Longer phrases come first so
/// that "what is the" wins over "what is".
const NOISE_PHRASES: &[&str] = &[
    "tell me about",
    "tell me",
    "what is the",
    "what's the",
    "whats the",
    "what is",
    "what's",
    "whats",
    "how much is",
    "how is",
    "how's",
    "show me",
    "give me",
    "can you",
    "latest news about",
    "latest news on",
    "latest news for",
    "latest",
    "recent",
    "current",
    "news about",
    "news on",
    "news for",
    "news",
    "price of",
    "prices",
    "price",
    "info on",
    "info about",
    "info",
    "today",
    "please",
    "about",
    "the",
    "of",
    "for",
    "on",
    "is",
    "me",
];

const PUNCTUATION: &[char] = &['?', '!', ',', '.', ';', ':', '"', '\'', '(', ')', '[', ']'];

/// Resolve a free-text query to a canonical coin identifier.
pub fn resolve(query: &str) -> CoinId {
    let mut text = normalize_quotes(query).to_lowercase();

    for phrase in NOISE_PHRASES {
        text = remove_whole_phrase(&text, phrase);
    }

    let text: String = text
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect();

    let candidate = text
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_end_matches(|c: char| c.is_ascii_punctuation());

    tracing::debug!(query, coin = candidate, "Resolved coin identifier");

    CoinId::new(candidate)
}

fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{02BC}' | '`' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

/// Replace every occurrence of `phrase` that stands as whole words with a
/// space. Occurrences inside a longer word are kept ("the" in "ethereum").
fn remove_whole_phrase(text: &str, phrase: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut rest = text;

    while let Some(idx) = rest.find(phrase) {
        let end = idx + phrase.len();
        let before = rest[..idx].chars().next_back().or(prev);
        let after = rest[end..].chars().next();

        let bounded = !before.is_some_and(char::is_alphanumeric)
            && !after.is_some_and(char::is_alphanumeric);

        if bounded {
            out.push_str(&rest[..idx]);
            out.push(' ');
            prev = Some(' ');
            rest = &rest[end..];
        } else {
            let step = idx + rest[idx..].chars().next().map_or(1, char::len_utf8);
            out.push_str(&rest[..step]);
            prev = rest[..step].chars().next_back();
            rest = &rest[step..];
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_examples() {
        assert_eq!(resolve("Tell me about Bitcoin").as_str(), "bitcoin");
        assert_eq!(resolve("What's ETH price?").as_str(), "eth");
    }

    #[test]
    fn test_typographic_apostrophe() {
        assert_eq!(resolve("What\u{2019}s the price of Solana?").as_str(), "solana");
    }

    #[test]
    fn test_noise_inside_words_is_kept() {
        assert_eq!(resolve("what is the latest news about Ethereum?").as_str(), "ethereum");
        assert_eq!(resolve("Tell me about Cardano news").as_str(), "cardano");
        assert_eq!(resolve("info on Polkadot").as_str(), "polkadot");
    }

    #[test]
    fn test_first_remaining_token_wins() {
        assert_eq!(resolve("dogecoin vs shiba").as_str(), "dogecoin");
        assert_eq!(resolve("  XRP!!  ").as_str(), "xrp");
    }

    #[test]
    fn test_only_noise_yields_empty() {
        assert!(resolve("").is_empty());
        assert!(resolve("   ").is_empty());
        assert!(resolve("What's the latest news?").is_empty());
        assert!(resolve("price?!").is_empty());
    }

    #[test]
    fn test_output_is_lowercase_trimmed_and_never_noise() {
        let queries = [
            "Tell me about Bitcoin",
            "WHAT IS THE PRICE OF LINK",
            "news on Avalanche, please",
            "how is ATOM doing today",
            "the",
            "Give me Uniswap info",
            "Ethereum",
        ];

        for query in queries {
            let coin = resolve(query);
            let s = coin.as_str();
            assert_eq!(s, s.trim(), "{query}");
            assert_eq!(s, s.to_lowercase(), "{query}");
            assert!(!NOISE_PHRASES.contains(&s), "{query} resolved to noise {s}");
            assert!(!s.contains(char::is_whitespace), "{query}");
        }
    }

    #[test]
    fn test_remove_whole_phrase_boundaries() {
        assert_eq!(remove_whole_phrase("the ethereum", "the"), "  ethereum");
        assert_eq!(remove_whole_phrase("bathe", "the"), "bathe");
        assert_eq!(remove_whole_phrase("the the", "the"), "   ");
    }
}
