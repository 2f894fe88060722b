//! Key normalization shared by index building and query matching

/// Key used by the exact pass: lowercased, trimmed, inner whitespace collapsed
pub fn exact_key(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Key used by the approximate pass: like [`exact_key`] with punctuation
/// folded into whitespace
pub fn fuzzy_key(s: &str) -> String {
    let folded: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    exact_key(&folded)
}

/// Tokens of an already normalized key, sorted and rejoined
pub fn token_sorted(key: &str) -> String {
    let mut tokens: Vec<&str> = key.split(' ').filter(|t| !t.is_empty()).collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
