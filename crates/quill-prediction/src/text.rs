//! Context normalization shared by the prediction path.

/// Split on whitespace and punctuation, lowercase, drop empties.
pub fn normalize(context: &str) -> Vec<String> {
    context
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
