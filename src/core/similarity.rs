//! Token-set similarity between idea-like records.
//!
//! Both sides of a comparison are flattened to lowercase word-token
//! sets; the score is plain Jaccard over those sets. Symmetric, 1.0
//! for identical sets, 0.0 for disjoint sets.

use rustc_hash::FxHashSet;

use crate::schema::history::HistoricalIdeaRecord;
use crate::schema::idea::GeneratedIdea;

/// Lowercase and split into word tokens (alphanumeric runs, with
/// underscore treated as a word character).
pub fn tokenize(text: &str) -> FxHashSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Union of the token sets of several text fields.
pub fn token_set(parts: &[&str]) -> FxHashSet<String> {
    let mut tokens = FxHashSet::default();
    for part in parts {
        tokens.extend(tokenize(part));
    }
    tokens
}

/// Jaccard similarity: |A ∩ B| / |A ∪ B|. Two empty sets score 0.0.
pub fn jaccard(a: &FxHashSet<String>, b: &FxHashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Tokens a candidate idea contributes: title, summary, and props.
pub fn candidate_tokens(idea: &GeneratedIdea) -> FxHashSet<String> {
    let props = idea.props_list.join(" ");
    token_set(&[&idea.idea_title, &idea.summary, &props])
}

/// Tokens a historical record contributes: title, summary, props, and
/// its event type.
pub fn record_tokens(record: &HistoricalIdeaRecord) -> FxHashSet<String> {
    token_set(&[
        &record.idea_title,
        &record.summary,
        &record.props_list,
        &record.event_type,
    ])
}
