//! Approximate term matching.
//!
//! Similarity is the normalized Levenshtein ratio over Unicode scalar
//! values: `1 - distance / max(len_a, len_b)`, so 1.0 means identical.

use strsim::normalized_levenshtein;

/// Default minimum similarity for an approximate match
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Similarity ratio of two terms in `[0, 1]`
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Closest vocabulary term to `query` with a ratio of at least `cutoff`
///
/// Returns at most one term. Equal top ratios resolve to the
/// lexicographically smallest term, whatever the iteration order of
/// `vocabulary`.
pub fn closest_term<'a, I>(query: &str, vocabulary: I, cutoff: f64) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in vocabulary {
        let ratio = similarity(query, candidate);
        if ratio < cutoff {
            continue;
        }
        best = match best {
            Some((term, top)) if top > ratio || (top == ratio && term <= candidate) => {
                Some((term, top))
            }
            _ => Some((candidate, ratio)),
        };
    }

    best
}
