use serde::Serialize;

use crate::core::record::CrossReferenceRecord;

/// Safely convert usize to f64 for ratio calculations
///
/// Part numbers are short, so the precision loss on 64-bit platforms never
/// matters in practice.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// A "did you mean" candidate for a query with no matches
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    /// The catalog record whose original model resembles the query
    pub record: CrossReferenceRecord,

    /// Edit-distance similarity in `[0, 1]`, higher is closer
    pub similarity: f64,
}

/// Edit-distance similarity between two normalized part numbers.
///
/// `(max_len - levenshtein(a, b)) / max_len`, or `1.0` when both are empty.
///
/// # Examples
///
/// ```
/// use chip_xref::matching::scoring::similarity;
///
/// assert!((similarity("TLV7333", "TLV73333") - 0.875).abs() < 1e-9);
/// assert!((similarity("", "") - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    count_to_f64(max_len - distance) / count_to_f64(max_len)
}

/// Levenshtein edit distance with unit insert, delete and substitute costs.
///
/// Uses the standard dynamic-programming table, kept to two rows.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // prev[j] = distance between a[..i-1] and b[..j]
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, &ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Sort suggestions by similarity, highest first.
///
/// The sort is stable, so equally similar records keep catalog order.
pub fn rank_suggestions(suggestions: &mut [Suggestion]) {
    suggestions.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
