use std::collections::HashMap;

/// Mapping from a case-normalized string key to an occurrence count.
///
/// Built fresh per aggregation and never persisted. Callers normalize keys
/// (lower-casing artist names, genres) before or while counting.
pub type FrequencyMap = HashMap<String, u32>;

/// Ordered sequence of `(key, count)` pairs sorted by count descending.
pub type RankedList = Vec<(String, u32)>;

/// Builds a [`FrequencyMap`] by incrementing the count for every key the
/// key function yields per item.
///
/// The key function may yield zero or more keys for a single item, which
/// covers both genre tallying (one artist carries several genres) and name
/// tallying (one key per item, via `Some(..)` or a one-element `Vec`).
///
/// # Example
///
/// ```
/// use spoviews::ranking;
///
/// let genres = vec![vec!["rock", "pop"], vec!["pop"]];
/// let counts = ranking::count(&genres, |g| {
///     g.iter().map(|s| s.to_string()).collect::<Vec<_>>()
/// });
/// assert_eq!(counts["pop"], 2);
/// ```
pub fn count<T, K, F>(items: &[T], mut key_fn: F) -> FrequencyMap
where
    F: FnMut(&T) -> K,
    K: IntoIterator<Item = String>,
{
    let mut counts = FrequencyMap::new();
    for item in items {
        for key in key_fn(item) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

/// Turns a [`FrequencyMap`] into a [`RankedList`], descending by count.
///
/// Entries sharing a count end up in no particular order; nothing may rely
/// on the relative position of tied keys.
pub fn rank(counts: &FrequencyMap) -> RankedList {
    let mut ranked: RankedList = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Returns the first `min(n, len)` entries of a ranked list.
///
/// `n = 0` yields an empty list; an `n` larger than the list is not an
/// error and simply returns everything.
pub fn take(ranked: &RankedList, n: usize) -> RankedList {
    ranked.iter().take(n).cloned().collect()
}
