use std::collections::HashMap;

use crate::{
    Res, info,
    ranking::{self, FrequencyMap, RankedList},
    spotify::SpotifyClient,
    types::{Artist, Recommendation, TimeFrame},
    warning,
};

/// Lower-cased artist name → artist id, populated only from related-artist
/// responses. Scoped to one aggregation run, never shared across requests.
pub type SeedCache = HashMap<String, String>;

const SEED_LIMIT: usize = 5;

/// Produces ranked artist recommendations from the user's listening history.
///
/// The pipeline:
///
/// 1. Fetches the user's top artists for the three time frames and
///    concatenates them into one candidate list. Duplicates across windows
///    are intentional; they raise a candidate's frequency weight below.
/// 2. Walks the candidates in list order, strictly sequentially, fetching
///    each one's related artists. A frequency map keyed by lower-cased
///    artist name counts one occurrence per appearance as a top artist and
///    one per appearance as any related artist. The [`SeedCache`] is filled
///    from the related-artist responses along the way, since those payloads
///    reliably carry ids.
/// 3. Ranks the frequency map descending and takes the top 5 names as
///    chosen seeds.
/// 4. Resolves each chosen name to an id via [`resolve_seed_ids`]; seeds
///    that resolve nowhere are dropped with a warning rather than aborting,
///    so fewer than 5 seed ids may go out.
/// 5. Requests recommendations for the resolved seeds and returns the
///    payload unmodified.
///
/// Any fetch failure in steps 1-2 aborts the whole aggregation with that
/// error; no partial recommendation set is ever produced here, in contrast
/// to the saved-tracks fetcher's partial-result policy.
pub async fn aggregate(client: &SpotifyClient, token: &str) -> Res<Recommendation> {
    let mut candidates: Vec<Artist> = Vec::new();
    for time_frame in TimeFrame::ALL {
        let mut batch = client.get_top_artists(token, time_frame).await?;
        candidates.append(&mut batch);
    }
    info!("gathered {} top artist entries", candidates.len());

    let mut counts = FrequencyMap::new();
    let mut cache = SeedCache::new();

    for candidate in &candidates {
        *counts.entry(candidate.name.to_lowercase()).or_insert(0) += 1;

        let related = client.get_related_artists(token, &candidate.id).await?;
        for artist in related {
            let name = artist.name.to_lowercase();
            *counts.entry(name.clone()).or_insert(0) += 1;
            cache.entry(name).or_insert(artist.id);
        }
    }

    let ranked = ranking::rank(&counts);
    let chosen = ranking::take(&ranked, SEED_LIMIT);
    let seed_ids = resolve_seed_ids(&chosen, &candidates, &cache);
    info!("requesting recommendations for {} seed artists", seed_ids.len());

    client.get_recommendations(token, &seed_ids).await
}

/// Resolves chosen seed names to artist ids.
///
/// For each name the original candidate list is searched first for a
/// case-insensitive match carrying an id; the [`SeedCache`] is the
/// fallback. A name neither path can resolve is logged and dropped, so the
/// returned list may be shorter than the input.
pub fn resolve_seed_ids(
    chosen: &RankedList,
    candidates: &[Artist],
    cache: &SeedCache,
) -> Vec<String> {
    let mut ids = Vec::with_capacity(chosen.len());

    for (name, _) in chosen {
        let candidate = candidates
            .iter()
            .find(|a| !a.id.is_empty() && a.name.to_lowercase() == *name);

        if let Some(artist) = candidate {
            ids.push(artist.id.clone());
        } else if let Some(id) = cache.get(name) {
            ids.push(id.clone());
        } else {
            warning!("no id resolved for seed artist '{}', dropping it", name);
        }
    }

    ids
}

/// Filters recommended artists down to those absent from the user's library.
///
/// Both sides match case-insensitively on the lower-cased name; there is no
/// partial or fuzzy matching. The returned names are lower-cased and in no
/// particular order.
///
/// # Example
///
/// ```
/// let unknown = remove_users_known_artists(&library_counts, &recommended_counts);
/// ```
pub fn remove_users_known_artists(
    library: &FrequencyMap,
    recommended: &FrequencyMap,
) -> Vec<String> {
    let mut unknown = Vec::new();

    for name in recommended.keys() {
        let key = name.to_lowercase();
        if !library.contains_key(&key) {
            unknown.push(key);
        }
    }

    unknown
}
