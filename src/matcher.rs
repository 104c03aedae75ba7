use crate::reference::ReferenceStore;
use crate::text::normalize;

/// Cap on suggestion candidates per query.
pub const MAX_SUGGESTIONS: usize = 3;

/// Character count for the prefix pass when suggesting.
const PREFIX_CHARS: usize = 3;

/// Outcome of resolving one free-text query against a reference store.
/// Borrowed keys point into the store and are valid exact keys there,
/// except in `Suggestions`, whose candidates are keys too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<'a> {
    /// The normalized query is itself a store key.
    ExactHit(&'a str),
    /// First key (definition order) containing the query, or contained
    /// in it.
    FallbackHit(&'a str),
    /// No hit; up to `MAX_SUGGESTIONS` candidate keys, store order.
    Suggestions(Vec<&'a str>),
    NoMatch,
}

/// Resolve a query in three stages, first success wins: exact key
/// match, substring containment in either direction, then suggestions.
///
/// Containment has no tie-break beyond definition order, and an empty
/// query is a substring of every key, so it resolves to the first key
/// outright. Both behaviors are pinned by tests; do not change one
/// without the other.
pub fn resolve<'a, R>(query: &str, store: &'a ReferenceStore<R>) -> MatchResult<'a> {
    let query = normalize(query);

    if let Some(key) = store.keys().find(|k| *k == query) {
        return MatchResult::ExactHit(key);
    }

    if let Some(key) = store
        .keys()
        .find(|k| k.contains(query.as_str()) || query.contains(*k))
    {
        return MatchResult::FallbackHit(key);
    }

    let candidates = suggest(&query, store);
    if candidates.is_empty() {
        MatchResult::NoMatch
    } else {
        MatchResult::Suggestions(candidates)
    }
}

/// Up to `MAX_SUGGESTIONS` candidate keys for a query that matched
/// nothing: keys containing the query as a substring, or failing that,
/// keys starting with its first `PREFIX_CHARS` characters (the whole
/// query when shorter).
pub fn suggest<'a, R>(query: &str, store: &'a ReferenceStore<R>) -> Vec<&'a str> {
    let query = normalize(query);

    let mut hits: Vec<&str> = store.keys().filter(|k| k.contains(query.as_str())).collect();
    if hits.is_empty() {
        let prefix = char_prefix(&query, PREFIX_CHARS);
        hits = store.keys().filter(|k| k.starts_with(prefix)).collect();
    }
    hits.truncate(MAX_SUGGESTIONS);
    hits
}

/// First `n` characters of `text`, sliced on a character boundary.
fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
