//! In-memory list filtering for subject and entity pickers.

/// Returns whether `candidate` contains `query`, ignoring case.
///
/// A blank query matches everything.
#[must_use]
pub fn matches_query(candidate: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || candidate.to_lowercase().contains(&query.to_lowercase())
}

/// Keeps the items whose key matches `query`, preserving their order.
pub fn filter_by_query<T, F>(items: impl IntoIterator<Item = T>, query: &str, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    items
        .into_iter()
        .filter(|item| matches_query(key(item), query))
        .collect()
}
