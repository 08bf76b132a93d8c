use crate::types::Item;

/// Trim and lowercase a search term.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Case-insensitive substring match over title, description and the
/// space-joined tags. `term` must already be normalized.
pub fn matches(item: &Item, term: &str) -> bool {
    term.is_empty()
        || item.title.to_lowercase().contains(term)
        || item.description.to_lowercase().contains(term)
        || item.tags.join(" ").to_lowercase().contains(term)
}

/// Items matching `term`, in input order. An empty term keeps everything.
pub fn filter(items: &[Item], term: &str) -> Vec<Item> {
    let term = normalize_term(term);
    if term.is_empty() {
        return items.to_vec();
    }
    items.iter().filter(|i| matches(i, &term)).cloned().collect()
}
