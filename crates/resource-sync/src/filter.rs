//! Client-side filtering over a loaded collection.

use crate::entity::Entity;
use crate::resource::Resource;

/// Resources whose display name contains `term`, ignoring case.
///
/// An empty term matches everything, so a cleared search box shows the full list.
pub fn search<'a, T: Entity>(items: &'a [Resource<T>], term: &str) -> Vec<&'a Resource<T>> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.fields.display_name().to_lowercase().contains(&needle))
        .collect()
}

/// Autocomplete suggestions: display names containing the trimmed input, ignoring case.
///
/// Unlike [`search`], blank input suggests nothing.
pub fn suggest<'a, T: Entity>(items: &'a [Resource<T>], input: &str) -> Vec<&'a str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .map(|item| item.fields.display_name())
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect()
}
