use std::collections::HashSet;

use serde::Serialize;

use crate::core::domain::Identifiable;

// Pairs a candidate list item with its selection state for checkbox groups.
// Computed from the record's selected-id set; fetched entities stay untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checked<T> {
    pub item: T,
    pub checked: bool,
}

pub fn mark_selected<T: Identifiable>(items: Vec<T>, selected: &[String]) -> Vec<Checked<T>> {
    let selected: HashSet<&str> = selected.iter().map(String::as_str).collect();
    items.into_iter()
        .map(|item| {
            let checked = selected.contains(item.id().as_str());
            Checked { item, checked }
        })
        .collect()
}
