//! Record selection for batch actions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::RecordId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no records selected")]
    Empty,
}

/// Set of selected record identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<RecordId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `id` when present, adds it otherwise. Returns whether `id` is
    /// selected afterwards.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordId> {
        self.ids.iter()
    }

    /// Identifiers for a batch action; refuses to hand out an empty batch.
    pub fn require_non_empty(&self) -> Result<Vec<RecordId>, SelectionError> {
        if self.ids.is_empty() {
            return Err(SelectionError::Empty);
        }
        Ok(self.ids.iter().cloned().collect())
    }
}

impl FromIterator<RecordId> for Selection {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> RecordId {
        RecordId::new(value).unwrap()
    }

    #[test]
    fn toggle_twice_restores_previous_state() {
        let mut selection: Selection = [id("a"), id("b")].into_iter().collect();
        let before = selection.clone();

        assert!(selection.toggle(id("c")));
        assert!(!selection.toggle(id("c")));
        assert_eq!(selection, before);

        assert!(!selection.toggle(id("a")));
        assert!(selection.toggle(id("a")));
        assert_eq!(selection, before);
    }

    #[test]
    fn empty_selection_is_rejected_for_batches() {
        let selection = Selection::new();
        assert_eq!(selection.require_non_empty(), Err(SelectionError::Empty));
    }

    #[test]
    fn batch_returns_sorted_ids() {
        let mut selection = Selection::new();
        selection.toggle(id("b"));
        selection.toggle(id("a"));

        assert_eq!(selection.require_non_empty().unwrap(), vec![id("a"), id("b")]);
    }

    #[test]
    fn serializes_as_plain_list() {
        let selection: Selection = [id("1"), id("2")].into_iter().collect();
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"["1","2"]"#);
        assert_eq!(serde_json::from_str::<Selection>(&json).unwrap(), selection);
    }
}
