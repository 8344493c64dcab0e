use std::collections::BTreeSet;

use crate::domain::entities::artwork::ArtworkId;

/// Selected record ids, independent of which page is on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<ArtworkId>,
}

impl SelectionSet {
    /// Flips membership of `id` and returns whether it is now selected.
    pub fn toggle(&mut self, id: ArtworkId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.ids.iter().copied()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// True when `ids` is non-empty and every one of them is selected.
    pub fn all_selected(&self, ids: &[ArtworkId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.ids.contains(id))
    }

    pub fn select_all(&mut self, ids: &[ArtworkId]) {
        self.ids.extend(ids.iter().copied());
    }

    pub fn deselect_all(&mut self, ids: &[ArtworkId]) {
        for id in ids {
            self.ids.remove(id);
        }
    }
}

impl FromIterator<ArtworkId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ArtworkId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original_contents() {
        let original: SelectionSet = [ArtworkId(1), ArtworkId(5)].into_iter().collect();

        for id in [ArtworkId(1), ArtworkId(2)] {
            let mut selection = original.clone();
            let first = selection.toggle(id);
            let second = selection.toggle(id);

            assert_ne!(first, second, "membership should flip each time");
            assert_eq!(selection, original);
        }
    }

    #[test]
    fn page_level_select_only_touches_given_ids() {
        let mut selection: SelectionSet = [ArtworkId(1)].into_iter().collect();
        let page_two = [ArtworkId(13), ArtworkId(14)];

        assert!(!selection.all_selected(&page_two));
        selection.select_all(&page_two);
        assert!(selection.all_selected(&page_two));

        selection.deselect_all(&page_two);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![ArtworkId(1)]);
        assert!(!selection.all_selected(&[]), "empty page is never all-selected");
    }
}
