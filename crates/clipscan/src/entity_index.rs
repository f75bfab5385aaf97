//! Dense renumbering of entity identifiers
//!
//! Entity ids in the input are arbitrary positive integers. A scan writes
//! one result per distinct id, so ids are mapped onto slots `0..uid` where
//! `uid` is the number of distinct ids.

use std::collections::HashMap;

/// Order in which slots are assigned to distinct entity ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexOrder {
    /// Slots follow the first appearance of each id in the input.
    #[default]
    FirstSeen,
    /// Slots follow ascending id order.
    Ascending,
}

/// Mapping between entity ids and result slots.
///
/// Every distinct id maps to exactly one slot in `0..len()`, and every slot
/// maps back to exactly one id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityIndex {
    slots: HashMap<i64, usize>,
    ids: Vec<i64>,
}

impl EntityIndex {
    /// Builds the mapping for the given ids.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipscan::entity_index::{EntityIndex, IndexOrder};
    ///
    /// let index = EntityIndex::build([30, 10, 30, 20], IndexOrder::FirstSeen);
    /// assert_eq!(index.len(), 3);
    /// assert_eq!(index.slot_of(10), Some(1));
    ///
    /// let index = EntityIndex::build([30, 10, 30, 20], IndexOrder::Ascending);
    /// assert_eq!(index.slot_of(10), Some(0));
    /// assert_eq!(index.entity_at(2), Some(30));
    /// ```
    #[must_use]
    pub fn build<I>(ids: I, order: IndexOrder) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut index = Self::default();
        for id in ids {
            index.slots.entry(id).or_insert_with(|| {
                index.ids.push(id);
                index.ids.len() - 1
            });
        }

        if order == IndexOrder::Ascending {
            index.ids.sort_unstable();
            for (slot, id) in index.ids.iter().enumerate() {
                index.slots.insert(*id, slot);
            }
        }

        index
    }

    /// Number of distinct ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn slot_of(&self, entity_id: i64) -> Option<usize> {
        self.slots.get(&entity_id).copied()
    }

    #[must_use]
    pub fn entity_at(&self, slot: usize) -> Option<i64> {
        self.ids.get(slot).copied()
    }

    /// Iterates `(slot, entity_id)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.ids.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let index = EntityIndex::build([], IndexOrder::FirstSeen);
        assert!(index.is_empty());
        assert_eq!(index.slot_of(1), None);
        assert_eq!(index.entity_at(0), None);
    }

    #[test]
    fn test_first_seen_order() {
        let index = EntityIndex::build([5, 5, 2, 9, 2], IndexOrder::FirstSeen);
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![(0, 5), (1, 2), (2, 9)]);
    }

    #[test]
    fn test_ascending_order() {
        let index = EntityIndex::build([5, 5, 2, 9, 2], IndexOrder::Ascending);
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![(0, 2), (1, 5), (2, 9)]);
    }

    #[test]
    fn test_slots_are_a_bijection() {
        let ids = [104, 3, 77, 3, 104, 12, 1];
        for order in [IndexOrder::FirstSeen, IndexOrder::Ascending] {
            let index = EntityIndex::build(ids, order);
            assert_eq!(index.len(), 5);
            for id in ids {
                let slot = index.slot_of(id).unwrap();
                assert!(slot < index.len());
                assert_eq!(index.entity_at(slot), Some(id));
            }
        }
    }
}
