//! Selection of the active result slot on period-1 rows

/// How a period-1 row chooses the slot that subsequent rows record into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotPolicy {
    /// The slot one before the entity's own slot, wrapping slot 0 around to
    /// the last slot.
    ///
    /// This reproduces the established output of the clip scan, including
    /// rows being attributed to a neighbouring entity's slot.
    #[default]
    PrecedingSlot,
    /// The entity's own slot.
    OwnSlot,
}

impl SlotPolicy {
    /// Returns the active slot for an entity mapped to `slot` out of `uid`
    /// slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipscan::slot_policy::SlotPolicy;
    ///
    /// assert_eq!(SlotPolicy::PrecedingSlot.target(2, 3), 1);
    /// assert_eq!(SlotPolicy::PrecedingSlot.target(0, 3), 2);
    /// assert_eq!(SlotPolicy::OwnSlot.target(0, 3), 0);
    /// ```
    #[must_use]
    pub fn target(self, slot: usize, uid: usize) -> usize {
        debug_assert!(slot < uid, "slot {slot} out of range for {uid} entities");
        match self {
            Self::PrecedingSlot => slot.checked_sub(1).unwrap_or(uid - 1),
            Self::OwnSlot => slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entity_wraps_onto_itself() {
        assert_eq!(SlotPolicy::PrecedingSlot.target(0, 1), 0);
        assert_eq!(SlotPolicy::OwnSlot.target(0, 1), 0);
    }

    #[test]
    fn test_preceding_slot_stays_in_range() {
        for uid in 1..8 {
            for slot in 0..uid {
                let target = SlotPolicy::PrecedingSlot.target(slot, uid);
                assert!(target < uid);
                assert_eq!((target + 1) % uid, slot);
            }
        }
    }
}
