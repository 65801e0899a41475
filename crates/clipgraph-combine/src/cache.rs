//! Fixed-capacity stage cache with furthest-stage eviction.
//!
//! Slots are scanned linearly. On a miss the slot whose stage lies furthest
//! from the requested one is overwritten; ties go to the lowest index. An
//! empty slot counts as stage -1, so it is only chosen when nothing stored
//! is further away.

use clipgraph_core::{ClipRef, Result};
use smallvec::SmallVec;
use tracing::debug;

pub struct StageCache {
    slots: SmallVec<[Option<(i64, ClipRef)>; 4]>,
}

impl StageCache {
    /// An empty cache. A capacity below one is raised to one.
    pub fn new(capacity: usize) -> Self {
        let mut slots = SmallVec::new();
        slots.resize(capacity.max(1), None);
        Self { slots }
    }

    /// Stage held by each slot, in slot order.
    pub fn stages(&self) -> impl Iterator<Item = Option<i64>> + '_ {
        self.slots.iter().map(|slot| slot.as_ref().map(|(stage, _)| *stage))
    }

    /// Index of the slot holding `stage`.
    pub fn find(&self, stage: i64) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, Some((s, _)) if *s == stage))
    }

    /// Clip stored for `stage`.
    pub fn get(&self, stage: i64) -> Option<&ClipRef> {
        self.find(stage)
            .and_then(|i| self.slots[i].as_ref())
            .map(|(_, clip)| clip)
    }

    /// Slot to overwrite when `stage` is missing.
    pub fn furthest_slot(&self, stage: i64) -> usize {
        let distance = |slot: &Option<(i64, ClipRef)>| -> i64 {
            let stored = slot.as_ref().map_or(-1, |(s, _)| *s);
            (stage - stored).abs()
        };
        let mut furthest = 0;
        for (i, slot) in self.slots.iter().enumerate().skip(1) {
            if distance(slot) > distance(&self.slots[furthest]) {
                furthest = i;
            }
        }
        furthest
    }

    /// Overwrite `slot`.
    pub fn store(&mut self, slot: usize, stage: i64, clip: ClipRef) {
        self.slots[slot] = Some((stage, clip));
    }

    /// Return the clip for `stage`, building it into the furthest slot on a
    /// miss. A failed build leaves the cache untouched.
    pub fn get_or_insert_with<F>(&mut self, stage: i64, build: F) -> Result<ClipRef>
    where
        F: FnOnce(i64) -> Result<ClipRef>,
    {
        if let Some(i) = self.find(stage) {
            debug!(stage, slot = i, "stage cache hit");
            if let Some((_, clip)) = &self.slots[i] {
                return Ok(ClipRef::clone(clip));
            }
        }
        let slot = self.furthest_slot(stage);
        debug!(stage, slot, evicted = ?self.slots[slot].as_ref().map(|(s, _)| *s), "stage cache miss");
        let clip = build(stage)?;
        self.store(slot, stage, ClipRef::clone(&clip));
        Ok(clip)
    }
}
