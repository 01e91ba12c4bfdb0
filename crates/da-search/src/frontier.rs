//! `Frontier<K>`: the open list shared by BFS, UCS and A*.
//!
//! Entries are `(key, seq, slot)` in a `BTreeSet`.  `seq` is the discovery
//! sequence number, so among equal keys the earliest-discovered slot pops
//! first; with the unit key `()` that makes the frontier a FIFO queue.
//!
//! Improving a queued slot removes its entry and re-inserts it with the new
//! key and the *original* `seq`.  A slot is therefore never queued twice,
//! unlike the usual lazy-deletion `BinaryHeap` approach.

use std::collections::BTreeSet;

pub struct Frontier<K> {
    set:      BTreeSet<(K, u64, usize)>,
    /// Current `(key, seq)` of every queued slot, indexed by slot.
    queued:   Vec<Option<(K, u64)>>,
    next_seq: u64,
}

impl<K: Ord + Copy> Frontier<K> {
    /// A frontier able to hold slots `0..slots`.
    pub fn new(slots: usize) -> Self {
        Self { set: BTreeSet::new(), queued: vec![None; slots], next_seq: 0 }
    }

    /// Queue `slot` with `key`, or lower its key if already queued.
    ///
    /// Returns `true` if the frontier changed.  A key that does not improve
    /// on the queued one is ignored.
    pub fn push_or_improve(&mut self, slot: usize, key: K) -> bool {
        match self.queued[slot] {
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.set.insert((key, seq, slot));
                self.queued[slot] = Some((key, seq));
                true
            }
            Some((old, seq)) if key < old => {
                self.set.remove(&(old, seq, slot));
                self.set.insert((key, seq, slot));
                self.queued[slot] = Some((key, seq));
                true
            }
            Some(_) => false,
        }
    }

    /// Remove and return the entry with the smallest `(key, seq)`.
    pub fn pop(&mut self) -> Option<(K, usize)> {
        let (key, _, slot) = self.set.pop_first()?;
        self.queued[slot] = None;
        Some((key, slot))
    }

    #[inline]
    pub fn contains(&self, slot: usize) -> bool {
        self.queued[slot].is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
