//! Search memo.
//!
//! A small ring of recent expansion results keyed by destination, search
//! window and the exact itinerary set the expansion started from. When the ring is full the
//! oldest entry is overwritten; hits do not reorder entries.

use tracing::{trace, warn};

use crate::domain::{Itinerary, Symbol, TimeWindow};

#[derive(Debug, Clone)]
struct MemoEntry {
    destination: Symbol,
    window: TimeWindow,
    input: Vec<Itinerary>,
    terminal: Vec<Itinerary>,
}

/// Fixed-capacity FIFO cache of expansion results.
#[derive(Debug)]
pub struct SearchMemo {
    slots: Vec<Option<MemoEntry>>,
    next: usize,
    hits: u64,
    misses: u64,
}

impl SearchMemo {
    /// Create a memo with room for `capacity` entries.
    ///
    /// A capacity of 0 is forced to 1 with a warning.
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            warn!("memo capacity was 0, forcing it to 1");
            1
        } else {
            capacity
        };

        Self {
            slots: vec![None; capacity],
            next: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Find the terminal set recorded for this destination, window and input.
    ///
    /// Inputs match only when they hold the same itineraries in the same
    /// order.
    pub fn lookup(
        &mut self,
        destination: Symbol,
        window: TimeWindow,
        input: &[Itinerary],
    ) -> Option<&[Itinerary]> {
        let found = self.slots.iter().position(|slot| {
            slot.as_ref().is_some_and(|entry| {
                entry.destination == destination
                    && entry.window == window
                    && entry.input.as_slice() == input
            })
        });

        match found {
            Some(slot) => {
                self.hits += 1;
                trace!(destination = %destination, hits = self.hits, "memo hit");
                self.slots[slot].as_ref().map(|entry| entry.terminal.as_slice())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a result in the next slot, evicting the oldest entry if full.
    pub fn record(
        &mut self,
        destination: Symbol,
        window: TimeWindow,
        input: Vec<Itinerary>,
        terminal: Vec<Itinerary>,
    ) {
        let slot = self.next;
        self.slots[slot] = Some(MemoEntry {
            destination,
            window,
            input,
            terminal,
        });
        self.next = (slot + 1) % self.slots.len();
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.next = 0;
    }
}
