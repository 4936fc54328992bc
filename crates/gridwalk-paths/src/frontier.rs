use std::collections::BinaryHeap;

use gridwalk_core::{CellGraph, CellStatus, Visit};

/// Priority of a frontier cell: primary key, then tie-break key.
pub(crate) type Key = (f64, f64);

const NOT_QUEUED: u64 = u64::MAX;

/// Heap entry, ordered so that `BinaryHeap` (max-heap) pops the smallest key
/// first and, among equal keys, the cell that entered the frontier first.
#[derive(Clone, Copy, Debug)]
struct Entry {
    key: Key,
    ticket: u64,
    idx: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .key
            .0
            .total_cmp(&self.key.0)
            .then(other.key.1.total_cmp(&self.key.1))
            .then(other.ticket.cmp(&self.ticket))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Entry {}

/// Indexed priority frontier with lazy deletion.
///
/// A cell keeps the ticket it received when it first entered the frontier,
/// so re-pushing it with an improved key does not lose its place among ties.
/// Entries whose key no longer matches the cell's current key are skipped
/// when they surface.
#[derive(Debug)]
pub(crate) struct OpenList {
    heap: BinaryHeap<Entry>,
    tickets: Vec<u64>,
    next_ticket: u64,
    live: usize,
}

impl OpenList {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            tickets: vec![NOT_QUEUED; len],
            next_ticket: 0,
            live: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.tickets.fill(NOT_QUEUED);
        self.next_ticket = 0;
        self.live = 0;
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Insert `idx`, or record a new key for a cell already queued.
    pub(crate) fn push(&mut self, idx: usize, key: Key) {
        if self.tickets[idx] == NOT_QUEUED {
            self.tickets[idx] = self.next_ticket;
            self.next_ticket += 1;
            self.live += 1;
        }
        self.heap.push(Entry {
            key,
            ticket: self.tickets[idx],
            idx,
        });
    }

    /// Smallest live cell without removing it.
    pub(crate) fn peek(&mut self, key_of: impl Fn(usize) -> Key) -> Option<usize> {
        loop {
            let e = *self.heap.peek()?;
            if self.tickets[e.idx] == e.ticket && same_key(key_of(e.idx), e.key) {
                return Some(e.idx);
            }
            self.heap.pop();
        }
    }

    /// Remove and return the smallest live cell.
    pub(crate) fn pop(&mut self, key_of: impl Fn(usize) -> Key) -> Option<usize> {
        let idx = self.peek(key_of)?;
        self.heap.pop();
        self.tickets[idx] = NOT_QUEUED;
        self.live -= 1;
        Some(idx)
    }

    /// Live cells, in insertion order.
    pub(crate) fn members(&self) -> Vec<usize> {
        let mut live: Vec<(u64, usize)> = self
            .heap
            .iter()
            .filter(|e| self.tickets[e.idx] == e.ticket)
            .map(|e| (e.ticket, e.idx))
            .collect();
        live.sort_unstable();
        live.dedup();
        live.into_iter().map(|(_, idx)| idx).collect()
    }

    /// Rebuild the heap after keys changed for many cells at once.
    pub(crate) fn rebuild(&mut self, key_of: impl Fn(usize) -> Key) {
        let members = self.members();
        let entries: Vec<Entry> = members
            .into_iter()
            .map(|idx| Entry {
                key: key_of(idx),
                ticket: self.tickets[idx],
                idx,
            })
            .collect();
        self.heap = BinaryHeap::from(entries);
    }
}

#[inline]
fn same_key(a: Key, b: Key) -> bool {
    a.0.total_cmp(&b.0).is_eq() && a.1.total_cmp(&b.1).is_eq()
}

/// Move cell `idx` into the closed set.
pub(crate) fn close(graph: &mut CellGraph, idx: usize) {
    graph.cell_at_mut(idx).visit = Visit::Closed;
    graph.mark_search(idx, CellStatus::Closed);
}

/// Put cell `idx` into the frontier and paint it active.
pub(crate) fn open(graph: &mut CellGraph, idx: usize) {
    graph.cell_at_mut(idx).visit = Visit::Open;
    graph.mark_search(idx, CellStatus::Active);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_smallest_key_first() {
        let mut open = OpenList::new(4);
        let keys = [(3.0, 0.0), (1.0, 5.0), (1.0, 2.0), (2.0, 0.0)];
        for (i, &k) in keys.iter().enumerate() {
            open.push(i, k);
        }
        let order: Vec<_> = std::iter::from_fn(|| open.pop(|i| keys[i])).collect();
        assert_eq!(order, vec![2, 1, 3, 0]);
        assert!(open.is_empty());
    }

    #[test]
    fn ties_go_to_first_inserted() {
        let mut open = OpenList::new(3);
        open.push(2, (1.0, 1.0));
        open.push(0, (1.0, 1.0));
        open.push(1, (1.0, 1.0));
        let order: Vec<_> = std::iter::from_fn(|| open.pop(|_| (1.0, 1.0))).collect();
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn stale_entries_are_skipped() {
        let mut keys = [(5.0, 0.0), (4.0, 0.0)];
        let mut open = OpenList::new(2);
        open.push(0, keys[0]);
        open.push(1, keys[1]);
        keys[0] = (1.0, 0.0);
        open.push(0, keys[0]);
        assert_eq!(open.members(), vec![0, 1]);
        assert_eq!(open.pop(|i| keys[i]), Some(0));
        assert_eq!(open.pop(|i| keys[i]), Some(1));
        assert_eq!(open.pop(|i| keys[i]), None);
    }

    #[test]
    fn rebuild_reorders_members() {
        let mut keys = [(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)];
        let mut open = OpenList::new(3);
        for (i, &k) in keys.iter().enumerate() {
            open.push(i, k);
        }
        assert_eq!(open.members(), vec![0, 1, 2]);
        keys[0] = (9.0, 0.0);
        open.rebuild(|i| keys[i]);
        assert_eq!(open.peek(|i| keys[i]), Some(1));
        assert!(open.members().contains(&0));
    }
}
