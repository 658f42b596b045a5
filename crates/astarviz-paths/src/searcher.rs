use astarviz_core::{Point, Range};

// ---------------------------------------------------------------------------
// Per-search node records
// ---------------------------------------------------------------------------

/// Search bookkeeping for one cell. Only meaningful when `generation`
/// matches the searcher's current generation.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

/// Parent sentinel for the start node.
pub(crate) const NO_PARENT: usize = usize::MAX;

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            f: 0,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

/// Open-heap entry. Several entries may exist for the same node; only the
/// one whose `f` matches the node's current `f` is live.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) h: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    /// Reversed so `BinaryHeap` pops the smallest `f` first; ties go to the
    /// smaller `h`, then to the earlier insertion.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then(other.h.cmp(&self.h))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Reusable A* search state for one board rectangle.
///
/// Node records are stamped with a generation counter bumped at the start of
/// every search, so values left by a previous search are never read and no
/// clearing pass is needed between searches.
pub struct Searcher {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) expanded: usize,
    pub(crate) nbuf: Vec<Point>,
}

impl Searcher {
    /// Create a searcher for the given rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); rng.len()],
            generation: 0,
            expanded: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Switch to another rectangle. Node storage is only reallocated when
    /// the new rectangle is larger than the current capacity.
    pub fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        if rng.len() > self.nodes.len() {
            self.nodes.clear();
            self.nodes.resize(rng.len(), Node::default());
            self.generation = 0;
        }
    }

    /// The rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Number of cells closed by the last search.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Start a new search generation.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stamps from 2^32 searches ago would look current.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.expanded = 0;
        self.generation
    }

    /// Convert a `Point` to a flat index. `None` outside the range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn idx_point_round_trip() {
        let s = Searcher::new(Range::new(2, 3, 7, 9));
        for p in s.range() {
            let i = s.idx(p).unwrap();
            assert_eq!(s.point(i), p);
        }
        assert_eq!(s.idx(Point::new(0, 0)), None);
    }

    #[test]
    fn smaller_range_keeps_capacity() {
        let mut s = Searcher::new(Range::with_size(20, 20));
        s.set_range(Range::with_size(5, 5));
        assert_eq!(s.nodes.len(), 400);
        assert_eq!(s.width, 5);
    }

    #[test]
    fn larger_range_reallocates() {
        let mut s = Searcher::new(Range::with_size(5, 5));
        s.set_range(Range::with_size(20, 20));
        assert_eq!(s.nodes.len(), 400);
    }

    #[test]
    fn generation_wrap_resets_stamps() {
        let mut s = Searcher::new(Range::with_size(2, 2));
        s.nodes[0].generation = 7;
        s.generation = u32::MAX;
        assert_eq!(s.next_generation(), 1);
        assert!(s.nodes.iter().all(|n| n.generation == 0));
    }

    #[test]
    fn heap_pops_lowest_f_then_h_then_fifo() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, f: 5, h: 3, seq: 0 });
        heap.push(NodeRef { idx: 1, f: 4, h: 4, seq: 1 });
        heap.push(NodeRef { idx: 2, f: 4, h: 2, seq: 2 });
        heap.push(NodeRef { idx: 3, f: 4, h: 2, seq: 3 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|n| n.idx).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }
}
