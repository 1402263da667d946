//! The edge table: one bucket of edges per scanline row.
//!
//! Bucket `i` holds the edges whose first row is `base + i`, as a singly
//! linked list threaded through [`Edge::next`](crate::edge::Edge). In
//! standard mode a bucket is unordered (edges are pushed at the head and
//! sorted by x later). In high-precision mode several sub-row events can
//! share one bucket, so it is kept ascending by exact `y_top`.

use crate::edge::{EdgeIdx, EdgeList, EdgePool, EDGES_MAX, NULL_EDGE};
use crate::error::RasterError;

#[derive(Debug, Default)]
pub struct EdgeTable {
    buckets: Vec<EdgeIdx>,
    base: i32,
}

impl EdgeTable {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            base: 0,
        }
    }

    /// Size the table for `size` rows starting at `base` and empty every
    /// bucket. The allocation is reused when it is already large enough.
    pub fn init(&mut self, base: i32, size: usize) -> Result<(), RasterError> {
        debug_assert!(size > 0);
        if size > EDGES_MAX {
            return Err(RasterError::RowSpanTooLarge { rows: size });
        }
        self.buckets.clear();
        self.buckets.try_reserve(size)?;
        self.buckets.resize(size, NULL_EDGE);
        self.base = base;
        Ok(())
    }

    /// Row of bucket 0.
    #[inline]
    pub fn base(&self) -> i32 {
        self.base
    }

    /// Number of buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket index of `row`, if the table covers it.
    #[inline]
    pub fn index_of(&self, row: i32) -> Option<usize> {
        let i = i64::from(row) - i64::from(self.base);
        if i >= 0 && (i as usize) < self.buckets.len() {
            Some(i as usize)
        } else {
            None
        }
    }

    /// Head of the bucket at `index`.
    #[inline]
    pub fn head(&self, index: usize) -> EdgeIdx {
        self.buckets[index]
    }

    /// Detach and return the whole bucket at `index`.
    #[inline]
    pub fn take(&mut self, index: usize) -> EdgeIdx {
        core::mem::replace(&mut self.buckets[index], NULL_EDGE)
    }

    /// Replace the head of the bucket at `index`.
    #[inline]
    pub fn set_head(&mut self, index: usize, head: EdgeIdx) {
        self.buckets[index] = head;
    }

    /// Push an edge at the head of the bucket for its `row_top`.
    pub fn insert(&mut self, pool: &mut EdgePool, idx: EdgeIdx) {
        let table_index = self.index_of(pool[idx].row_top);
        debug_assert!(table_index.is_some(), "edge row outside the edge table");
        let Some(table_index) = table_index else {
            return;
        };
        debug_assert!(pool[idx].list != EdgeList::Active);

        let edge = &mut pool[idx];
        edge.next = self.buckets[table_index];
        edge.list = EdgeList::Table;
        self.buckets[table_index] = idx;
    }

    /// Insert an edge into the bucket for `floor(y_top)`, keeping the
    /// bucket ascending by exact `y_top`. An edge goes in front of any edge
    /// with an equal `y_top`.
    pub fn insert_high(&mut self, pool: &mut EdgePool, idx: EdgeIdx) {
        let table_index = self.index_of(pool[idx].row_top);
        debug_assert!(table_index.is_some(), "edge row outside the edge table");
        let Some(table_index) = table_index else {
            return;
        };
        debug_assert!(pool[idx].list != EdgeList::Active);

        let y_top = pool[idx].y_top;
        let mut prev = NULL_EDGE;
        let mut cur = self.buckets[table_index];
        while cur != NULL_EDGE {
            debug_assert!(cur != idx);
            if y_top <= pool[cur].y_top {
                break;
            }
            prev = cur;
            cur = pool[cur].next;
        }

        pool[idx].next = cur;
        pool[idx].list = EdgeList::Table;
        if prev == NULL_EDGE {
            self.buckets[table_index] = idx;
        } else {
            pool[prev].next = idx;
        }
    }

    /// Empty every bucket, keeping the allocation.
    pub fn reset(&mut self) {
        self.buckets.fill(NULL_EDGE);
    }

    /// Free the allocation.
    pub fn release(&mut self) {
        self.buckets = Vec::new();
        self.base = 0;
    }
}

// ============================================================================
// Tests
// ============================================================================
