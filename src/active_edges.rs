//! The active edge list.
//!
//! Holds the edges that straddle the scanline being emitted, ascending by
//! current x. Edges enter from an edge-table bucket and leave once their
//! bottom has been passed. Three ways to bring edges in:
//!
//! - [`ActiveEdges::append`]: splice a bucket in unsorted; a full
//!   [`ActiveEdges::sort`] must follow.
//! - [`ActiveEdges::append_high`]: same, but only for the part of a
//!   y-sorted bucket that has started at the current sub-row sample.
//! - [`ActiveEdges::sorted_append`]: insert each edge at its x position;
//!   cheap while the list is known to be in order.
//!
//! [`ActiveEdges::advance`] steps every edge to the next row, evicts
//! finished ones, and reports whether x order survived the step so the
//! driver can choose between `sorted_append` and `append` + `sort`.

use crate::edge::{EdgeIdx, EdgeList, EdgePool, NULL_EDGE};
use crate::edge_table::EdgeTable;
use crate::fixed::Fixed;

#[derive(Debug, Default)]
pub struct ActiveEdges {
    head: EdgeIdx,
}

impl ActiveEdges {
    pub fn new() -> Self {
        Self { head: NULL_EDGE }
    }

    #[inline]
    pub fn head(&self) -> EdgeIdx {
        self.head
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == NULL_EDGE
    }

    /// Forget every active edge. The edges themselves stay in the pool.
    #[inline]
    pub fn clear(&mut self) {
        self.head = NULL_EDGE;
    }

    /// Walk the list in order.
    pub fn iter<'a>(&self, pool: &'a EdgePool) -> ActiveIter<'a> {
        ActiveIter {
            pool,
            index: self.head,
        }
    }

    /// Number of active edges.
    pub fn len(&self, pool: &EdgePool) -> usize {
        self.iter(pool).count()
    }

    /// Splice the chain starting at `index` in front of the list, keeping
    /// the chain's own order. Leaves the list unsorted.
    pub fn append(&mut self, pool: &mut EdgePool, index: EdgeIdx) {
        if index == NULL_EDGE {
            return;
        }
        let mut tail = index;
        loop {
            debug_assert!(pool[tail].list != EdgeList::Active);
            pool[tail].list = EdgeList::Active;
            let next = pool[tail].next;
            if next == NULL_EDGE {
                break;
            }
            tail = next;
        }
        pool[tail].next = self.head;
        self.head = index;
    }

    /// Move the leading edges of bucket `table_index` whose `y_top <= y`
    /// onto the list, placing each at its exact x for `y`. The bucket keeps
    /// the edges that start later. Edges that already ended by `y` never
    /// cross a sample and are discarded. Returns whether anything was added.
    pub fn append_high(
        &mut self,
        pool: &mut EdgePool,
        table: &mut EdgeTable,
        table_index: usize,
        y: Fixed,
    ) -> bool {
        let mut appended = false;
        let mut index = table.head(table_index);
        while index != NULL_EDGE {
            if pool[index].y_top > y {
                break;
            }
            let next = pool[index].next;
            let edge = &mut pool[index];
            if edge.y_bottom <= y {
                edge.next = NULL_EDGE;
                edge.list = EdgeList::Free;
            } else {
                edge.x = edge.x_at(y);
                edge.next = self.head;
                edge.list = EdgeList::Active;
                self.head = index;
                appended = true;
            }
            index = next;
        }
        table.set_head(table_index, index);
        appended
    }

    /// Insert every edge of the chain starting at `index` at the position
    /// that keeps the list ascending by x. On equal x the edge with the
    /// smaller slope goes first, so edges leaving a shared vertex are
    /// ordered by where they head next.
    pub fn sorted_append(&mut self, pool: &mut EdgePool, mut index: EdgeIdx) {
        while index != NULL_EDGE {
            let next = pool[index].next;
            debug_assert!(pool[index].list != EdgeList::Active);
            let (x, slope) = (pool[index].x, pool[index].slope);

            let mut prev = NULL_EDGE;
            let mut cur = self.head;
            while cur != NULL_EDGE {
                debug_assert!(cur != index);
                let active = &pool[cur];
                if x < active.x || (x == active.x && slope < active.slope) {
                    break;
                }
                prev = cur;
                cur = active.next;
            }

            pool[index].next = cur;
            pool[index].list = EdgeList::Active;
            if prev == NULL_EDGE {
                self.head = index;
            } else {
                pool[prev].next = index;
            }

            index = next;
        }
    }

    /// Exchange sort by x. Swaps edge payloads in place, so list links
    /// never change; already sorted input is left untouched.
    pub fn sort(&mut self, pool: &mut EdgePool) {
        let mut lsh = self.head;
        while lsh != NULL_EDGE {
            let mut rsh = pool[lsh].next;
            while rsh != NULL_EDGE {
                if pool[lsh].x > pool[rsh].x {
                    pool.swap_payload(lsh, rsh);
                }
                rsh = pool[rsh].next;
            }
            lsh = pool[lsh].next;
        }
    }

    /// Step from row `y` to row `y + 1`.
    ///
    /// An edge whose last row is `y` is evicted, except when `y` is the final
    /// row of the polygon (`bottom - 1`), where everything is kept. The rest
    /// move by one slope. Returns whether the new x values are still
    /// non-decreasing in list order.
    pub fn advance(&mut self, pool: &mut EdgePool, y: i32, bottom: i32) -> bool {
        let last_row = y == bottom - 1;
        let mut order = true;
        let mut prev_x: Option<Fixed> = None;
        let mut prev = NULL_EDGE;
        let mut index = self.head;
        while index != NULL_EDGE {
            let next = pool[index].next;

            if !last_row && pool[index].row_bottom < y + 1 {
                self.unlink(pool, prev, index);
                index = next;
                continue;
            }

            let edge = &mut pool[index];
            edge.x += edge.slope;
            edge.is_top = false;

            if let Some(px) = prev_x {
                if edge.x < px {
                    order = false;
                }
            }
            prev_x = Some(edge.x);
            prev = index;
            index = next;
        }
        order
    }

    /// Step to the sub-row sample `y_next`: evict edges ending at or above it
    /// and place the rest at their exact x there. Returns the order flag
    /// like [`ActiveEdges::advance`].
    pub fn advance_high(&mut self, pool: &mut EdgePool, y_next: Fixed) -> bool {
        let mut order = true;
        let mut prev_x: Option<Fixed> = None;
        let mut prev = NULL_EDGE;
        let mut index = self.head;
        while index != NULL_EDGE {
            let next = pool[index].next;

            if pool[index].y_bottom <= y_next {
                self.unlink(pool, prev, index);
                index = next;
                continue;
            }

            let edge = &mut pool[index];
            edge.x = edge.x_at(y_next);
            edge.is_top = false;

            if let Some(px) = prev_x {
                if edge.x < px {
                    order = false;
                }
            }
            prev_x = Some(edge.x);
            prev = index;
            index = next;
        }
        order
    }

    fn unlink(&mut self, pool: &mut EdgePool, prev: EdgeIdx, index: EdgeIdx) {
        let next = pool[index].next;
        if prev == NULL_EDGE {
            self.head = next;
        } else {
            pool[prev].next = next;
        }
        pool[index].next = NULL_EDGE;
        pool[index].list = EdgeList::Free;
    }
}

/// Iterator over active edge indices.
pub struct ActiveIter<'a> {
    pool: &'a EdgePool,
    index: EdgeIdx,
}

impl<'a> Iterator for ActiveIter<'a> {
    type Item = EdgeIdx;

    fn next(&mut self) -> Option<EdgeIdx> {
        if self.index == NULL_EDGE {
            return None;
        }
        let cur = self.index;
        self.index = self.pool[cur].next;
        Some(cur)
    }
}

// ============================================================================
// Tests
// ============================================================================
