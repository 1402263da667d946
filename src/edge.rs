//! Edge records and the edge pool.
//!
//! Edges live in a 1-based arena addressed by 16-bit indices. Index 0 is
//! the universal list terminator and never refers to a real edge, so a
//! linked list is just a head index plus the `next` field of each edge.
//!
//! An edge belongs to at most one list at a time: a bucket of the edge
//! table or the active edge list. The `list` tag records which one owns
//! the `next` link, and list operations assert on it in debug builds.

use core::ops::{Index, IndexMut};

use crate::basics::PointX;
use crate::error::RasterError;
use crate::fixed::Fixed;

/// Index of an edge in its [`EdgePool`].
pub type EdgeIdx = u16;

/// The list terminator.
pub const NULL_EDGE: EdgeIdx = 0;

/// Pool growth increment, in edges.
#[cfg(feature = "small")]
pub const EDGES_GROW: usize = 1024;
#[cfg(not(feature = "small"))]
pub const EDGES_GROW: usize = 2048;

/// Largest number of edges a pool can hold.
pub const EDGES_MAX: usize = u16::MAX as usize;

// ============================================================================
// EdgeList: ownership tag for the `next` link
// ============================================================================

/// Which linked list currently owns an edge's `next` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeList {
    #[default]
    Free,
    Table,
    Active,
}

// ============================================================================
// Edge
// ============================================================================

/// A directed polygon boundary segment, stored top to bottom.
///
/// `winding` is +1 if the source segment already ran downward and -1 if
/// its endpoints were swapped. In standard mode `row_top..=row_bottom`
/// are the integer scanlines the edge covers and `x` is exact at each of
/// them. In high-precision mode only the exact `y_top`/`y_bottom` values
/// matter and `dy_top`/`dy_bottom` are zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Edge {
    pub(crate) x: Fixed,
    pub(crate) slope: Fixed,
    pub(crate) x_top: Fixed,
    pub(crate) x_bottom: Fixed,
    pub(crate) y_top: Fixed,
    pub(crate) y_bottom: Fixed,
    pub(crate) row_top: i32,
    pub(crate) row_bottom: i32,
    pub(crate) dy_top: Fixed,
    pub(crate) dy_bottom: Fixed,
    pub(crate) winding: i32,
    pub(crate) next: EdgeIdx,
    pub(crate) list: EdgeList,
    pub(crate) is_top: bool,
}

impl Edge {
    /// Build a standard-mode edge from two fixed-point endpoints.
    ///
    /// Returns `None` for edges that are horizontal after rounding y to
    /// the nearest row.
    pub fn standard(b: PointX, e: PointX) -> Option<Edge> {
        let mut iyb = b.y.round();
        let mut iye = e.y.round();
        if iyb == iye {
            return None;
        }

        let (mut xb, mut yb, mut xe, mut ye) = (b.x, b.y, e.x, e.y);
        let dx = xe - xb;
        let dy = ye - yb;

        let mut winding = 1;
        if yb > ye {
            core::mem::swap(&mut xb, &mut xe);
            core::mem::swap(&mut yb, &mut ye);
            core::mem::swap(&mut iyb, &mut iye);
            winding = -1;
        }
        debug_assert!(iyb < iye);

        let slope = dx.div(dy);

        // Offsets between the true endpoints and the rows they were
        // rounded to; both lie in [-0.5, 0.5].
        let dy_top = yb - Fixed::from_int(iyb);
        let dy_bottom = ye - Fixed::from_int(iye);

        // Start x exact at row `iyb` rather than at `yb`.
        let x = xb - dy_top.mul(slope);

        Some(Edge {
            x,
            slope,
            x_top: xb,
            x_bottom: xe,
            y_top: yb,
            y_bottom: ye,
            row_top: iyb,
            row_bottom: iye - 1,
            dy_top,
            dy_bottom,
            winding,
            next: NULL_EDGE,
            list: EdgeList::Free,
            is_top: true,
        })
    }

    /// Build a high-precision edge from two fixed-point endpoints.
    ///
    /// Returns `None` when the exact height is within [`Fixed::NEAR0`].
    pub fn high(b: PointX, e: PointX) -> Option<Edge> {
        let (mut xb, mut yb, mut xe, mut ye) = (b.x, b.y, e.x, e.y);
        let dy = ye - yb;
        if dy.abs() <= Fixed::NEAR0 {
            return None;
        }
        let dx = xe - xb;

        let mut winding = 1;
        if yb > ye {
            core::mem::swap(&mut xb, &mut xe);
            core::mem::swap(&mut yb, &mut ye);
            winding = -1;
        }
        debug_assert!(yb < ye);

        Some(Edge {
            x: xb,
            slope: dx.div(dy),
            x_top: xb,
            x_bottom: xe,
            y_top: yb,
            y_bottom: ye,
            row_top: yb.floor(),
            row_bottom: ye.floor(),
            dy_top: Fixed::ZERO,
            dy_bottom: Fixed::ZERO,
            winding,
            next: NULL_EDGE,
            list: EdgeList::Free,
            is_top: true,
        })
    }

    /// Current x at the scanline being processed.
    #[inline]
    pub fn x(&self) -> Fixed {
        self.x
    }

    /// dx per unit of y.
    #[inline]
    pub fn slope(&self) -> Fixed {
        self.slope
    }

    /// +1 or -1.
    #[inline]
    pub fn winding(&self) -> i32 {
        self.winding
    }

    #[inline]
    pub fn x_top(&self) -> Fixed {
        self.x_top
    }

    #[inline]
    pub fn x_bottom(&self) -> Fixed {
        self.x_bottom
    }

    #[inline]
    pub fn y_top(&self) -> Fixed {
        self.y_top
    }

    #[inline]
    pub fn y_bottom(&self) -> Fixed {
        self.y_bottom
    }

    /// First row this edge covers.
    #[inline]
    pub fn row_top(&self) -> i32 {
        self.row_top
    }

    /// Last row this edge covers (inclusive) in standard mode; the floor
    /// of `y_bottom` in high-precision mode.
    #[inline]
    pub fn row_bottom(&self) -> i32 {
        self.row_bottom
    }

    #[inline]
    pub fn dy_top(&self) -> Fixed {
        self.dy_top
    }

    #[inline]
    pub fn dy_bottom(&self) -> Fixed {
        self.dy_bottom
    }

    /// True until the edge has been advanced past its first row.
    #[inline]
    pub fn is_top(&self) -> bool {
        self.is_top
    }

    /// Exact x of the edge's supporting line at `y`.
    #[inline]
    pub fn x_at(&self, y: Fixed) -> Fixed {
        self.x_top + (y - self.y_top).mul(self.slope)
    }
}

// ============================================================================
// EdgePool
// ============================================================================

/// Grow-only arena of edges, slot 0 reserved.
///
/// Growth happens in blocks of [`EDGES_GROW`]; `clear` truncates without
/// releasing memory so one pool serves many polygons.
#[derive(Debug, Default)]
pub struct EdgePool {
    edges: Vec<Edge>,
}

impl EdgePool {
    /// An empty pool. Nothing is allocated until the first edge.
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// A pool with room for `n` edges up front.
    pub fn with_capacity(n: usize) -> Self {
        let mut edges = Vec::with_capacity(n.min(EDGES_MAX) + 1);
        edges.push(Edge::default());
        Self { edges }
    }

    /// Number of real edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Edge slots available before the next growth step.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.edges.capacity().saturating_sub(1)
    }

    /// Drop all edges, keeping the allocation.
    pub fn clear(&mut self) {
        self.edges.truncate(1);
    }

    /// Free the allocation.
    pub fn release(&mut self) {
        self.edges = Vec::new();
    }

    /// Store an edge and return its index.
    pub fn alloc(&mut self, edge: Edge) -> Result<EdgeIdx, RasterError> {
        if self.edges.is_empty() {
            self.edges.try_reserve(EDGES_GROW)?;
            self.edges.push(Edge::default());
        }
        let idx = self.edges.len();
        if idx > EDGES_MAX {
            return Err(RasterError::EdgeCapacity { edges: idx });
        }
        if idx == self.edges.capacity() {
            self.edges.try_reserve(EDGES_GROW)?;
        }
        self.edges.push(edge);
        Ok(idx as EdgeIdx)
    }

    /// Swap the geometry of two edges while each slot keeps its own `next`
    /// link and list tag.
    pub fn swap_payload(&mut self, a: EdgeIdx, b: EdgeIdx) {
        debug_assert!(a != NULL_EDGE && b != NULL_EDGE);
        let (na, la) = (self[a].next, self[a].list);
        let (nb, lb) = (self[b].next, self[b].list);
        self.edges.swap(a as usize, b as usize);
        self[a].next = na;
        self[a].list = la;
        self[b].next = nb;
        self[b].list = lb;
    }

    /// Iterate the real edges with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeIdx, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, e)| (i as EdgeIdx, e))
    }
}

impl Index<EdgeIdx> for EdgePool {
    type Output = Edge;

    #[inline]
    fn index(&self, idx: EdgeIdx) -> &Edge {
        debug_assert!(idx != NULL_EDGE, "edge index 0 is the list terminator");
        &self.edges[idx as usize]
    }
}

impl IndexMut<EdgeIdx> for EdgePool {
    #[inline]
    fn index_mut(&mut self, idx: EdgeIdx) -> &mut Edge {
        debug_assert!(idx != NULL_EDGE, "edge index 0 is the list terminator");
        &mut self.edges[idx as usize]
    }
}

// ============================================================================
// Tests
// ============================================================================
