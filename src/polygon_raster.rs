//! Scanline polygon rasterizer.
//!
//! Converts polygon contours into horizontal spans, one edge-table pass at
//! a time. Every pass follows the same sequence:
//!
//! 1. Build edges from consecutive vertex pairs and file them in the edge
//!    table by their first row.
//! 2. For each row (or sub-row sample) from top to bottom: migrate the
//!    bucket for that row onto the active list, restore x order, emit the
//!    spans between inside edge pairs, then advance every active edge.
//!
//! Spans are delivered to a [`SpanSink`]; nothing is rendered here.

use log::{debug, error, trace, warn};

use crate::active_edges::ActiveEdges;
use crate::basics::{Bounds, FillingRule, PointD};
use crate::edge::{Edge, EdgeIdx, EdgeList, EdgePool, NULL_EDGE};
use crate::edge_table::EdgeTable;
use crate::error::RasterError;
use crate::fixed::{Fixed, FIXED_SCALE};
use crate::polygon::Polygon;

/// Default number of sub-row samples per row in high-precision mode, as a
/// power of two.
pub const DEFAULT_SAMPLE_SHIFT: u32 = 2;
/// Finest supported sub-row sampling, as a power of two.
pub const MAX_SAMPLE_SHIFT: u32 = 8;

// ============================================================================
// Span sinks
// ============================================================================

/// Receiver of integer-row spans.
///
/// `y..y_end` is the half-open range of rows covered (usually one row; the
/// rectangle fast path can cover several). `left` and `right` bound the
/// span and satisfy `left.x() <= right.x()`.
pub trait SpanSink {
    fn span(&mut self, y: i32, y_end: i32, left: &Edge, right: &Edge);
}

impl<F> SpanSink for F
where
    F: FnMut(i32, i32, &Edge, &Edge),
{
    #[inline]
    fn span(&mut self, y: i32, y_end: i32, left: &Edge, right: &Edge) {
        self(y, y_end, left, right)
    }
}

/// Receiver of high-precision spans, bounded by fixed-point y values.
pub trait SpanSinkHigh {
    fn span(&mut self, y: Fixed, y_end: Fixed, left: &Edge, right: &Edge);
}

impl<F> SpanSinkHigh for F
where
    F: FnMut(Fixed, Fixed, &Edge, &Edge),
{
    #[inline]
    fn span(&mut self, y: Fixed, y_end: Fixed, left: &Edge, right: &Edge) {
        self(y, y_end, left, right)
    }
}

// ============================================================================
// PolygonRaster
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Standard,
    High,
}

/// Reusable scanline polygon rasterizer.
///
/// One instance owns the edge pool, edge table and active list, and reuses
/// their allocations across passes. Passes on one instance are strictly
/// sequential; use one instance per thread.
///
/// Usage:
/// 1. Optionally presize with [`PolygonRaster::with_capacity`] and set
///    [`PolygonRaster::sample_shift`]
/// 2. Call [`PolygonRaster::rasterize`] (or one of the explicit paths) per
///    polygon
/// 3. Call [`PolygonRaster::release`] or drop the instance when done
pub struct PolygonRaster {
    pool: EdgePool,
    table: EdgeTable,
    active: ActiveEdges,
    top: i32,
    bottom: i32,
    top_y: Fixed,
    bottom_y: Fixed,
    sample_shift: u32,
}

impl PolygonRaster {
    /// An empty rasterizer. Nothing is allocated until the first pass.
    pub fn new() -> Self {
        Self {
            pool: EdgePool::new(),
            table: EdgeTable::new(),
            active: ActiveEdges::new(),
            top: 0,
            bottom: 0,
            top_y: Fixed::ZERO,
            bottom_y: Fixed::ZERO,
            sample_shift: DEFAULT_SAMPLE_SHIFT,
        }
    }

    /// A rasterizer whose edge pool already has room for `edges` edges.
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            pool: EdgePool::with_capacity(edges),
            ..Self::new()
        }
    }

    /// Sample each row `1 << shift` times in high-precision mode. Values
    /// above [`MAX_SAMPLE_SHIFT`] are clamped.
    pub fn sample_shift(&mut self, shift: u32) {
        self.sample_shift = shift.min(MAX_SAMPLE_SHIFT);
    }

    /// Distance between two high-precision samples.
    #[inline]
    pub fn sample_step(&self) -> Fixed {
        Fixed::from_raw(FIXED_SCALE >> self.sample_shift)
    }

    /// Rasterize `polygon` with integer rows, taking the convex path when
    /// the polygon is flagged convex.
    pub fn rasterize<S>(
        &mut self,
        polygon: &Polygon,
        bounds: &Bounds,
        rule: FillingRule,
        sink: &mut S,
    ) -> Result<(), RasterError>
    where
        S: SpanSink + ?Sized,
    {
        if polygon.convex {
            self.rasterize_convex(polygon, bounds, sink)
        } else {
            self.rasterize_concave(polygon, bounds, rule, sink)
        }
    }

    /// Convex path. Each contour is built and scanned on its own, and every
    /// row gets one span between its two active edges without any winding
    /// test. The result is only meaningful for convex contours.
    pub fn rasterize_convex<S>(
        &mut self,
        polygon: &Polygon,
        bounds: &Bounds,
        sink: &mut S,
    ) -> Result<(), RasterError>
    where
        S: SpanSink + ?Sized,
    {
        polygon.validate()?;
        for contour in polygon.contours() {
            if !self.make_edges(core::iter::once(contour), bounds, Mode::Standard)? {
                return Ok(());
            }
            self.done_convex(sink);
        }
        Ok(())
    }

    /// General path: all contours at once, spans decided by `rule`.
    pub fn rasterize_concave<S>(
        &mut self,
        polygon: &Polygon,
        bounds: &Bounds,
        rule: FillingRule,
        sink: &mut S,
    ) -> Result<(), RasterError>
    where
        S: SpanSink + ?Sized,
    {
        polygon.validate()?;
        check_rule(rule);
        if !self.make_edges(polygon.contours(), bounds, Mode::Standard)? {
            return Ok(());
        }
        self.done_concave(rule, sink);
        Ok(())
    }

    /// High-precision path: edges keep their exact fixed-point extent and
    /// rows are sampled on a grid of [`PolygonRaster::sample_step`]. The
    /// convex hint is ignored.
    pub fn rasterize_high<S>(
        &mut self,
        polygon: &Polygon,
        bounds: &Bounds,
        rule: FillingRule,
        sink: &mut S,
    ) -> Result<(), RasterError>
    where
        S: SpanSinkHigh + ?Sized,
    {
        polygon.validate()?;
        check_rule(rule);
        if !self.make_edges(polygon.contours(), bounds, Mode::High)? {
            return Ok(());
        }
        self.done_high(rule, sink);
        Ok(())
    }

    /// Forget the last pass while keeping every allocation.
    pub fn reset(&mut self) {
        self.active.clear();
        self.table.reset();
        self.pool.clear();
        self.top = 0;
        self.bottom = 0;
        self.top_y = Fixed::ZERO;
        self.bottom_y = Fixed::ZERO;
    }

    /// Free every allocation. The instance stays usable.
    pub fn release(&mut self) {
        self.reset();
        self.pool.release();
        self.table.release();
    }

    /// Edges built by the last pass (for a convex pass, by its last
    /// contour).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.pool.len()
    }

    /// Edge `idx` of the last pass, if it exists.
    pub fn edge(&self, idx: EdgeIdx) -> Option<&Edge> {
        if idx == NULL_EDGE || usize::from(idx) > self.pool.len() {
            None
        } else {
            Some(&self.pool[idx])
        }
    }

    /// Every edge of the last pass in build order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.pool.iter().map(|(_, e)| e)
    }

    /// First row of the last standard pass.
    #[inline]
    pub fn top(&self) -> i32 {
        self.top
    }

    /// One past the last row of the last standard pass.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Exact top of the last high-precision pass.
    #[inline]
    pub fn top_y(&self) -> Fixed {
        self.top_y
    }

    /// Exact bottom of the last high-precision pass.
    #[inline]
    pub fn bottom_y(&self) -> Fixed {
        self.bottom_y
    }

    // ------------------------------------------------------------------------
    // Edge construction
    // ------------------------------------------------------------------------

    /// Build the edges of `contours` into a freshly sized table.
    ///
    /// Returns `Ok(false)` when the bounds are empty and there is nothing to
    /// scan.
    fn make_edges<'a, I>(
        &mut self,
        contours: I,
        bounds: &Bounds,
        mode: Mode,
    ) -> Result<bool, RasterError>
    where
        I: IntoIterator<Item = &'a [PointD]>,
    {
        self.active.clear();
        self.pool.clear();
        self.top = 0;
        self.bottom = 0;
        self.top_y = Fixed::ZERO;
        self.bottom_y = Fixed::ZERO;

        if bounds.is_empty() {
            debug!("empty bounds {:?}, nothing to rasterize", bounds);
            return Ok(false);
        }

        let by = Fixed::from_f64(bounds.y);
        let (base, size) = match mode {
            Mode::Standard => (by.round(), Fixed::from_f64(bounds.h).round() + 1),
            Mode::High => {
                let base = by.floor();
                (base, (by + Fixed::from_f64(bounds.h)).ceil() - base + 1)
            }
        };
        self.table.init(base, size.max(1) as usize)?;

        let mut extent: Option<(i32, i32)> = None;
        let mut extent_y: Option<(Fixed, Fixed)> = None;

        let mut clamped = 0usize;
        for contour in contours {
            clamped += contour.iter().filter(|p| !p.fits_fixed()).count();
            for pair in contour.windows(2) {
                let (b, e) = (pair[0].to_fixed(), pair[1].to_fixed());
                let edge = match mode {
                    Mode::Standard => Edge::standard(b, e),
                    Mode::High => Edge::high(b, e),
                };
                let Some(edge) = edge else {
                    continue;
                };

                let in_table = self.table.index_of(edge.row_top).is_some();
                debug_assert!(
                    in_table,
                    "edge at row {} outside edge table {}..{}",
                    edge.row_top,
                    base,
                    base + size
                );
                if !in_table {
                    warn!(
                        "dropping edge at row {}, outside bounds {:?}",
                        edge.row_top, bounds
                    );
                    continue;
                }

                let idx = self.pool.alloc(edge)?;
                match mode {
                    Mode::Standard => {
                        let row_end = edge.row_bottom + 1;
                        extent = Some(match extent {
                            None => (edge.row_top, row_end),
                            Some((t, b)) => (t.min(edge.row_top), b.max(row_end)),
                        });
                        self.table.insert(&mut self.pool, idx);
                    }
                    Mode::High => {
                        extent_y = Some(match extent_y {
                            None => (edge.y_top, edge.y_bottom),
                            Some((t, b)) => (t.min(edge.y_top), b.max(edge.y_bottom)),
                        });
                        self.table.insert_high(&mut self.pool, idx);
                    }
                }
            }
        }

        if clamped > 0 {
            warn!(
                "{} vertices outside the fixed-point range were clamped to +/-{}",
                clamped,
                Fixed::MAX
            );
        }

        if let Some((top, bottom)) = extent {
            self.top = top;
            self.bottom = bottom;
        }
        if let Some((top, bottom)) = extent_y {
            self.top_y = top;
            self.bottom_y = bottom;
        }

        match mode {
            Mode::Standard => debug!(
                "built {} edges, rows {}..{}",
                self.pool.len(),
                self.top,
                self.bottom
            ),
            Mode::High => debug!(
                "built {} high precision edges, y {}..{}",
                self.pool.len(),
                self.top_y,
                self.bottom_y
            ),
        }
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Scan drivers
    // ------------------------------------------------------------------------

    fn done_convex<S>(&mut self, sink: &mut S)
    where
        S: SpanSink + ?Sized,
    {
        for y in self.top..self.bottom {
            if let Some(index) = self.table.index_of(y) {
                let head = self.table.take(index);
                self.active.sorted_append(&mut self.pool, head);
            }
            self.convex_line(y, sink);
            self.active.advance(&mut self.pool, y, self.bottom);
        }
    }

    fn done_concave<S>(&mut self, rule: FillingRule, sink: &mut S)
    where
        S: SpanSink + ?Sized,
    {
        let mut order = true;
        for y in self.top..self.bottom {
            if let Some(index) = self.table.index_of(y) {
                let head = self.table.take(index);
                if order {
                    self.active.sorted_append(&mut self.pool, head);
                } else {
                    self.active.append(&mut self.pool, head);
                    self.active.sort(&mut self.pool);
                }
            } else if !order {
                self.active.sort(&mut self.pool);
            }

            let head = self.active.head();
            winding_spans(&self.pool, head, rule, |winding, l, r| {
                trace!("row {}, winding {}: {} => {}", y, winding, l.x, r.x);
                sink.span(y, y + 1, l, r);
            });

            order = self.active.advance(&mut self.pool, y, self.bottom);
        }
    }

    fn done_high<S>(&mut self, rule: FillingRule, sink: &mut S)
    where
        S: SpanSinkHigh + ?Sized,
    {
        let step = i64::from(self.sample_step().raw());
        let bottom = i64::from(self.bottom_y.raw());
        let top = i64::from(self.top_y.raw());

        // First sample: the smallest grid value at or above `top`.
        let mut sample = top.div_euclid(step) * step;
        if sample < top {
            sample += step;
        }

        let mut order = true;
        let mut drained = 0usize;
        while sample < bottom {
            let y = Fixed::from_raw(sample as i32);
            let y_end = Fixed::from_raw((sample + step).min(bottom) as i32);
            let y_next = Fixed::from_raw((sample + step).min(i64::from(i32::MAX)) as i32);

            let mut appended = false;
            if let Some(last) = self.table.index_of(y.floor()) {
                for index in drained..=last {
                    appended |= self.active.append_high(&mut self.pool, &mut self.table, index, y);
                }
                drained = last;
            }
            if appended || !order {
                self.active.sort(&mut self.pool);
            }

            let head = self.active.head();
            winding_spans(&self.pool, head, rule, |winding, l, r| {
                trace!("y {}, winding {}: {} => {}", y, winding, l.x, r.x);
                sink.span(y, y_end, l, r);
            });

            order = self.active.advance_high(&mut self.pool, y_next);
            sample += step;
        }
    }

    // ------------------------------------------------------------------------
    // Convex emission
    // ------------------------------------------------------------------------

    /// Emit the span for row `y` between the two leftmost active edges.
    fn convex_line<S>(&mut self, y: i32, sink: &mut S)
    where
        S: SpanSink + ?Sized,
    {
        let first = self.active.head();
        if first == NULL_EDGE {
            return;
        }
        let second = self.pool[first].next;
        if second == NULL_EDGE {
            return;
        }

        let (lsh, rsh) = if self.pool[first].x > self.pool[second].x {
            (second, first)
        } else {
            (first, second)
        };

        // Rectangle: both sides vertical and nothing else active.
        let mut refile = NULL_EDGE;
        let mut y_end = y + 1;
        if self.pool[second].next == NULL_EDGE
            && self.pool[lsh].slope.abs() <= Fixed::NEAR0
            && self.pool[rsh].slope.abs() <= Fixed::NEAR0
        {
            let (min, max) = if self.pool[lsh].row_bottom > self.pool[rsh].row_bottom {
                (rsh, lsh)
            } else {
                (lsh, rsh)
            };
            let rect_end = self.pool[min].row_bottom + 1;
            let outlives = rect_end <= self.pool[max].row_bottom;
            if !outlives || self.table.index_of(rect_end).is_some() {
                y_end = rect_end;
                if outlives {
                    refile = max;
                }
            }
        }

        trace!("rows {}..{}: {} => {}", y, y_end, self.pool[lsh].x, self.pool[rsh].x);
        sink.span(y, y_end, &self.pool[lsh], &self.pool[rsh]);

        if y_end > y + 1 {
            for idx in [first, second] {
                let edge = &mut self.pool[idx];
                edge.next = NULL_EDGE;
                edge.list = EdgeList::Free;
            }
            self.active.clear();

            if refile != NULL_EDGE {
                let edge = &mut self.pool[refile];
                edge.x += edge.slope.mul_int(y_end - y);
                edge.row_top = y_end;
                edge.is_top = false;
                self.table.insert(&mut self.pool, refile);
            }
        }
    }
}

impl Default for PolygonRaster {
    fn default() -> Self {
        Self::new()
    }
}

fn check_rule(rule: FillingRule) {
    if let FillingRule::Unknown(raw) = rule {
        error!("unknown filling rule {}, nothing will be filled", raw);
    }
}

/// Walk the active list from `head`, accumulating winding, and call `emit`
/// with the winding and bounding edges of every inside run. Adjacent inside
/// pairs whose shared boundary rounds to the same column are merged into
/// one run, reported with the winding of its first pair.
fn winding_spans<F>(pool: &EdgePool, head: EdgeIdx, rule: FillingRule, mut emit: F)
where
    F: FnMut(i32, &Edge, &Edge),
{
    let mut winding = 0;
    let mut cache: Option<(i32, EdgeIdx, EdgeIdx)> = None;
    let mut lsh = head;
    while lsh != NULL_EDGE {
        winding += pool[lsh].winding;
        let rsh = pool[lsh].next;
        if rsh == NULL_EDGE {
            break;
        }
        debug_assert!(pool[lsh].x <= pool[rsh].x, "active edges out of order");

        if rule.is_inside(winding) {
            cache = match cache {
                None => Some((winding, lsh, rsh)),
                Some((w, cl, cr)) if pool[cr].x.round() == pool[lsh].x.round() => {
                    Some((w, cl, rsh))
                }
                Some((w, cl, cr)) => {
                    emit(w, &pool[cl], &pool[cr]);
                    Some((winding, lsh, rsh))
                }
            };
        }
        lsh = rsh;
    }
    if let Some((w, cl, cr)) = cache {
        emit(w, &pool[cl], &pool[cr]);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::PolygonStorage;

    type Rows = Vec<(i32, i32, f64, f64)>;

    fn collect(
        raster: &mut PolygonRaster,
        storage: &PolygonStorage,
        rule: FillingRule,
    ) -> Result<Rows, RasterError> {
        let bounds = storage.bounds().unwrap();
        let mut out = Vec::new();
        let mut sink = |y: i32, y_end: i32, l: &Edge, r: &Edge| {
            out.push((y, y_end, l.x().to_f64(), r.x().to_f64()));
        };
        raster.rasterize(&storage.as_polygon(), &bounds, rule, &mut sink)?;
        Ok(out)
    }

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64, convex: bool) -> PolygonStorage {
        let mut s = PolygonStorage::new();
        s.add_rect(x1, y1, x2, y2);
        s.set_convex(convex);
        s
    }

    #[test_log::test]
    fn test_concave_rect_one_span_per_row() {
        let mut raster = PolygonRaster::new();
        let spans = collect(
            &mut raster,
            &rect(0.0, 0.0, 10.0, 5.0, false),
            FillingRule::NonZero,
        )
        .unwrap();
        let expected: Rows = (0..5).map(|y| (y, y + 1, 0.0, 10.0)).collect();
        assert_eq!(spans, expected);
        assert_eq!(raster.edge_count(), 2);
        assert_eq!(raster.top(), 0);
        assert_eq!(raster.bottom(), 5);
    }

    #[test_log::test]
    fn test_convex_rect_fast_path() {
        let mut raster = PolygonRaster::new();
        let spans = collect(
            &mut raster,
            &rect(0.0, 0.0, 10.0, 5.0, true),
            FillingRule::NonZero,
        )
        .unwrap();
        assert_eq!(spans, vec![(0, 5, 0.0, 10.0)]);
    }

    #[test_log::test]
    fn test_convex_rect_uneven_sides() {
        // Right side is vertical for rows 0..3 only; the left side must be
        // re-filed so rows 3..6 still fill.
        let mut s = PolygonStorage::new();
        s.add_contour(&[
            PointD::new(0.0, 0.0),
            PointD::new(10.0, 0.0),
            PointD::new(10.0, 3.0),
            PointD::new(0.0, 6.0),
            PointD::new(0.0, 0.0),
        ]);
        s.set_convex(true);
        let mut raster = PolygonRaster::new();
        let spans = collect(&mut raster, &s, FillingRule::NonZero).unwrap();
        assert_eq!(spans[0].0, 0);
        assert_eq!(spans[0].1, 3);
        let rows: Vec<i32> = spans.iter().flat_map(|s| s.0..s.1).collect();
        assert_eq!(rows, (0..6).collect::<Vec<_>>());
        for (_, _, l, r) in &spans {
            assert!(l <= r);
        }
    }

    #[test_log::test]
    fn test_triangle_convex_matches_concave() {
        let mut s = PolygonStorage::new();
        s.add_contour(&[
            PointD::new(10.0, 0.0),
            PointD::new(20.0, 10.0),
            PointD::new(0.0, 10.0),
            PointD::new(10.0, 0.0),
        ]);
        let mut raster = PolygonRaster::new();
        let concave = collect(&mut raster, &s, FillingRule::EvenOdd).unwrap();
        s.set_convex(true);
        let convex = collect(&mut raster, &s, FillingRule::EvenOdd).unwrap();
        assert_eq!(concave.len(), 10);
        assert_eq!(concave, convex);
    }

    #[test_log::test]
    fn test_overlapping_rects() {
        let mut s = PolygonStorage::new();
        s.add_rect(0.0, 0.0, 10.0, 5.0);
        s.add_rect(5.0, 0.0, 15.0, 5.0);
        let mut raster = PolygonRaster::new();

        let non_zero = collect(&mut raster, &s, FillingRule::NonZero).unwrap();
        assert_eq!(non_zero.len(), 5);
        assert!(non_zero.iter().all(|s| s.2 == 0.0 && s.3 == 15.0));

        let even_odd = collect(&mut raster, &s, FillingRule::EvenOdd).unwrap();
        assert_eq!(even_odd.len(), 10);
        assert_eq!(even_odd[0], (0, 1, 0.0, 5.0));
        assert_eq!(even_odd[1], (0, 1, 10.0, 15.0));
    }

    #[test_log::test]
    fn test_unknown_rule_emits_nothing() {
        let mut raster = PolygonRaster::new();
        let spans = collect(
            &mut raster,
            &rect(0.0, 0.0, 4.0, 4.0, false),
            FillingRule::Unknown(9),
        )
        .unwrap();
        assert!(spans.is_empty());
    }

    #[test_log::test]
    fn test_empty_bounds_is_noop() {
        let s = rect(0.0, 0.0, 10.0, 5.0, false);
        let mut raster = PolygonRaster::new();
        let mut count = 0;
        let mut sink = |_: i32, _: i32, _: &Edge, _: &Edge| count += 1;
        let bounds = Bounds::new(0.0, 0.0, 10.0, 0.0);
        raster
            .rasterize(&s.as_polygon(), &bounds, FillingRule::NonZero, &mut sink)
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(raster.edge_count(), 0);
    }

    #[test_log::test]
    fn test_invalid_polygon() {
        let points = [PointD::new(0.0, 0.0), PointD::new(1.0, 1.0)];
        let counts = [5u16];
        let polygon = Polygon::new(&points, &counts, false);
        let mut raster = PolygonRaster::new();
        let mut sink = |_: i32, _: i32, _: &Edge, _: &Edge| {};
        let bounds = Bounds::new(0.0, 0.0, 1.0, 1.0);
        match raster.rasterize(&polygon, &bounds, FillingRule::NonZero, &mut sink) {
            Err(RasterError::InvalidPolygon { points, required }) => {
                assert_eq!(points, 2);
                assert_eq!(required, 5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test_log::test]
    fn test_high_precision_rect() {
        let s = rect(0.0, 0.0, 10.0, 5.0, true);
        let mut raster = PolygonRaster::new();
        let mut spans = Vec::new();
        let mut sink = |y: Fixed, y_end: Fixed, l: &Edge, r: &Edge| {
            spans.push((y.to_f64(), y_end.to_f64(), l.x().to_f64(), r.x().to_f64()));
        };
        raster
            .rasterize_high(&s.as_polygon(), &s.bounds().unwrap(), FillingRule::NonZero, &mut sink)
            .unwrap();
        assert_eq!(spans.len(), 20);
        for (i, span) in spans.iter().enumerate() {
            let y = i as f64 * 0.25;
            assert_eq!(*span, (y, y + 0.25, 0.0, 10.0));
        }
        assert_eq!(raster.top_y(), Fixed::ZERO);
        assert_eq!(raster.bottom_y(), Fixed::from_int(5));
    }

    #[test_log::test]
    fn test_high_precision_fractional_top() {
        // Triangle apex at y = 0.3: the first sample is 0.5 and the edges
        // start exactly on their lines there.
        let mut s = PolygonStorage::new();
        s.add_contour(&[
            PointD::new(4.0, 0.3),
            PointD::new(8.0, 2.3),
            PointD::new(0.0, 2.3),
            PointD::new(4.0, 0.3),
        ]);
        let mut raster = PolygonRaster::new();
        raster.sample_shift(1);
        let mut spans = Vec::new();
        let mut sink = |y: Fixed, y_end: Fixed, l: &Edge, r: &Edge| {
            spans.push((y, y_end, l.x(), r.x()));
        };
        raster
            .rasterize_high(&s.as_polygon(), &s.bounds().unwrap(), FillingRule::EvenOdd, &mut sink)
            .unwrap();
        let ys: Vec<f64> = spans.iter().map(|s| s.0.to_f64()).collect();
        assert_eq!(ys, vec![0.5, 1.0, 1.5, 2.0]);
        let last = spans.last().unwrap();
        assert_eq!(last.1, Fixed::from_f64(2.3));
        for (_, _, l, r) in &spans {
            assert!(l <= r);
        }
    }

    #[test_log::test]
    fn test_sample_shift_clamped() {
        let mut raster = PolygonRaster::new();
        assert_eq!(raster.sample_step(), Fixed::from_f64(0.25));
        raster.sample_shift(20);
        assert_eq!(raster.sample_step(), Fixed::from_raw(FIXED_SCALE >> MAX_SAMPLE_SHIFT));
        raster.sample_shift(0);
        assert_eq!(raster.sample_step(), Fixed::ONE);
    }

    #[test_log::test]
    fn test_reset_and_release() {
        let mut raster = PolygonRaster::with_capacity(16);
        collect(&mut raster, &rect(0.0, 0.0, 3.0, 3.0, false), FillingRule::NonZero).unwrap();
        assert_eq!(raster.edge_count(), 2);
        assert!(raster.edge(1).is_some());
        assert!(raster.edge(0).is_none());
        assert!(raster.edge(3).is_none());
        raster.reset();
        assert_eq!(raster.edge_count(), 0);
        assert_eq!(raster.edges().count(), 0);
        raster.release();
        let spans = collect(
            &mut raster,
            &rect(0.0, 0.0, 3.0, 3.0, false),
            FillingRule::NonZero,
        )
        .unwrap();
        assert_eq!(spans.len(), 3);
    }
}
