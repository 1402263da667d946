//! Polygon input: a borrowed view and an owned builder.
//!
//! A polygon is a flat point array split into contours by a parallel array
//! of per-contour vertex counts. A zero count (or the end of the count
//! slice) terminates the list. Contours are not closed implicitly; the
//! closing vertex must be present in the point sequence.

use crate::basics::{Bounds, PointD};
use crate::bounding_rect::bounding_rect;
use crate::error::RasterError;

// ============================================================================
// Polygon: borrowed view
// ============================================================================

/// Borrowed polygon geometry as consumed by the rasterizer.
///
/// Coordinates must lie within the 16.16 range, about `-32768.0..32768.0`.
/// Vertices outside it are clamped to the range edge (with a warning) when
/// edges are built.
#[derive(Debug, Clone, Copy)]
pub struct Polygon<'a> {
    pub points: &'a [PointD],
    pub counts: &'a [u16],
    /// Every contour is convex; lets the rasterizer take the convex path.
    pub convex: bool,
}

impl<'a> Polygon<'a> {
    pub fn new(points: &'a [PointD], counts: &'a [u16], convex: bool) -> Self {
        Self {
            points,
            counts,
            convex,
        }
    }

    /// A polygon with one contour made of all `points`.
    ///
    /// `count` must outlive the polygon, so it is passed in by the caller.
    pub fn single(points: &'a [PointD], count: &'a [u16; 1], convex: bool) -> Self {
        Self::new(points, &count[..], convex)
    }

    /// Contour counts up to (not including) the terminating zero.
    pub fn contour_counts(&self) -> &'a [u16] {
        let end = self
            .counts
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(self.counts.len());
        &self.counts[..end]
    }

    /// Number of points referenced by the contour counts.
    pub fn required_points(&self) -> usize {
        self.contour_counts().iter().map(|&c| c as usize).sum()
    }

    /// Number of consecutive vertex pairs (candidate edges) across all contours.
    pub fn vertex_pairs(&self) -> usize {
        self.contour_counts()
            .iter()
            .map(|&c| (c as usize).saturating_sub(1))
            .sum()
    }

    /// Check that the counts fit inside the point array.
    pub fn validate(&self) -> Result<(), RasterError> {
        let required = self.required_points();
        if required > self.points.len() {
            return Err(RasterError::InvalidPolygon {
                points: self.points.len(),
                required,
            });
        }
        Ok(())
    }

    /// Iterate the contours as point slices.
    pub fn contours(&self) -> Contours<'a> {
        Contours {
            points: self.points,
            counts: self.contour_counts(),
            offset: 0,
        }
    }

    /// Bounding rectangle of every referenced point.
    pub fn bounds(&self) -> Option<Bounds> {
        bounding_rect(self.contours().flatten().copied())
    }
}

/// Iterator over the contours of a [`Polygon`].
#[derive(Debug, Clone)]
pub struct Contours<'a> {
    points: &'a [PointD],
    counts: &'a [u16],
    offset: usize,
}

impl<'a> Iterator for Contours<'a> {
    type Item = &'a [PointD];

    fn next(&mut self) -> Option<Self::Item> {
        let (&count, rest) = self.counts.split_first()?;
        let start = self.offset;
        let end = start + count as usize;
        let contour = self.points.get(start..end)?;
        self.counts = rest;
        self.offset = end;
        Some(contour)
    }
}

// ============================================================================
// PolygonStorage: owned builder
// ============================================================================

/// Owned polygon geometry built from `move_to` / `line_to` commands.
#[derive(Debug, Clone, Default)]
pub struct PolygonStorage {
    points: Vec<PointD>,
    counts: Vec<u16>,
    convex: bool,
}

impl PolygonStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all contours, keeping the allocations.
    pub fn remove_all(&mut self) {
        self.points.clear();
        self.counts.clear();
        self.convex = false;
    }

    /// Mark every contour as convex (or not).
    pub fn set_convex(&mut self, convex: bool) {
        self.convex = convex;
    }

    pub fn is_convex(&self) -> bool {
        self.convex
    }

    /// Start a new contour at (x, y).
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.points.push(PointD::new(x, y));
        self.counts.push(1);
    }

    /// Extend the current contour to (x, y). Without a current contour this
    /// behaves like `move_to`.
    pub fn line_to(&mut self, x: f64, y: f64) {
        match self.counts.last_mut() {
            Some(count) if *count < u16::MAX => {
                *count += 1;
                self.points.push(PointD::new(x, y));
            }
            Some(_) => {
                // Count is saturated: continue in a fresh contour that
                // starts where this one stopped, so no edge is lost.
                let last = self.points[self.points.len() - 1];
                self.move_to(last.x, last.y);
                self.line_to(x, y);
            }
            None => self.move_to(x, y),
        }
    }

    /// Close the current contour by repeating its first vertex, unless the
    /// contour already ends there.
    pub fn close_polygon(&mut self) {
        let Some(&count) = self.counts.last() else {
            return;
        };
        let start = self.points.len() - count as usize;
        let first = self.points[start];
        let last = self.points[self.points.len() - 1];
        if count > 1 && first != last {
            self.line_to(first.x, first.y);
        }
    }

    /// Append a whole contour as given.
    pub fn add_contour(&mut self, points: &[PointD]) {
        let mut iter = points.iter();
        if let Some(p) = iter.next() {
            self.move_to(p.x, p.y);
        }
        for p in iter {
            self.line_to(p.x, p.y);
        }
    }

    /// Append an axis-aligned rectangle as a closed clockwise contour.
    pub fn add_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.move_to(x1, y1);
        self.line_to(x2, y1);
        self.line_to(x2, y2);
        self.line_to(x1, y2);
        self.close_polygon();
    }

    pub fn total_vertices(&self) -> usize {
        self.points.len()
    }

    pub fn num_contours(&self) -> usize {
        self.counts.len()
    }

    pub fn points(&self) -> &[PointD] {
        &self.points
    }

    pub fn counts(&self) -> &[u16] {
        &self.counts
    }

    /// Borrow as a [`Polygon`] view.
    pub fn as_polygon(&self) -> Polygon<'_> {
        Polygon::new(&self.points, &self.counts, self.convex)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        bounding_rect(self.points.iter().copied())
    }
}

// ============================================================================
// Tests
// ============================================================================
