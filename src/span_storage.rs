//! Span containers.
//!
//! Ready-made [`SpanSink`] / [`SpanSinkHigh`] implementations that record
//! every span they are given. Useful for testing and for callers that want
//! to rasterize first and consume the spans later.

use crate::edge::Edge;
use crate::fixed::Fixed;
use crate::polygon_raster::{SpanSink, SpanSinkHigh};

// ============================================================================
// Span: an integer span
// ============================================================================

/// Rows `y..y_end`, columns `x1..x2` (boundary x values rounded to the
/// nearest column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub y: i32,
    pub y_end: i32,
    pub x1: i32,
    pub x2: i32,
}

impl Span {
    /// Columns covered.
    #[inline]
    pub fn len(&self) -> i32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x2 <= self.x1 || self.y_end <= self.y
    }

    /// Number of rows covered.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.y_end - self.y
    }
}

// ============================================================================
// SpanStorage
// ============================================================================

/// Records integer spans in emission order.
#[derive(Debug, Clone, Default)]
pub struct SpanStorage {
    spans: Vec<Span>,
}

impl SpanStorage {
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Drop every recorded span, keeping the allocation.
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    /// The recorded spans split into one span per row, in emission order.
    /// Spans from the rectangle fast path cover several rows at once; this
    /// gives them the same shape as any other pass.
    pub fn rows(&self) -> Vec<Span> {
        self.spans
            .iter()
            .flat_map(|s| {
                (s.y..s.y_end).map(move |y| Span {
                    y,
                    y_end: y + 1,
                    ..*s
                })
            })
            .collect()
    }

    /// Total number of pixels covered.
    pub fn area(&self) -> i64 {
        self.spans
            .iter()
            .map(|s| i64::from(s.len().max(0)) * i64::from(s.rows().max(0)))
            .sum()
    }

    /// Whether pixel (x, y) lies inside any recorded span.
    pub fn hit_test(&self, x: i32, y: i32) -> bool {
        self.spans
            .iter()
            .any(|s| y >= s.y && y < s.y_end && x >= s.x1 && x < s.x2)
    }
}

impl SpanSink for SpanStorage {
    fn span(&mut self, y: i32, y_end: i32, left: &Edge, right: &Edge) {
        self.spans.push(Span {
            y,
            y_end,
            x1: left.x().round(),
            x2: right.x().round(),
        });
    }
}

// ============================================================================
// SpanHigh / SpanStorageHigh: fixed-point spans
// ============================================================================

/// A high-precision span: exact sample range and boundary x values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanHigh {
    pub y: Fixed,
    pub y_end: Fixed,
    pub x1: Fixed,
    pub x2: Fixed,
}

/// Records high-precision spans in emission order.
#[derive(Debug, Clone, Default)]
pub struct SpanStorageHigh {
    spans: Vec<SpanHigh>,
}

impl SpanStorageHigh {
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[SpanHigh] {
        &self.spans
    }

    /// Covered area in square pixels.
    pub fn area(&self) -> f64 {
        self.spans
            .iter()
            .map(|s| (s.x2 - s.x1).to_f64() * (s.y_end - s.y).to_f64())
            .sum()
    }
}

impl SpanSinkHigh for SpanStorageHigh {
    fn span(&mut self, y: Fixed, y_end: Fixed, left: &Edge, right: &Edge) {
        self.spans.push(SpanHigh {
            y,
            y_end,
            x1: left.x(),
            x2: right.x(),
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
