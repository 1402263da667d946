//! # polygon-raster
//!
//! Scanline polygon filling in 16.16 fixed point.
//!
//! The rasterizer turns polygon contours into horizontal spans. It does not
//! touch pixels: every span is handed to a caller-supplied sink together
//! with the two edges that bound it, and the sink decides what filling
//! means (solid color, gradient, coverage mask, ...).
//!
//! ## Architecture
//!
//! A pass runs through four stages:
//!
//! 1. **Edge construction**: vertex pairs become fixed-point edges, filed
//!    in an edge table bucketed by first row
//! 2. **Active list maintenance**: each row migrates its bucket onto the
//!    x-ordered active edge list
//! 3. **Span emission**: a winding rule (or the convex fast path) decides
//!    which active edge pairs bound filled spans
//! 4. **Advance**: edges step to the next row; finished edges leave
//!
//! A high-precision mode keeps exact sub-row edge extents and samples
//! several times per row.
//!
//! ## Example
//!
//! ```
//! use polygon_raster::{FillingRule, PolygonRaster, PolygonStorage, SpanStorage};
//!
//! let mut path = PolygonStorage::new();
//! path.add_rect(0.0, 0.0, 10.0, 5.0);
//!
//! let mut raster = PolygonRaster::new();
//! let mut spans = SpanStorage::new();
//! let bounds = path.bounds().unwrap();
//! raster
//!     .rasterize(&path.as_polygon(), &bounds, FillingRule::NonZero, &mut spans)
//!     .unwrap();
//! assert_eq!(spans.len(), 5);
//! ```

// Foundation types
pub mod basics;
pub mod bounding_rect;
pub mod error;
pub mod fixed;
pub mod polygon;

// Edge storage
pub mod active_edges;
pub mod edge;
pub mod edge_table;

// Rasterizer
pub mod polygon_raster;
pub mod span_storage;

pub use basics::{Bounds, FillingRule, PointD, PointX};
pub use bounding_rect::bounding_rect;
pub use edge::{Edge, EdgeIdx};
pub use error::RasterError;
pub use fixed::Fixed;
pub use polygon::{Polygon, PolygonStorage};
pub use polygon_raster::{PolygonRaster, SpanSink, SpanSinkHigh};
pub use span_storage::{Span, SpanHigh, SpanStorage, SpanStorageHigh};
