//! Errors returned by the rasterizer entry points.
//!
//! Degenerate geometry is not an error: empty bounds or contours made only
//! of horizontal edges rasterize to nothing and return `Ok`.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    /// The polygon produced more edges than a 16-bit edge index can address.
    #[error("polygon needs {edges} edges, edge indices are limited to {max}", max = u16::MAX)]
    EdgeCapacity { edges: usize },

    /// The bounding rectangle spans more rows than the edge table can index.
    #[error("bounds span {rows} rows, the edge table is limited to {max}", max = u16::MAX)]
    RowSpanTooLarge { rows: usize },

    /// The contour counts reference more points than the polygon holds.
    #[error("contour counts need {required} points but only {points} were given")]
    InvalidPolygon { points: usize, required: usize },

    /// Growing the edge pool or the edge table failed.
    #[error("failed to grow rasterizer buffers: {0}")]
    Alloc(#[from] TryReserveError),
}
