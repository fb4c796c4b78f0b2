//! Geometry types shared by the *jpsnav* navigation crates.
//!
//! Grid cells are addressed by integer [`Point`]s inside a grid
//! [`Range`]; continuous positions inside the grid use [`FPoint`], where the
//! cell `(x, y)` covers `[x, x+1) × [y, y+1)`.

pub mod geom;

pub use geom::{FPoint, Point, Range, RangeIter};
