//! Cell coordinates ([`Point`]), continuous positions ([`FPoint`]) and grid
//! rectangles ([`Range`]).

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// Integer cell coordinates. X grows to the east, Y grows to the south.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Per-axis sign: each coordinate becomes -1, 0 or 1.
    #[inline]
    pub const fn signum(self) -> Self {
        Self::new(self.x.signum(), self.y.signum())
    }

    /// Cells sharing an edge with this one, clockwise from north.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        let Self { x, y } = self;
        [
            Self::new(x, y - 1),
            Self::new(x + 1, y),
            Self::new(x, y + 1),
            Self::new(x - 1, y),
        ]
    }

    /// The middle of the cell on the continuous plane.
    #[inline]
    pub fn center(self) -> FPoint {
        FPoint::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Scale both coordinates.
impl Mul<i32> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, k: i32) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

// ---------------------------------------------------------------------------
// FPoint
// ---------------------------------------------------------------------------

/// A continuous position on the grid plane.
///
/// Cell `(x, y)` covers `[x, x + 1) × [y, y + 1)`, so `(2.5, 0.5)` is the
/// centre of cell `(2, 0)` and `(-0.5, 1.0)` lies in cell `(-1, 1)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FPoint {
    pub x: f32,
    pub y: f32,
}

impl FPoint {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The cell this position falls in.
    #[inline]
    pub fn cell(self) -> Point {
        Point::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Whether both coordinates are finite (neither NaN nor infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Straight-line distance.
    #[inline]
    pub fn distance(self, other: FPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<Point> for FPoint {
    fn from(p: Point) -> Self {
        p.center()
    }
}

impl fmt::Display for FPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// The cells of a `width × height` grid, `[0, width) × [0, height)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    width: i32,
    height: i32,
}

impl Range {
    /// Negative dimensions are clamped to zero.
    #[inline]
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// Every cell, row by row from the top-left corner.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            width: self.width,
            next: 0,
            end: self.len(),
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Row-major iterator over the cells of a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    width: i32,
    next: usize,
    end: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.next >= self.end {
            return None;
        }
        let w = self.width as usize;
        let p = Point::new((self.next % w) as i32, (self.next / w) as i32);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_ops() {
        let (a, b) = (Point::new(1, 2), Point::new(-3, 4));
        assert_eq!(a + b, Point::new(-2, 6));
        assert_eq!(a - b, Point::new(4, -2));
        assert_eq!(b * 2, Point::new(-6, 8));
        assert_eq!(Point::new(5, -3).signum(), Point::new(1, -1));
        assert_eq!(Point::ZERO.signum(), Point::ZERO);
    }

    #[test]
    fn edge_neighbours() {
        let n = Point::new(2, 2).neighbors_4();
        assert_eq!(
            n,
            [
                Point::new(2, 1),
                Point::new(3, 2),
                Point::new(2, 3),
                Point::new(1, 2)
            ]
        );
    }

    #[test]
    fn cells_and_centres() {
        assert_eq!(FPoint::new(2.5, 0.5).cell(), Point::new(2, 0));
        assert_eq!(FPoint::new(3.0, 3.99).cell(), Point::new(3, 3));
        assert_eq!(FPoint::new(-0.5, 1.0).cell(), Point::new(-1, 1));

        let c = Point::new(2, 3).center();
        assert_eq!(c, FPoint::new(2.5, 3.5));
        assert_eq!(c.cell(), Point::new(2, 3));
        assert_eq!(FPoint::from(Point::ZERO), FPoint::new(0.5, 0.5));
    }

    #[test]
    fn finiteness() {
        assert!(FPoint::new(-3.5, 1e6).is_finite());
        assert!(!FPoint::new(f32::NAN, 0.5).is_finite());
        assert!(!FPoint::new(0.5, f32::INFINITY).is_finite());
    }

    #[test]
    fn distance_is_euclidean() {
        let d = FPoint::new(1.0, 1.0).distance(FPoint::new(4.0, 5.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn range_membership() {
        let r = Range::with_size(3, 2);
        assert_eq!((r.width(), r.height(), r.len()), (3, 2, 6));
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, 2)));
        assert!(!r.contains(Point::new(-1, 0)));
    }

    #[test]
    fn degenerate_ranges() {
        for r in [Range::with_size(0, 4), Range::with_size(4, -2)] {
            assert!(r.is_empty());
            assert_eq!(r.iter().count(), 0);
            assert!(!r.contains(Point::ZERO));
        }
    }

    #[test]
    fn iteration_is_row_major() {
        let pts: Vec<_> = Range::with_size(3, 2).into_iter().collect();
        assert_eq!(
            pts,
            [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)].map(|(x, y)| Point::new(x, y))
        );
        let mut it = Range::with_size(3, 2).iter();
        it.next();
        assert_eq!(it.len(), 5);
    }

    #[test]
    fn display() {
        assert_eq!(Point::new(1, -2).to_string(), "(1, -2)");
        assert_eq!(FPoint::new(0.5, 1.25).to_string(), "(0.50, 1.25)");
        assert_eq!(Range::with_size(4, 3).to_string(), "4x3");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn points_as_json_objects() {
        let p: Point = serde_json::from_str(r#"{"x": 3, "y": 7}"#).unwrap();
        assert_eq!(p, Point::new(3, 7));
        let f = FPoint::new(0.5, 2.25);
        let back: FPoint = serde_json::from_str(&serde_json::to_string(&f).unwrap()).unwrap();
        assert_eq!(f, back);
    }
}
