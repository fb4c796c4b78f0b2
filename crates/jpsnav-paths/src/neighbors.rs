//! Compass directions and direction sets used by the search.

use std::ops::BitOr;

use jpsnav_core::Point;

/// One of the eight compass directions, numbered clockwise from north.
///
/// ```text
///   7  0  1
///    \ | /
///  6 -   - 2
///    / | \
///   5  4  3
/// ```
///
/// North is `y - 1`. Odd directions are diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    N = 0,
    NE = 1,
    E = 2,
    SE = 3,
    S = 4,
    SW = 5,
    W = 6,
    NW = 7,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Direction for an index, taken modulo 8.
    #[inline]
    pub const fn from_index(i: u8) -> Self {
        Self::ALL[(i % 8) as usize]
    }

    /// Rotate clockwise by `steps` eighth-turns.
    #[inline]
    pub const fn rotate(self, steps: u8) -> Self {
        Self::from_index(self.index() + steps)
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.index() % 2 != 0
    }

    /// Unit offset of one step in this direction.
    pub const fn delta(self) -> Point {
        match self {
            Self::N => Point::new(0, -1),
            Self::NE => Point::new(1, -1),
            Self::E => Point::new(1, 0),
            Self::SE => Point::new(1, 1),
            Self::S => Point::new(0, 1),
            Self::SW => Point::new(-1, 1),
            Self::W => Point::new(-1, 0),
            Self::NW => Point::new(-1, -1),
        }
    }
}

/// A set of directions stored as a bitmask.
///
/// Iteration yields members in index order, starting from north.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirSet(u8);

impl DirSet {
    pub const EMPTY: DirSet = DirSet(0);
    pub const FULL: DirSet = DirSet(0xff);

    #[inline]
    pub fn insert(&mut self, d: Direction) {
        self.0 |= 1 << d.index();
    }

    #[inline]
    pub fn contains(self, d: Direction) -> bool {
        self.0 & (1 << d.index()) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl BitOr for DirSet {
    type Output = DirSet;
    #[inline]
    fn bitor(self, rhs: DirSet) -> DirSet {
        DirSet(self.0 | rhs.0)
    }
}

impl FromIterator<Direction> for DirSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirSet::EMPTY;
        for d in iter {
            set.insert(d);
        }
        set
    }
}

impl IntoIterator for DirSet {
    type Item = Direction;
    type IntoIter = DirSetIter;
    fn into_iter(self) -> DirSetIter {
        DirSetIter(self.0)
    }
}

/// Iterator over the members of a [`DirSet`].
pub struct DirSetIter(u8);

impl Iterator for DirSetIter {
    type Item = Direction;

    #[inline]
    fn next(&mut self) -> Option<Direction> {
        if self.0 == 0 {
            return None;
        }
        let i = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Direction::from_index(i))
    }
}
