//! Map builders shared by the demos.
//!
//! Maps come from three places: a seeded random scatter, an ASCII drawing,
//! or a JSON snapshot (see [`load_map`]).

use jpsnav_core::Point;
use jpsnav_paths::{NavError, NavMap};
use rand::{RngExt, SeedableRng};

pub const WIDTH: i32 = 40;
pub const HEIGHT: i32 = 16;

/// A map with each cell blocked independently with probability `density`.
pub fn random_map(width: i32, height: i32, density: f64, seed: u64) -> Result<NavMap, NavError> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut map = NavMap::new(width, height)?;
    let blocked: Vec<Point> = map
        .range()
        .iter()
        .filter(|_| rng.random_bool(density))
        .collect();
    map.add_blockset(&blocked)?;
    Ok(map)
}

/// Errors from [`parse_map`] and [`load_map`].
#[derive(Debug)]
pub enum MapError {
    Empty,
    /// Row `row` has a different width from the first row.
    Ragged { row: usize },
    /// Unknown character at (x, y).
    BadChar { ch: char, at: Point },
    Nav(NavError),
    Json(serde_json::Error),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty map"),
            Self::Ragged { row } => write!(f, "row {row} has a different width"),
            Self::BadChar { ch, at } => write!(f, "unexpected {ch:?} at {at}"),
            Self::Nav(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "invalid map file: {e}"),
        }
    }
}

impl std::error::Error for MapError {}

impl From<NavError> for MapError {
    fn from(e: NavError) -> Self {
        Self::Nav(e)
    }
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Build a map from a drawing: `#` blocked, `.` open, one line per row.
/// Blank lines are ignored.
pub fn parse_map(text: &str) -> Result<NavMap, MapError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let Some(first) = rows.first() else {
        return Err(MapError::Empty);
    };
    let width = first.chars().count();

    let mut blocked = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(MapError::Ragged { row: y });
        }
        for (x, ch) in row.chars().enumerate() {
            let at = Point::new(x as i32, y as i32);
            match ch {
                '#' => blocked.push(at),
                '.' => {}
                _ => return Err(MapError::BadChar { ch, at }),
            }
        }
    }

    Ok(NavMap::with_obstacles(width as i32, rows.len() as i32, &blocked)?)
}

/// Read a map from its JSON snapshot.
pub fn load_map(json: &str) -> Result<NavMap, MapError> {
    Ok(serde_json::from_str(json)?)
}

/// Draw `path` over the map: `#` blocked, `o` path cell, `.` open.
pub fn draw_path(map: &NavMap, path: &[Point]) -> String {
    let mut out = String::new();
    for y in 0..map.height() {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..map.width() {
            let p = Point::new(x, y);
            out.push(if !map.walkable(p) {
                '#'
            } else if path.contains(&p) {
                'o'
            } else {
                '.'
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trip_with_draw() {
        let text = "
            ..#..
            ..#..
            .....
        ";
        let map = parse_map(text).unwrap();
        assert_eq!((map.width(), map.height()), (5, 3));
        assert!(!map.walkable(Point::new(2, 1)));
        assert_eq!(draw_path(&map, &[]), "..#..\n..#..\n.....");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(parse_map("\n\n"), Err(MapError::Empty)));
        assert!(matches!(parse_map("...\n.."), Err(MapError::Ragged { row: 1 })));
        assert!(matches!(
            parse_map(".x."),
            Err(MapError::BadChar { ch: 'x', .. })
        ));
    }

    #[test]
    fn random_map_is_seeded() {
        let a = random_map(10, 10, 0.3, 7).unwrap();
        let b = random_map(10, 10, 0.3, 7).unwrap();
        assert_eq!(a.dump(), b.dump());
        let open = random_map(10, 10, 0.0, 7).unwrap();
        assert!(open.range().iter().all(|p| open.walkable(p)));
    }

    #[test]
    fn load_snapshot() {
        let map = load_map(r#"{"width": 3, "height": 2, "obstacles": [{"x": 1, "y": 1}]}"#).unwrap();
        assert_eq!(draw_path(&map, &[Point::new(0, 0)]), "o..\n.#.");
        assert!(matches!(load_map("{"), Err(MapError::Json(_))));
    }
}
