use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use jpsnav_core::{FPoint, Point, Range};
use log::debug;

use crate::config::NavConfig;
use crate::distance;
use crate::error::NavError;
use crate::fibheap::NodeId;

// ---------------------------------------------------------------------------
// NavMap
// ---------------------------------------------------------------------------

/// A walkable/blocked grid together with everything a query needs.
///
/// `NavMap` owns the obstacle bitmap, the per-search scratch state
/// (predecessors, open-set handles, closed set), the connectivity labels and
/// the last computed path. Scratch state is reset at the start of every
/// query, so repeated queries reuse the same buffers.
///
/// Obstacles may be edited freely between queries. Connectivity labels are
/// not refreshed automatically: call [`mark_connected`](Self::mark_connected)
/// again after editing obstacles.
pub struct NavMap {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) config: NavConfig,
    pub(crate) obstacles: FixedBitSet,
    // search scratch
    pub(crate) came_from: Vec<Option<usize>>,
    pub(crate) open_handles: Vec<Option<NodeId>>,
    pub(crate) closed: FixedBitSet,
    pub(crate) start: Option<usize>,
    pub(crate) end: Option<usize>,
    // connectivity
    pub(crate) components: Vec<u32>,
    pub(crate) connectivity_marked: bool,
    pub(crate) cc_queue: VecDeque<usize>,
    // cells of the last successful query, start first
    pub(crate) cell_path: Vec<Point>,
}

impl NavMap {
    /// Create an obstacle-free map of `width × height` cells.
    pub fn new(width: i32, height: i32) -> Result<Self, NavError> {
        Self::with_config(width, height, NavConfig::default())
    }

    /// Create an obstacle-free map with explicit tunables.
    pub fn with_config(width: i32, height: i32, config: NavConfig) -> Result<Self, NavError> {
        if width <= 0 || height <= 0 {
            return Err(NavError::InvalidSize { width, height });
        }
        let rng = Range::with_size(width, height);
        let len = rng.len();
        Ok(Self {
            rng,
            width: width as usize,
            config,
            obstacles: FixedBitSet::with_capacity(len),
            came_from: vec![None; len],
            open_handles: vec![None; len],
            closed: FixedBitSet::with_capacity(len),
            start: None,
            end: None,
            components: vec![0; len],
            connectivity_marked: false,
            cc_queue: VecDeque::new(),
            cell_path: Vec::new(),
        })
    }

    /// Create a map and block every listed cell.
    pub fn with_obstacles(width: i32, height: i32, obstacles: &[Point]) -> Result<Self, NavError> {
        let mut m = Self::new(width, height)?;
        m.add_blockset(obstacles)?;
        Ok(m)
    }

    #[inline]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: NavConfig) {
        self.config = config;
    }

    /// The grid rectangle, `[0, width) × [0, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.rng.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.rng.height()
    }

    // -----------------------------------------------------------------------
    // Obstacles
    // -----------------------------------------------------------------------

    /// Block a single cell.
    pub fn add_block(&mut self, p: Point) -> Result<(), NavError> {
        let i = self.checked_idx(p)?;
        self.obstacles.insert(i);
        Ok(())
    }

    /// Block every listed cell. Nothing is changed if any cell is out of
    /// the map.
    pub fn add_blockset(&mut self, cells: &[Point]) -> Result<(), NavError> {
        let idxs = cells
            .iter()
            .map(|&p| self.checked_idx(p))
            .collect::<Result<Vec<_>, _>>()?;
        for i in idxs {
            self.obstacles.insert(i);
        }
        Ok(())
    }

    /// Make a single cell walkable again.
    pub fn clear_block(&mut self, p: Point) -> Result<(), NavError> {
        let i = self.checked_idx(p)?;
        self.obstacles.set(i, false);
        Ok(())
    }

    /// Make every cell walkable.
    pub fn clear_all_blocks(&mut self) {
        self.obstacles.clear();
    }

    /// Whether `p` is an obstacle.
    pub fn is_block(&self, p: Point) -> Result<bool, NavError> {
        let i = self.checked_idx(p)?;
        Ok(self.obstacles.contains(i))
    }

    /// Whether `p` is inside the map and not blocked.
    #[inline]
    pub fn walkable(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| !self.obstacles.contains(i))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Shortest cell path from `start` to `end`, smoothed when
    /// [`NavConfig::smooth`] is set.
    ///
    /// Returns `Ok(None)` when the goal is unreachable and a single-cell path
    /// when `start == end`.
    pub fn find_path_by_grid(
        &mut self,
        start: Point,
        end: Point,
    ) -> Result<Option<Vec<Point>>, NavError> {
        let smooth = self.config.smooth;
        self.grid_query(start, end, smooth)
    }

    /// Like [`find_path_by_grid`](Self::find_path_by_grid) but returns the
    /// jump-point path without the line-of-sight pass. Consecutive cells are
    /// joined by a straight or exactly diagonal run.
    pub fn find_path_by_grid_raw(
        &mut self,
        start: Point,
        end: Point,
    ) -> Result<Option<Vec<Point>>, NavError> {
        self.grid_query(start, end, false)
    }

    fn grid_query(
        &mut self,
        start: Point,
        end: Point,
        smooth: bool,
    ) -> Result<Option<Vec<Point>>, NavError> {
        let (s, e) = self.prepare_query(start, end)?;
        let Some(goal) = self.jps(s, e)? else {
            debug!("no path from {start} to {end}");
            self.cell_path.clear();
            return Ok(None);
        };
        let mut cells = self.reconstruct(goal);
        if smooth {
            self.smooth_path(&mut cells);
        }
        debug!(
            "path from {start} to {end}: {} cells, cost {}",
            cells.len(),
            path_cost(&cells)
        );
        self.cell_path.clone_from(&cells);
        Ok(Some(cells))
    }

    /// Smoothed waypoint path between two continuous positions.
    ///
    /// The first and last waypoints are `start` and `end` themselves; the
    /// ones in between are cell centres plus, where the straight segment to
    /// an endpoint clips an obstacle, the corner to walk around. When both
    /// positions share a cell the result is `[start, end]`. Non-finite
    /// positions are out of the map.
    pub fn find_path(
        &mut self,
        start: FPoint,
        end: FPoint,
    ) -> Result<Option<Vec<FPoint>>, NavError> {
        let sc = self.checked_cell(start)?;
        let ec = self.checked_cell(end)?;
        if sc == ec {
            return Ok(Some(vec![start, end]));
        }
        let (s, e) = self.prepare_query(sc, ec)?;
        let Some(goal) = self.jps(s, e)? else {
            debug!("no path from {start} to {end}");
            self.cell_path.clear();
            return Ok(None);
        };
        let mut cells = self.reconstruct(goal);
        self.smooth_path(&mut cells);
        let waypoints = self.waypoints(&cells, start, end);
        debug!(
            "path from {start} to {end}: {} waypoints",
            waypoints.len()
        );
        self.cell_path = cells;
        Ok(Some(waypoints))
    }

    /// Cells of the last successful query, start first. Empty after a failed
    /// query.
    pub fn last_path(&self) -> &[Point] {
        &self.cell_path
    }

    /// Validate endpoints and record them as the current query.
    fn prepare_query(&mut self, start: Point, end: Point) -> Result<(usize, usize), NavError> {
        let s = self.checked_idx(start)?;
        let e = self.checked_idx(end)?;
        self.start = Some(s);
        self.end = Some(e);
        if self.obstacles.contains(s) {
            return Err(NavError::BlockedStart(start));
        }
        if self.obstacles.contains(e) {
            return Err(NavError::BlockedEnd(end));
        }
        Ok((s, e))
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Number of cells.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.came_from.len()
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width + p.x as usize)
    }

    #[inline]
    pub(crate) fn checked_idx(&self, p: Point) -> Result<usize, NavError> {
        self.idx(p).ok_or(NavError::OutOfBounds(p))
    }

    /// The in-map cell containing a continuous position.
    fn checked_cell(&self, p: FPoint) -> Result<Point, NavError> {
        let cell = p.cell();
        if !p.is_finite() {
            return Err(NavError::OutOfBounds(cell));
        }
        self.checked_idx(cell)?;
        Ok(cell)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }
}

/// Total octile cost of walking a cell path segment by segment.
pub fn path_cost(path: &[Point]) -> i32 {
    path.windows(2).map(|w| distance::octile(w[0], w[1])).sum()
}

#[cfg(feature = "serde")]
mod snapshot {
    use super::*;

    /// Serialized form of a [`NavMap`]: dimensions, blocked cells and tunables.
    #[derive(serde::Serialize, serde::Deserialize)]
    struct MapSnapshot {
        width: i32,
        height: i32,
        #[serde(default)]
        obstacles: Vec<Point>,
        #[serde(default)]
        config: NavConfig,
    }

    impl serde::Serialize for NavMap {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            MapSnapshot {
                width: self.width(),
                height: self.height(),
                obstacles: self.obstacles.ones().map(|i| self.point(i)).collect(),
                config: self.config,
            }
            .serialize(serializer)
        }
    }

    impl<'de> serde::Deserialize<'de> for NavMap {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = MapSnapshot::deserialize(deserializer)?;
            let mut m =
                NavMap::with_config(s.width, s.height, s.config).map_err(serde::de::Error::custom)?;
            m.add_blockset(&s.obstacles).map_err(serde::de::Error::custom)?;
            Ok(m)
        }
    }
}
