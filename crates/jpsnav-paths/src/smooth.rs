//! Path reconstruction and line-of-sight smoothing.
//!
//! The raw search result is a chain of jump points. Reconstruction turns it
//! into a cell path whose consecutive cells are joined by a single straight
//! or diagonal run; smoothing then drops every point that can be skipped by
//! walking a straight line between its neighbours.

use jpsnav_core::{FPoint, Point};

use crate::NavMap;

impl NavMap {
    /// Walk the predecessor chain back from `goal` and return the cell path,
    /// start first.
    ///
    /// A jump point registered from a diagonal run's cardinal side-scan is linked
    /// straight to the run's origin, skipping the cell where the run turned;
    /// that turn cell is put back here.
    pub(crate) fn reconstruct(&self, goal: usize) -> Vec<Point> {
        let mut cells = Vec::new();
        let mut pos = goal;
        while let Some(prev) = self.came_from[pos] {
            let (cur, from) = (self.point(pos), self.point(prev));
            cells.push(cur);
            if let Some(turn) = turn_point(cur, from) {
                cells.push(turn);
            }
            pos = prev;
        }
        cells.push(self.point(pos));
        cells.reverse();
        cells
    }

    /// Greedy shortcut pass over a cell path.
    ///
    /// Working forwards from the start, each kept point is joined to the
    /// farthest later point it can see (centre to centre) and everything in
    /// between is dropped. The result is obstacle-free under
    /// [`find_line_obstacle`](Self::find_line_obstacle) wherever a shortcut
    /// was taken, never longer than the input, and smoothing it again
    /// changes nothing.
    pub fn smooth_path(&self, path: &mut Vec<Point>) {
        let mut i = 0;
        while i < path.len() {
            let from = path[i].center();
            for j in (i + 2..path.len()).rev() {
                if self.find_line_obstacle(from, path[j].center()).is_none() {
                    path.drain(i + 1..j);
                    break;
                }
            }
            i += 1;
        }
    }

    /// First cell blocking the straight segment from `a` to `b`, if any.
    ///
    /// The endpoint cells are checked first. Then, for every vertical grid
    /// line the segment crosses, the two cells on either side of the crossing
    /// are checked, and likewise for every horizontal grid line. Cells
    /// outside the map count as blocked.
    ///
    /// Only the two cells beside each crossing are inspected, so a segment
    /// passing exactly through a grid corner at a steep slope can miss a
    /// cell touching that corner diagonally. A non-finite endpoint is
    /// reported as blocking at its (saturated) cell.
    pub fn find_line_obstacle(&self, a: FPoint, b: FPoint) -> Option<Point> {
        let (ca, cb) = (a.cell(), b.cell());
        if !a.is_finite() {
            return Some(ca);
        }
        if !b.is_finite() {
            return Some(cb);
        }
        if !self.walkable(ca) {
            return Some(ca);
        }
        if !self.walkable(cb) {
            return Some(cb);
        }

        let k = (b.y - a.y) / (b.x - a.x);
        let blocked = |x: i32, y: i32| {
            let p = Point::new(x, y);
            (!self.walkable(p)).then_some(p)
        };

        for x in ca.x.min(cb.x) + 1..=ca.x.max(cb.x) {
            let y = (k * (x as f32 - a.x) + a.y).floor() as i32;
            if let Some(p) = blocked(x, y).or_else(|| blocked(x - 1, y)) {
                return Some(p);
            }
        }
        for y in ca.y.min(cb.y) + 1..=ca.y.max(cb.y) {
            let x = ((y as f32 - a.y) / k + a.x).floor() as i32;
            if let Some(p) = blocked(x, y).or_else(|| blocked(x, y - 1)) {
                return Some(p);
            }
        }
        None
    }

    /// Whether a straight walk from `a` to `b` is obstacle-free.
    #[inline]
    pub fn line_walkable(&self, a: FPoint, b: FPoint) -> bool {
        self.find_line_obstacle(a, b).is_none()
    }

    /// Fractional waypoints for a smoothed cell path between the continuous
    /// positions `start` and `end`.
    pub(crate) fn waypoints(&self, cells: &[Point], start: FPoint, end: FPoint) -> Vec<FPoint> {
        let mut out = Vec::with_capacity(cells.len() + 2);
        out.push(start);
        if cells.len() < 2 {
            out.push(end);
            return out;
        }

        let first = cells[1].center();
        if let Some(obs) = self.find_line_obstacle(start, first) {
            out.extend(self.corner_waypoint(obs, first, start));
        }

        let interior = &cells[1..cells.len() - 1];
        out.extend(interior.iter().map(|c| c.center()));

        if let Some(last) = interior.last() {
            let from = last.center();
            if let Some(obs) = self.find_line_obstacle(from, end) {
                out.extend(self.corner_waypoint(obs, from, end));
            }
        }

        out.push(end);
        out
    }

    /// A corner of the obstacle `cell` from which both `a` and `b` are in
    /// sight.
    ///
    /// Each corner is tested through a point nudged
    /// [`corner_offset`](crate::NavConfig::corner_offset) away from the cell,
    /// so the test point sits in the neighbouring cells rather than on the
    /// obstacle itself.
    fn corner_waypoint(&self, cell: Point, a: FPoint, b: FPoint) -> Option<FPoint> {
        let nudge = self.config.corner_offset;
        for x0 in [cell.x, cell.x + 1] {
            for y0 in [cell.y, cell.y + 1] {
                let px = if x0 == cell.x { x0 as f32 - nudge } else { x0 as f32 + nudge };
                let py = if y0 == cell.y { y0 as f32 - nudge } else { y0 as f32 + nudge };
                let via = FPoint::new(px, py);
                if self.line_walkable(via, a) && self.line_walkable(via, b) {
                    return Some(FPoint::new(x0 as f32, y0 as f32));
                }
            }
        }
        None
    }
}

/// The cell where a diagonal-then-straight run from `from` to `cur` turns,
/// or `None` if the run is purely straight or purely diagonal.
fn turn_point(cur: Point, from: Point) -> Option<Point> {
    let d = cur - from;
    let (dx, dy) = (d.x.abs(), d.y.abs());
    if dx == 0 || dy == 0 || dx == dy {
        return None;
    }
    Some(from + d.signum() * dx.min(dy))
}
