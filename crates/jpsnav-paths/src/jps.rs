//! Jump Point Search over the obstacle grid.
//!
//! JPS is A* on a uniform-cost 8-way grid that only puts *jump points* into
//! the open set: cells where an optimal path may have to turn because an
//! obstacle beside the travel direction exposes a forced neighbour. Between
//! jump points the search moves in straight or diagonal runs without
//! touching the open set.
//!
//! Diagonal steps only require the target cell to be walkable, so a path may
//! pass between two diagonally touching obstacles.

use log::{debug, trace};

use crate::NavMap;
use crate::distance;
use crate::error::NavError;
use crate::fibheap::{FibHeap, HeapError};
use crate::neighbors::{DirSet, Direction};

/// Open-set payload.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchNode {
    pub(crate) pos: usize,
    pub(crate) g: i32,
    /// Direction of the run that reached `pos`; `None` for the start.
    pub(crate) dir: Option<Direction>,
}

type OpenSet = FibHeap<i32, SearchNode>;

impl NavMap {
    /// Run the search from `start` to `end` (both walkable, in range).
    ///
    /// Returns the goal cell once it is popped from the open set, leaving the
    /// predecessor chain in `came_from`, or `None` when it is unreachable.
    pub(crate) fn jps(&mut self, start: usize, end: usize) -> Result<Option<usize>, NavError> {
        self.reset_search();
        if start == end {
            return Ok(Some(end));
        }
        if self.config.connectivity_reject && !self.same_component_idx(start, end) {
            debug!(
                "{} and {} are in different components",
                self.point(start),
                self.point(end)
            );
            return Ok(None);
        }

        let mut open: OpenSet = FibHeap::with_capacity(self.len())?;
        let h = self.heuristic(start, end);
        let id = open.insert(
            h,
            SearchNode {
                pos: start,
                g: 0,
                dir: None,
            },
        )?;
        self.open_handles[start] = Some(id);

        let mut expanded = 0usize;
        while let Some((_, node)) = open.pop() {
            self.open_handles[node.pos] = None;
            self.closed.insert(node.pos);
            expanded += 1;

            if node.pos == end {
                trace!(
                    "jps: reached {} at cost {}, {expanded} nodes expanded",
                    self.point(end),
                    node.g
                );
                return Ok(Some(end));
            }

            let dirs = Self::natural_dirs(node.dir) | self.forced_dirs(node.pos, node.dir);
            for dir in dirs {
                if self.jump(&mut open, &node, node.pos, dir, end)? {
                    break;
                }
            }
        }

        trace!("jps: open set exhausted after {expanded} nodes");
        Ok(None)
    }

    fn reset_search(&mut self) {
        self.came_from.fill(None);
        self.open_handles.fill(None);
        self.closed.clear();
    }

    #[inline]
    fn heuristic(&self, a: usize, b: usize) -> i32 {
        distance::octile(self.point(a), self.point(b))
    }

    /// The cell one step from `pos` in `dir`, if it is walkable.
    #[inline]
    fn step(&self, pos: usize, dir: Direction) -> Option<usize> {
        let i = self.idx(self.point(pos) + dir.delta())?;
        (!self.obstacles.contains(i)).then_some(i)
    }

    /// Directions that continue the arrival run without pruning.
    fn natural_dirs(dir: Option<Direction>) -> DirSet {
        let Some(d) = dir else {
            return DirSet::FULL;
        };
        let mut set = DirSet::EMPTY;
        set.insert(d);
        if d.is_diagonal() {
            set.insert(d.rotate(1));
            set.insert(d.rotate(7));
        }
        set
    }

    /// Directions forced open at `pos` by an obstacle beside the run.
    pub(crate) fn forced_dirs(&self, pos: usize, dir: Option<Direction>) -> DirSet {
        let Some(d) = dir else {
            return DirSet::EMPTY;
        };
        let open = |turn: u8| self.step(pos, d.rotate(turn)).is_some();
        let mut set = DirSet::EMPTY;
        if d.is_diagonal() {
            if open(6) && !open(5) {
                set.insert(d.rotate(6));
            }
            if open(2) && !open(3) {
                set.insert(d.rotate(2));
            }
        } else {
            if open(1) && !open(2) {
                set.insert(d.rotate(1));
            }
            if open(7) && !open(6) {
                set.insert(d.rotate(7));
            }
        }
        set
    }

    /// Run from `origin` along `dir`, registering the jump point found on
    /// behalf of `from`. Returns `true` once the goal has been registered.
    ///
    /// A diagonal run scans both adjacent cardinal directions at every step
    /// before moving on; cardinal runs never branch, so the nesting is at most
    /// one level deep.
    fn jump(
        &mut self,
        open: &mut OpenSet,
        from: &SearchNode,
        origin: usize,
        dir: Direction,
        end: usize,
    ) -> Result<bool, NavError> {
        let mut pos = origin;
        loop {
            let Some(next) = self.step(pos, dir) else {
                return Ok(false);
            };
            if next == end {
                self.register(open, from, next, dir, end)?;
                return Ok(true);
            }
            if !self.forced_dirs(next, Some(dir)).is_empty() {
                self.register(open, from, next, dir, end)?;
                return Ok(false);
            }
            if dir.is_diagonal()
                && (self.jump(open, from, next, dir.rotate(7), end)?
                    || self.jump(open, from, next, dir.rotate(1), end)?)
            {
                return Ok(true);
            }
            pos = next;
        }
    }

    /// Open `pos` with `from` as predecessor, or improve its open entry.
    fn register(
        &mut self,
        open: &mut OpenSet,
        from: &SearchNode,
        pos: usize,
        dir: Direction,
        end: usize,
    ) -> Result<(), NavError> {
        if self.closed.contains(pos) {
            return Ok(());
        }
        let g = from.g + self.heuristic(from.pos, pos);
        let f = g + self.heuristic(pos, end);

        match self.open_handles[pos] {
            None => {
                self.came_from[pos] = Some(from.pos);
                let id = open.insert(
                    f,
                    SearchNode {
                        pos,
                        g,
                        dir: Some(dir),
                    },
                )?;
                self.open_handles[pos] = Some(id);
            }
            Some(id) => {
                let Some(node) = open.get_mut(id) else {
                    return Err(HeapError::StaleHandle(id).into());
                };
                if node.g > g {
                    node.g = g;
                    node.dir = Some(dir);
                    open.decrease_key(id, f)?;
                    self.came_from[pos] = Some(from.pos);
                }
            }
        }
        Ok(())
    }
}
