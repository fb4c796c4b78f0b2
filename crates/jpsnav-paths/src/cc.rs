//! Connected-component labelling of walkable cells.

use jpsnav_core::Point;
use log::debug;

use crate::NavMap;
use crate::error::NavError;

impl NavMap {
    /// Label every walkable cell with a connected-component ID.
    ///
    /// Components are maximal sets of walkable cells joined by cardinal
    /// (4-way) steps. IDs start at 1 and follow row-major discovery order;
    /// blocked cells keep ID 0. After this call
    /// [`same_component`](Self::same_component) can reject unreachable
    /// queries without searching. Labels go stale when obstacles change.
    pub fn mark_connected(&mut self) {
        self.components.fill(0);

        let mut label: u32 = 0;
        for start in 0..self.len() {
            if self.components[start] != 0 || self.obstacles.contains(start) {
                continue;
            }
            label += 1;
            self.flood_fill(start, label);
        }

        self.connectivity_marked = true;
        debug!(
            "connectivity: {label} components on {}x{} map",
            self.width(),
            self.height()
        );
    }

    /// Breadth-first fill from `start`, writing `label` into every reached cell.
    fn flood_fill(&mut self, start: usize, label: u32) {
        let mut queue = std::mem::take(&mut self.cc_queue);
        queue.clear();
        self.components[start] = label;
        queue.push_back(start);

        while let Some(ci) = queue.pop_front() {
            for np in self.point(ci).neighbors_4() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.components[ni] == 0 && !self.obstacles.contains(ni) {
                    self.components[ni] = label;
                    queue.push_back(ni);
                }
            }
        }

        self.cc_queue = queue;
    }

    /// Whether [`mark_connected`](Self::mark_connected) has been called.
    #[inline]
    pub fn is_connectivity_marked(&self) -> bool {
        self.connectivity_marked
    }

    /// Component ID of `p`; 0 for blocked cells or when connectivity has
    /// never been marked.
    pub fn connected_id(&self, p: Point) -> Result<u32, NavError> {
        let i = self.checked_idx(p)?;
        Ok(self.components[i])
    }

    /// Whether `a` and `b` may be connected.
    ///
    /// Before the first [`mark_connected`](Self::mark_connected) nothing is
    /// known and this returns `true`. Cells outside the map are never
    /// connected to anything.
    pub fn same_component(&self, a: Point, b: Point) -> bool {
        match (self.idx(a), self.idx(b)) {
            (Some(ai), Some(bi)) => self.same_component_idx(ai, bi),
            _ => false,
        }
    }

    #[inline]
    pub(crate) fn same_component_idx(&self, a: usize, b: usize) -> bool {
        if !self.connectivity_marked {
            return true;
        }
        let ca = self.components[a];
        ca != 0 && ca == self.components[b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vertical wall at `x` leaving only the cells in `gaps` open.
    fn wall(m: &mut NavMap, x: i32, gaps: &[i32]) {
        for y in 0..m.height() {
            if !gaps.contains(&y) {
                m.add_block(Point::new(x, y)).unwrap();
            }
        }
    }

    #[test]
    fn unmarked_map_rejects_nothing() {
        let m = NavMap::new(4, 4).unwrap();
        assert!(!m.is_connectivity_marked());
        assert!(m.same_component(Point::new(0, 0), Point::new(3, 3)));
        assert_eq!(m.connected_id(Point::new(1, 1)), Ok(0));
        assert!(!m.same_component(Point::new(0, 0), Point::new(4, 0)));
    }

    #[test]
    fn split_map_has_two_components() {
        let mut m = NavMap::new(5, 5).unwrap();
        wall(&mut m, 2, &[]);
        m.mark_connected();
        assert!(m.is_connectivity_marked());
        assert_eq!(m.connected_id(Point::new(0, 0)), Ok(1));
        assert_eq!(m.connected_id(Point::new(3, 0)), Ok(2));
        assert_eq!(m.connected_id(Point::new(2, 2)), Ok(0));
        assert!(m.same_component(Point::new(0, 0), Point::new(1, 4)));
        assert!(!m.same_component(Point::new(0, 0), Point::new(4, 4)));
        // Blocked cells are in no component, not even their own.
        assert!(!m.same_component(Point::new(2, 2), Point::new(2, 2)));
    }

    #[test]
    fn gap_joins_components() {
        let mut m = NavMap::new(5, 5).unwrap();
        wall(&mut m, 2, &[4]);
        m.mark_connected();
        assert!(m.same_component(Point::new(0, 0), Point::new(4, 0)));
        assert_eq!(m.connected_id(Point::new(4, 0)), Ok(1));
    }

    #[test]
    fn diagonal_contact_is_not_connectivity() {
        // . #
        // # .
        let mut m = NavMap::with_obstacles(2, 2, &[Point::new(1, 0), Point::new(0, 1)]).unwrap();
        m.mark_connected();
        assert!(!m.same_component(Point::new(0, 0), Point::new(1, 1)));
    }

    #[test]
    fn labels_are_stale_until_rebuilt() {
        let mut m = NavMap::new(5, 5).unwrap();
        wall(&mut m, 2, &[]);
        m.mark_connected();
        m.clear_block(Point::new(2, 0)).unwrap();
        assert!(!m.same_component(Point::new(0, 0), Point::new(4, 0)));
        m.mark_connected();
        assert!(m.same_component(Point::new(0, 0), Point::new(4, 0)));
    }

    #[test]
    fn out_of_map_id_is_error() {
        let m = NavMap::new(2, 2).unwrap();
        assert_eq!(
            m.connected_id(Point::new(2, 0)),
            Err(NavError::OutOfBounds(Point::new(2, 0)))
        );
    }
}
