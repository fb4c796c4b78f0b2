/// Tunables for a [`NavMap`](crate::NavMap).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Run the line-of-sight pass on [`find_path_by_grid`](crate::NavMap::find_path_by_grid)
    /// results. Fractional queries are always smoothed.
    pub smooth: bool,
    /// Reject queries whose endpoints lie in different connectivity
    /// components without searching. Only effective once
    /// [`mark_connected`](crate::NavMap::mark_connected) has run.
    pub connectivity_reject: bool,
    /// How far outside an obstacle corner the detour point is placed when
    /// looking for a corner waypoint.
    pub corner_offset: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            smooth: true,
            connectivity_reject: true,
            corner_offset: 0.1,
        }
    }
}
