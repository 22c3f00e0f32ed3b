use crate::tile::{Color, TileId};
use crate::{find_path, smooth, Grid, Heuristic, PathError, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered tiles from start to goal, both inclusive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    pub tiles: Vec<TileId>,
    /// Summed weight of every tile entered after the start, along the searched route.
    /// Smoothing drops waypoints but leaves this unchanged.
    pub cost: f32,
    /// Tiles expanded by the search.
    pub expanded: usize,
}

impl Path {
    pub fn new(tiles: Vec<TileId>) -> Self {
        Self {
            tiles,
            cost: 0.0,
            expanded: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn start(&self) -> Option<TileId> {
        self.tiles.first().copied()
    }

    pub fn goal(&self) -> Option<TileId> {
        self.tiles.last().copied()
    }

    /// Tile centres in path order, for an agent to follow.
    pub fn positions(&self, grid: &Grid) -> Vec<Vec2> {
        self.tiles
            .iter()
            .filter_map(|&id| grid.get(id))
            .map(|tile| tile.position())
            .collect()
    }

    /// Replace the waypoints with their string-pulled subsequence.
    pub fn smooth(&mut self, grid: &Grid) {
        self.tiles = smooth(&self.tiles, grid);
    }
}

/// Options for a single goal-selection query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathRequest {
    pub heuristic: Heuristic,
    /// Run line-of-sight smoothing on the search result.
    pub smooth: bool,
}

impl Grid {
    /// Resolve world positions to their nearest tiles and search between them.
    ///
    /// On success the start tile is tinted [`Color::START`] and the goal
    /// [`Color::GOAL`].
    pub fn navigate(
        &mut self,
        from: Vec2,
        to: Vec2,
        request: &PathRequest,
    ) -> Result<Path, PathError> {
        let start = self.nearest_tile(from).ok_or(PathError::OutsideGrid)?;
        let goal = self.nearest_tile(to).ok_or(PathError::OutsideGrid)?;
        self.navigate_tiles(start, goal, request)
    }

    /// Search between two tiles, smoothing if requested.
    pub fn navigate_tiles(
        &mut self,
        start: TileId,
        goal: TileId,
        request: &PathRequest,
    ) -> Result<Path, PathError> {
        let mut path = find_path(self, start, goal, request.heuristic)?;
        if request.smooth {
            let before = path.len();
            path.smooth(self);
            tracing::debug!(before, after = path.len(), "path smoothed");
        }
        self.set_color(start, Color::START);
        self.set_color(goal, Color::GOAL);
        Ok(path)
    }
}
