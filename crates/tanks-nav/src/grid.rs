use core::ops::{Index, IndexMut};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::geometry::Aabb;
use crate::tile::{Color, Direction, Edge, Tile, TileId};
use crate::{GridError, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest tile count whose storage fits in a single allocation.
const MAX_TILES: usize = isize::MAX as usize / core::mem::size_of::<Tile>();

/// Edge-loading policy, chosen once when the grid is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Topology {
    /// N/S/E/W edges.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "four-directional"))]
    FourDirectional,
    /// N/S/E/W plus the four diagonals.
    #[cfg_attr(feature = "serde", serde(rename = "eight-directional"))]
    EightDirectional,
    /// N/S/E/W, but a tile only gains an edge toward a neighbour that has no
    /// outgoing edges yet. Tiles are processed row-major (row 0 first, columns
    /// ascending) and directions in N, S, E, W order.
    #[cfg_attr(feature = "serde", serde(rename = "one-way"))]
    OneWay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Extent of every tile.
    pub tile_size: Vec2,
    /// World-space centre of tile `(0, 0)`.
    pub origin: Vec2,
    /// Percent chance (0..=100) that a generated tile is a wall.
    pub obstacle_probability: u8,
    pub topology: Topology,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            cols: 25,
            tile_size: Vec2::new(25.0, 25.0),
            origin: Vec2::new(200.0, 75.0),
            obstacle_probability: 30,
            topology: Topology::FourDirectional,
        }
    }
}

impl GridConfig {
    /// Unit-sized tiles centred on integer coordinates, no random walls.
    pub fn unit(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            tile_size: Vec2::ONE,
            origin: Vec2::ZERO,
            obstacle_probability: 0,
            topology: Topology::FourDirectional,
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// `rows * cols`, or `None` on overflow.
    pub fn tile_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::Empty {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.tile_count().map_or(true, |n| n > MAX_TILES) {
            return Err(GridError::TooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let size = self.tile_size;
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return Err(GridError::TileSize {
                x: size.x,
                y: size.y,
            });
        }
        if !self.origin.is_finite() {
            return Err(GridError::Origin);
        }
        if self.obstacle_probability > 100 {
            return Err(GridError::ObstacleProbability(self.obstacle_probability));
        }
        Ok(())
    }
}

/// Fixed-size grid of tiles. Owns every tile and, through them, every edge.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tile_size: Vec2,
    origin: Vec2,
    topology: Topology,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build a grid where each tile is independently a wall with
    /// `config.obstacle_probability` percent chance. Draws happen in row-major order,
    /// so a seeded RNG reproduces the layout.
    pub fn generate<R: Rng + ?Sized>(config: &GridConfig, rng: &mut R) -> Result<Self, GridError> {
        config.validate()?;
        let p = config.obstacle_probability;
        Self::from_walkability(config, |_, _| rng.gen_range(0..100u8) >= p)
    }

    /// Build a grid with walkability decided by `walkable(row, col)`.
    ///
    /// `config.obstacle_probability` is ignored.
    pub fn from_walkability(
        config: &GridConfig,
        mut walkable: impl FnMut(usize, usize) -> bool,
    ) -> Result<Self, GridError> {
        config.validate()?;

        let mut tiles = Vec::with_capacity(config.rows * config.cols);
        for row in 0..config.rows {
            for col in 0..config.cols {
                let id = TileId(tiles.len());
                let position = config.origin
                    + Vec2::new(
                        col as f32 * config.tile_size.x,
                        row as f32 * config.tile_size.y,
                    );
                let mut tile = Tile::new(id, row, col, position, config.tile_size);
                if !walkable(row, col) {
                    tile.set_walkable(false);
                }
                tiles.push(tile);
            }
        }

        let mut grid = Self {
            rows: config.rows,
            cols: config.cols,
            tile_size: config.tile_size,
            origin: config.origin,
            topology: config.topology,
            tiles,
        };
        grid.load_edges();

        tracing::debug!(
            rows = grid.rows,
            cols = grid.cols,
            topology = ?grid.topology,
            walls = grid.tiles.iter().filter(|t| !t.walkable).count(),
            edges = grid.edge_count(),
            "grid built"
        );
        Ok(grid)
    }

    /// Parse a layout where `#` marks a wall and any other character an open tile.
    ///
    /// The first non-empty line is row 0. Tiles are unit-sized with tile `(0, 0)`
    /// centred on the world origin.
    pub fn from_ascii(layout: &str, topology: Topology) -> Result<Self, GridError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let mut walls = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let actual = line.chars().count();
            if actual != cols {
                return Err(GridError::RaggedLayout {
                    row,
                    expected: cols,
                    actual,
                });
            }
            walls.extend(line.chars().map(|c| c == '#'));
        }

        let config = GridConfig::unit(lines.len(), cols).with_topology(topology);
        Self::from_walkability(&config, |row, col| !walls[row * cols + col])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    pub fn contains(&self, id: TileId) -> bool {
        id.0 < self.tiles.len()
    }

    pub fn edge_count(&self) -> usize {
        self.tiles.iter().map(|t| t.edges.len()).sum()
    }

    pub fn tile_at(&self, row: usize, col: usize) -> Option<TileId> {
        if row < self.rows && col < self.cols {
            Some(TileId(row * self.cols + col))
        } else {
            None
        }
    }

    /// World-space rectangle covered by the grid's tiles.
    pub fn bounds(&self) -> Aabb {
        let half = self.tile_size * 0.5;
        let far = Vec2::new(
            (self.cols - 1) as f32 * self.tile_size.x,
            (self.rows - 1) as f32 * self.tile_size.y,
        );
        Aabb::new(self.origin - half, self.origin + far + half)
    }

    /// Tile whose centre is closest to `position`, or `None` when the position lies
    /// outside the grid.
    pub fn nearest_tile(&self, position: Vec2) -> Option<TileId> {
        if !position.is_finite() || !self.bounds().contains(position) {
            return None;
        }
        let local = position - self.origin;
        let col = (local.x / self.tile_size.x).round().clamp(0.0, (self.cols - 1) as f32);
        let row = (local.y / self.tile_size.y).round().clamp(0.0, (self.rows - 1) as f32);
        self.tile_at(row as usize, col as usize)
    }

    pub fn random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> TileId {
        TileId(rng.gen_range(0..self.tiles.len()))
    }

    /// Uniformly chosen walkable tile, or `None` if every tile is a wall.
    pub fn random_walkable_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<TileId> {
        let open: Vec<TileId> = self
            .tiles
            .iter()
            .filter(|t| t.walkable)
            .map(|t| t.id)
            .collect();
        open.choose(rng).copied()
    }

    /// Toggle a tile between open and wall. Out-of-range coordinates are ignored.
    ///
    /// Edges are left as built; non-walkable neighbours are skipped during search.
    pub fn set_walkable(&mut self, row: usize, col: usize, walkable: bool) {
        if let Some(id) = self.tile_at(row, col) {
            self.tiles[id.0].set_walkable(walkable);
        }
    }

    pub fn set_color(&mut self, id: TileId, color: Color) {
        if let Some(tile) = self.tiles.get_mut(id.0) {
            tile.color = color;
        }
    }

    /// Clear the search state of every tile.
    pub fn reset_search(&mut self) {
        for tile in &mut self.tiles {
            tile.reset_search();
        }
    }

    fn neighbor(&self, tile: &Tile, direction: Direction) -> Option<TileId> {
        let (dr, dc) = direction.offset();
        let row = tile.row.checked_add_signed(dr as isize)?;
        let col = tile.col.checked_add_signed(dc as isize)?;
        self.tile_at(row, col)
    }

    fn load_edges(&mut self) {
        let plan = match self.topology {
            Topology::FourDirectional => self.plan_edges(&Direction::CARDINAL),
            Topology::EightDirectional => {
                let mut dirs = Direction::CARDINAL.to_vec();
                dirs.extend_from_slice(&Direction::DIAGONAL);
                self.plan_edges(&dirs)
            }
            Topology::OneWay => self.plan_one_way(),
        };

        for (tile, edges) in self.tiles.iter_mut().zip(plan) {
            tile.edges = edges;
        }
    }

    fn plan_edges(&self, directions: &[Direction]) -> Vec<Vec<Edge>> {
        self.tiles
            .iter()
            .map(|tile| {
                directions
                    .iter()
                    .filter_map(|&direction| {
                        self.neighbor(tile, direction).map(|end| Edge {
                            start: tile.id,
                            end,
                            direction,
                        })
                    })
                    .collect()
            })
            .collect()
    }

    fn plan_one_way(&self) -> Vec<Vec<Edge>> {
        let mut plan: Vec<Vec<Edge>> = vec![Vec::new(); self.tiles.len()];
        for tile in &self.tiles {
            for direction in Direction::CARDINAL {
                let Some(end) = self.neighbor(tile, direction) else {
                    continue;
                };
                if plan[end.0].is_empty() {
                    plan[tile.id.0].push(Edge {
                        start: tile.id,
                        end,
                        direction,
                    });
                }
            }
        }
        plan
    }
}

impl Index<TileId> for Grid {
    type Output = Tile;

    fn index(&self, id: TileId) -> &Tile {
        &self.tiles[id.0]
    }
}

impl IndexMut<TileId> for Grid {
    fn index_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.0]
    }
}
