use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Traversal weight of a tile that cannot be entered.
pub const WALL_WEIGHT: f32 = f32::INFINITY;

/// Traversal weight of an ordinary walkable tile.
pub const OPEN_WEIGHT: f32 = 1.0;

/// Index of a tile in its grid's arena (`row * cols + col`).
///
/// Ids are only meaningful for the grid that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileId(pub usize);

impl TileId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Compass direction of an edge.
///
/// North points toward increasing rows, East toward increasing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Axis-aligned directions in edge-loading order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Diagonal directions in edge-loading order.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// `(row, col)` offset of the neighbour in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (1, 0),
            Direction::South => (-1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (1, -1),
            Direction::SouthEast => (-1, 1),
            Direction::SouthWest => (-1, -1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        let (dr, dc) = self.offset();
        dr != 0 && dc != 0
    }
}

/// Directed connection between two tiles. Traversal cost is the weight of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub start: TileId,
    pub end: TileId,
    pub direction: Direction,
}

/// RGBA colour used by whatever draws the grid. Has no effect on search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);
    pub const BLUE: Self = Self([0.0, 0.0, 1.0, 1.0]);
    pub const YELLOW: Self = Self([1.0, 1.0, 0.0, 1.0]);
    pub const BROWN: Self = Self([0.501, 0.152, 0.039, 1.0]);

    /// Colour of an open tile.
    pub const OPEN: Self = Self::WHITE;
    /// Colour of a wall.
    pub const WALL: Self = Self::BROWN;
    /// Colour of a tile expanded by the last search.
    pub const VISITED: Self = Self::YELLOW;
    /// Colour of the agent's tile.
    pub const START: Self = Self::GREEN;
    /// Colour of the selected goal.
    pub const GOAL: Self = Self::RED;
}

/// Per-search bookkeeping stored on the tile and reset before every search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchState {
    pub visited: bool,
    pub g_score: f32,
    pub f_score: f32,
    pub parent: Option<TileId>,
    /// Order in which the tile first entered the open list (tie-break key).
    pub(crate) discovered: Option<u64>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            visited: false,
            g_score: f32::INFINITY,
            f_score: f32::INFINITY,
            parent: None,
            discovered: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub(crate) id: TileId,
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) position: Vec2,
    pub(crate) size: Vec2,
    pub(crate) walkable: bool,
    pub(crate) weight: f32,
    pub(crate) color: Color,
    pub(crate) edges: Vec<Edge>,
    pub(crate) search: SearchState,
}

impl Tile {
    pub(crate) fn new(id: TileId, row: usize, col: usize, position: Vec2, size: Vec2) -> Self {
        Self {
            id,
            row,
            col,
            position,
            size,
            walkable: true,
            weight: OPEN_WEIGHT,
            color: Color::OPEN,
            edges: Vec::new(),
            search: SearchState::default(),
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// World-space centre.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub(crate) fn set_walkable(&mut self, walkable: bool) {
        self.walkable = walkable;
        if walkable {
            self.weight = OPEN_WEIGHT;
            self.color = Color::OPEN;
        } else {
            self.weight = WALL_WEIGHT;
            self.color = Color::WALL;
        }
    }

    /// Clear search bookkeeping and any search tint. Walls keep their colour.
    pub(crate) fn reset_search(&mut self) {
        self.search = SearchState::default();
        if self.walkable {
            self.color = Color::OPEN;
        }
    }
}
