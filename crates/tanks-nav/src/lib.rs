//! Grid graph navigation: tile/edge topology, A* search, and line-of-sight smoothing.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod astar;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod heuristic;
pub mod math;
pub mod navigator;
pub mod smooth;
pub mod tile;

pub use astar::find_path;
pub use error::{GridError, PathError};
pub use geometry::{ray_aabb_intersect, ray_plane_intersect, Aabb, Plane, Ray, RayInterval};
pub use grid::{Grid, GridConfig, Topology};
pub use heuristic::Heuristic;
pub use math::Vec2;
pub use navigator::{Path, PathRequest};
pub use smooth::{has_straight_line, smooth, tiles_in_line};
pub use tile::{Color, Direction, Edge, SearchState, Tile, TileId, OPEN_WEIGHT, WALL_WEIGHT};
