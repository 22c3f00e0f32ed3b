use crate::geometry::{ray_aabb_intersect, Aabb, Ray};
use crate::tile::TileId;
use crate::Grid;

/// Greedy string-pulling.
///
/// From each kept tile, the tile after it is dropped while the one two ahead is
/// directly visible; otherwise the cursor moves on. Passes repeat until nothing is
/// dropped, so the result is a fixed point: smoothing it again returns it unchanged.
/// The result is a subsequence of `path` with the same first and last tiles. Paths
/// shorter than three tiles are returned as-is.
pub fn smooth(path: &[TileId], grid: &Grid) -> Vec<TileId> {
    let mut out = path.to_vec();
    while pull_pass(&mut out, grid) {}
    out
}

fn pull_pass(path: &mut Vec<TileId>, grid: &Grid) -> bool {
    let mut removed = false;
    let mut start = 0;
    while start + 2 < path.len() {
        if has_straight_line(grid, path[start], path[start + 2]) {
            path.remove(start + 1);
            removed = true;
        } else {
            start += 1;
        }
    }
    removed
}

/// Overlap below which a segment is treated as sliding along a wall's edge or corner
/// rather than passing through it.
const GRAZE_EPSILON: f32 = 1e-4;

/// Relative tolerance for two grid-line crossings to count as one corner crossing.
const CORNER_EPSILON: f32 = 1e-6;

/// Whether the segment between two tile centres clears every wall it crosses.
///
/// Every tile the segment passes through is visited; a wall among them blocks the
/// line when the segment overlaps its box by more than a graze.
pub fn has_straight_line(grid: &Grid, start: TileId, goal: TileId) -> bool {
    let (Some(from), Some(to)) = (grid.get(start), grid.get(goal)) else {
        return false;
    };
    let Some(ray) = Ray::between(from.position(), to.position()) else {
        return true;
    };

    tiles_in_line(grid, &ray, goal)
        .into_iter()
        .map(|id| &grid[id])
        .filter(|tile| !tile.is_walkable())
        .all(|wall| {
            ray_aabb_intersect(&ray, &Aabb::from_tile(wall))
                .map_or(true, |hit| hit.exit - hit.enter <= GRAZE_EPSILON)
        })
}

/// Distinct tiles the ray passes through on its way to `goal`, in walk order.
///
/// Cell boundaries are crossed one at a time (Amanatides-Woo); a crossing exactly
/// through a tile corner steps diagonally without touching the two side tiles. The
/// ray origin's own tile is not included, and `goal` is always last.
pub fn tiles_in_line(grid: &Grid, ray: &Ray, goal: TileId) -> Vec<TileId> {
    let Some(end) = grid.get(goal) else {
        return Vec::new();
    };
    let target = (end.row() as i64, end.col() as i64);

    let size = grid.tile_size();
    let local = ray.origin - grid.origin();
    let (ux, uy) = (local.x / size.x + 0.5, local.y / size.y + 0.5);
    let (dx, dy) = (ray.direction.x / size.x, ray.direction.y / size.y);

    let mut col = ux.floor() as i64;
    let mut row = uy.floor() as i64;
    let (step_col, mut next_x, delta_x) = axis(ux, dx, col);
    let (step_row, mut next_y, delta_y) = axis(uy, dy, row);

    let mut out = Vec::new();
    let max_steps = (target.0 - row).unsigned_abs() + (target.1 - col).unsigned_abs();
    for _ in 0..max_steps {
        if (row, col) == target {
            break;
        }
        let gap = next_x - next_y;
        if gap.is_finite() && gap.abs() <= CORNER_EPSILON * next_x.max(next_y) {
            col += step_col;
            row += step_row;
            next_x += delta_x;
            next_y += delta_y;
        } else if gap < 0.0 {
            col += step_col;
            next_x += delta_x;
        } else {
            row += step_row;
            next_y += delta_y;
        }

        let tile = usize::try_from(row)
            .ok()
            .zip(usize::try_from(col).ok())
            .and_then(|(r, c)| grid.tile_at(r, c));
        if let Some(id) = tile {
            if id != goal && !out.contains(&id) {
                out.push(id);
            }
        }
    }

    out.push(goal);
    out
}

/// Per-axis walk setup in tile units: step sign, ray distance to the first cell
/// boundary, and ray distance between boundaries.
fn axis(start: f32, direction: f32, cell: i64) -> (i64, f32, f32) {
    if direction > 0.0 {
        (1, (cell as f32 + 1.0 - start) / direction, 1.0 / direction)
    } else if direction < 0.0 {
        (-1, (start - cell as f32) / -direction, 1.0 / -direction)
    } else {
        (0, f32::INFINITY, f32::INFINITY)
    }
}
