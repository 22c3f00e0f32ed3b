use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::tile::{Color, TileId};
use crate::{Grid, Heuristic, Path, PathError};

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    /// First-discovery order of the tile; equal `f` pops the earlier discovery first.
    discovered: u64,
    tile: TileId,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.discovered.cmp(&self.discovered))
    }
}

/// A* from `start` to `goal` over the grid's edges.
///
/// Every tile's search state is reset on entry, then left describing this search
/// (scores, parents, visited flags, and a visited tint on expanded tiles) so callers
/// can inspect or draw it. A neighbour is relaxed when
/// `g(current) + weight(neighbour) + h(neighbour)` beats its current `f`. A tile has at
/// most one live open-list entry; superseded entries are skipped when popped.
pub fn find_path(
    grid: &mut Grid,
    start: TileId,
    goal: TileId,
    heuristic: Heuristic,
) -> Result<Path, PathError> {
    for id in [start, goal] {
        if !grid.contains(id) {
            return Err(PathError::InvalidTile(id));
        }
    }

    grid.reset_search();

    let mut open = BinaryHeap::new();
    let mut next_discovery: u64 = 0;

    let h0 = heuristic.estimate(&grid[start], &grid[goal]);
    let origin = &mut grid[start].search;
    origin.g_score = 0.0;
    origin.f_score = h0;
    origin.parent = Some(start);
    origin.discovered = Some(next_discovery);
    open.push(OpenNode {
        f: h0,
        discovered: next_discovery,
        tile: start,
    });
    next_discovery += 1;

    let mut expanded = 0usize;
    while let Some(node) = open.pop() {
        let current = &grid[node.tile];
        if current.search.visited || node.f != current.search.f_score {
            // Stale heap entry.
            continue;
        }

        expanded += 1;
        let g = current.search.g_score;
        let tint = node.tile != start && node.tile != goal && current.walkable;
        let current = &mut grid[node.tile];
        current.search.visited = true;
        if tint {
            current.color = Color::VISITED;
        }

        if node.tile == goal {
            break;
        }

        for i in 0..grid[node.tile].edges.len() {
            let next = grid[node.tile].edges[i].end;
            let neighbor = &grid[next];
            if neighbor.search.visited || !neighbor.walkable {
                continue;
            }

            let tentative_g = g + neighbor.weight;
            let tentative_f = tentative_g + heuristic.estimate(neighbor, &grid[goal]);
            if tentative_f >= neighbor.search.f_score {
                continue;
            }

            let state = &mut grid[next].search;
            state.parent = Some(node.tile);
            state.g_score = tentative_g;
            state.f_score = tentative_f;
            let discovered = *state.discovered.get_or_insert_with(|| {
                let seq = next_discovery;
                next_discovery += 1;
                seq
            });
            open.push(OpenNode {
                f: tentative_f,
                discovered,
                tile: next,
            });
        }
    }

    if grid[goal].search.parent.is_none() {
        tracing::debug!(?start, ?goal, expanded, "no path");
        return Err(PathError::NoSolution { start, goal });
    }

    let tiles = reconstruct(grid, start, goal).ok_or(PathError::NoSolution { start, goal })?;
    let cost = grid[goal].search.g_score;
    tracing::debug!(
        ?start,
        ?goal,
        expanded,
        len = tiles.len(),
        cost,
        "path found"
    );
    Ok(Path {
        tiles,
        cost,
        expanded,
    })
}

/// Walk parent links back from `goal` until reaching `start` by identity.
fn reconstruct(grid: &Grid, start: TileId, goal: TileId) -> Option<Vec<TileId>> {
    let mut out = vec![goal];
    let mut current = goal;
    while current != start {
        current = grid[current].search.parent?;
        out.push(current);
        if out.len() > grid.len() {
            return None;
        }
    }
    out.reverse();
    Some(out)
}
