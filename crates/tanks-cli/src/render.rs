//! Text view of the grid's colour hook, one character per tile.

use tanks_nav::{Color, Grid, Path};

pub const WALL: char = '#';
pub const OPEN: char = '.';
pub const VISITED: char = 'o';
pub const ROUTE: char = '*';
pub const START: char = 'S';
pub const GOAL: char = 'G';

fn glyph(color: Color) -> char {
    [
        (Color::WALL, WALL),
        (Color::VISITED, VISITED),
        (Color::START, START),
        (Color::GOAL, GOAL),
    ]
    .into_iter()
    .find_map(|(c, g)| (c == color).then_some(g))
    .unwrap_or(OPEN)
}

/// Row 0 is printed first. Tiles on `path` (other than its endpoints) are drawn as
/// [`ROUTE`] over whatever colour they carry.
pub fn render(grid: &Grid, path: Option<&Path>) -> String {
    let mut cells: Vec<char> = grid.tiles().iter().map(|t| glyph(t.color())).collect();

    if let Some(path) = path {
        let inner = path.tiles.len().saturating_sub(2);
        for id in path.tiles.iter().skip(1).take(inner) {
            if let Some(cell) = cells.get_mut(id.index()) {
                *cell = ROUTE;
            }
        }
    }

    let mut out = String::with_capacity(grid.len() + grid.rows());
    for row in cells.chunks(grid.cols()) {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanks_nav::{PathRequest, Topology};

    #[test]
    fn renders_walls_and_route() {
        let mut grid = Grid::from_ascii("...\n.#.\n...", Topology::FourDirectional).expect("grid");
        let start = grid.tile_at(0, 0).unwrap();
        let goal = grid.tile_at(0, 2).unwrap();
        let path = grid
            .navigate_tiles(start, goal, &PathRequest::default())
            .expect("path");

        let text = render(&grid, Some(&path));
        assert_eq!(text, "S*G\n.#.\n...\n");
    }

    #[test]
    fn untouched_grid_renders_plain() {
        let grid = Grid::from_ascii("#..\n..#", Topology::FourDirectional).expect("grid");
        assert_eq!(render(&grid, None), "#..\n..#\n");
    }
}
