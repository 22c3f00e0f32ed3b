use rand::rngs::StdRng;
use rand::SeedableRng;
use tanks_nav::{Color, Grid, GridConfig, Heuristic, PathError, PathRequest, Topology, Vec2};

fn demo_grid() -> Grid {
    // Default demo geometry (25px tiles from (200, 75)) with a vertical wall.
    let config = GridConfig {
        rows: 6,
        cols: 6,
        ..GridConfig::default()
    };
    Grid::from_walkability(&config, |row, col| !(col == 3 && row < 5)).expect("grid")
}

#[test]
fn navigate_resolves_world_positions_to_tiles() {
    let mut grid = demo_grid();
    let from = Vec2::new(203.0, 78.0);
    let to = Vec2::new(322.0, 73.0);

    let path = grid
        .navigate(from, to, &PathRequest::default())
        .expect("path around the wall");

    assert_eq!(path.start(), grid.tile_at(0, 0));
    assert_eq!(path.goal(), grid.tile_at(0, 5));
    // World-unit heuristics overestimate on 25px tiles, so only a lower bound holds.
    assert!(path.cost >= 15.0);
    assert_eq!(path.cost, (path.len() - 1) as f32);
    assert!(path.tiles.iter().all(|&id| grid[id].is_walkable()));

    let points = path.positions(&grid);
    assert_eq!(points.first().copied(), Some(Vec2::new(200.0, 75.0)));
    assert_eq!(points.last().copied(), Some(Vec2::new(325.0, 75.0)));

    assert_eq!(grid[path.start().unwrap()].color(), Color::START);
    assert_eq!(grid[path.goal().unwrap()].color(), Color::GOAL);
}

#[test]
fn navigate_rejects_positions_outside_the_grid() {
    let mut grid = demo_grid();

    assert_eq!(
        grid.navigate(Vec2::ZERO, Vec2::new(210.0, 80.0), &PathRequest::default()),
        Err(PathError::OutsideGrid)
    );
    assert_eq!(
        grid.navigate(Vec2::new(210.0, 80.0), Vec2::new(1e6, 80.0), &PathRequest::default()),
        Err(PathError::OutsideGrid)
    );
}

#[test]
fn smoothing_request_shortens_waypoints() {
    let mut grid = demo_grid();
    let (start, goal) = (grid.tile_at(0, 0).unwrap(), grid.tile_at(0, 5).unwrap());

    let raw = grid
        .navigate_tiles(start, goal, &PathRequest::default())
        .expect("raw path");
    let smoothed = grid
        .navigate_tiles(
            start,
            goal,
            &PathRequest {
                heuristic: Heuristic::Distance,
                smooth: true,
            },
        )
        .expect("smoothed path");

    assert!(smoothed.len() < raw.len());
    assert_eq!(smoothed.start(), raw.start());
    assert_eq!(smoothed.goal(), raw.goal());
    assert_eq!(smoothed.cost, raw.cost);
}

#[test]
fn auto_run_goals_are_reachable_or_reported() {
    let config = GridConfig::default().with_topology(Topology::EightDirectional);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut grid = Grid::generate(&config, &mut rng).expect("grid");
    let mut agent = grid.random_walkable_tile(&mut rng).expect("open tile");
    let request = PathRequest {
        heuristic: Heuristic::Diagonal,
        smooth: true,
    };

    for _ in 0..20 {
        let goal = grid.random_walkable_tile(&mut rng).expect("open tile");
        match grid.navigate_tiles(agent, goal, &request) {
            Ok(path) => {
                assert_eq!(path.goal(), Some(goal));
                agent = goal;
            }
            Err(PathError::NoSolution { start, goal: g }) => {
                assert_eq!((start, g), (agent, goal));
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
