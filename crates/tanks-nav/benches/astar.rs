use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tanks_nav::{find_path, smooth, Grid, GridConfig, Heuristic, TileId, Topology};

fn seeded_grid(size: usize, topology: Topology) -> (Grid, TileId, TileId) {
    let config = GridConfig {
        obstacle_probability: 20,
        ..GridConfig::unit(size, size).with_topology(topology)
    };
    let mut rng = StdRng::seed_from_u64(0x7a_4b);
    let mut grid = Grid::generate(&config, &mut rng).expect("grid");

    // Keep the corners open so the query is comparable across sizes.
    grid.set_walkable(0, 0, true);
    grid.set_walkable(size - 1, size - 1, true);
    let start = grid.tile_at(0, 0).expect("tile");
    let goal = grid.tile_at(size - 1, size - 1).expect("tile");
    (grid, start, goal)
}

fn bench_astar(c: &mut Criterion) {
    let mut group = c.benchmark_group("tanks-nav/astar");

    for &n in &[25usize, 64, 128] {
        for topology in [Topology::FourDirectional, Topology::EightDirectional] {
            let (mut grid, start, goal) = seeded_grid(n, topology);
            let heuristic = match topology {
                Topology::EightDirectional => Heuristic::Diagonal,
                _ => Heuristic::Distance,
            };
            group.bench_with_input(
                BenchmarkId::new(format!("{topology:?}"), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        let result = find_path(&mut grid, start, goal, heuristic);
                        black_box(result.map(|p| p.len()).ok());
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_smooth(c: &mut Criterion) {
    let (mut grid, start, goal) = seeded_grid(64, Topology::FourDirectional);
    let Ok(path) = find_path(&mut grid, start, goal, Heuristic::Distance) else {
        return;
    };

    c.bench_function("tanks-nav/smooth/64", |b| {
        b.iter(|| black_box(smooth(&path.tiles, &grid).len()))
    });
}

criterion_group!(benches, bench_astar, bench_smooth);
criterion_main!(benches);
