//! Tanks CLI - headless grid pathfinding demo.
//!
//! - `tanks run` - auto-run: the tank keeps picking random goals
//! - `tanks path` - single query between two world positions
//! - `tanks show` - dump the generated grid

mod config;
mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{fmt, EnvFilter};

use config::DemoConfig;
use tanks_nav::{Grid, Heuristic, Path, PathError, TileId, Topology, Vec2};

#[derive(Parser)]
#[command(name = "tanks")]
#[command(about = "Tank pathfinding demo on a procedurally generated grid", version)]
struct Cli {
    /// Config file (YAML)
    #[arg(short, long, global = true, default_value = "tanks.yaml")]
    config: PathBuf,

    /// RNG seed for the obstacle layout and goal picks
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Edge topology
    #[arg(long, global = true, value_enum)]
    topology: Option<TopologyArg>,

    /// Search heuristic
    #[arg(long, global = true, value_enum)]
    heuristic: Option<HeuristicArg>,

    /// Smooth paths with line-of-sight checks
    #[arg(long, global = true)]
    smooth: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the tank between random goals
    Run {
        /// Number of goals to reach
        #[arg(long)]
        goals: Option<usize>,

        /// Print the grid after every path
        #[arg(long)]
        render: bool,
    },

    /// Find a path between two world positions
    Path {
        /// Start position as `x,y`
        #[arg(long, value_parser = parse_point)]
        from: Vec2,

        /// Goal position as `x,y`
        #[arg(long, value_parser = parse_point)]
        to: Vec2,

        /// Print the grid with the path
        #[arg(long)]
        render: bool,
    },

    /// Print the generated grid
    Show,
}

#[derive(Clone, Copy, ValueEnum)]
enum TopologyArg {
    Four,
    Eight,
    OneWay,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Four => Topology::FourDirectional,
            TopologyArg::Eight => Topology::EightDirectional,
            TopologyArg::OneWay => Topology::OneWay,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum HeuristicArg {
    Distance,
    Manhattan,
    Diagonal,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Distance => Heuristic::Distance,
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Diagonal => Heuristic::Diagonal,
        }
    }
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let mut config = DemoConfig::load_or_default(&cli.config)?;
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(topology) = cli.topology {
        config.grid.topology = topology.into();
    }
    if let Some(heuristic) = cli.heuristic {
        config.search.heuristic = heuristic.into();
    }
    if cli.smooth {
        config.search.smooth = true;
    }

    let Some(command) = cli.command else {
        println!("Tanks - grid pathfinding demo");
        println!();
        println!("Usage: tanks <COMMAND>");
        println!();
        println!("Commands:");
        println!("  run   Drive the tank between random goals");
        println!("  path  Find a path between two world positions");
        println!("  show  Print the generated grid");
        println!();
        println!("Run 'tanks --help' for more information.");
        return Ok(());
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::generate(&config.grid, &mut rng).context("Failed to build grid")?;
    tracing::info!(
        seed,
        rows = grid.rows(),
        cols = grid.cols(),
        topology = ?grid.topology(),
        "Grid generated"
    );

    match command {
        Commands::Run { goals, render } => {
            let goals = goals.unwrap_or(config.auto_run.goals);
            auto_run(&mut grid, &mut rng, &config, goals, render)
        }
        Commands::Path { from, to, render } => find_once(&mut grid, &config, from, to, render),
        Commands::Show => {
            print!("{}", render::render(&grid, None));
            Ok(())
        }
    }
}

fn coords(grid: &Grid, id: TileId) -> (usize, usize) {
    (grid[id].row(), grid[id].col())
}

fn log_path(grid: &Grid, path: &Path) {
    let (Some(start), Some(goal)) = (path.start(), path.goal()) else {
        return;
    };
    tracing::info!(
        start = ?coords(grid, start),
        goal = ?coords(grid, goal),
        waypoints = path.len(),
        cost = path.cost,
        expanded = path.expanded,
        "Path found"
    );
}

fn auto_run(
    grid: &mut Grid,
    rng: &mut StdRng,
    config: &DemoConfig,
    goals: usize,
    render: bool,
) -> Result<()> {
    let Some(mut agent) = grid.random_walkable_tile(rng) else {
        bail!("Grid has no walkable tiles");
    };
    tracing::info!(tile = ?coords(grid, agent), "Tank placed");

    let mut reached = 0;
    let mut failures = 0;
    while reached < goals {
        let Some(goal) = grid.random_walkable_tile(rng) else {
            break;
        };

        match grid.navigate_tiles(agent, goal, &config.search) {
            Ok(path) => {
                log_path(grid, &path);
                if render {
                    print!("{}", render::render(grid, Some(&path)));
                    println!();
                }
                // Movement is out of scope: the tank arrives instantly.
                agent = goal;
                reached += 1;
                failures = 0;
            }
            Err(PathError::NoSolution { .. }) => {
                failures += 1;
                tracing::warn!(
                    goal = ?coords(grid, goal),
                    failures,
                    "No path to goal, picking another"
                );
                if failures >= config.auto_run.max_failures {
                    tracing::warn!(
                        tile = ?coords(grid, agent),
                        "Tank appears boxed in, stopping"
                    );
                    break;
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(reached, requested = goals, "Auto-run finished");
    Ok(())
}

fn find_once(grid: &mut Grid, config: &DemoConfig, from: Vec2, to: Vec2, render: bool) -> Result<()> {
    let path = match grid.navigate(from, to, &config.search) {
        Ok(path) => path,
        Err(PathError::NoSolution { .. }) => {
            tracing::warn!(?from, ?to, "No path between positions");
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Cannot query ({from:?}) -> ({to:?})"));
        }
    };

    log_path(grid, &path);
    for point in path.positions(grid) {
        println!("{:.1},{:.1}", point.x, point.y);
    }
    if render {
        print!("{}", render::render(grid, Some(&path)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("200,75").unwrap(), Vec2::new(200.0, 75.0));
        assert_eq!(parse_point(" 1.5 , -2 ").unwrap(), Vec2::new(1.5, -2.0));
        assert!(parse_point("200").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn cli_overrides_parse() {
        let cli = Cli::try_parse_from([
            "tanks",
            "--seed",
            "5",
            "--topology",
            "one-way",
            "--heuristic",
            "manhattan",
            "path",
            "--from",
            "200,75",
            "--to",
            "300,100",
        ])
        .expect("args");

        assert_eq!(cli.seed, Some(5));
        assert_eq!(cli.topology.map(Topology::from), Some(Topology::OneWay));
        assert_eq!(cli.heuristic.map(Heuristic::from), Some(Heuristic::Manhattan));
        assert!(matches!(cli.command, Some(Commands::Path { .. })));
    }

    #[test]
    fn auto_run_reaches_goals_on_open_grid() {
        let mut config = DemoConfig::default();
        config.grid.obstacle_probability = 0;
        config.search.smooth = true;
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid = Grid::generate(&config.grid, &mut rng).expect("grid");

        auto_run(&mut grid, &mut rng, &config, 5, false).expect("auto-run");
    }

    #[test]
    fn auto_run_fails_without_walkable_tiles() {
        let mut config = DemoConfig::default();
        config.grid.obstacle_probability = 100;
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid = Grid::generate(&config.grid, &mut rng).expect("grid");

        assert!(auto_run(&mut grid, &mut rng, &config, 5, false).is_err());
    }
}
